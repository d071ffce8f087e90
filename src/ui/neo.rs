//! Near-Earth object tracker
//!
//! Cards for every object approaching on the configured date, an optional
//! miss-distance graph and the "premium" fields (discovery date, orbital
//! period) behind a toggle.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::feeds::NearEarthObject;

use super::widgets::Sparkline;
use super::{centered_rect, feed_content, render_centered_message, search_line, Palette};

pub fn render(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let view = &app.neo_view;
    let graph_height = if view.show_graph { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Controls
            Constraint::Length(graph_height), // Graph
            Constraint::Min(3),               // Cards
        ])
        .split(area);

    render_controls(frame, app, palette, chunks[0]);

    let block = Block::default()
        .title(" ☄ Near-Earth Objects ")
        .borders(Borders::ALL)
        .border_style(palette.border());
    let inner = block.inner(chunks[2]);
    frame.render_widget(block, chunks[2]);

    let Some((list_area, _)) = feed_content(frame, inner, &app.neo, palette, "NEO data") else {
        return;
    };

    let objects = app.visible_neos();
    if view.show_graph {
        render_graph(frame, &objects, view.list.selected, palette, chunks[1]);
    }

    if objects.is_empty() {
        let text = if view.list.query.search.is_empty() {
            "No NEO data available for today."
        } else {
            "No objects match your search."
        };
        render_centered_message(frame, list_area, text, palette.muted());
        return;
    }

    let items: Vec<ListItem> = objects
        .iter()
        .enumerate()
        .map(|(i, neo)| card(neo, i == view.list.selected, view.premium, palette))
        .collect();
    let mut state = ListState::default().with_selected(Some(view.list.selected));
    frame.render_stateful_widget(List::new(items), list_area, &mut state);

    if let Some(detail) = &view.detail {
        render_detail(frame, detail, palette);
    }
}

fn render_controls(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let view = &app.neo_view;
    let on_off = |on: bool| if on { "on" } else { "off" };
    let lines = vec![
        Line::from(vec![
            Span::styled("Close approaches on ", palette.muted()),
            Span::styled(app.neo_date.to_string(), Style::default().fg(palette.text)),
            Span::styled("  │  Premium ", palette.muted()),
            Span::styled(on_off(view.premium), palette.key()),
            Span::styled("  │  Graph ", palette.muted()),
            Span::styled(on_off(view.show_graph), palette.key()),
            Span::styled("  │  Refresh every ", palette.muted()),
            Span::styled(interval_label(view.interval_secs), palette.key()),
        ]),
        search_line(&view.list, palette),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// "30s", "1m", "3m"
fn interval_label(secs: u64) -> String {
    if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{secs}s")
    }
}

fn render_graph(
    frame: &mut Frame,
    objects: &[&NearEarthObject],
    selected: usize,
    palette: &Palette,
    area: Rect,
) {
    let distances: Vec<f64> = objects
        .iter()
        .map(|neo| {
            neo.first_approach()
                .map_or(0.0, |approach| approach.miss_distance.kilometers)
        })
        .collect();

    let block = Block::default()
        .title(" Miss distance (km) ")
        .borders(Borders::ALL)
        .border_style(palette.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sparkline = Sparkline::auto(&distances)
        .style(Style::default().fg(palette.accent))
        .marker(selected)
        .marker_style(Style::default().fg(palette.key));
    frame.render_widget(sparkline, inner);
}

fn card(neo: &NearEarthObject, selected: bool, premium: bool, palette: &Palette) -> ListItem<'static> {
    let cursor = if selected { "\u{25B8} " } else { "  " };
    let name_style = if selected {
        palette.selected()
    } else {
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD)
    };

    let mut title = vec![
        Span::styled(cursor, name_style),
        Span::styled(neo.name.clone(), name_style),
    ];
    if neo.is_potentially_hazardous_asteroid {
        title.push(Span::styled("  ⚠ hazardous", Style::default().fg(palette.error)));
    }

    let mut lines = vec![
        Line::from(title),
        Line::from(vec![
            Span::styled("    Approach ", palette.muted()),
            Span::raw(neo.approach_date_display()),
            Span::styled("  Size ", palette.muted()),
            Span::raw(neo.size_display()),
        ]),
        Line::from(vec![
            Span::styled("    Miss ", palette.muted()),
            Span::raw(neo.miss_distance_display()),
            Span::styled("  Velocity ", palette.muted()),
            Span::raw(neo.velocity_display()),
            Span::styled("  Hazardous ", palette.muted()),
            Span::raw(neo.hazardous_display()),
        ]),
    ];
    if premium {
        lines.push(Line::from(vec![
            Span::styled("    Discovered ", palette.muted()),
            Span::raw(neo.discovery_date_display()),
            Span::styled("  Orbital period ", palette.muted()),
            Span::raw(neo.orbital_period_display()),
        ]));
    }
    ListItem::new(lines)
}

fn render_detail(frame: &mut Frame, neo: &NearEarthObject, palette: &Palette) {
    let area = centered_rect(64, 14, frame.area());
    frame.render_widget(Clear, area);

    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<16}", label), palette.muted()),
            Span::raw(value),
        ])
    };
    let lines = vec![
        Line::from(""),
        field("Approach", neo.approach_date_display()),
        field("Estimated size", neo.size_display()),
        field("Miss distance", neo.miss_distance_display()),
        field("Velocity", neo.velocity_display()),
        field("Hazardous", neo.hazardous_display().to_string()),
        field("Discovered", neo.discovery_date_display()),
        field("Orbital period", neo.orbital_period_display()),
        field("NASA id", neo.id.clone()),
        Line::from(""),
        Line::from(Span::styled("  Esc to close", palette.muted())),
    ];

    let block = Block::default()
        .title(format!(" {} ", neo.name))
        .borders(Borders::ALL)
        .border_style(palette.border());
    frame.render_widget(Paragraph::new(lines).block(block).style(palette.base()), area);
}
