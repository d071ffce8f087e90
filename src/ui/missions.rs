//! Mars rover missions

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::feeds::Rover;

use super::{feed_content, render_centered_message, search_line, Palette};

pub fn render(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let view = &app.mission_view;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let mut controls = search_line(view, palette);
    controls.spans.extend([
        Span::styled("   f", palette.key()),
        Span::styled(format!(" Status: {}", view.query.status.label()), palette.muted()),
        Span::styled("   s", palette.key()),
        Span::styled(
            format!(" Launch: {}", view.query.order.label()),
            palette.muted(),
        ),
    ]);
    frame.render_widget(Paragraph::new(controls), chunks[0]);

    let block = Block::default()
        .title(" 🚀 Mars Missions ")
        .borders(Borders::ALL)
        .border_style(palette.border());
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    let Some((area, _)) = feed_content(frame, inner, &app.missions, palette, "missions") else {
        return;
    };

    let rovers = app.visible_missions();
    if rovers.is_empty() {
        render_centered_message(frame, area, "No missions match your filters.", palette.muted());
        return;
    }

    let items: Vec<ListItem> = rovers
        .iter()
        .enumerate()
        .map(|(i, rover)| card(rover, i == view.selected, palette))
        .collect();
    let mut state = ListState::default().with_selected(Some(view.selected));
    frame.render_stateful_widget(List::new(items), area, &mut state);
}

fn status_color(rover: &Rover, palette: &Palette) -> Style {
    match rover.status.as_deref() {
        Some(s) if s.eq_ignore_ascii_case("active") => Style::default().fg(palette.good),
        Some(_) => Style::default().fg(palette.warning),
        None => palette.muted(),
    }
}

fn card(rover: &Rover, selected: bool, palette: &Palette) -> ListItem<'static> {
    let cursor = if selected { "\u{25B8} " } else { "  " };
    let name_style = if selected {
        palette.selected()
    } else {
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(cursor, name_style),
            Span::styled(format!("{:<14}", rover.name), name_style),
            Span::styled(rover.status_display().to_string(), status_color(rover, palette)),
        ]),
        Line::from(vec![
            Span::styled("    Launched ", palette.muted()),
            Span::raw(rover.launch_date_display()),
            Span::styled("  Landed ", palette.muted()),
            Span::raw(rover.landing_date_display()),
            Span::styled("  Photos ", palette.muted()),
            Span::raw(rover.total_photos_display()),
        ]),
    ];
    // Camera lists are long, only the selected card shows them
    if selected && !rover.cameras.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("    Cameras ", palette.muted()),
            Span::raw(rover.cameras_display()),
        ]));
    }
    lines.push(Line::from(""));
    ListItem::new(lines)
}
