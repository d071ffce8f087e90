//! Space-weather alerts with a detail modal

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::feeds::SpaceWeatherAlert;

use super::{centered_rect, feed_content, render_centered_message, search_line, Palette};

pub fn render(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let view = &app.weather_view;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let mut controls = search_line(view, palette);
    controls.spans.push(Span::styled("   s", palette.key()));
    controls.spans.push(Span::styled(
        format!(" Sort: {}", view.query.order.label()),
        palette.muted(),
    ));
    frame.render_widget(Paragraph::new(controls), chunks[0]);

    let block = Block::default()
        .title(" ☀ Space Weather Alerts ")
        .borders(Borders::ALL)
        .border_style(palette.border());
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    let Some((area, _)) =
        feed_content(frame, inner, &app.space_weather, palette, "space weather alerts")
    else {
        return;
    };

    let alerts = app.visible_alerts();
    if alerts.is_empty() {
        render_centered_message(frame, area, "No alerts found.", palette.muted());
        return;
    }

    let items: Vec<ListItem> = alerts
        .iter()
        .enumerate()
        .map(|(i, alert)| card(alert, i == view.selected, palette))
        .collect();
    let mut state = ListState::default().with_selected(Some(view.selected));
    frame.render_stateful_widget(List::new(items), area, &mut state);

    if let Some(alert) = &app.alert_detail {
        render_detail(frame, alert, palette);
    }
}

fn card(alert: &SpaceWeatherAlert, selected: bool, palette: &Palette) -> ListItem<'static> {
    let cursor = if selected { "\u{25B8} " } else { "  " };
    let type_style = if selected {
        palette.selected()
    } else {
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD)
    };

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(cursor, type_style),
            Span::styled(alert.message_type.clone(), type_style),
            Span::styled(format!("  {}", alert.issued_display()), palette.muted()),
        ]),
        Line::from(Span::raw(format!("    {}", alert.preview()))),
        Line::from(""),
    ])
}

fn render_detail(frame: &mut Frame, alert: &SpaceWeatherAlert, palette: &Palette) {
    let area = centered_rect(90, 30, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Issued  ", palette.muted()),
            Span::raw(alert.issued_display()),
        ]),
        Line::from(vec![
            Span::styled("ID      ", palette.muted()),
            Span::raw(alert.message_id.clone()),
        ]),
    ];
    if !alert.message_url.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Link    ", palette.muted()),
            Span::styled(alert.message_url.clone(), Style::default().fg(palette.accent)),
        ]));
    }
    lines.push(Line::from(""));
    lines.extend(
        alert
            .cleaned_body()
            .lines()
            .map(|line| Line::from(line.trim_end().to_string())),
    );

    let block = Block::default()
        .title(format!(" {} (Esc to close) ", alert.message_type))
        .borders(Borders::ALL)
        .border_style(palette.border());
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(palette.base())
            .wrap(Wrap { trim: false }),
        area,
    );
}
