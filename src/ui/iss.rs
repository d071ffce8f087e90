//! Live ISS position

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::feeds::{Feature, IssPosition};

use super::{feed_content, Palette};

pub fn render(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .title(" 🌍 Live ISS Tracker ")
        .borders(Borders::ALL)
        .border_style(palette.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some((area, position)) = feed_content(frame, inner, &app.iss, palette, "ISS position")
    else {
        return;
    };

    let interval = app.refresh_interval(Feature::Iss).as_secs();
    let mut lines = position_lines(position, palette);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Auto-refreshes every {interval}s while this page is open"),
        palette.muted(),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

fn position_lines(position: &IssPosition, palette: &Palette) -> Vec<Line<'static>> {
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", label), palette.muted()),
            Span::styled(value, Style::default().fg(palette.text)),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        field("Latitude", position.latitude_display()),
        field("Longitude", position.longitude_display()),
        field("Altitude", position.altitude_display()),
        field("Velocity", position.velocity_display()),
        field("Over", position.hemisphere().to_string()),
    ];
    if let Some(visibility) = &position.visibility {
        lines.push(field("Visibility", visibility.clone()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Map: ", palette.muted()),
        Span::styled(position.map_url(), Style::default().fg(palette.accent)),
    ]));
    lines
}
