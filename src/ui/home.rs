//! Landing page

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Page};

use super::Palette;

fn description(page: Page) -> &'static str {
    match page {
        Page::Home => "",
        Page::Iss => "See where the International Space Station is right now.",
        Page::Neo => "Monitor asteroids approaching Earth in real-time.",
        Page::Exoplanets => "Discover new planets beyond our solar system.",
        Page::EarthView => "Browse full-disc imagery of Earth from DSCOVR.",
        Page::SpaceWeather => "Get live updates on solar storms and geomagnetic activity.",
        Page::Missions => "Explore past and present Mars rover missions.",
    }
}

pub fn render(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let hero = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Explore the Universe with ", Style::default().fg(palette.text)),
            Span::styled("OrbitX", palette.title()),
        ]),
        Line::from(Span::styled(
            "Live space data from NASA and friends, right in your terminal.",
            palette.muted(),
        )),
    ];
    frame.render_widget(Paragraph::new(hero).alignment(Alignment::Center), chunks[0]);

    let mut lines = Vec::new();
    for (i, page) in Page::ALL.iter().skip(1).enumerate() {
        let is_selected = i == app.home_selected;
        let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸ or space
        let name_style = if is_selected {
            palette.selected()
        } else {
            Style::default().fg(palette.text)
        };

        lines.push(Line::from(vec![
            Span::styled(cursor, name_style),
            Span::styled(format!("{:<15}", page.title()), name_style),
            Span::styled(description(*page), palette.muted()),
        ]));
    }

    let block = Block::default()
        .title(" ✨ Features ")
        .borders(Borders::ALL)
        .border_style(palette.border());
    frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);
}
