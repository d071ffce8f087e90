//! UI rendering module for OrbitX
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components. Every screen reads the
//! [`Palette`] resolved from the current theme, so a theme change shows up on
//! the next frame.

pub mod earth_view;
pub mod exoplanets;
pub mod help_overlay;
pub mod home;
pub mod iss;
pub mod missions;
pub mod neo;
pub mod shell;
pub mod space_weather;
pub mod theme;
pub mod widgets;

pub use theme::Palette;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FeedState, ListView, Page};
use crate::settings::Theme;

/// Draws one frame of the whole dashboard
pub fn render(frame: &mut Frame, app: &App, theme: Theme) {
    let palette = Palette::for_theme(theme);
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation tabs
            Constraint::Min(3),    // Page content
            Constraint::Length(1), // Status and key hints
        ])
        .split(area);

    shell::render_tabs(frame, app, &palette, chunks[0]);

    match app.page {
        Page::Home => home::render(frame, app, &palette, chunks[1]),
        Page::Iss => iss::render(frame, app, &palette, chunks[1]),
        Page::Neo => neo::render(frame, app, &palette, chunks[1]),
        Page::Exoplanets => exoplanets::render(frame, app, &palette, chunks[1]),
        Page::EarthView => earth_view::render(frame, app, &palette, chunks[1]),
        Page::SpaceWeather => space_weather::render(frame, app, &palette, chunks[1]),
        Page::Missions => missions::render(frame, app, &palette, chunks[1]),
    }

    shell::render_status_line(frame, app, &palette, chunks[2]);

    // Overlays, topmost last
    if app.explore_open {
        shell::render_explore_menu(frame, app, &palette, chunks[0]);
    }
    if app.show_help {
        help_overlay::render(frame, &palette);
    }
}

/// Handles the loading, error and stale states shared by every feed page
///
/// Returns the area left for content together with the data, or `None` when a
/// placeholder was drawn instead. A failed refresh over existing data puts the
/// error on the first line and keeps the data below it.
pub(crate) fn feed_content<'a, T>(
    frame: &mut Frame,
    area: Rect,
    state: &'a FeedState<T>,
    palette: &Palette,
    what: &str,
) -> Option<(Rect, &'a T)> {
    let Some(data) = state.data.as_ref() else {
        let (text, style) = match &state.error {
            Some(error) if !state.loading => (error.clone(), Style::default().fg(palette.error)),
            _ => (format!("Loading {what}..."), Style::default().fg(palette.accent)),
        };
        render_centered_message(frame, area, &text, style);
        return None;
    };

    match &state.error {
        Some(error) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(area);
            let banner = Paragraph::new(Line::from(vec![
                Span::styled("⚠ ", Style::default().fg(palette.warning)),
                Span::styled(error.clone(), Style::default().fg(palette.error)),
            ]));
            frame.render_widget(banner, chunks[0]);
            Some((chunks[1], data))
        }
        None => Some((area, data)),
    }
}

/// Renders a single message in the middle of `area`
pub(crate) fn render_centered_message(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let paragraph = Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, chunks[1]);
}

/// Search box line, with a cursor while it has focus
pub(crate) fn search_line(view: &ListView, palette: &Palette) -> Line<'static> {
    let mut spans = vec![
        Span::styled("/", palette.key()),
        Span::styled(" Search: ", palette.muted()),
    ];
    if view.query.search.is_empty() && !view.editing {
        spans.push(Span::styled("(none)", palette.muted()));
    } else {
        spans.push(Span::styled(
            view.query.search.clone(),
            Style::default().fg(palette.text),
        ));
    }
    if view.editing {
        spans.push(Span::styled("▏", Style::default().fg(palette.highlight)));
    }
    Line::from(spans)
}

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, Terminal};

    use crate::app::App;
    use crate::cli::StartupConfig;
    use crate::config::AppConfig;
    use crate::refresh::Generations;
    use crate::settings::Theme;

    pub(crate) fn app_on(page: crate::app::Page) -> App {
        let mut app = App::new(
            &StartupConfig::default(),
            &AppConfig::default(),
            Arc::new(Generations::default()),
        );
        app.page = page;
        app
    }

    /// Renders the whole dashboard and returns the buffer as one string
    pub(crate) fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| super::render(frame, app, Theme::Dark))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }
}
