//! Navigation tabs, the Explore menu and the status line

use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Page};
use crate::cache::Source;

use super::Palette;

const EXPLORE_LABEL: &str = "Explore ▾";
const TAB_SEPARATOR: &str = " │ ";

/// Entries of the tab bar; the Explore pages share one entry
fn tab_entries() -> [(&'static str, &'static [Page]); 5] {
    [
        ("Home", &[Page::Home]),
        ("ISS Tracker", &[Page::Iss]),
        ("NEO Tracker", &[Page::Neo]),
        (EXPLORE_LABEL, &Page::EXPLORE),
        ("Missions", &[Page::Missions]),
    ]
}

/// Renders the title and page tabs
pub fn render_tabs(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let mut spans = vec![
        Span::styled("🚀 OrbitX", palette.title()),
        Span::raw("  "),
    ];

    for (i, (label, pages)) in tab_entries().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(TAB_SEPARATOR, palette.muted()));
        }
        let active = pages.contains(&app.page);
        let style = if active {
            palette.selected().add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.text)
        };
        let label = if active && *label == EXPLORE_LABEL {
            format!("{} ({})", label, app.page.title())
        } else {
            label.to_string()
        };
        spans.push(Span::styled(label, style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border());
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Renders the Explore dropdown below its tab
pub fn render_explore_menu(frame: &mut Frame, app: &App, palette: &Palette, tabs_area: Rect) {
    // Column of the Explore tab: border, title, then the tabs before it
    let offset: usize = 1
        + "🚀 OrbitX  ".chars().count()
        + 1
        + tab_entries()
            .iter()
            .take_while(|(label, _)| *label != EXPLORE_LABEL)
            .map(|(label, _)| label.chars().count() + TAB_SEPARATOR.chars().count())
            .sum::<usize>();

    let width = 20u16;
    let height = Page::EXPLORE.len() as u16 + 2;
    let frame_area = frame.area();
    let x = (tabs_area.x + offset as u16).min(frame_area.width.saturating_sub(width));
    let y = tabs_area.y + tabs_area.height;
    let area = Rect::new(x, y, width, height).intersection(frame_area);

    let lines: Vec<Line> = Page::EXPLORE
        .iter()
        .enumerate()
        .map(|(i, page)| {
            if i == app.explore_index {
                Line::from(vec![
                    Span::styled("▸ ", palette.selected()),
                    Span::styled(page.title(), palette.selected()),
                ])
            } else {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(page.title(), Style::default().fg(palette.text)),
                ])
            }
        })
        .collect();

    let block = Block::default()
        .title(" Explore ")
        .borders(Borders::ALL)
        .border_style(palette.border());

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(block).style(palette.base()),
        area,
    );
}

/// Renders the key hints, the last status message and data freshness
pub fn render_status_line(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let mut spans = Vec::new();

    for (key, action) in page_hints(app) {
        spans.push(Span::styled(key, palette.key()));
        spans.push(Span::raw(format!(" {action}  ")));
    }
    for (key, action) in [("Tab", "Pages"), ("e", "Explore"), ("t", "Theme"), ("?", "Help"), ("q", "Quit")] {
        spans.push(Span::styled(key, palette.key()));
        spans.push(Span::raw(format!(" {action}  ")));
    }

    if let Some(freshness) = freshness_text(app) {
        spans.push(Span::styled(freshness, palette.muted()));
    }
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!(" │ {status}"),
            Style::default().fg(palette.accent),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(palette.muted());
    frame.render_widget(paragraph, area);
}

fn page_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.gallery.is_open() {
        return vec![
            ("←/→", "Prev/Next"),
            ("Space", "Play/Pause"),
            ("d", "Download"),
            ("c", "Copy link"),
            ("Esc", "Close"),
        ];
    }
    if app.search_view().is_some_and(|view| view.editing) {
        return vec![("Enter/Esc", "Done")];
    }

    match app.page {
        Page::Home => vec![("↑/↓", "Navigate"), ("Enter", "Open")],
        Page::Iss => vec![("r", "Refresh")],
        Page::Neo => vec![
            ("↑/↓", "Navigate"),
            ("/", "Search"),
            ("p", "Premium"),
            ("g", "Graph"),
            ("i", "Interval"),
            ("r", "Refresh"),
        ],
        Page::Exoplanets => vec![("↑/↓", "Navigate"), ("/", "Search"), ("r", "Refresh")],
        Page::EarthView => vec![("←↑↓→", "Move"), ("Enter", "View"), ("r", "Refresh")],
        Page::SpaceWeather => vec![
            ("↑/↓", "Navigate"),
            ("/", "Search"),
            ("s", "Sort"),
            ("Enter", "Details"),
            ("r", "Refresh"),
        ],
        Page::Missions => vec![
            ("↑/↓", "Navigate"),
            ("/", "Search"),
            ("f", "Status"),
            ("s", "Sort"),
            ("r", "Refresh"),
        ],
    }
}

/// "│ Data: 3m ago (cached)" for the current page's feed
fn freshness_text(app: &App) -> Option<String> {
    let (last_updated, source) = match app.page {
        Page::Home => return None,
        Page::Iss => (app.iss.last_updated, app.iss.source.as_ref()),
        Page::Neo => (app.neo.last_updated, app.neo.source.as_ref()),
        Page::Exoplanets => (app.exoplanets.last_updated, app.exoplanets.source.as_ref()),
        Page::EarthView => (app.earth.last_updated, app.earth.source.as_ref()),
        Page::SpaceWeather => (app.space_weather.last_updated, app.space_weather.source.as_ref()),
        Page::Missions => (app.missions.last_updated, app.missions.source.as_ref()),
    };
    let last_updated = last_updated?;

    let elapsed = Local::now() - last_updated;
    let mins_ago = elapsed.num_minutes();
    let age = if mins_ago < 1 {
        "just now".to_string()
    } else if mins_ago < 60 {
        format!("{}m ago", mins_ago)
    } else {
        format!("{}h ago", elapsed.num_hours())
    };
    let origin = match source {
        Some(Source::Cache) => " (cached)",
        Some(Source::Stale { .. }) => " (offline copy)",
        _ => "",
    };
    Some(format!("│ Data: {age}{origin}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::{app_on, render_to_string};
    use chrono::Duration;

    #[test]
    fn test_tabs_show_brand_and_pages() {
        let app = app_on(Page::Home);
        let content = render_to_string(&app, 100, 24);
        assert!(content.contains("OrbitX"));
        assert!(content.contains("NEO Tracker"));
        assert!(content.contains("Missions"));
    }

    #[test]
    fn test_explore_tab_names_active_page() {
        let app = app_on(Page::SpaceWeather);
        let content = render_to_string(&app, 120, 24);
        assert!(content.contains("(Space Weather)"));
    }

    #[test]
    fn test_explore_menu_lists_pages() {
        let mut app = app_on(Page::Home);
        app.explore_open = true;
        let content = render_to_string(&app, 100, 24);
        assert!(content.contains("Exoplanets"));
        assert!(content.contains("Earth View"));
        assert!(content.contains("Space Weather"));
    }

    #[test]
    fn test_freshness_text() {
        let mut app = app_on(Page::Iss);
        assert_eq!(freshness_text(&app), None);

        app.iss.last_updated = Some(Local::now() - Duration::minutes(5));
        app.iss.source = Some(Source::Cache);
        assert_eq!(freshness_text(&app).as_deref(), Some("│ Data: 5m ago (cached)"));

        app.iss.last_updated = Some(Local::now() - Duration::hours(2));
        app.iss.source = Some(Source::Stale {
            error: "offline".to_string(),
        });
        assert_eq!(freshness_text(&app).as_deref(), Some("│ Data: 2h ago (offline copy)"));
    }

    #[test]
    fn test_home_has_no_freshness() {
        let app = app_on(Page::Home);
        assert_eq!(freshness_text(&app), None);
    }
}
