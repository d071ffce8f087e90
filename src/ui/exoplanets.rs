//! Exoplanet catalog

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::feeds::Exoplanet;
use crate::format::truncate_chars;

use super::{feed_content, render_centered_message, search_line, Palette};

pub fn render(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    frame.render_widget(
        Paragraph::new(search_line(&app.exoplanet_view, palette)),
        chunks[0],
    );

    let planets = app.visible_exoplanets();
    let total = app.exoplanets.data.as_ref().map_or(0, Vec::len);
    let block = Block::default()
        .title(format!(" 🪐 Exoplanets ({} of {}) ", planets.len(), total))
        .borders(Borders::ALL)
        .border_style(palette.border());
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    let Some((area, _)) = feed_content(frame, inner, &app.exoplanets, palette, "exoplanets") else {
        return;
    };

    if planets.is_empty() {
        let text = if total == 0 {
            "No exoplanets found."
        } else {
            "No exoplanets match your search."
        };
        render_centered_message(frame, area, text, palette.muted());
        return;
    }

    let header = Line::from(Span::styled(
        format!(
            "  {:<28} {:<20} {:>16}  {}",
            "Name", "Discovery method", "Orbital period", "Mass"
        ),
        palette.muted(),
    ));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let selected = app.exoplanet_view.selected;
    let items: Vec<ListItem> = planets
        .iter()
        .enumerate()
        .map(|(i, planet)| ListItem::new(row(planet, i == selected, palette)))
        .collect();
    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(List::new(items), chunks[1], &mut state);
}

fn row(planet: &Exoplanet, selected: bool, palette: &Palette) -> Line<'static> {
    let cursor = if selected { "\u{25B8} " } else { "  " };
    let style = if selected {
        palette.selected()
    } else {
        Style::default().fg(palette.text)
    };

    Line::from(vec![
        Span::styled(cursor, style),
        Span::styled(
            format!("{:<28}", truncate_chars(&planet.name, 28)),
            style,
        ),
        Span::raw(format!(
            " {:<20}",
            truncate_chars(planet.discovery_method_display(), 20)
        )),
        Span::raw(format!(" {:>16}", planet.orbital_period_display())),
        Span::styled(format!("  {}", planet.mass_display()), palette.muted()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Page;
    use crate::feeds::exoplanets::tests::planet;
    use crate::ui::test_support::{app_on, render_to_string};

    #[test]
    fn test_rows_show_catalog_fields() {
        let mut app = app_on(Page::Exoplanets);
        app.exoplanets.data = Some(vec![planet("Kepler-22 b")]);

        let content = render_to_string(&app, 110, 24);

        assert!(content.contains("Kepler-22 b"));
        assert!(content.contains("Transit"));
        assert!(content.contains("289.9 days"));
        assert!(content.contains("2.1 x 10^25 kg"));
        assert!(content.contains("(1 of 1)"));
    }

    #[test]
    fn test_search_without_matches() {
        let mut app = app_on(Page::Exoplanets);
        app.exoplanets.data = Some(vec![planet("Kepler-22 b")]);
        app.exoplanet_view.query.search = "trappist".to_string();

        let content = render_to_string(&app, 110, 24);

        assert!(content.contains("No exoplanets match your search."));
        assert!(content.contains("(0 of 1)"));
    }
}
