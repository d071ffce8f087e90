//! Help overlay showing all keybindings
//!
//! Renders a centered modal overlay with keyboard shortcuts.

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{centered_rect, Palette};

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame, palette: &Palette) {
    let overlay_area = centered_rect(56, 35, frame.area());

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", palette.title())),
        Line::from(""),
        section("Navigation"),
        help_line(palette, "Tab/S-Tab", "Next / previous page"),
        help_line(palette, "1-7", "Jump to page"),
        help_line(palette, "e", "Explore menu"),
        help_line(palette, "↑/k, ↓/j", "Move selection up/down"),
        help_line(palette, "Enter", "Open / show details"),
        help_line(palette, "Esc", "Close / back to Home"),
        help_line(palette, "q", "Quit application"),
        Line::from(""),
        section("Lists"),
        help_line(palette, "/", "Search"),
        help_line(palette, "s", "Cycle date sort"),
        help_line(palette, "f", "Cycle mission status"),
        Line::from(""),
        section("NEO Tracker"),
        help_line(palette, "p", "Toggle premium details"),
        help_line(palette, "g", "Toggle miss-distance graph"),
        help_line(palette, "i", "Cycle refresh interval"),
        Line::from(""),
        section("Earth View"),
        help_line(palette, "←/→", "Previous / next image"),
        help_line(palette, "Space", "Play / pause slideshow"),
        help_line(palette, "d", "Download image"),
        help_line(palette, "c", "Copy image link"),
        Line::from(""),
        section("Other"),
        help_line(palette, "r", "Refresh data"),
        help_line(palette, "t", "Toggle light/dark theme"),
        help_line(palette, "?", "Toggle this help"),
        Line::from(""),
        Line::from(Span::styled("Press Esc or ? to close", palette.muted())),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(palette.border());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(palette.base())
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

/// Creates a help line with key and description
fn help_line(palette: &Palette, key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), palette.key()),
        Span::raw(description.to_string()),
    ])
}
