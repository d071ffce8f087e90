//! Earth imagery grid and image viewer
//!
//! The grid shows the first nine images in three columns. The viewer pages
//! through the whole collection and shows the archive URL of the current
//! image, which is what a terminal can offer in place of the picture.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, EARTH_GRID_COLUMNS};
use crate::feeds::earth::download_file_name;
use crate::feeds::{EarthImage, ShareTarget};
use crate::format::truncate_chars;

use super::{centered_rect, feed_content, render_centered_message, Palette};

pub fn render(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .title(" 🛰 Earth View ")
        .borders(Borders::ALL)
        .border_style(palette.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some((area, _)) = feed_content(frame, inner, &app.earth, palette, "Earth images") else {
        return;
    };

    let grid = app.earth_grid();
    if grid.is_empty() {
        render_centered_message(frame, area, "No images available.", palette.muted());
        return;
    }

    let rows = grid.len().div_ceil(EARTH_GRID_COLUMNS);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, EARTH_GRID_COLUMNS as u32);
                EARTH_GRID_COLUMNS
            ])
            .split(*row_area);

        for (column, cell_area) in cells.iter().enumerate() {
            let index = row * EARTH_GRID_COLUMNS + column;
            if let Some(image) = grid.get(index) {
                render_cell(frame, image, index, index == app.earth_cursor, palette, *cell_area);
            }
        }
    }

    if let Some(image) = app.gallery_image() {
        render_viewer(frame, app, image, palette);
    }
}

fn render_cell(
    frame: &mut Frame,
    image: &EarthImage,
    index: usize,
    selected: bool,
    palette: &Palette,
    area: Rect,
) {
    let border = if selected {
        palette.selected()
    } else {
        palette.muted()
    };
    let block = Block::default()
        .title(format!(" #{} ", index + 1))
        .borders(Borders::ALL)
        .border_style(border);

    let lines = vec![
        Line::from(Span::styled(image.date.clone(), Style::default().fg(palette.text))),
        Line::from(Span::styled(
            truncate_chars(&image.identifier, 24).to_string(),
            palette.muted(),
        )),
        Line::from(Span::styled(image.caption.clone(), palette.muted())),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_viewer(frame: &mut Frame, app: &App, image: &EarthImage, palette: &Palette) {
    let area = centered_rect(110, 28, frame.area());
    frame.render_widget(Clear, area);

    let position = app.gallery.selected().unwrap_or_default();
    let playback = if app.gallery.is_playing() {
        "▶ Playing"
    } else {
        "⏸ Paused"
    };

    let url = image.image_url(&app.archive_url);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(image.captured_display(), palette.title())),
        Line::from(""),
        Line::from(Span::styled(image.caption.clone(), Style::default().fg(palette.text))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Image URL  ", palette.muted()),
            Span::styled(url.clone(), Style::default().fg(palette.accent)),
        ]),
        Line::from(vec![
            Span::styled("Saves as   ", palette.muted()),
            Span::raw(download_file_name(position)),
        ]),
        Line::from(""),
        Line::from(Span::styled("Share", palette.title())),
    ];
    lines.extend(ShareTarget::ALL.into_iter().map(|target| {
        Line::from(vec![
            Span::styled(format!("{:<10} ", target.label()), palette.muted()),
            Span::raw(target.share_url(&url)),
        ])
    }));
    lines.extend([
        Line::from(""),
        Line::from(vec![
            Span::styled(playback, palette.key()),
            Span::styled(
                "   ←/→ previous/next   Space play/pause   d download   c copy link   Esc close",
                palette.muted(),
            ),
        ]),
    ]);

    let block = Block::default()
        .title(format!(" Image {} of {} ", position + 1, app.gallery.len()))
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
