//! Single-row bar graph for inline visualization

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different values (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block per value, scaled against `max`
pub struct Sparkline<'a> {
    values: &'a [f64],
    max: f64,
    /// Index drawn with the marker style
    marker: Option<usize>,
    style: Style,
    marker_style: Style,
}

impl<'a> Sparkline<'a> {
    pub fn new(values: &'a [f64], max: f64) -> Self {
        Self {
            values,
            max,
            marker: None,
            style: Style::default().fg(Color::Cyan),
            marker_style: Style::default().fg(Color::Yellow),
        }
    }

    /// Scales against the largest value
    pub fn auto(values: &'a [f64]) -> Self {
        let max = values.iter().copied().fold(0.0, f64::max);
        Self::new(values, max)
    }

    pub fn marker(mut self, pos: usize) -> Self {
        self.marker = Some(pos);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn marker_style(mut self, style: Style) -> Self {
        self.marker_style = style;
        self
    }

    fn value_to_block(&self, value: f64) -> char {
        if self.max <= 0.0 {
            return BLOCKS[0];
        }
        let normalized = (value / self.max).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for Sparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;
        // Keep the marker on screen when there are more values than columns
        let start = match self.marker {
            Some(pos) if pos >= width => pos + 1 - width,
            _ => 0,
        };

        for (i, value) in self.values.iter().enumerate().skip(start).take(width) {
            let block = self.value_to_block(*value);
            let x = area.x + (i - start) as u16;

            let style = if self.marker == Some(i) {
                self.marker_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}
