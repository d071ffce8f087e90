//! Colors for the light and dark themes

use ratatui::style::{Color, Modifier, Style};

use crate::settings::Theme;

/// Every color the screens use, resolved from the active [`Theme`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub key: Color,
    pub highlight: Color,
    pub error: Color,
    pub warning: Color,
    pub good: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::Reset,
                text: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Blue,
                border: Color::Cyan,
                key: Color::Magenta,
                highlight: Color::Blue,
                error: Color::Red,
                warning: Color::Rgb(180, 110, 0),
                good: Color::Green,
            },
            Theme::Dark => Self {
                background: Color::Rgb(17, 28, 45),
                text: Color::White,
                muted: Color::Gray,
                accent: Color::Cyan,
                border: Color::Blue,
                key: Color::Yellow,
                highlight: Color::LightCyan,
                error: Color::LightRed,
                warning: Color::Yellow,
                good: Color::LightGreen,
            },
        }
    }

    /// Base style for whole-screen backgrounds
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn key(&self) -> Style {
        Style::default().fg(self.key)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }
}
