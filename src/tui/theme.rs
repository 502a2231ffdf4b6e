// Theme for the TUI
//
// One fixed palette. Tier colors live next to the tier table in
// crate::loyalty; everything else the panel draws comes from here.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Colors and border style for every UI element
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    /// Placeholders, read-only values, hints
    pub muted: Color,
    pub border: Color,
    /// Focused borders and the open menu
    pub highlight: Color,
    /// Buttons and the progress gauge
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub warn: Color,
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self::storefront()
    }
}

impl Theme {
    pub fn storefront() -> Self {
        Self {
            background: Color::Rgb(17, 24, 39),
            foreground: Color::Rgb(229, 231, 235),
            muted: Color::Rgb(107, 114, 128),
            border: Color::Rgb(55, 65, 81),
            highlight: Color::Rgb(96, 165, 250),
            accent: Color::Rgb(59, 130, 246),
            success: Color::Rgb(34, 197, 94),
            error: Color::Rgb(239, 68, 68),
            warn: Color::Rgb(234, 179, 8),
            border_type: BorderType::Rounded,
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.highlight)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Button style; disabled buttons are dimmed
    pub fn button_style(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(Color::White)
                .bg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.muted).bg(self.border)
        }
    }
}
