use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use crate::config::ThemeConfig;

// ─── Color Palette (terminal-adaptive, transparency-friendly) ──────────

/// Background: always Reset (transparent), respecting the terminal background
pub const BG: Color = Color::Reset;

/// Success toast
pub const SUCCESS: Color = Color::Green;

/// Error toast
pub const ERROR: Color = Color::Red;

/// Resolved colors, built once from `[theme]` in the config.
#[derive(Debug, Clone)]
pub struct Theme {
    pub fg: Color,
    pub fg_dim: Color,
    pub accent: Color,
    pub border: Color,
    /// Digits at rest
    pub digits: Color,
    /// Digits mid-transition
    pub digits_moving: Color,
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            fg: config.fg,
            fg_dim: config.fg_dim,
            accent: config.accent,
            border: config.border,
            digits: config.digits,
            digits_moving: config.digits_moving,
            border_type: BorderType::Rounded,
        }
    }

    // ─── Style Constructors ──────────────────────────────────────────

    pub fn style_default(&self) -> Style {
        Style::default().fg(self.fg).bg(BG)
    }

    pub fn style_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(BG)
    }

    pub fn style_accent(&self) -> Style {
        Style::default().fg(self.accent).bg(BG)
    }

    pub fn style_accent_bold(&self) -> Style {
        self.style_accent().add_modifier(Modifier::BOLD)
    }

    pub fn style_border(&self) -> Style {
        Style::default().fg(self.border).bg(BG)
    }

    pub fn style_key_hint(&self) -> Style {
        self.style_accent_bold()
    }

    pub fn style_key_desc(&self) -> Style {
        self.style_dim()
    }

    pub fn tab_active(&self) -> Style {
        self.style_accent_bold()
    }

    pub fn tab_inactive(&self) -> Style {
        self.style_dim()
    }

    pub fn status_bar(&self) -> Style {
        Style::default().bg(BG)
    }
}
