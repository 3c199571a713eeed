//! Theme definitions for finwatch
//!
//! Three built-in palettes: Gruvbox, Nord, and Transparent.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Colors for every UI element
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    pub accent: Color,

    // Status
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub border: Color,
    pub border_focused: Color,

    // Action buttons
    pub button_bg: Color,
    pub button_fg: Color,
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Gruvbox => Self::gruvbox(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// Gruvbox dark (default)
    pub fn gruvbox() -> Self {
        Self {
            bg: Color::Rgb(40, 40, 40),        // #282828
            fg: Color::Rgb(235, 219, 178),     // #ebdbb2
            fg_dim: Color::Rgb(146, 131, 116), // #928374

            accent: Color::Rgb(254, 128, 25), // #fe8019

            success: Color::Rgb(184, 187, 38), // #b8bb26
            warning: Color::Rgb(250, 189, 47), // #fabd2f
            error: Color::Rgb(251, 73, 52),    // #fb4934

            border: Color::Rgb(80, 73, 69),            // #504945
            border_focused: Color::Rgb(168, 153, 132), // #a89984

            button_bg: Color::Rgb(69, 133, 136),  // #458588
            button_fg: Color::Rgb(251, 241, 199), // #fbf1c7
        }
    }

    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),      // #2e3440
            fg: Color::Rgb(236, 239, 244),   // #eceff4
            fg_dim: Color::Rgb(76, 86, 106), // #4c566a

            accent: Color::Rgb(136, 192, 208), // #88c0d0

            success: Color::Rgb(163, 190, 140), // #a3be8c
            warning: Color::Rgb(235, 203, 139), // #ebcb8b
            error: Color::Rgb(191, 97, 106),    // #bf616a

            border: Color::Rgb(59, 66, 82),            // #3b4252
            border_focused: Color::Rgb(136, 192, 208), // #88c0d0

            button_bg: Color::Rgb(94, 129, 172),  // #5e81ac
            button_fg: Color::Rgb(236, 239, 244), // #eceff4
        }
    }

    /// Uses the terminal's own colors
    pub fn transparent() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Reset,
            fg_dim: Color::DarkGray,

            accent: Color::Cyan,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            border: Color::DarkGray,
            border_focused: Color::Cyan,

            button_bg: Color::Blue,
            button_fg: Color::White,
        }
    }

    // Style helpers

    /// Background fill for blocks
    pub fn block_style(&self) -> Style {
        Style::default().bg(self.bg)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Action button, greyed out while its request is in flight
    pub fn button(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(self.button_fg)
                .bg(self.button_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.fg_dim).bg(self.border)
        }
    }

    /// Large figures such as the balance
    pub fn figure(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success).bg(self.bg)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning).bg(self.bg)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).bg(self.bg)
    }

    /// Fraud warning text
    pub fn alarm(&self) -> Style {
        Style::default()
            .fg(self.error)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }
}
