//! User Interface layer
//!
//! This module contains all UI-related code:
//! - Theme definitions and colors
//! - Reusable widgets (alerts, spinner, action buttons)
//! - Screen views and the tab shell

pub mod render;
pub mod theme;
pub mod widgets;

pub use render::render;
pub use theme::Theme;
