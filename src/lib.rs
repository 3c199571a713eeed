//! finwatch - personal finance companion for the terminal
//!
//! Four screens backed by remote services: a balance dashboard, a fraud
//! check, a savings recommendation, and low-balance push notifications.

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod push;
pub mod types;
pub mod ui;
