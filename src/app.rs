//! Application state and event handling
//!
//! This is the core of finwatch, managing:
//! - One isolated state record per screen
//! - Event handling (keyboard input and completed requests)
//! - Spawning the single request behind each screen action

use crate::api::{ApiError, FinanceApi};
use crate::config::Config;
use crate::push::{self, PushError, PushMessaging, PushRegistration};
use crate::types::{
    sample_expenses, sample_transactions, Screen, DASHBOARD_BALANCE, SAMPLE_INCOME,
    SIMULATED_LOW_BALANCE,
};
use crate::ui::Theme;
use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

pub const FRAUD_ERROR: &str = "Failed to check for fraud";
pub const SAVINGS_ERROR: &str = "Failed to get savings recommendation";

/// Seconds a flash message stays visible
const FLASH_SECS: u64 = 3;

/// Lifecycle of a screen's single request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> RequestState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            RequestState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Dashboard screen state
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub balance: f64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            balance: DASHBOARD_BALANCE,
        }
    }
}

/// Fraud check screen state
#[derive(Debug, Clone, Default)]
pub struct FraudState {
    pub check: RequestState<bool>,
    pub checked_at: Option<DateTime<Local>>,
}

/// Savings recommendation screen state
#[derive(Debug, Clone, Default)]
pub struct SavingsState {
    pub recommendation: RequestState<f64>,
    pub updated_at: Option<DateTime<Local>>,
}

/// Notifications screen state
#[derive(Debug, Clone, Default)]
pub struct NotificationsState {
    /// Set the first time the screen is shown
    pub mounted: bool,
    pub registering: bool,
    pub permission: Option<push::AuthorizationStatus>,
    pub token: Option<String>,
    pub last_sent_at: Option<DateTime<Local>>,
}

/// Modal alert, dismissed with Enter/Esc
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Results posted back by request tasks
#[derive(Debug)]
pub enum AppEvent {
    FraudChecked(Result<bool, ApiError>),
    SavingsRecommended(Result<f64, ApiError>),
    PushRegistered(Result<PushRegistration, PushError>),
    LowBalanceNotified(Result<(), ApiError>),
}

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowAlert,
}

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub active_screen: Screen,
    pub config: Config,
    pub theme: Theme,
    pub tick: u64,

    // Per-screen state
    pub dashboard: DashboardState,
    pub fraud: FraudState,
    pub savings: SavingsState,
    pub notifications: NotificationsState,

    // Alerts waiting to be dismissed, front is on screen
    pub alerts: VecDeque<Alert>,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, bool, Instant)>, // (message, is_error, timestamp)

    api: FinanceApi,
    messaging: Arc<dyn PushMessaging>,
    events: mpsc::UnboundedSender<AppEvent>,
    /// Where the theme is persisted; the user config dir when unset
    config_path: Option<PathBuf>,
}

impl App {
    /// Create a new App instance. Completed requests arrive on the
    /// receiver paired with `events`.
    pub fn new(
        config: Config,
        api: FinanceApi,
        messaging: Arc<dyn PushMessaging>,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let theme = Theme::from_name(config.theme);

        Self {
            should_quit: false,
            active_screen: Screen::Dashboard,
            config,
            theme,
            tick: 0,

            dashboard: DashboardState::default(),
            fraud: FraudState::default(),
            savings: SavingsState::default(),
            notifications: NotificationsState::default(),

            alerts: VecDeque::new(),
            flash_message: None,

            api,
            messaging,
            events,
            config_path: None,
        }
    }

    /// Persist config changes to `path` instead of the user config dir
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Get current app state
    pub fn state(&self) -> AppState {
        if self.alerts.is_empty() {
            AppState::Normal
        } else {
            AppState::ShowAlert
        }
    }

    pub fn current_alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn api(&self) -> &FinanceApi {
        &self.api
    }

    /// Whether the active screen's action key is live
    pub fn action_enabled(&self, screen: Screen) -> bool {
        match screen {
            Screen::Dashboard => false,
            Screen::Fraud => !self.fraud.check.is_pending(),
            Screen::Savings => !self.savings.recommendation.is_pending(),
            Screen::Notifications => true,
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.expire_flash();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        match self.state() {
            AppState::ShowAlert => self.handle_alert_key(key),
            AppState::Normal => self.handle_normal_key(key),
        }
    }

    /// Handle key in normal state
    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                if let Some(screen) = Screen::from_index(idx) {
                    self.select_screen(screen);
                }
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.select_screen(self.active_screen.next());
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.select_screen(self.active_screen.prev());
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.trigger_action(),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys while an alert is shown
    fn handle_alert_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc => {
                self.alerts.pop_front();
            }
            _ => {}
        }
        Ok(())
    }

    /// Switch tabs, mounting the notifications screen on first visit
    pub fn select_screen(&mut self, screen: Screen) {
        self.active_screen = screen;
        if screen == Screen::Notifications && !self.notifications.mounted {
            self.mount_notifications();
        }
    }

    /// Run the active screen's action
    pub fn trigger_action(&mut self) {
        match self.active_screen {
            Screen::Dashboard => {}
            Screen::Fraud => {
                self.check_for_fraud();
            }
            Screen::Savings => {
                self.get_savings_recommendation();
            }
            Screen::Notifications => {
                self.notify_low_balance();
            }
        }
    }

    /// Advance animations and expire the flash message
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.expire_flash();
    }

    // === ACTIONS ===

    /// Submit the sample transactions for a fraud check.
    /// Returns false when a check is already in flight.
    pub fn check_for_fraud(&mut self) -> bool {
        if self.fraud.check.is_pending() {
            return false;
        }
        self.fraud.check = RequestState::Pending;
        tracing::info!("Checking transactions for fraud");

        let api = self.api.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.check_fraud(sample_transactions()).await;
            if events.send(AppEvent::FraudChecked(result)).is_err() {
                tracing::debug!("UI gone, dropping fraud check result");
            }
        });
        true
    }

    /// Ask for a savings recommendation on the sample budget.
    /// Returns false when a request is already in flight.
    pub fn get_savings_recommendation(&mut self) -> bool {
        if self.savings.recommendation.is_pending() {
            return false;
        }
        self.savings.recommendation = RequestState::Pending;
        tracing::info!("Requesting savings recommendation");

        let api = self.api.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.recommend_savings(SAMPLE_INCOME, sample_expenses()).await;
            if events.send(AppEvent::SavingsRecommended(result)).is_err() {
                tracing::debug!("UI gone, dropping savings result");
            }
        });
        true
    }

    /// Simulate a low balance notification to this device.
    /// Does nothing until a push token is held.
    pub fn notify_low_balance(&mut self) -> bool {
        let Some(token) = self.notifications.token.clone() else {
            tracing::debug!("No push token, skipping low balance notification");
            return false;
        };
        tracing::info!("Sending low balance notification request");

        let api = self.api.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.notify_low_balance(SIMULATED_LOW_BALANCE, &token).await;
            if events.send(AppEvent::LowBalanceNotified(result)).is_err() {
                tracing::debug!("UI gone, dropping notification result");
            }
        });
        true
    }

    /// Request push permission and the device token, once per session
    fn mount_notifications(&mut self) {
        self.notifications.mounted = true;
        self.notifications.registering = true;

        let messaging = Arc::clone(&self.messaging);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = push::register(messaging.as_ref()).await;
            if events.send(AppEvent::PushRegistered(result)).is_err() {
                tracing::debug!("UI gone, dropping push registration");
            }
        });
    }

    // === EVENTS ===

    /// Apply a completed request to its screen
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::FraudChecked(Ok(detected)) => {
                tracing::info!(detected, "Fraud check finished");
                self.fraud.check = RequestState::Succeeded(detected);
                self.fraud.checked_at = Some(Local::now());
                if detected {
                    self.show_alert("Fraud Alert", "Suspicious activity detected in your account.");
                }
            }
            AppEvent::FraudChecked(Err(e)) => {
                tracing::warn!(error = %e, code = e.code(), "Fraud check failed");
                self.fraud.check = RequestState::Failed(FRAUD_ERROR.into());
                self.show_alert("Error", "Failed to check for fraud. Please try again.");
            }
            AppEvent::SavingsRecommended(Ok(amount)) => {
                tracing::info!(amount, "Savings recommendation received");
                self.savings.recommendation = RequestState::Succeeded(amount);
                self.savings.updated_at = Some(Local::now());
            }
            AppEvent::SavingsRecommended(Err(e)) => {
                tracing::warn!(error = %e, code = e.code(), "Savings recommendation failed");
                self.savings.recommendation = RequestState::Failed(SAVINGS_ERROR.into());
                self.show_alert(
                    "Error",
                    "Unable to get savings recommendation. Please try again.",
                );
            }
            AppEvent::PushRegistered(Ok(registration)) => {
                self.notifications.registering = false;
                self.notifications.permission = Some(registration.status);
                self.notifications.token = registration.token;
            }
            AppEvent::PushRegistered(Err(e)) => {
                tracing::warn!(error = %e, "Push registration failed");
                self.notifications.registering = false;
            }
            AppEvent::LowBalanceNotified(Ok(())) => {
                tracing::info!("Notification request sent");
                self.notifications.last_sent_at = Some(Local::now());
                self.show_alert(
                    "Notification Sent",
                    "A low balance notification has been simulated.",
                );
            }
            AppEvent::LowBalanceNotified(Err(e)) => {
                tracing::error!(error = %e, "Error sending notification request");
            }
        }
    }

    // === HELPER METHODS ===

    fn cycle_theme(&mut self) {
        self.config.theme = self.config.theme.next();
        self.theme = Theme::from_name(self.config.theme);

        let saved = match &self.config_path {
            Some(path) => self.config.save_to(path),
            None => self.config.save(),
        };

        match saved {
            Ok(()) => {
                let message = format!("Theme: {}", self.config.theme.as_str());
                self.show_flash(&message, false);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save config");
                self.show_error(&format!("Failed to save config: {}", e));
            }
        }
    }

    fn show_alert(&mut self, title: &str, message: &str) {
        self.alerts.push_back(Alert {
            title: title.into(),
            message: message.into(),
        });
    }

    fn show_error(&mut self, message: &str) {
        self.show_flash(message, true);
    }

    fn show_flash(&mut self, message: &str, is_error: bool) {
        self.flash_message = Some((message.into(), is_error, Instant::now()));
    }

    fn expire_flash(&mut self) {
        if let Some((_, _, instant)) = &self.flash_message {
            if instant.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }
}
