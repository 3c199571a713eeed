//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Header with API host and tab bar
//! - Active screen content
//! - Alerts and flash messages
//! - Status bar

use crate::app::{App, RequestState};
use crate::types::{format_currency, Screen};
use crate::ui::{theme::Theme, widgets};
use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::vertical([
        Constraint::Length(3), // Header + tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);
    render_screen(frame, app, layout[1]);
    render_status_bar(frame, app, layout[2]);
    render_overlays(frame, app, area);
}

/// Render header with API host and tab bar
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let header_block = Block::default()
        .style(theme.block_style())
        .title(format!(" finwatch · {} ", host_of(app.api().base_url())))
        .title_style(theme.title())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    frame.render_widget(header_block, area);

    let tab_titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, screen)| {
            let style = if app.active_screen == *screen {
                theme.tab_active()
            } else {
                theme.tab_inactive()
            };
            Line::styled(
                format!("[{}] {} {}", i + 1, screen.icon(), screen.label()),
                style,
            )
        })
        .collect();

    let tabs = Tabs::new(tab_titles)
        .select(app.active_screen.index())
        .divider(" │ ")
        .style(theme.text());

    let tabs_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    frame.render_widget(tabs, tabs_area);
}

/// Render the active screen
fn render_screen(frame: &mut Frame, app: &App, area: Rect) {
    let (title, lines) = match app.active_screen {
        Screen::Dashboard => ("Dashboard", dashboard_lines(app)),
        Screen::Fraud => ("Fraud Detection", fraud_lines(app)),
        Screen::Savings => ("Savings Recommendation", savings_lines(app)),
        Screen::Notifications => ("Notifications", notifications_lines(app)),
    };

    let theme = &app.theme;
    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Vertically center the content like a mobile screen
    let top_pad = inner.height.saturating_sub(lines.len() as u16) / 2;
    let content_area = Rect {
        x: inner.x,
        y: inner.y + top_pad,
        width: inner.width,
        height: inner.height.saturating_sub(top_pad),
    };

    let content = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(content, content_area);
}

fn dashboard_lines(app: &App) -> Vec<Line<'static>> {
    vec![Line::styled(
        format!("Balance: {}", format_currency(app.dashboard.balance)),
        app.theme.figure(),
    )]
}

fn fraud_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut lines = vec![
        widgets::action_button(
            "Check for Fraud",
            "Enter",
            app.action_enabled(Screen::Fraud),
            theme,
        ),
        Line::raw(""),
    ];

    match &app.fraud.check {
        RequestState::Idle => {}
        RequestState::Pending => {
            lines.push(widgets::loading_line(
                "Checking transactions...",
                app.tick,
                theme,
            ));
        }
        RequestState::Failed(message) => {
            lines.push(Line::styled(message.clone(), theme.error()));
        }
        RequestState::Succeeded(true) => {
            lines.push(Line::styled(
                "Fraudulent transactions detected!",
                theme.alarm(),
            ));
        }
        RequestState::Succeeded(false) => {
            lines.push(Line::styled(
                "No suspicious activity found",
                theme.success(),
            ));
        }
    }

    push_timestamp(&mut lines, "Last checked", app.fraud.checked_at, theme);
    lines
}

fn savings_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut lines = vec![
        widgets::action_button(
            "Get Savings Recommendation",
            "Enter",
            app.action_enabled(Screen::Savings),
            theme,
        ),
        Line::raw(""),
    ];

    match &app.savings.recommendation {
        RequestState::Idle => {}
        RequestState::Pending => {
            lines.push(widgets::loading_line("Calculating...", app.tick, theme));
        }
        RequestState::Failed(message) => {
            lines.push(Line::styled(message.clone(), theme.error()));
        }
        RequestState::Succeeded(amount) => {
            lines.push(Line::styled(
                format!("Recommended savings: {}", format_currency(*amount)),
                theme.figure(),
            ));
        }
    }

    push_timestamp(&mut lines, "Updated", app.savings.updated_at, theme);
    lines
}

fn notifications_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let state = &app.notifications;

    let token_status = if state.token.is_some() {
        "Received"
    } else {
        "Not available"
    };

    let mut lines = vec![Line::styled(
        format!("Push token: {}", token_status),
        theme.text(),
    )];

    if state.registering {
        lines.push(widgets::loading_line(
            "Requesting permission...",
            app.tick,
            theme,
        ));
    } else if let Some(permission) = state.permission {
        let style = if permission.is_enabled() {
            theme.text_dim()
        } else {
            theme.warning()
        };
        lines.push(Line::styled(
            format!("Permission: {}", permission.as_str()),
            style,
        ));
    }

    lines.push(Line::raw(""));
    lines.push(widgets::action_button(
        "Simulate Low Balance Notification",
        "Enter",
        app.action_enabled(Screen::Notifications),
        theme,
    ));

    push_timestamp(&mut lines, "Last sent", state.last_sent_at, theme);
    lines
}

fn push_timestamp(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    at: Option<DateTime<Local>>,
    theme: &Theme,
) {
    if let Some(at) = at {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("{}: {}", label, at.format("%H:%M:%S")),
            theme.text_dim(),
        ));
    }
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.active_screen {
        Screen::Dashboard => "[1-4] Screens  [Tab] Next  [t] Theme  [q] Quit",
        Screen::Fraud => "[Enter] Check for Fraud  [Tab] Next  [t] Theme  [q] Quit",
        Screen::Savings => "[Enter] Get Recommendation  [Tab] Next  [t] Theme  [q] Quit",
        Screen::Notifications => "[Enter] Simulate Low Balance  [Tab] Next  [t] Theme  [q] Quit",
    };

    widgets::render_status_bar(frame, hints, app.config.theme.as_str(), &app.theme, area);
}

/// Render alert and flash message if active
fn render_overlays(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if let Some((msg, is_error, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, *is_error, theme, area);
    }

    if let Some(alert) = app.current_alert() {
        widgets::render_alert_popup(frame, &alert.title, &alert.message, theme, area);
    }
}

/// `https://api.example.com/v1` -> `api.example.com/v1`
fn host_of(url: &str) -> &str {
    url.split_once("://").map_or(url, |(_, rest)| rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockHttpClient;
    use crate::app::tests::{authorized, test_app};
    use crate::app::FRAUD_ERROR;
    use crate::push::AuthorizationStatus;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://api.yourservice.com"), "api.yourservice.com");
        assert_eq!(host_of("localhost:3000"), "localhost:3000");
    }

    #[test]
    fn test_dashboard_balance() {
        let (app, _rx) = test_app(&MockHttpClient::new(), authorized());
        let text = screen_text(&app);

        assert!(text.contains("Balance: $1000.00"));
        assert!(text.contains("finwatch · finance.test"));
    }

    #[test]
    fn test_savings_formatted_to_cents() {
        let (mut app, _rx) = test_app(&MockHttpClient::new(), authorized());
        app.active_screen = Screen::Savings;
        app.savings.recommendation = RequestState::Succeeded(433.33);

        assert!(screen_text(&app).contains("Recommended savings: $433.33"));
    }

    #[test]
    fn test_fraud_detected_text() {
        let (mut app, _rx) = test_app(&MockHttpClient::new(), authorized());
        app.active_screen = Screen::Fraud;
        app.fraud.check = RequestState::Succeeded(true);

        assert!(screen_text(&app).contains("Fraudulent transactions detected!"));

        app.fraud.check = RequestState::Succeeded(false);
        assert!(!screen_text(&app).contains("Fraudulent transactions detected!"));
    }

    #[test]
    fn test_failure_shows_error_message() {
        let (mut app, _rx) = test_app(&MockHttpClient::new(), authorized());
        app.active_screen = Screen::Fraud;
        app.fraud.check = RequestState::Failed(FRAUD_ERROR.into());

        let text = screen_text(&app);
        assert!(text.contains(FRAUD_ERROR));
        assert!(!text.contains("Fraud Alert"));
    }

    #[test]
    fn test_pending_shows_spinner() {
        let (mut app, _rx) = test_app(&MockHttpClient::new(), authorized());
        app.active_screen = Screen::Savings;
        app.savings.recommendation = RequestState::Pending;

        assert!(screen_text(&app).contains("Calculating..."));
    }

    #[tokio::test]
    async fn test_fraud_alert_dialog() {
        use crate::api::mock::MockResponse;
        use crate::app::tests::settle;

        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(200, r#"{"fraudDetected":true}"#));
        let (mut app, mut rx) = test_app(&http, authorized());

        app.select_screen(Screen::Fraud);
        app.check_for_fraud();
        settle(&mut app, &mut rx).await;

        let text = screen_text(&app);
        assert!(text.contains("Fraud Alert"));
        assert!(text.contains("Suspicious activity detected in your account."));
    }

    #[test]
    fn test_notifications_token_status() {
        let (mut app, _rx) = test_app(&MockHttpClient::new(), authorized());
        app.active_screen = Screen::Notifications;
        app.notifications.permission = Some(AuthorizationStatus::Denied);

        let text = screen_text(&app);
        assert!(text.contains("Push token: Not available"));
        assert!(text.contains("Permission: Denied"));

        app.notifications.token = Some("tok".into());
        assert!(screen_text(&app).contains("Push token: Received"));
    }
}
