//! finwatch - personal finance companion for the terminal
//!
//! Features:
//! - Dashboard with the account balance
//! - Fraud check on recent transactions
//! - Savings recommendation from income and expenses
//! - Low balance push notification simulation
//!
//! Usage: finwatch [--base-url URL] [--notify-url URL]

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use finwatch::api::{FinanceApi, ReqwestHttpClient};
use finwatch::app::{App, AppEvent};
use finwatch::config::Config;
use finwatch::push::LocalPushMessaging;
use finwatch::{logging, ui};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Redraw interval for the loading spinner
const TICK: Duration = Duration::from_millis(100);

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Args {
    base_url: Option<String>,
    notify_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("finwatch {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let args = parse_args(&args)?;

    if let Err(e) = run_app(args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"finwatch - personal finance companion for the terminal

USAGE:
    finwatch [OPTIONS]

OPTIONS:
    --base-url <URL>     Finance API host (env: API_BASE_URL)
    --notify-url <URL>   Notification service host (env: NOTIFY_BASE_URL)
    -h, --help           Print help information
    -v, --version        Print version information

KEYBINDINGS:
    1-4              Switch screens
    Tab / Shift+Tab  Next / previous screen
    Enter / Space    Run the screen's action
    t                Cycle theme
    q                Quit

SCREENS:
    [1] Dashboard      Account balance
    [2] Fraud          Check recent transactions for fraud
    [3] Savings        Get a savings recommendation
    [4] Notifications  Simulate a low balance push notification

CONFIG:
    ~/.config/finwatch/config.toml

LOG:
    ~/.cache/finwatch/finwatch.log (filter: FINWATCH_LOG)
"#
    );
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--base-url" => &mut parsed.base_url,
            "--notify-url" => &mut parsed.notify_url,
            other => bail!("Unknown argument: {} (see --help)", other),
        };
        let value = iter
            .next()
            .with_context(|| format!("{} requires a URL", arg))?;
        *slot = Some(value.clone());
    }

    Ok(parsed)
}

async fn run_app(args: Args) -> Result<()> {
    let log_path = logging::init()?;
    eprintln!("Logging to {}", log_path.display());

    let mut config = Config::load().context("Failed to load configuration")?;
    config.api = config
        .api
        .clone()
        .with_env_overrides()
        .with_overrides(args.base_url, args.notify_url);

    tracing::info!(
        base_url = config.api.base_url(),
        notify_url = config.api.notify_url(),
        "Starting finwatch"
    );

    let http = ReqwestHttpClient::with_timeout(config.api.timeout_secs.map(Duration::from_secs))
        .context("Failed to build HTTP client")?;
    let api = FinanceApi::new(Arc::new(http), &config.api);
    let messaging = Arc::new(LocalPushMessaging::from_config(&config.push));

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut app = App::new(config, api, messaging, events_tx);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = main_loop(&mut terminal, &mut app, events_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    tracing::info!("Exiting finwatch");
    result
}

async fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut events_rx: mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut input = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);

    loop {
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        tokio::select! {
            _ = ticker.tick() => app.on_tick(),

            Some(event) = events_rx.recv() => app.handle_event(event),

            maybe_input = input.next() => match maybe_input {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key)?;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal input"),
                None => break,
            },
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
