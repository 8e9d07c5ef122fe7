mod app_state;
mod chart;
mod client;
mod config;
mod controller;
mod models;
mod tui;
mod view;

use std::fs::OpenOptions;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use app_state::App;
use client::StatsClient;
use config::AppConfig;
use models::{FetchReply, FetchRequest, TimeRange};
use tui::run_app;

const LOG_FILE: &str = "recipe-admin.log";

#[derive(Parser)]
#[command(
    name = "recipe-admin",
    version,
    about = "TUI admin dashboard for the recipe chatbot - usage totals and per-day query volume"
)]
struct Cli {
    /// Base URL of the chatbot backend (overrides the config file)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Config file path
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Trailing window shown on startup: 7, 30 or 90
    #[arg(short, long, value_name = "DAYS")]
    days: Option<u32>,
}

fn main() -> Result<()> {
    // 1. Parse CLI args
    let cli = Cli::parse();

    // 2. Load config and resolve the startup window
    let config = AppConfig::load_from(cli.config.as_deref())?;
    let base_url = cli.url.unwrap_or_else(|| config.server.base_url.clone());
    let days = cli.days.unwrap_or(config.dashboard.default_days);
    let Some(range) = TimeRange::from_days(days) else {
        bail!("unsupported window: {days} days (expected 7, 30 or 90)");
    };

    // 3. Log to a file so the dashboard itself stays clean
    init_logging()?;

    // 4. Setup the background fetch worker
    let client = StatsClient::new(&base_url, Duration::from_secs(config.server.timeout_secs))?;
    let rt = tokio::runtime::Runtime::new()?;
    let (req_tx, mut req_rx) = mpsc::channel::<FetchRequest>(8);
    let (resp_tx, resp_rx) = mpsc::channel::<FetchReply>(8);
    rt.spawn(async move {
        while let Some(request) = req_rx.recv().await {
            let result = client
                .fetch_stats(request.days)
                .await
                .map_err(|err| format!("{err:#}"));
            let reply = FetchReply {
                seq: request.seq,
                result,
            };
            if resp_tx.send(reply).await.is_err() {
                break;
            }
        }
    });

    // 5. Initialize App state
    let mut app = App::new(range, config.dashboard.refresh_secs, req_tx, resp_rx);

    // 6. Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // 7. Run event loop
    let result = run_app(&mut terminal, &mut app);

    // 8. Restore terminal (always runs)
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn init_logging() -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("cannot open {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
