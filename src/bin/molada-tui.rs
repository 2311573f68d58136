use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use molada_pay::models::config::AppConfig;
use molada_pay::tui::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // The terminal belongs to the UI, so logs go to a file
    let log_path = AppConfig::log_file_from_env();
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    // Load configuration
    let cfg = AppConfig::from_env();

    let mut app = App::new(&cfg);

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    let result = match app.start().await {
        Ok(()) => app.run(&mut terminal).await,
        Err(e) => Err(e),
    };

    // Restore terminal
    ratatui::restore();

    result
}
