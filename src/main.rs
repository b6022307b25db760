//! `nitai`: terminal client for the NIT Agartala question-answering service
//!
//! Sends each question to a single remote endpoint and keeps the exchange as
//! an append-only transcript.

mod config;
mod controller;
mod frontend;
mod qa;
mod session;
mod view;

use config::{ClientConfig, UiMode};
use controller::SessionController;
use qa::{HttpAnswerService, LoggingService};
use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;

    // The terminal belongs to the frontend, so logs go to a file
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nitai=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    tracing::info!(
        endpoint = %config.api_url,
        timeout_secs = config.request_timeout.as_secs(),
        log_path = %config.log_path.display(),
        "Starting NITai client"
    );

    let service = LoggingService::new(HttpAnswerService::new(
        config.api_url.clone(),
        config.request_timeout,
    )?);
    let controller = Arc::new(SessionController::new(service, config.request_timeout));

    let ui = config.ui.unwrap_or_else(|| {
        if io::stdout().is_terminal() {
            UiMode::Tui
        } else {
            UiMode::Plain
        }
    });

    match ui {
        UiMode::Tui => frontend::tui::run(&controller).await?,
        UiMode::Plain => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            frontend::plain::run(&*controller, stdin, &mut io::stdout()).await?;
        }
    }

    tracing::info!("NITai client exiting");
    Ok(())
}
