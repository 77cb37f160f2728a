use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use drafter_application::{DraftSessionEngine, NotificationManager};
use drafter_core::config::DrafterConfig;
use drafter_core::notification::NotificationEvent;
use drafter_infrastructure::ConfigService;
use drafter_interaction::HttpDraftService;

mod commands;
mod helper;
mod render;
mod repl;

use commands::ReplCommand;
use helper::CliHelper;
use repl::{Flow, Repl};

#[derive(Parser)]
#[command(name = "drafter")]
#[command(about = "Drafter - draft documents by answering a template's questions", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/drafter/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the drafting service (overrides config and DRAFTER_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

fn load_config(cli: &Cli) -> Result<DrafterConfig> {
    let service = match &cli.config {
        Some(path) => ConfigService::with_path(path)
            .with_api_url_override(std::env::var(drafter_core::config::API_URL_ENV).ok()),
        None => ConfigService::new()?,
    };
    let mut config = service
        .get_config()
        .with_context(|| format!("failed to load {}", service.path().display()))?;
    if let Some(url) = cli.api_url.as_ref().filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.clone();
    }
    Ok(config)
}

fn init_tracing(config: &DrafterConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the Drafter REPL.
///
/// Wires the HTTP draft service and the notification manager into a session
/// engine, prints notifications as they are posted and feeds each input line
/// to the engine.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config);

    tracing::info!("Using drafting service at {}", config.api.base_url);

    let service = Arc::new(HttpDraftService::from_config(&config.api));
    let notifications = Arc::new(NotificationManager::new(config.notifications.ttl()));
    let engine = DraftSessionEngine::new(service.clone(), notifications.clone());

    let mut events = notifications.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(NotificationEvent::Posted(notification)) => {
                    render::print_notification(&notification)
                }
                Ok(NotificationEvent::Removed { .. }) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Skipped {} notification event(s)", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut repl = Repl::new(engine, service, notifications.clone());

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    render::print_banner();

    loop {
        match rl.readline(&repl.prompt().await) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                if repl.handle(ReplCommand::parse(&line)).await == Flow::Exit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                render::print_error(&format!("Error: {err:?}"));
                break;
            }
        }
    }

    notifications.clear();
    printer.abort();

    Ok(())
}
