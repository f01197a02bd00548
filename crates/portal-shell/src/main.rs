mod commands;
mod helper;
mod logging;
mod render;
mod shell;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use portal_infrastructure::{ConfigService, HttpPortalClient, PortalPaths};

use crate::helper::CliHelper;
use crate::shell::{Flow, Services, Shell};

/// Interactive client for the student portal.
#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Sign in, browse the dashboard and submit projects and certificates", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::new(path),
        None => ConfigService::new_default()?,
    };
    let mut config = config_service.get_config()?;
    if let Some(base_url) = cli.base_url {
        config.backend.base_url = base_url;
    }

    let _log_guard = logging::init(&PortalPaths::logs_dir()?, &config.logging.level)?;
    tracing::info!(
        config = %config_service.path().display(),
        base_url = %config.backend.base_url,
        "Starting portal shell"
    );

    let client = Arc::new(HttpPortalClient::new(config.backend.clone())?);
    let mut shell = Shell::new(Services::from_client(client), config.forms.clone());

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    render::header();
    shell.start().await;

    loop {
        match rl.readline(shell.prompt()) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                if shell.handle(&line).await == Flow::Quit {
                    render::success("Goodbye!");
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                render::warning("CTRL-C detected. Type '/quit' to exit.");
            }
            Err(ReadlineError::Eof) => {
                render::success("CTRL-D detected. Exiting...");
                break;
            }
            Err(err) => {
                tracing::error!(error = %err, "Readline failed");
                render::error(&format!("Error: {err:?}"));
                break;
            }
        }
    }

    Ok(())
}
