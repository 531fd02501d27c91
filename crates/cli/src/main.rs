//! Mizan - back-office command-line client
//!
//! Main entry point: load `.env` and configuration, install tracing, run one
//! command and print its JSON result.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use mizan_cli::{run, AppContext, Cli};
use mizan_common::init_tracing;
use mizan_domain::Config;
use mizan_infra::config;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file before reading config
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_tracing(&config.logging.level, config.logging.json) {
        eprintln!("logging disabled: {err}");
    }
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env loaded"),
    }

    let ctx = match AppContext::new(config).context("failed to initialise the application") {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = run(&ctx, cli.command).await;
    ctx.shutdown();

    match result {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("{}", err.user_message());
            for (field, message) in err.field_errors() {
                eprintln!("  {field}: {message}");
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone()))
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => config::load().context("failed to load configuration")?,
    };
    Ok(config)
}
