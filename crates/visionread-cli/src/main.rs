#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;

use std::process;

use anyhow::Context;
use visionread_core::ReadService;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "visionread_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "visionread_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "visionread_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let service = cli.create_service()?;
    let text = recognize(&service, &cli).await?;
    println!("{text}");

    Ok(())
}

/// Runs one recognition, mapping the two polling failures to their legacy
/// strings when `--legacy-output` is set.
async fn recognize(service: &ReadService, cli: &Cli) -> anyhow::Result<String> {
    match service.recognize_text(cli.request()).await {
        Ok(text) => Ok(text),
        Err(error) => match error.legacy_sentinel() {
            Some(sentinel) if cli.legacy_output => {
                tracing::warn!(
                    target: TRACING_TARGET_SHUTDOWN,
                    error = %error,
                    "read analysis did not produce text"
                );
                Ok(sentinel.to_owned())
            }
            _ => Err(error).with_context(|| format!("failed to read text from {}", cli.uri)),
        },
    }
}
