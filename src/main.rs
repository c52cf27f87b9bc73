//! domlens - visual element inspector
//!
//! Entry point for the domlens CLI.

mod cli;
mod cmd_inspect;
mod cmd_replay;
mod output;
mod settings;

use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domlens_config::{ConfigLoader, ConfigValidator, LoggingConfig};

use crate::cli::{Cli, Commands};
use crate::cmd_inspect::run_inspect;
use crate::cmd_replay::run_replay;

/// Initialize tracing: console on stderr, plus a daily file when a log
/// directory is configured.
fn init_tracing(logging: &LoggingConfig, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("domlens")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Keep the writer alive for the program duration
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;

    let log_dir = cli.log_file.clone().or_else(|| config.logging.directory.clone());
    init_tracing(&config.logging, log_dir.as_deref())?;
    debug!(config = %cli.config.display(), "Configuration loaded");

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("Config warning at {}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        let details: Vec<String> = validation
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect();
        bail!("Invalid configuration: {}", details.join("; "));
    }

    let options = settings::inspector_options(&config.inspector);

    match cli.command {
        Commands::Replay {
            page,
            script,
            format,
        } => run_replay(&page, &script, options, &format),
        Commands::Inspect {
            page,
            element,
            format,
        } => run_inspect(&page, element.as_deref(), &format),
    }
}
