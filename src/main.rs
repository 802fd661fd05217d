//! cargotrack - ocean-freight cargo tracking
//!
//! Main entry point for the cargotrack CLI.

mod cli;
mod register;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cargotrack_config::{Config, ConfigLoader, ConfigValidator};
use cargotrack_core::Reporter;
use cargotrack_protocols::TrackerError;

use cli::Cli;

/// Initialize tracing with console and file output.
///
/// Log files are written to `<results_dir>/logs/` with daily rotation. When
/// that directory is unusable, logging continues on the console only.
fn init_tracing(results_dir: &Path) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().with_target(true).with_ansi(true);

    let log_dir = results_dir.join("logs");
    match file_writer(&log_dir) {
        Ok(writer) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init();
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .init();
            warn!("File logging disabled, cannot use {}: {}", log_dir.display(), e);
        }
    }
}

fn file_writer(log_dir: &Path) -> Result<NonBlocking, Box<dyn Error>> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("cargotrack")
        .filename_suffix("log")
        .max_log_files(30)
        .build(log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes the file writer on exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    Ok(non_blocking)
}

/// Load `.env`, the config file and environment overrides, then validate.
fn load_config(cli: &Cli) -> Result<Config, Box<dyn Error>> {
    ConfigLoader::load_dotenv(&PathBuf::from(".env"))?;

    let mut config = ConfigLoader::load_or_default(&cli.config)?;
    ConfigLoader::apply_env(&mut config);
    if cli.headless {
        config.browser.headless = true;
    }

    Ok(config)
}

fn validate(config: &Config) -> Result<(), Box<dyn Error>> {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    if !result.is_valid() {
        let errors: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
        return Err(TrackerError::Setup(format!("invalid configuration: {}", errors.join("; "))).into());
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(&cli)?;
    init_tracing(&config.tracker.results_dir);
    validate(&config)?;

    if cli.cached {
        let history = register::history_store(&config);
        let record = history
            .latest_record(&cli.reference_id)
            .ok_or_else(|| {
                TrackerError::Setup(format!(
                    "no stored result for {} in {}",
                    cli.reference_id,
                    history.path().display()
                ))
            })?;
        Reporter::print(&record);
        return Ok(());
    }

    let tracker = register::build_tracker(&config, !cli.no_map)?;

    println!("{}", Reporter::banner(&cli.reference_id));
    info!("Tracking {}", cli.reference_id);

    let record = tracker.track(&cli.reference_id).await?;
    Reporter::print(&record);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("\nError: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_writer_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("results/logs");

        assert!(file_writer(&log_dir).is_ok());
        assert!(log_dir.is_dir());
    }

    #[test]
    fn test_file_writer_unusable_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("results");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(file_writer(&blocker.join("logs")).is_err());
    }
}
