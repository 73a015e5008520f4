//! `scem`: terminal dashboard for smart critical equipment monitoring.
//!
//! Built on [ratatui](https://ratatui.rs). Eight screens are navigable via
//! number keys (1-8): Dashboard, Verification, Monitoring, Configuration,
//! Planning, Alarms, Architecture and Spare. Alarms pop up as a modal
//! card until acknowledged.
//!
//! Logs are written to a file (default in the platform cache dir) so they
//! never reach the terminal. Equipment selection, observations and
//! interlock images persist in a JSON key/value file.
//!
//! Entry point: CLI argument parsing, configuration, tracing setup, panic
//! hooks and app launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use scem_config::Config;
use scem_core::{JsonFileStore, KvStore, MemoryStore};

use crate::app::App;

/// Terminal dashboard for monitoring critical plant equipment.
#[derive(Parser, Debug)]
#[command(name = "scem", version, about)]
struct Cli {
    /// Configuration file (defaults to the platform config dir)
    #[arg(short, long, env = "SCEM_CONFIG")]
    config: Option<PathBuf>,

    /// Log file path (overrides `[logging] file`)
    #[arg(long, env = "SCEM_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Key/value store file (overrides `[storage] path`)
    #[arg(long, env = "SCEM_STORE")]
    store: Option<PathBuf>,

    /// Disable the periodic demo alarm generator
    #[arg(long)]
    no_demo_alarms: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.log_file {
            config.logging.file = Some(path.clone());
        }
        if let Some(path) = &self.store {
            config.storage.path = Some(path.clone());
        }
        if self.no_demo_alarms {
            config.alarms.demo_generator = false;
        }
    }
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr, that would
/// corrupt the TUI output. The returned guard must be held for the
/// lifetime of the application so logs are flushed.
fn setup_tracing(verbose: u8, log_file: &Path) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "scem={log_level},scem_core={log_level},scem_config={log_level}"
        ))
    });

    let log_dir = log_file.parent().unwrap_or(Path::new("."));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("scem.log"));
    let _ = std::fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Open the persistent store, falling back to memory when the file is
/// unusable so the dashboard still starts.
fn open_store(path: &Path) -> Box<dyn KvStore> {
    match JsonFileStore::open(path) {
        Ok(store) => {
            info!(path = %path.display(), "using file store");
            Box::new(store)
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "file store unavailable, state will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let mut config = scem_config::load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    // Tracing to file; hold the guard so logs flush on exit
    let log_file = config.logging.resolved_file();
    let _log_guard = setup_tracing(cli.verbose, &log_file);

    info!(
        log_file = %log_file.display(),
        demo_alarms = config.alarms.demo_generator,
        "starting scem"
    );

    let store = open_store(&config.storage.resolved_path());
    let mut app = App::new(config, store);
    app.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "scem",
            "--store",
            "/tmp/s.json",
            "--log-file",
            "/tmp/s.log",
            "--no-demo-alarms",
            "-vv",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.storage.path.as_deref(), Some(Path::new("/tmp/s.json")));
        assert_eq!(config.logging.file.as_deref(), Some(Path::new("/tmp/s.log")));
        assert!(!config.alarms.demo_generator);
        assert_eq!(cli.verbose, 2);
    }
}
