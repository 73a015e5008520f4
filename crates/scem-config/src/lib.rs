//! Configuration for the sCEM dashboard.
//!
//! Layered with figment: built-in defaults, then the TOML file (the
//! platform config path or an explicit `--config`), then `SCEM_*`
//! environment variables. Nested keys use a double underscore, so
//! `SCEM_ALARMS__DEMO_GENERATOR=false` disables the demo generator.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub alarms: AlarmConfig,

    #[serde(default)]
    pub monitoring: MonitoringConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiConfig {
    /// Tick period driving the ticker and notification expiry.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Frame period.
    #[serde(default = "default_render_rate_ms")]
    pub render_rate_ms: u64,

    /// Header clock refresh period.
    #[serde(default = "default_clock_interval_secs")]
    pub clock_interval_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            render_rate_ms: default_render_rate_ms(),
            clock_interval_secs: default_clock_interval_secs(),
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn render_rate(&self) -> Duration {
        Duration::from_millis(self.render_rate_ms)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_secs(self.clock_interval_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AlarmConfig {
    /// Raise a random demo alarm every `generator_interval_secs`.
    #[serde(default = "default_true")]
    pub demo_generator: bool,

    #[serde(default = "default_generator_interval_secs")]
    pub generator_interval_secs: u64,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            demo_generator: true,
            generator_interval_secs: default_generator_interval_secs(),
        }
    }
}

impl AlarmConfig {
    pub fn generator_interval(&self) -> Duration {
        Duration::from_secs(self.generator_interval_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MonitoringConfig {
    #[serde(default = "default_chart_refresh_secs")]
    pub chart_refresh_secs: u64,

    /// Points per trend series.
    #[serde(default = "default_history_points")]
    pub history_points: usize,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            chart_refresh_secs: default_chart_refresh_secs(),
            history_points: default_history_points(),
        }
    }
}

impl MonitoringConfig {
    pub fn chart_refresh(&self) -> Duration {
        Duration::from_secs(self.chart_refresh_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Key/value store file. Defaults to [`default_store_path`].
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_store_path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log file. Defaults to [`default_log_path`].
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn resolved_file(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_log_path)
    }
}

fn default_tick_rate_ms() -> u64 {
    250
}
fn default_render_rate_ms() -> u64 {
    33
}
fn default_clock_interval_secs() -> u64 {
    1
}
fn default_true() -> bool {
    true
}
fn default_generator_interval_secs() -> u64 {
    60
}
fn default_chart_refresh_secs() -> u64 {
    5
}
fn default_history_points() -> usize {
    10
}

impl Config {
    /// Reject settings the dashboard cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            ("ui.tick_rate_ms", self.ui.tick_rate_ms),
            ("ui.render_rate_ms", self.ui.render_rate_ms),
            ("ui.clock_interval_secs", self.ui.clock_interval_secs),
            (
                "alarms.generator_interval_secs",
                self.alarms.generator_interval_secs,
            ),
            (
                "monitoring.chart_refresh_secs",
                self.monitoring.chart_refresh_secs,
            ),
        ];
        for (field, value) in intervals {
            if value == 0 {
                return Err(ConfigError::Validation {
                    field: field.into(),
                    reason: "must be greater than zero".into(),
                });
            }
        }
        if self.monitoring.history_points < 2 {
            return Err(ConfigError::Validation {
                field: "monitoring.history_points".into(),
                reason: format!("need at least 2 points, got {}", self.monitoring.history_points),
            });
        }
        Ok(())
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "scem", "scem")
}

fn dirs_fallback(kind: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(kind);
    p.push("scem");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Where the key/value store lives unless configured otherwise.
pub fn default_store_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".local/share").join("store.json"),
        |dirs| dirs.data_dir().join("store.json"),
    )
}

/// Where logs go unless configured otherwise.
pub fn default_log_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".cache").join("scem.log"),
        |dirs| dirs.cache_dir().join("scem.log"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
///
/// `path` overrides the platform config path. A missing file is not an
/// error; the defaults and environment still apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("SCEM_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, returning a default if loading or validation fails.
pub fn load_config_or_default(path: Option<&Path>) -> Config {
    load_config(path).unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}
