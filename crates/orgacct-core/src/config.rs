use crate::retry::{RetriableStatuses, RetryPolicy, DEFAULT_RETRIABLE_STATUSES};
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides `base_url`.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Retry policy parameters (optional `[retry]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// First backoff interval in milliseconds (before jitter).
    pub initial_interval_ms: u64,
    /// Growth factor between consecutive intervals.
    pub multiplier: f64,
    /// Jitter spread in [0, 1]; 0 disables jitter.
    pub randomization_factor: f64,
    /// Cap on a single interval in milliseconds.
    pub max_interval_ms: u64,
    /// Total time budget for one call, retries included, in milliseconds.
    pub max_elapsed_ms: u64,
    /// HTTP statuses that trigger a retry.
    #[serde(default = "default_retriable_statuses")]
    pub retriable_statuses: Vec<u16>,
}

fn default_retriable_statuses() -> Vec<u16> {
    DEFAULT_RETRIABLE_STATUSES.to_vec()
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: 500,
            multiplier: 1.5,
            randomization_factor: 0.5,
            max_interval_ms: 60_000,
            max_elapsed_ms: 10_000,
            retriable_statuses: default_retriable_statuses(),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        RetryPolicy {
            initial_interval: Duration::from_millis(cfg.initial_interval_ms),
            multiplier: cfg.multiplier,
            randomization_factor: cfg.randomization_factor,
            max_interval: Duration::from_millis(cfg.max_interval_ms),
            max_elapsed: Duration::from_millis(cfg.max_elapsed_ms),
            retriable: RetriableStatuses::new(cfg.retriable_statuses.iter().copied()),
        }
    }
}

/// Client configuration loaded from `~/.config/orgacct/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root of the accounts API, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Limit for one physical attempt, in seconds.
    pub request_timeout_secs: u64,
    /// Limit for establishing a connection, in seconds.
    pub connect_timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
            retry: None,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        match &self.retry {
            Some(retry) => RetryPolicy::from(retry),
            None => RetryPolicy::from(&RetryConfig::default()),
        }
    }

    /// Override `base_url` from `API_BASE_URL` if it is set and non-empty.
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.base_url.trim().is_empty(), "base_url must not be empty");
        ensure!(self.request_timeout_secs > 0, "request_timeout_secs must be > 0");
        if let Some(retry) = &self.retry {
            ensure!(retry.multiplier >= 1.0, "retry.multiplier must be >= 1");
            ensure!(
                (0.0..=1.0).contains(&retry.randomization_factor),
                "retry.randomization_factor must be within [0, 1]"
            );
            ensure!(retry.max_elapsed_ms > 0, "retry.max_elapsed_ms must be > 0");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("orgacct")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClientConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ClientConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load and validate configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<ClientConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: ClientConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
