use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::client::Timeouts;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RaggadonConfig {
    pub server: ServerConfig,
    pub timeouts: TimeoutConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    pub log_level: String,
    pub start_script: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutConfig {
    pub health_ms: u64,
    pub stats_ms: u64,
    pub request_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PathsConfig {
    pub mode_file: String,
    pub template: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let start_script = default_raggadon_dir()
            .join("start_server.sh")
            .to_string_lossy()
            .into_owned();
        Self {
            url: crate::client::DEFAULT_BASE_URL.into(),
            log_level: "warn".into(),
            start_script,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            health_ms: 3_000,
            stats_ms: 5_000,
            request_ms: 10_000,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let mode_file = home_dir().join(".rag_config").to_string_lossy().into_owned();
        let template = default_raggadon_dir()
            .join("CLAUDE.md")
            .to_string_lossy()
            .into_owned();
        Self {
            mode_file,
            template,
        }
    }
}

impl TimeoutConfig {
    pub fn to_timeouts(&self) -> Timeouts {
        Timeouts {
            health: Duration::from_millis(self.health_ms),
            stats: Duration::from_millis(self.stats_ms),
            request: Duration::from_millis(self.request_ms),
        }
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns `~/.raggadon/`
pub fn default_raggadon_dir() -> PathBuf {
    home_dir().join(".raggadon")
}

/// Returns the default config file path: `~/.raggadon/config.toml`
pub fn default_config_path() -> PathBuf {
    default_raggadon_dir().join("config.toml")
}

impl RaggadonConfig {
    /// Load config from `RAGGADON_CONFIG` or the default path, then apply env var overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var("RAGGADON_CONFIG")
            .map(|p| expand_tilde(&p))
            .unwrap_or_else(|_| default_config_path());
        Self::load_from(path)
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            debug!("no config file at {}, using defaults", path.display());
            RaggadonConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (RAGGADON_URL, RAGGADON_LOG_LEVEL,
    /// RAGGADON_MODE_FILE, RAGGADON_START_SCRIPT, RAGGADON_TEMPLATE).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("RAGGADON_URL") {
            self.server.url = val;
        }
        if let Ok(val) = std::env::var("RAGGADON_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("RAGGADON_START_SCRIPT") {
            self.server.start_script = val;
        }
        if let Ok(val) = std::env::var("RAGGADON_MODE_FILE") {
            self.paths.mode_file = val;
        }
        if let Ok(val) = std::env::var("RAGGADON_TEMPLATE") {
            self.paths.template = val;
        }
    }

    pub fn resolved_mode_file(&self) -> PathBuf {
        expand_tilde(&self.paths.mode_file)
    }

    pub fn resolved_template(&self) -> PathBuf {
        expand_tilde(&self.paths.template)
    }

    pub fn resolved_start_script(&self) -> PathBuf {
        expand_tilde(&self.server.start_script)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else {
        PathBuf::from(path)
    }
}
