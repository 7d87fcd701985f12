//! Runtime configuration
//!
//! Resolution order, lowest to highest: built-in defaults, the JSON file
//! at `<config_dir>/maintenance-advisor/config.json`, environment
//! variables, then command-line flags (applied by the binary).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_LOG: &str = "MAINT_ADVISOR_LOG";
pub const ENV_PORT: &str = "MAINT_ADVISOR_PORT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdvisorConfig {
    /// trace | debug | info | warn | error
    pub log_level: String,
    /// Print JSON instead of text by default
    pub json_output: bool,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_output: false,
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3100,
        }
    }
}

/// Default location of the config file
pub fn config_path() -> PathBuf {
    // XDG config dir on Linux, ~/Library/Application Support on macOS
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("maintenance-advisor").join("config.json")
}

impl AdvisorConfig {
    /// Load from the default path, then apply environment overrides.
    /// A bad file or variable yields the defaults together with the error,
    /// so the caller can warn and go on.
    pub fn load_or_default() -> (Self, Option<anyhow::Error>) {
        Self::resolve_or_default(&config_path(), |key| std::env::var(key).ok())
    }

    /// File at `path`, then overrides from `lookup`
    pub fn resolve<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::from_file(path)?;
        config.apply_env(lookup)?;
        Ok(config)
    }

    pub fn resolve_or_default<F>(path: &Path, lookup: F) -> (Self, Option<anyhow::Error>)
    where
        F: Fn(&str) -> Option<String>,
    {
        match Self::resolve(path, lookup) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Read a config file. A missing file yields defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a map in tests)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG) {
            self.log_level = level;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("{} is not a valid port: '{}'", ENV_PORT, port))?;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log level as a tracing filter; unknown names fall back to INFO
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level
            .parse()
            .unwrap_or(tracing::Level::INFO)
    }
}
