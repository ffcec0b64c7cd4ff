use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::core::controller::SwipeTiming;
use crate::core::session::SessionRules;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub share: ShareSettings,
    #[serde(default)]
    pub registry: RegistrySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_refill_threshold")]
    pub refill_threshold: usize,
    #[serde(default = "default_match_probability")]
    pub match_probability: f64,
    #[serde(default = "default_exit_delay_ms")]
    pub exit_delay_ms: u64,
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_match_expiry_secs")]
    pub match_expiry_secs: u64,
    pub history_limit: Option<usize>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            refill_threshold: default_refill_threshold(),
            match_probability: default_match_probability(),
            exit_delay_ms: default_exit_delay_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            match_expiry_secs: default_match_expiry_secs(),
            history_limit: None,
        }
    }
}

fn default_batch_size() -> usize { 5 }
fn default_refill_threshold() -> usize { 2 }
fn default_match_probability() -> f64 { 0.25 }
fn default_exit_delay_ms() -> u64 { 500 }
fn default_settle_delay_ms() -> u64 { 200 }
fn default_match_expiry_secs() -> u64 { 8 }

impl SessionSettings {
    /// Session rules with out-of-range values pulled back in
    ///
    /// The refill threshold stays below one batch, so a single refill always
    /// lifts the stock above it.
    pub fn rules(&self) -> SessionRules {
        let batch_size = self.batch_size.max(1);
        let refill_threshold = self.refill_threshold.min(batch_size - 1);
        if refill_threshold != self.refill_threshold {
            tracing::warn!(
                "refill_threshold {} must be below batch_size {}, using {}",
                self.refill_threshold,
                batch_size,
                refill_threshold
            );
        }

        SessionRules {
            batch_size,
            refill_threshold,
            match_probability: self.match_probability.clamp(0.0, 1.0),
            history_limit: self.history_limit,
        }
    }

    pub fn timing(&self) -> SwipeTiming {
        SwipeTiming {
            exit_delay: Duration::from_millis(self.exit_delay_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            match_expiry: Duration::from_secs(self.match_expiry_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareSettings {
    /// Origin prepended to share links, e.g. `https://uuidmatcher.example`
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            namespace: default_namespace(),
        }
    }
}

fn default_origin() -> String { "http://localhost:8080".to_string() }
fn default_namespace() -> String { crate::core::share::DEFAULT_NAMESPACE.to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySettings {
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
    #[serde(default = "default_idle_secs")]
    pub idle_secs: u64,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            idle_secs: default_idle_secs(),
        }
    }
}

fn default_max_sessions() -> u64 { 10_000 }
fn default_idle_secs() -> u64 { 1800 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MATCHER_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MATCHER__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("MATCHER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
