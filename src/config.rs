//! Application configuration
//!
//! All tunable parameters for the lookup service.
//! Defaults reproduce the stock scenario; the binary can override them
//! from a JSON file.

use core::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest lookup delay accepted by [`AppConfig::validate`].
pub const MAX_LOOKUP_DELAY_MS: u32 = 60_000;

/// Core application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    // --- Timing ---
    /// Simulated latency of every catalog lookup (milliseconds)
    pub lookup_delay_ms: u32,
    /// Deadline applied to each lookup; `None` waits indefinitely
    pub lookup_timeout_ms: Option<u32>,

    // --- Environment ---
    /// Environment variable whose value `"development"` enables dev mode
    pub env_var: String,

    // --- Scenario ---
    /// Trail looked up when no arguments are given
    pub default_trail: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lookup_delay_ms: 1000,
            lookup_timeout_ms: None,
            env_var: "APP_ENV".into(),
            default_trail: "North Country".into(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            warn!("Config parse failed: {}", e);
            Error::MalformedConfig {
                line: e.line(),
                column: e.column(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the scenario meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.lookup_delay_ms > MAX_LOOKUP_DELAY_MS {
            return Err(Error::ConfigLimit {
                field: "lookup_delay_ms",
                max: MAX_LOOKUP_DELAY_MS,
            });
        }
        if self.lookup_timeout_ms == Some(0) {
            return Err(Error::Config("lookup_timeout_ms must be positive"));
        }
        if self.env_var.is_empty() {
            return Err(Error::Config("env_var must not be empty"));
        }
        if self.default_trail.trim().is_empty() {
            return Err(Error::Config("default_trail must not be blank"));
        }
        Ok(())
    }

    pub fn lookup_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.lookup_delay_ms))
    }

    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.lookup_timeout_ms
            .map(|ms| Duration::from_millis(u64::from(ms)))
    }
}
