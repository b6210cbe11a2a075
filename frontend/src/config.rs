//! Frontend configuration.
//!
//! Loaded from a YAML file, then overridden from the environment:
//!
//! ```yaml
//! api_base_url: "http://localhost:3000/api"
//! locale: fr
//! currency_symbol: "€"
//! search:
//!   debounce_ms: 300
//!   max_suggestions: 8
//! envelopes:
//!   warning_threshold: 80
//! log_filter: "budget_frontend=debug"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::services::error_messages::Locale;

pub const API_URL_ENV: &str = "BUDGET_API_URL";
pub const LOCALE_ENV: &str = "BUDGET_LOCALE";
pub const LOG_FILTER_ENV: &str = "BUDGET_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Prefix handed to the gateway; service paths are relative to it
    pub api_base_url: String,
    pub locale: Locale,
    pub currency_symbol: String,
    pub search: SearchConfig,
    pub envelopes: EnvelopeDisplayConfig,
    /// `tracing-subscriber` filter directive
    pub log_filter: String,
}

/// Behaviour of the participant search box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub max_suggestions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeDisplayConfig {
    /// Usage percentage from which an envelope is shown as a warning
    pub warning_threshold: u32,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            locale: Locale::default(),
            currency_symbol: "$".to_string(),
            search: SearchConfig::default(),
            envelopes: EnvelopeDisplayConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            max_suggestions: 8,
        }
    }
}

impl Default for EnvelopeDisplayConfig {
    fn default() -> Self {
        Self {
            warning_threshold: 80,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl FrontendConfig {
    /// Read a YAML config file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&yaml)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: FrontendConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply `BUDGET_API_URL`, `BUDGET_LOCALE` and `BUDGET_LOG`
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(raw) = lookup(LOCALE_ENV) {
            match raw.parse::<Locale>() {
                Ok(locale) => self.locale = locale,
                Err(e) => warn!("Ignoring {}: {}", LOCALE_ENV, e),
            }
        }
        if let Some(filter) = lookup(LOG_FILTER_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }
}
