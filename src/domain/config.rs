use serde::{Deserialize, Serialize};
use std::fmt;

/// Config file key for the log level.
pub const LOG_LEVEL_KEY: &str = "log-level";
/// Config file key for the Airtable API token.
pub const AIRTABLE_TOKEN_KEY: &str = "airtable-token";

/// Schemy configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SchemyConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Airtable personal access token
    #[serde(default)]
    pub airtable_token: String,
}

/// Values passed on the command line, which win over everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub airtable_token: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SchemyConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            airtable_token: String::new(),
        }
    }
}

impl SchemyConfig {
    /// Environment variable consulted for a config key, e.g. `airtable-token`
    /// becomes `AIRTABLE_TOKEN`.
    pub fn env_var_name(key: &str) -> String {
        key.replace('-', "_").to_uppercase()
    }

    /// Overlay values from the environment, looked up through `lookup`.
    pub fn merge_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(&Self::env_var_name(LOG_LEVEL_KEY)) {
            self.log_level = level;
        }
        if let Some(token) = lookup(&Self::env_var_name(AIRTABLE_TOKEN_KEY)) {
            self.airtable_token = token;
        }
    }

    /// Overlay values supplied as command line flags.
    pub fn merge_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.log_level {
            self.log_level = level.clone();
        }
        if let Some(token) = &overrides.airtable_token {
            self.airtable_token = token.clone();
        }
    }

    pub fn has_token(&self) -> bool {
        !self.airtable_token.trim().is_empty()
    }
}

impl fmt::Debug for SchemyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.airtable_token.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("SchemyConfig")
            .field("log_level", &self.log_level)
            .field("airtable_token", &token)
            .finish()
    }
}
