use chrono::Duration;

use coursedesk_core::validation::aggregator::{AggregatorSettings, DEFAULT_SUCCESS_DISPLAY_MS};

/// Upper bound for `SUCCESS_DISPLAY_MS` (one day).
pub const MAX_SUCCESS_DISPLAY_MS: i64 = 86_400_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Runtime configuration loaded from environment variables.
///
/// All fields have defaults; a `.env` file in the working directory is
/// honoured by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateConfig {
    /// How long a clean pass reports the success indicator (default: `3000`).
    pub success_display_ms: i64,
    /// Pretty-print the JSON report (default: `true`).
    pub report_pretty: bool,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            success_display_ms: DEFAULT_SUCCESS_DISPLAY_MS,
            report_pretty: true,
        }
    }
}

impl ValidateConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default |
    /// |----------------------|---------|
    /// | `SUCCESS_DISPLAY_MS` | `3000`  |
    /// | `REPORT_PRETTY`      | `true`  |
    ///
    /// `SUCCESS_DISPLAY_MS` is capped at [`MAX_SUCCESS_DISPLAY_MS`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let success_display_ms = match lookup("SUCCESS_DISPLAY_MS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|ms| (0..=MAX_SUCCESS_DISPLAY_MS).contains(ms))
                .ok_or(ConfigError::InvalidValue {
                    var: "SUCCESS_DISPLAY_MS",
                    expected: "an integer between 0 and 86400000",
                    value: raw,
                })?,
            None => defaults.success_display_ms,
        };

        let report_pretty = match lookup("REPORT_PRETTY") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                var: "REPORT_PRETTY",
                expected: "true or false",
                value: raw,
            })?,
            None => defaults.report_pretty,
        };

        Ok(Self {
            success_display_ms,
            report_pretty,
        })
    }

    pub fn aggregator_settings(&self) -> AggregatorSettings {
        AggregatorSettings {
            success_display: Duration::milliseconds(self.success_display_ms),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
