//! Runtime configuration for the todo CLI.
//!
//! Values come from environment variables, and command-line flags override
//! them:
//! - `TODO_PROMPT` - Optional. Prompt shown before each command. Defaults to `> `.
//! - `TODO_NO_BANNER` - Optional. `1`, `true` or `yes` hides the startup banner.
//! - `TODO_LOG` - Optional. Tracing filter directive. Defaults to `warn`.

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PROMPT: &str = "> ";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub show_banner: bool,
    pub log_filter: String,
    /// Read commands from this file instead of stdin.
    pub script: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            show_banner: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            script: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let prompt = lookup("TODO_PROMPT").unwrap_or_else(|| DEFAULT_PROMPT.to_string());

        let show_banner = match lookup("TODO_NO_BANNER") {
            Some(value) => !parse_flag("TODO_NO_BANNER", &value)?,
            None => true,
        };

        let log_filter = lookup("TODO_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            prompt,
            show_banner,
            log_filter,
            script: None,
        })
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        other => Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
