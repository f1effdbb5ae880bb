//! Runtime configuration, read from environment variables.

use std::path::PathBuf;

use tally_observability::LogFormat;
use thiserror::Error;

pub const ENV_DATA_DIR: &str = "TALLY_DATA_DIR";
pub const ENV_GROUP_SEPARATOR: &str = "TALLY_GROUP_SEPARATOR";
pub const ENV_LOG_FORMAT: &str = "TALLY_LOG_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a single character, got {value:?}")]
    InvalidSeparator { var: &'static str, value: String },

    #[error("{var} must be `text` or `json`, got {value:?}")]
    InvalidLogFormat { var: &'static str, value: String },

    #[error("failed to resolve a data directory; set TALLY_DATA_DIR")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the ledger file.
    pub data_dir: PathBuf,
    /// Digit grouping character for printed amounts.
    pub group_separator: char,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let dir = default_data_dir().ok_or(ConfigError::NoDataDir)?;
                tracing::debug!(?dir, "{} not set; using default data directory", ENV_DATA_DIR);
                dir
            }
        };

        let group_separator = match lookup(ENV_GROUP_SEPARATOR) {
            None => '.',
            Some(value) => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => {
                        return Err(ConfigError::InvalidSeparator {
                            var: ENV_GROUP_SEPARATOR,
                            value,
                        });
                    }
                }
            }
        };

        let log_format = match lookup(ENV_LOG_FORMAT) {
            None => LogFormat::default(),
            Some(value) => LogFormat::parse(&value).ok_or(ConfigError::InvalidLogFormat {
                var: ENV_LOG_FORMAT,
                value,
            })?,
        };

        Ok(Self {
            data_dir,
            group_separator,
            log_format,
        })
    }
}

/// `{app_data_dir}/tally`, falling back to `~/.local/share/tally`.
fn default_data_dir() -> Option<PathBuf> {
    let mut dir = dirs::data_dir().or_else(|| {
        dirs::home_dir().map(|mut h| {
            h.push(".local");
            h.push("share");
            h
        })
    })?;
    dir.push("tally");
    Some(dir)
}
