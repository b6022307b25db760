//! Runtime configuration from environment variables

use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/query";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid URL {value:?}: {reason}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("{var}: expected a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
    #[error("{var}: expected \"tui\" or \"plain\", got {value:?}")]
    InvalidUi { var: &'static str, value: String },
}

/// Which frontend drives the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Tui,
    Plain,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Question-answering endpoint
    pub api_url: Url,
    /// Upper bound on a single remote call
    pub request_timeout: Duration,
    pub log_path: PathBuf,
    /// `None` means pick based on whether stdout is a terminal
    pub ui: Option<UiMode>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = {
            let value = lookup("NITAI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
            parse_url("NITAI_API_URL", &value)?
        };

        let request_timeout = match lookup("NITAI_REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                let parsed = value.trim().parse::<u64>();
                match parsed {
                    Ok(secs) if secs > 0 => Duration::from_secs(secs),
                    _ => {
                        return Err(ConfigError::InvalidTimeout {
                            var: "NITAI_REQUEST_TIMEOUT_SECS",
                            value,
                        })
                    }
                }
            }
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let log_path = lookup("NITAI_LOG_PATH").map_or_else(
            || {
                let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(format!("{home}/.nitai/nitai.log"))
            },
            PathBuf::from,
        );

        let ui = match lookup("NITAI_UI").as_deref().map(str::trim) {
            None | Some("") => None,
            Some("tui") => Some(UiMode::Tui),
            Some("plain") => Some(UiMode::Plain),
            Some(other) => {
                return Err(ConfigError::InvalidUi {
                    var: "NITAI_UI",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            api_url,
            request_timeout,
            log_path,
            ui,
        })
    }
}

fn parse_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        var,
        value: value.to_string(),
        reason,
    };
    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    Ok(url)
}
