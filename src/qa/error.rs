//! Answer service error types

use std::fmt;
use thiserror::Error;

/// Failure to obtain an answer from the remote endpoint
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct QaError {
    pub kind: QaErrorKind,
    pub message: String,
}

impl QaError {
    pub fn new(kind: QaErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(QaErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(QaErrorKind::Timeout, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(QaErrorKind::ServerError, message)
    }

    pub fn client_error(message: impl Into<String>) -> Self {
        Self::new(QaErrorKind::ClientError, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(QaErrorKind::MalformedResponse, message)
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = if body.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {body}")
        };
        if status.is_server_error() {
            Self::server_error(message)
        } else {
            Self::client_error(message)
        }
    }

    /// Classify a transport-level reqwest failure
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(err.to_string())
        } else if err.is_decode() {
            Self::malformed(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

/// Failure classification, used for diagnostics only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QaErrorKind {
    /// Connection refused, DNS, reset, ...
    Network,
    /// No response within the request timeout
    Timeout,
    /// 5xx
    ServerError,
    /// Any other non-2xx status
    ClientError,
    /// Body was not the expected JSON shape
    MalformedResponse,
    /// The caller gave up on the request before it resolved
    Cancelled,
}

impl QaErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::ServerError => "server_error",
            Self::ClientError => "client_error",
            Self::MalformedResponse => "malformed_response",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for QaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
