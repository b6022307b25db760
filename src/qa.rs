//! Question-answering endpoint abstraction
//!
//! The session controller talks to the remote endpoint only through
//! [`AnswerService`], so tests can swap in mocks.

mod error;
mod http;
mod types;

pub use error::{QaError, QaErrorKind};
pub use http::HttpAnswerService;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// A remote endpoint that answers one free-text query at a time
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Ask a single question. Defaults for missing response fields are
    /// already resolved in the returned [`Answer`].
    async fn ask(&self, query: &str) -> Result<Answer, QaError>;

    /// Human-readable endpoint identifier for logs
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: AnswerService + ?Sized> AnswerService for Arc<T> {
    async fn ask(&self, query: &str) -> Result<Answer, QaError> {
        (**self).ask(query).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for answer services
pub struct LoggingService<T> {
    inner: T,
}

impl<T: AnswerService> LoggingService<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T: AnswerService> AnswerService for LoggingService<T> {
    async fn ask(&self, query: &str) -> Result<Answer, QaError> {
        let start = std::time::Instant::now();
        let result = self.inner.ask(query).await;
        let duration = start.elapsed();

        match &result {
            Ok(answer) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    query_chars = query.chars().count(),
                    answer_chars = answer.text.chars().count(),
                    has_source = answer.source.is_some(),
                    "Query answered"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    kind = %e.kind,
                    error = %e.message,
                    "Query failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
