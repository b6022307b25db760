//! Mock answer services for controller tests

use crate::qa::{Answer, AnswerService, QaError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock Answer Service
// ============================================================================

/// Returns queued results in order; a network error once the queue is empty
pub struct MockAnswerService {
    responses: Mutex<VecDeque<Result<Answer, QaError>>>,
    /// Record of all queries asked
    pub queries: Mutex<Vec<String>>,
}

impl MockAnswerService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_answer(&self, answer: Answer) {
        self.responses.lock().unwrap().push_back(Ok(answer));
    }

    pub fn queue_error(&self, error: QaError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    fn next(&self, query: &str) -> Result<Answer, QaError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(QaError::network("No mock response queued")))
    }
}

impl Default for MockAnswerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerService for MockAnswerService {
    async fn ask(&self, query: &str) -> Result<Answer, QaError> {
        self.next(query)
    }

    fn endpoint(&self) -> &str {
        "mock://answers"
    }
}

// ============================================================================
// Delayed Mock Answer Service
// ============================================================================

/// Like [`MockAnswerService`] but sleeps before answering, so a request can
/// be observed in flight
pub struct DelayedMockAnswerService {
    inner: MockAnswerService,
    delay: Duration,
    /// Notified (with a stored permit) when a request starts
    pub request_started: Arc<Notify>,
}

impl DelayedMockAnswerService {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MockAnswerService::new(),
            delay,
            request_started: Arc::new(Notify::new()),
        }
    }

    pub fn queue_answer(&self, answer: Answer) {
        self.inner.queue_answer(answer);
    }

    pub fn recorded_queries(&self) -> Vec<String> {
        self.inner.recorded_queries()
    }
}

#[async_trait]
impl AnswerService for DelayedMockAnswerService {
    async fn ask(&self, query: &str) -> Result<Answer, QaError> {
        self.inner.queries.lock().unwrap().push(query.to_string());
        self.request_started.notify_one();
        tokio::time::sleep(self.delay).await;
        self.inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(QaError::network("No mock response queued")))
    }

    fn endpoint(&self) -> &str {
        "mock://delayed"
    }
}

// ============================================================================
// Stalled Answer Service
// ============================================================================

/// Never resolves
pub struct StalledAnswerService;

#[async_trait]
impl AnswerService for StalledAnswerService {
    async fn ask(&self, _query: &str) -> Result<Answer, QaError> {
        std::future::pending().await
    }

    fn endpoint(&self) -> &str {
        "mock://stalled"
    }
}
