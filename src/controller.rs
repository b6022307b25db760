//! Session controller: runs the submit protocol against an answer service
//!
//! Events go through the pure [`transition`] function; the controller applies
//! the resulting effects to the store and performs the one remote call.

#[cfg(test)]
pub mod testing;

use crate::qa::{Answer, AnswerService, QaError, QaErrorKind};
use crate::session::{
    transition, Effect, Event, Message, Sender, SessionEvent, SessionSnapshot, SessionStore,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;

pub struct SessionController<S> {
    store: Arc<Mutex<SessionStore>>,
    service: S,
    request_timeout: Duration,
}

impl<S: AnswerService> SessionController<S> {
    pub fn new(service: S, request_timeout: Duration) -> Self {
        Self {
            store: Arc::new(Mutex::new(SessionStore::new())),
            service,
            request_timeout,
        }
    }

    /// Submit user input.
    ///
    /// Blank input, or input arriving while a request is in flight, is
    /// dropped without touching the store. Otherwise the user message is
    /// appended, the endpoint is queried, and exactly one bot message is
    /// appended whatever the outcome. Nothing is returned: results are
    /// observable only through the store.
    pub async fn submit(&self, raw_text: &str) {
        if let Some(request) = self.begin_submit(raw_text) {
            self.resolve(request).await;
        }
    }

    /// Run the eligibility gate without suspending. When the input is
    /// accepted the user message is already appended and `pending` is set
    /// on return; the request must then go to [`Self::resolve`].
    pub fn begin_submit(&self, raw_text: &str) -> Option<PendingRequest> {
        let query = dispatch(
            &mut lock(&self.store),
            Event::Submit {
                text: raw_text.to_string(),
            },
        )?;
        Some(self.pending_request(query))
    }

    /// [`Self::begin_submit`] with the draft, read under the same lock
    pub fn begin_submit_draft(&self) -> Option<PendingRequest> {
        let query = {
            let mut store = lock(&self.store);
            let text = store.draft().to_string();
            dispatch(&mut store, Event::Submit { text })?
        };
        Some(self.pending_request(query))
    }

    /// Query the endpoint and append the bot reply
    pub async fn resolve(&self, mut request: PendingRequest) {
        let outcome = self.request_answer(&request.query).await;
        request.settle(Event::from(outcome));
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        lock(&self.store).set_draft(text);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        lock(&self.store).snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        lock(&self.store).subscribe()
    }

    fn pending_request(&self, query: String) -> PendingRequest {
        PendingRequest {
            store: Arc::clone(&self.store),
            query,
            settled: false,
        }
    }

    /// The only suspension point of `submit`
    async fn request_answer(&self, query: &str) -> Result<Answer, QaError> {
        match tokio::time::timeout(self.request_timeout, self.service.ask(query)).await {
            Ok(result) => result,
            Err(_) => Err(QaError::timeout(format!(
                "no response within {}s",
                self.request_timeout.as_secs_f64()
            ))),
        }
    }
}

/// An accepted submission whose bot reply has not been appended yet.
///
/// Dropping it unsettled, for instance when the future running
/// [`SessionController::resolve`] is cancelled, appends the apology and
/// clears `pending`.
#[must_use = "dropping an unresolved request answers it with the apology"]
pub struct PendingRequest {
    store: Arc<Mutex<SessionStore>>,
    query: String,
    settled: bool,
}

impl PendingRequest {
    fn settle(&mut self, event: Event) {
        self.settled = true;
        dispatch(&mut lock(&self.store), event);
    }
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        if !self.settled {
            self.settle(Event::AnswerFailed {
                kind: QaErrorKind::Cancelled,
                message: "request dropped before an answer arrived".to_string(),
            });
        }
    }
}

fn lock(store: &Mutex<SessionStore>) -> MutexGuard<'_, SessionStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run one event through the state machine and apply its effects while the
/// caller holds the lock. Returns the query to send if the transition asked
/// for one.
fn dispatch(store: &mut SessionStore, event: Event) -> Option<String> {
    if let Event::AnswerFailed { kind, message } = &event {
        tracing::warn!(
            kind = %kind,
            error = %message,
            "Answer request failed, replying with apology"
        );
    }

    let result = match transition(store.state(), event) {
        Ok(result) => result,
        Err(e) if e.is_validation_skip() => {
            tracing::debug!(reason = %e, "Submission ignored");
            return None;
        }
        Err(e) => {
            tracing::warn!(reason = %e, "Event ignored");
            return None;
        }
    };

    let mut request = None;
    for effect in result.effects {
        if let Some(query) = apply_effect(store, effect) {
            request = Some(query);
        }
    }
    debug_assert_eq!(store.state(), result.new_state);
    request
}

fn apply_effect(store: &mut SessionStore, effect: Effect) -> Option<String> {
    match effect {
        Effect::AppendMessage {
            sender,
            text,
            source,
        } => {
            let message = match sender {
                Sender::User => Message::user(text),
                Sender::Bot => Message::bot(text, source),
            };
            tracing::debug!(id = %message.id(), sender = ?sender, "Appending message");
            store.append(message);
        }
        Effect::ClearDraft => store.clear_draft(),
        Effect::SetPending(pending) => store.set_pending(pending),
        Effect::FocusInput => store.request_focus(),
        Effect::RequestAnswer { query } => return Some(query),
    }
    None
}
