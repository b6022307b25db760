//! Session state store: transcript, pending flag, draft input

use super::{Message, SessionState};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 128;

/// Change notifications for renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    MessageAppended(Message),
    PendingChanged(bool),
    DraftChanged(String),
    FocusInput,
}

/// Holds the conversation. No business logic: the controller decides what
/// to append and when to toggle `pending`.
///
/// There is deliberately no way to remove, edit, or reorder messages.
pub struct SessionStore {
    transcript: Vec<Message>,
    pending: bool,
    draft: String,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            transcript: Vec::new(),
            pending: false,
            draft: String::new(),
            events,
        }
    }

    pub fn append(&mut self, message: Message) {
        self.transcript.push(message.clone());
        self.notify(SessionEvent::MessageAppended(message));
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
        self.notify(SessionEvent::PendingChanged(pending));
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
        self.notify(SessionEvent::DraftChanged(self.draft.clone()));
    }

    pub fn clear_draft(&mut self) {
        self.set_draft(String::new());
    }

    pub fn request_focus(&self) {
        self.notify(SessionEvent::FocusInput);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    #[cfg(test)]
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_pending(self.pending)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            transcript: self.transcript.clone(),
            pending: self.pending,
            draft: self.draft.clone(),
        }
    }

    fn notify(&self, event: SessionEvent) {
        // Fails only when nobody is subscribed
        let _ = self.events.send(event);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned copy of the store for rendering
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub transcript: Vec<Message>,
    pub pending: bool,
    pub draft: String,
}

impl SessionSnapshot {
    /// Nothing said yet and nothing in flight
    pub fn is_empty_state(&self) -> bool {
        self.transcript.is_empty() && !self.pending
    }

    /// Whether the submit trigger should be enabled
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.draft.trim().is_empty()
    }
}
