//! Transcript entries

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique message identifier. Allocated from an atomic counter, so
/// ids are strictly increasing in creation order regardless of clock
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    fn next() -> Self {
        Self(NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Bot,
}

/// A single transcript entry. Fields are private: a message cannot change
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    source: Option<String>,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text.into(), None)
    }

    pub fn bot(text: impl Into<String>, source: Option<String>) -> Self {
        Self::new(Sender::Bot, text.into(), source)
    }

    fn new(sender: Sender, text: String, source: Option<String>) -> Self {
        debug_assert!(!text.trim().is_empty(), "message text must not be blank");
        let source = match sender {
            Sender::User => None,
            Sender::Bot => source.filter(|s| !s.is_empty()),
        };
        Self {
            id: MessageId::next(),
            text,
            sender,
            source,
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Attribution for bot messages; `None` means nothing to show
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
