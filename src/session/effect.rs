//! Effects produced by state transitions

use super::message::Sender;

/// Effects to be applied to the store (or performed) after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Build a message with a fresh id and timestamp and append it
    AppendMessage {
        sender: Sender,
        text: String,
        source: Option<String>,
    },

    /// Empty the input surface
    ClearDraft,

    /// Set the pending flag
    SetPending(bool),

    /// Issue the remote call
    RequestAnswer { query: String },

    /// Hand focus back to the input surface
    FocusInput,
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::User,
            text: text.into(),
            source: None,
        }
    }

    pub fn append_bot(text: impl Into<String>, source: Option<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::Bot,
            text: text.into(),
            source,
        }
    }
}
