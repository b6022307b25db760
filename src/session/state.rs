//! Session lifecycle state

/// Where the session is in the submit protocol.
///
/// `USER_APPENDED` and `RESOLVED` from the protocol description are never
/// observable at rest: they happen inside a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// Exactly one remote call is outstanding
    AwaitingAnswer,
}

impl SessionState {
    pub fn from_pending(pending: bool) -> Self {
        if pending {
            Self::AwaitingAnswer
        } else {
            Self::Idle
        }
    }

    #[cfg(test)]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::AwaitingAnswer)
    }
}
