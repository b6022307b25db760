//! Pure state transition function for the submit protocol

use super::{Effect, Event, SessionState};
use thiserror::Error;

/// Bot reply for every remote failure. Transport detail stays in the log.
pub const FAILURE_TEXT: &str =
    "Sorry — I'm having trouble connecting to the server. Please try again.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons an event is rejected. None of these are shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("input is empty after trimming")]
    EmptyInput,
    #[error("a request is already in flight")]
    RequestInFlight,
    #[error("no request is in flight")]
    NoRequestInFlight,
}

impl TransitionError {
    /// Submission rejected by the eligibility gate
    pub fn is_validation_skip(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::RequestInFlight)
    }
}

/// Given the same inputs this always produces the same outputs and performs
/// no I/O. Message ids and timestamps are assigned when effects are applied.
pub fn transition(
    state: SessionState,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        (SessionState::Idle, Event::Submit { text }) => {
            let query = text.trim();
            if query.is_empty() {
                return Err(TransitionError::EmptyInput);
            }
            Ok(TransitionResult::new(SessionState::AwaitingAnswer)
                .with_effect(Effect::append_user(query))
                .with_effect(Effect::ClearDraft)
                .with_effect(Effect::SetPending(true))
                .with_effect(Effect::RequestAnswer {
                    query: query.to_string(),
                }))
        }

        (SessionState::AwaitingAnswer, Event::Submit { text }) => {
            if text.trim().is_empty() {
                Err(TransitionError::EmptyInput)
            } else {
                Err(TransitionError::RequestInFlight)
            }
        }

        (SessionState::AwaitingAnswer, Event::AnswerReceived { answer }) => {
            Ok(resolved(Effect::append_bot(answer.text, answer.source)))
        }

        (SessionState::AwaitingAnswer, Event::AnswerFailed { .. }) => {
            Ok(resolved(Effect::append_bot(FAILURE_TEXT, None)))
        }

        (SessionState::Idle, Event::AnswerReceived { .. } | Event::AnswerFailed { .. }) => {
            Err(TransitionError::NoRequestInFlight)
        }
    }
}

fn resolved(reply: Effect) -> TransitionResult {
    TransitionResult::new(SessionState::Idle)
        .with_effect(reply)
        .with_effect(Effect::SetPending(false))
        .with_effect(Effect::FocusInput)
}
