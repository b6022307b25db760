//! Events that drive the session state machine

use crate::qa::{Answer, QaError, QaErrorKind};

#[derive(Debug, Clone)]
pub enum Event {
    /// The user asked to submit raw input text
    Submit { text: String },

    /// The remote call returned an answer
    AnswerReceived { answer: Answer },

    /// The remote call failed or timed out
    AnswerFailed { kind: QaErrorKind, message: String },
}

impl From<Result<Answer, QaError>> for Event {
    fn from(result: Result<Answer, QaError>) -> Self {
        match result {
            Ok(answer) => Event::AnswerReceived { answer },
            Err(e) => Event::AnswerFailed {
                kind: e.kind,
                message: e.message,
            },
        }
    }
}
