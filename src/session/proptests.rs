//! Property-based tests for the submit state machine

use super::*;
use crate::qa::{Answer, QaErrorKind};
use proptest::prelude::*;

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t\n]{1,5}",
        "[ ]{0,3}[a-zA-Z?]{1,20}[ ]{0,3}",
    ]
}

fn arb_error_kind() -> impl Strategy<Value = QaErrorKind> {
    prop_oneof![
        Just(QaErrorKind::Network),
        Just(QaErrorKind::Timeout),
        Just(QaErrorKind::ServerError),
        Just(QaErrorKind::ClientError),
        Just(QaErrorKind::MalformedResponse),
        Just(QaErrorKind::Cancelled),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_text().prop_map(|text| Event::Submit { text }),
        ("[a-zA-Z .]{1,30}", proptest::option::of("[a-z]{1,8}\\.pdf")).prop_map(
            |(text, source)| Event::AnswerReceived {
                answer: Answer { text, source }
            }
        ),
        (arb_error_kind(), "[a-z ]{0,20}")
            .prop_map(|(kind, message)| Event::AnswerFailed { kind, message }),
    ]
}

/// Fold events through the state machine, collecting appended messages
fn run(events: Vec<Event>) -> (SessionState, Vec<(Sender, String)>) {
    let mut state = SessionState::Idle;
    let mut appended = Vec::new();
    for event in events {
        let Ok(result) = transition(state, event) else {
            continue;
        };
        for effect in &result.effects {
            if let Effect::AppendMessage { sender, text, .. } = effect {
                appended.push((*sender, text.clone()));
            }
        }
        state = result.new_state;
    }
    (state, appended)
}

proptest! {
    #[test]
    fn prop_transcript_is_user_bot_pairs(events in proptest::collection::vec(arb_event(), 0..40)) {
        let (state, appended) = run(events);

        for (i, (sender, _)) in appended.iter().enumerate() {
            let expected = if i % 2 == 0 { Sender::User } else { Sender::Bot };
            prop_assert_eq!(*sender, expected);
        }

        let users = appended.iter().filter(|(s, _)| *s == Sender::User).count();
        let bots = appended.len() - users;
        match state {
            SessionState::Idle => prop_assert_eq!(users, bots),
            SessionState::AwaitingAnswer => prop_assert_eq!(users, bots + 1),
        }
    }

    #[test]
    fn prop_blank_input_never_accepted(
        text in "[ \t\n]{0,8}",
        pending in any::<bool>(),
    ) {
        let result = transition(SessionState::from_pending(pending), Event::Submit { text });
        prop_assert_eq!(result.unwrap_err(), TransitionError::EmptyInput);
    }

    #[test]
    fn prop_user_text_is_trimmed(text in "[ \t]{0,4}[a-z][a-z ]{0,10}[a-z]?[ \t]{0,4}") {
        let result = transition(SessionState::Idle, Event::Submit { text: text.clone() }).unwrap();
        let appended = result.effects.iter().find_map(|e| match e {
            Effect::AppendMessage { text, .. } => Some(text.clone()),
            _ => None,
        });
        prop_assert_eq!(appended.as_deref(), Some(text.trim()));
    }

    #[test]
    fn prop_pending_effect_matches_new_state(
        pending in any::<bool>(),
        event in arb_event(),
    ) {
        let state = SessionState::from_pending(pending);
        if let Ok(result) = transition(state, event) {
            let set_pending: Vec<bool> = result.effects.iter().filter_map(|e| match e {
                Effect::SetPending(p) => Some(*p),
                _ => None,
            }).collect();
            prop_assert_eq!(set_pending, vec![result.new_state.is_pending()]);
            prop_assert_ne!(result.new_state, state);
        }
    }

    #[test]
    fn prop_one_request_per_accepted_submit(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = SessionState::Idle;
        for event in events {
            let was_pending = state.is_pending();
            if let Ok(result) = transition(state, event) {
                let requests = result.effects.iter()
                    .filter(|e| matches!(e, Effect::RequestAnswer { .. }))
                    .count();
                prop_assert!(requests <= 1);
                if requests == 1 {
                    prop_assert!(!was_pending);
                }
                state = result.new_state;
            }
        }
    }
}
