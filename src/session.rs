//! Conversation session: transcript store and submit state machine
//!
//! Follows the Elm Architecture: [`transition`] is pure and returns
//! [`Effect`]s, which the controller applies to the [`SessionStore`].

mod effect;
mod event;
mod message;
mod state;
mod store;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use message::{Message, Sender};
pub use state::SessionState;
pub use store::{SessionEvent, SessionSnapshot, SessionStore};
pub use transition::transition;

#[cfg(test)]
pub use transition::{TransitionError, FAILURE_TEXT};
