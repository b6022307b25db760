//! Presentation helpers shared by the frontends

use crate::session::{Message, Sender};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

pub const TITLE: &str = "NITai — NIT Agartala AI Assistant";
pub const SUBTITLE: &str = "Ask about courses, exams, notices and more";
pub const WELCOME: &str = "Welcome to NITai — ask a question about courses, exams or notices.";
pub const THINKING: &str = "NITai is thinking…";
pub const PLACEHOLDER: &str = "Ask about courses, exams, or notices...";

pub fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "You",
        Sender::Bot => "NITai",
    }
}

/// `HH:MM` in the local timezone
pub fn time_label(timestamp: DateTime<Utc>) -> String {
    time_label_in(timestamp, &Local)
}

fn time_label_in<Tz>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format("%H:%M").to_string()
}

/// `Source: ...` line for bot messages that carry attribution
pub fn attribution(message: &Message) -> Option<String> {
    match message.sender() {
        Sender::Bot => message.source().map(|s| format!("Source: {s}")),
        Sender::User => None,
    }
}
