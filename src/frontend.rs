//! Terminal frontends
//!
//! Both only read session snapshots, edit the draft, and call `submit`.

pub mod plain;
pub mod tui;
