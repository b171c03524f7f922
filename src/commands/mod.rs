//! Command implementations for Polychat CLI

pub mod chat;
pub mod completions;
pub mod language;
pub mod provision;
pub mod status;
pub mod version;
