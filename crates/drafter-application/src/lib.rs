//! Application layer for Drafter.
//!
//! This crate coordinates the draft session state machine with the remote
//! draft service and reports outcomes through the notification manager.

pub mod engine;
pub mod notification;

#[cfg(test)]
mod test_support;

pub use engine::{DraftSessionEngine, EngineOutcome};
pub use notification::NotificationManager;
