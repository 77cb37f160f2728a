//! Ephemeral notification management.

mod manager;

pub use manager::NotificationManager;
