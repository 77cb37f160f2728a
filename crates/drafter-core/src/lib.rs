pub mod config;
pub mod error;
pub mod notification;
pub mod service;
pub mod session;
pub mod template;

// Re-export common error type
pub use error::{DrafterError, Result};
