//! Error types for the Drafter application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Drafter application.
///
/// Remote draft service failures and malformed responses are kept apart so
/// callers can log them differently, but the session engine treats both the
/// same way: report through a notification and roll back.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrafterError {
    /// The remote draft service could not be reached or answered with a
    /// non-success status.
    #[error("{message}")]
    Service {
        status: Option<u16>,
        message: String,
    },

    /// The response body could not be parsed into the expected shape.
    #[error("{0}")]
    InvalidResponse(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DrafterError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Service error
    pub fn service(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// Creates an InvalidResponse error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Service error
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    /// Check if this is an InvalidResponse error
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, Self::InvalidResponse(_))
    }

    /// Check if this error came from the remote draft service boundary.
    ///
    /// Both transport/status failures and unparsable bodies count.
    pub fn is_remote(&self) -> bool {
        self.is_service() || self.is_invalid_response()
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// HTTP status reported by the service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => *status,
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DrafterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DrafterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DrafterError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DrafterError>`.
pub type Result<T> = std::result::Result<T, DrafterError>;
