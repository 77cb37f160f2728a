//! Transcript message types.
//!
//! This module contains types for representing dialogue turns in a draft
//! session transcript.

use serde::{Deserialize, Serialize};

/// Represents the speaker of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// A question asked by the drafting assistant.
    System,
    /// An answer supplied by the user.
    User,
}

/// A single dialogue turn.
///
/// System messages never carry a key. User messages carry the template
/// variable key they answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    /// The speaker of the message.
    pub role: MessageRole,
    /// The message text.
    pub text: String,
    /// Variable key answered by this message (user messages only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl TranscriptMessage {
    /// Creates a system message holding a question prompt.
    pub fn question(prompt: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            text: prompt.into(),
            key: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates a user message answering `key`.
    pub fn answer(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
            key: Some(key.into()),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}
