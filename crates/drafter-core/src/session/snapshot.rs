//! Read-only session views handed to the interaction surface.

use super::model::{DraftPhase, DraftResult};
use super::transcript::Transcript;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fill status of one template variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableStatus {
    pub key: String,
    /// Answer if given, otherwise the prefilled value.
    pub value: Option<String>,
}

impl VariableStatus {
    /// A variable counts as filled when it has a non-empty value.
    pub fn is_filled(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// Owned copy of the session state at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: DraftPhase,
    pub title: Option<String>,
    pub template_id: Option<i64>,
    pub transcript: Transcript,
    /// Index of the next unanswered question.
    pub cursor: usize,
    pub question_count: usize,
    pub missing_keys: Vec<String>,
    pub unanswered_keys: Vec<String>,
    pub variables: Vec<VariableStatus>,
    pub prefilled: HashMap<String, String>,
    pub answers: HashMap<String, String>,
    pub result: Option<DraftResult>,
}

impl SessionSnapshot {
    /// One-based question number for "Question n of m" displays.
    pub fn question_number(&self) -> usize {
        (self.cursor + 1).min(self.question_count.max(1))
    }

    pub fn is_complete(&self) -> bool {
        self.phase == DraftPhase::Complete
    }
}
