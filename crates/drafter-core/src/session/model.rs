//! Draft session domain model.
//!
//! This module contains the `DraftSession` entity: the active template, the
//! question cursor, the answer map, the transcript and the phase. Transitions
//! here are synchronous and side-effect free; the application layer decides
//! when to call the remote service around them.

use super::message::TranscriptMessage;
use super::snapshot::{SessionSnapshot, VariableStatus};
use super::transcript::Transcript;
use crate::template::{DraftTemplate, Question};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle phase of a draft session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftPhase {
    /// No dialogue started yet.
    #[default]
    Idle,
    /// Asking questions one at a time.
    Collecting,
    /// Waiting for the generated document.
    Generating,
    /// The generated document is available.
    Complete,
}

/// The generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftResult {
    pub output: String,
}

/// Result of recording an answer at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerStep {
    /// Another question was appended to the transcript at the new cursor.
    NextQuestion { cursor: usize },
    /// Every question has an answer; generation may start.
    AllAnswered,
}

/// The live unit of work.
///
/// Invariants:
/// - `cursor <= question count`
/// - `result` is present only in [`DraftPhase::Complete`]
/// - every key the cursor has passed has an entry in `answers`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftSession {
    template: Option<DraftTemplate>,
    answers: HashMap<String, String>,
    cursor: usize,
    transcript: Transcript,
    phase: DraftPhase,
    result: Option<DraftResult>,
    /// Bumped every time this session replaces a previous one.
    epoch: u64,
}

impl DraftSession {
    /// Creates an idle session with no template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh collecting session for `template`.
    ///
    /// The transcript is seeded with the first question, if there is one.
    pub fn begin(template: DraftTemplate, epoch: u64) -> Self {
        let mut transcript = Transcript::new();
        if let Some(first) = template.question(0) {
            transcript.push(TranscriptMessage::question(first.prompt.clone()));
        }

        Self {
            template: Some(template),
            answers: HashMap::new(),
            cursor: 0,
            transcript,
            phase: DraftPhase::Collecting,
            result: None,
            epoch,
        }
    }

    pub fn template(&self) -> Option<&DraftTemplate> {
        self.template.as_ref()
    }

    pub fn answers(&self) -> &HashMap<String, String> {
        &self.answers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&DraftResult> {
        self.result.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn question_count(&self) -> usize {
        self.template
            .as_ref()
            .map(DraftTemplate::question_count)
            .unwrap_or(0)
    }

    /// The question at the cursor, if the session is collecting and one remains.
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase != DraftPhase::Collecting {
            return None;
        }
        self.template.as_ref()?.question(self.cursor)
    }

    /// Whether the answer set may be sent for generation.
    ///
    /// True once every question is answered (including a template with no
    /// questions) or when a completed draft is regenerated.
    pub fn ready_to_generate(&self) -> bool {
        match self.phase {
            DraftPhase::Collecting => {
                self.template.is_some() && self.cursor >= self.question_count()
            }
            DraftPhase::Complete => true,
            DraftPhase::Idle | DraftPhase::Generating => false,
        }
    }

    /// Records `text` as the answer to the question at the cursor and advances.
    ///
    /// Returns `None` without touching state when there is no question at the
    /// cursor.
    pub fn record_answer(&mut self, text: &str) -> Option<AnswerStep> {
        let key = self.current_question()?.key.clone();

        self.answers.insert(key.clone(), text.to_string());
        self.transcript.push(TranscriptMessage::answer(key, text));
        self.cursor += 1;

        let next_prompt = self
            .template
            .as_ref()
            .and_then(|t| t.question(self.cursor))
            .map(|q| q.prompt.clone());

        match next_prompt {
            Some(prompt) => {
                self.transcript.push(TranscriptMessage::question(prompt));
                Some(AnswerStep::NextQuestion {
                    cursor: self.cursor,
                })
            }
            None => Some(AnswerStep::AllAnswered),
        }
    }

    /// Enters [`DraftPhase::Generating`] and returns the phase to restore if
    /// generation fails.
    pub fn begin_generation(&mut self) -> DraftPhase {
        let previous = self.phase;
        self.phase = DraftPhase::Generating;
        previous
    }

    /// Stores the generated document and enters [`DraftPhase::Complete`].
    pub fn complete(&mut self, result: DraftResult) {
        self.result = Some(result);
        self.phase = DraftPhase::Complete;
    }

    /// Leaves [`DraftPhase::Generating`] after a failed generation.
    ///
    /// The cursor is not rewound. A previously generated result survives only
    /// when returning to [`DraftPhase::Complete`].
    pub fn abort_generation(&mut self, previous: DraftPhase) {
        self.phase = match previous {
            DraftPhase::Complete if self.result.is_some() => DraftPhase::Complete,
            _ => DraftPhase::Collecting,
        };
        if self.phase != DraftPhase::Complete {
            self.result = None;
        }
    }

    /// Rewrites the user message at `index` and the answer it carries.
    ///
    /// Cursor, phase, transcript length and `result` are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not address a user message.
    pub fn edit_answer(&mut self, index: usize, text: &str) -> Option<String> {
        let key = self.transcript.rewrite(index, text);
        if let Some(key) = &key {
            self.answers.insert(key.clone(), text.to_string());
        }
        key
    }

    /// Variable keys the service asked about that still have no value.
    pub fn unanswered_keys(&self) -> Vec<String> {
        self.variables()
            .into_iter()
            .filter(|v| !v.is_filled())
            .map(|v| v.key)
            .collect()
    }

    /// Per-variable fill status: prefilled values overlaid by answers.
    pub fn variables(&self) -> Vec<VariableStatus> {
        let Some(template) = &self.template else {
            return Vec::new();
        };

        template
            .missing_keys
            .iter()
            .map(|key| VariableStatus {
                key: key.clone(),
                value: self
                    .answers
                    .get(key)
                    .or_else(|| template.prefilled.get(key))
                    .cloned(),
            })
            .collect()
    }

    /// Owned, read-only view for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        let template = self.template.as_ref();
        SessionSnapshot {
            phase: self.phase,
            title: template.and_then(|t| t.title.clone()),
            template_id: template.map(|t| t.id),
            transcript: self.transcript.clone(),
            cursor: self.cursor,
            question_count: self.question_count(),
            missing_keys: template.map(|t| t.missing_keys.clone()).unwrap_or_default(),
            unanswered_keys: self.unanswered_keys(),
            variables: self.variables(),
            prefilled: template.map(|t| t.prefilled.clone()).unwrap_or_default(),
            answers: self.answers.clone(),
            result: self.result.clone(),
        }
    }
}
