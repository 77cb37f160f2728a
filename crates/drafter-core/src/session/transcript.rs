//! Ordered, editable dialogue log.
//!
//! Entries are appended at the end and may have their text rewritten in
//! place. Entries are never removed or reordered, so a transcript index stays
//! valid for the lifetime of the session.

use super::message::TranscriptMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<TranscriptMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns its index.
    pub fn push(&mut self, message: TranscriptMessage) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TranscriptMessage> {
        self.messages.get(index)
    }

    pub fn last(&self) -> Option<&TranscriptMessage> {
        self.messages.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptMessage> {
        self.messages.iter()
    }

    pub fn messages(&self) -> &[TranscriptMessage] {
        &self.messages
    }

    /// Whether `index` addresses a user message that may be edited.
    pub fn is_editable(&self, index: usize) -> bool {
        self.messages.get(index).is_some_and(TranscriptMessage::is_user)
    }

    /// Rewrites the text of the user message at `index` and returns the key it
    /// answers.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not address a user message. Callers check with
    /// [`Transcript::is_editable`] first.
    pub fn rewrite(&mut self, index: usize, text: impl Into<String>) -> Option<String> {
        assert!(
            self.is_editable(index),
            "transcript index {index} does not address a user message (len {})",
            self.messages.len()
        );
        let message = &mut self.messages[index];
        message.text = text.into();
        message.key.clone()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptMessage;
    type IntoIter = std::slice::Iter<'a, TranscriptMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::message::MessageRole;

    fn sample() -> Transcript {
        let mut transcript = Transcript::new();
        transcript.push(TranscriptMessage::question("Who is the counterparty?"));
        transcript.push(TranscriptMessage::answer("party_name", "Acme Corp"));
        transcript.push(TranscriptMessage::question("What is the effective date?"));
        transcript
    }

    #[test]
    fn test_push_returns_index() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.push(TranscriptMessage::question("Q1")), 0);
        assert_eq!(transcript.push(TranscriptMessage::answer("k", "A1")), 1);
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_is_editable_only_for_user_messages() {
        let transcript = sample();
        assert!(!transcript.is_editable(0));
        assert!(transcript.is_editable(1));
        assert!(!transcript.is_editable(2));
        assert!(!transcript.is_editable(3));
    }

    #[test]
    fn test_rewrite_keeps_position_and_role() {
        let mut transcript = sample();
        let key = transcript.rewrite(1, "Acme Corporation Ltd.");

        assert_eq!(key.as_deref(), Some("party_name"));
        assert_eq!(transcript.len(), 3);
        let message = transcript.get(1).unwrap();
        assert_eq!(message.role, MessageRole::User);
        assert_eq!(message.text, "Acme Corporation Ltd.");
        assert_eq!(transcript.get(2).unwrap().text, "What is the effective date?");
    }

    #[test]
    #[should_panic(expected = "does not address a user message")]
    fn test_rewrite_system_message_panics() {
        let mut transcript = sample();
        transcript.rewrite(0, "edited question");
    }

    #[test]
    #[should_panic(expected = "does not address a user message")]
    fn test_rewrite_out_of_range_panics() {
        let mut transcript = sample();
        transcript.rewrite(42, "nothing here");
    }
}
