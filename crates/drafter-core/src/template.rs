//! Draft template domain model.
//!
//! A template is the ordered question set the remote draft service hands back
//! for a query. The order of questions is the order of keys in the service
//! response and is never re-sorted.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A single question asked for one template variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Template variable key this question fills (e.g. `party_name`).
    pub key: String,
    /// Prompt shown to the user.
    pub prompt: String,
}

impl Question {
    pub fn new(key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            prompt: prompt.into(),
        }
    }
}

/// Ordered mapping from variable key to question prompt.
///
/// Serialized as a JSON object. Deserialization keeps the key order of the
/// incoming object; a repeated key keeps its first position and takes the
/// last prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionList(Vec<Question>);

impl QuestionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a question, or replaces the prompt of an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, prompt: impl Into<String>) {
        let key = key.into();
        let prompt = prompt.into();
        match self.0.iter_mut().find(|q| q.key == key) {
            Some(existing) => existing.prompt = prompt,
            None => self.0.push(Question { key, prompt }),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Question> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QuestionList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = QuestionList::new();
        for (key, prompt) in iter {
            list.insert(key, prompt);
        }
        list
    }
}

impl Serialize for QuestionList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for question in &self.0 {
            map.serialize_entry(&question.key, &question.prompt)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for QuestionList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct QuestionListVisitor;

        impl<'de> Visitor<'de> for QuestionListVisitor {
            type Value = QuestionList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of variable keys to question prompts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut list = QuestionList::new();
                while let Some((key, prompt)) = access.next_entry::<String, String>()? {
                    list.insert(key, prompt);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(QuestionListVisitor)
    }
}

/// The template currently being answered.
///
/// Immutable once received; owned by the active draft session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftTemplate {
    /// Template identifier assigned by the remote service.
    pub id: i64,
    /// Human-readable title, when the service reports one.
    #[serde(default)]
    pub title: Option<String>,
    /// Questions in service order.
    pub questions: Vec<Question>,
    /// Variables the service could not prefill and therefore asks about.
    #[serde(default)]
    pub missing_keys: Vec<String>,
    /// Values supplied out-of-band (from the query or an uploaded document).
    #[serde(default)]
    pub prefilled: HashMap<String, String>,
}

impl DraftTemplate {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}
