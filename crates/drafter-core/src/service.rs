//! Remote draft service boundary.
//!
//! Defines the request/response shapes exchanged with the drafting backend and
//! the [`DraftService`] trait the session engine calls. The concrete transport
//! lives in `drafter-interaction`.

use crate::error::Result;
use crate::template::{DraftTemplate, QuestionList};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response to a draft query.
///
/// When the service could prefill every variable it omits `questions` and
/// `missing_keys`; both default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeginDraftResponse {
    pub template_id: i64,
    #[serde(default)]
    pub template_title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: QuestionList,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_keys: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prefilled: HashMap<String, String>,
}

impl BeginDraftResponse {
    /// Converts the response into the template owned by a draft session.
    pub fn into_template(self) -> DraftTemplate {
        DraftTemplate {
            id: self.template_id,
            title: self.template_title,
            questions: self.questions.into_vec(),
            missing_keys: self.missing_keys,
            prefilled: self.prefilled,
        }
    }
}

/// Completed answer set sent for generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteDraftRequest {
    pub template_id: i64,
    pub answers: HashMap<String, String>,
    pub prefilled: HashMap<String, String>,
}

/// Generated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteDraftResponse {
    pub output: String,
}

/// Acknowledgement of an uploaded reference document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReceipt {
    #[serde(default)]
    pub status: String,
    pub template_id: i64,
    #[serde(default)]
    pub detected_variables: usize,
}

/// An abstract client for the remote drafting backend.
///
/// Each call is a single request and a single response; implementations do
/// not retry.
#[async_trait]
pub trait DraftService: Send + Sync {
    /// Finds or creates a template for `query` and returns its questions.
    async fn begin_draft(&self, query: &str) -> Result<BeginDraftResponse>;

    /// Renders the template with the given answers.
    async fn complete_draft(&self, request: CompleteDraftRequest) -> Result<CompleteDraftResponse>;

    /// Uploads a reference document to create a reusable template.
    async fn ingest(&self, file_name: &str, contents: Vec<u8>) -> Result<IngestReceipt>;

    /// Returns the backend's liveness message.
    async fn health(&self) -> Result<String>;
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
