//! Scripted draft service for engine tests.

use async_trait::async_trait;
use drafter_core::service::{
    BeginDraftResponse, CompleteDraftRequest, CompleteDraftResponse, DraftService, IngestReceipt,
};
use drafter_core::template::QuestionList;
use drafter_core::{DrafterError, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Replies with queued responses in call order.
///
/// When gated, each call waits for a permit before answering, which keeps the
/// request in flight until the test releases it. Begin calls are gated one by
/// one so a test can pick the order in which overlapping starts resolve.
#[derive(Default)]
pub struct MockDraftService {
    begin_responses: Mutex<VecDeque<Result<BeginDraftResponse>>>,
    complete_responses: Mutex<VecDeque<Result<CompleteDraftResponse>>>,
    queries: Mutex<Vec<String>>,
    complete_requests: Mutex<Vec<CompleteDraftRequest>>,
    begin_gated: bool,
    /// One gate per `begin_draft` call, indexed by call number.
    begin_gates: Mutex<Vec<Arc<Semaphore>>>,
    complete_gate: Option<Semaphore>,
}

impl MockDraftService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_begin_gate(mut self) -> Self {
        self.begin_gated = true;
        self
    }

    pub fn with_complete_gate(mut self) -> Self {
        self.complete_gate = Some(Semaphore::new(0));
        self
    }

    pub fn push_begin(&self, response: Result<BeginDraftResponse>) {
        self.begin_responses.lock().unwrap().push_back(response);
    }

    pub fn push_complete(&self, response: Result<CompleteDraftResponse>) {
        self.complete_responses.lock().unwrap().push_back(response);
    }

    /// Lets the `call`-th `begin_draft` (zero-based) answer.
    pub fn release_begin(&self, call: usize) {
        self.begin_gate(call).add_permits(1);
    }

    fn begin_gate(&self, call: usize) -> Arc<Semaphore> {
        let mut gates = self.begin_gates.lock().unwrap();
        while gates.len() <= call {
            gates.push(Arc::new(Semaphore::new(0)));
        }
        gates[call].clone()
    }

    pub fn release_complete(&self) {
        if let Some(gate) = &self.complete_gate {
            gate.add_permits(1);
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn complete_requests(&self) -> Vec<CompleteDraftRequest> {
        self.complete_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DraftService for MockDraftService {
    async fn begin_draft(&self, query: &str) -> Result<BeginDraftResponse> {
        let call = {
            let mut queries = self.queries.lock().unwrap();
            queries.push(query.to_string());
            queries.len() - 1
        };
        let response = self
            .begin_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DrafterError::internal("no scripted begin response")));
        if self.begin_gated {
            self.begin_gate(call).acquire().await.unwrap().forget();
        }
        response
    }

    async fn complete_draft(&self, request: CompleteDraftRequest) -> Result<CompleteDraftResponse> {
        self.complete_requests.lock().unwrap().push(request);
        if let Some(gate) = &self.complete_gate {
            gate.acquire().await.unwrap().forget();
        }
        self.complete_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DrafterError::internal("no scripted complete response")))
    }

    async fn ingest(&self, _file_name: &str, _contents: Vec<u8>) -> Result<IngestReceipt> {
        Err(DrafterError::internal("ingest is not scripted"))
    }

    async fn health(&self) -> Result<String> {
        Ok("Working...".to_string())
    }
}

/// The two-question NDA template used across engine tests.
pub fn nda_response() -> BeginDraftResponse {
    BeginDraftResponse {
        template_id: 7,
        template_title: Some("Mutual NDA".to_string()),
        questions: [
            ("party_name", "Who is the counterparty?"),
            ("effective_date", "What is the effective date?"),
        ]
        .into_iter()
        .collect::<QuestionList>(),
        missing_keys: vec!["party_name".to_string(), "effective_date".to_string()],
        prefilled: HashMap::from([("jurisdiction".to_string(), "India".to_string())]),
    }
}

pub fn output(text: &str) -> CompleteDraftResponse {
    CompleteDraftResponse {
        output: text.to_string(),
    }
}
