//! Draft session engine.
//!
//! Drives one question at a time, records and edits answers, and coordinates
//! the single generation request once every question is answered. The remote
//! draft service calls are the only suspension points; the session lock is
//! never held across them.

use super::outcome::EngineOutcome;
use drafter_core::notification::Notifier;
use drafter_core::service::{CompleteDraftRequest, DraftService};
use drafter_core::session::{AnswerStep, DraftPhase, DraftResult, DraftSession, SessionSnapshot};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

const DRAFTED_MESSAGE: &str = "Document drafted successfully.";
const EDITED_MESSAGE: &str = "Answer edited.";

/// A generation request prepared under the session lock.
struct PendingGeneration {
    epoch: u64,
    previous: DraftPhase,
    request: CompleteDraftRequest,
}

/// State machine for the single active draft session.
///
/// # Concurrency
///
/// - At most one generation request is in flight; `submit_answer` and
///   `generate` report [`EngineOutcome::Busy`] meanwhile.
/// - `start` is accepted at any time. Responses addressed to a session that
///   has since been replaced are dropped ([`EngineOutcome::Superseded`]).
/// - Of several overlapping `start` calls a response never replaces a session
///   created by a more recently issued `start`. A newer `start` that fails
///   leaves the older one free to apply.
pub struct DraftSessionEngine {
    service: Arc<dyn DraftService>,
    notifier: Arc<dyn Notifier>,
    session: RwLock<DraftSession>,
    /// Ticket of the most recently issued `start`.
    start_ticket: AtomicU64,
    /// Ticket of the `start` that created the current session. Only written
    /// while the session lock is held.
    applied_ticket: AtomicU64,
}

impl DraftSessionEngine {
    pub fn new(service: Arc<dyn DraftService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            session: RwLock::new(DraftSession::new()),
            start_ticket: AtomicU64::new(0),
            applied_ticket: AtomicU64::new(0),
        }
    }

    /// Read-only copy of the current session state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.read().await.snapshot()
    }

    pub async fn phase(&self) -> DraftPhase {
        self.session.read().await.phase()
    }

    /// Whether `index` addresses a user message that [`Self::edit_answer`] accepts.
    pub async fn can_edit(&self, index: usize) -> bool {
        self.session.read().await.transcript().is_editable(index)
    }

    /// Requests a template for `query` and replaces the session with it.
    ///
    /// Blank queries are ignored. On failure the previous session is left
    /// untouched and an error notification is posted.
    pub async fn start(&self, query: &str) -> EngineOutcome {
        if query.trim().is_empty() {
            return EngineOutcome::Ignored;
        }

        let ticket = self.start_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!("[DraftEngine] Starting draft (ticket {})", ticket);

        let response = match self.service.begin_draft(query).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("[DraftEngine] Failed to start draft: {}", err);
                self.notifier.error(&err.to_string());
                return EngineOutcome::Failed(err);
            }
        };

        let mut session = self.session.write().await;
        if self.applied_ticket.load(Ordering::SeqCst) > ticket {
            tracing::debug!("[DraftEngine] Dropping stale start response (ticket {})", ticket);
            return EngineOutcome::Superseded;
        }
        self.applied_ticket.store(ticket, Ordering::SeqCst);

        let template = response.into_template();
        let question_count = template.question_count();
        let epoch = session.epoch() + 1;
        *session = DraftSession::begin(template, epoch);

        tracing::info!(
            "[DraftEngine] Session {} collecting {} question(s)",
            epoch,
            question_count
        );
        EngineOutcome::Started { question_count }
    }

    /// Records an answer for the question at the cursor.
    ///
    /// Answering the last question starts generation and returns its outcome.
    pub async fn submit_answer(&self, text: &str) -> EngineOutcome {
        if text.trim().is_empty() {
            return EngineOutcome::Ignored;
        }

        let pending = {
            let mut session = self.session.write().await;
            match session.phase() {
                DraftPhase::Generating => return EngineOutcome::Busy,
                DraftPhase::Collecting => {}
                DraftPhase::Idle | DraftPhase::Complete => return EngineOutcome::NotReady,
            }

            match session.record_answer(text) {
                None => return EngineOutcome::NotReady,
                Some(AnswerStep::NextQuestion { cursor }) => {
                    tracing::debug!("[DraftEngine] Asked question {}", cursor + 1);
                    return EngineOutcome::Asked { cursor };
                }
                Some(AnswerStep::AllAnswered) => Self::prepare_generation(&mut session),
            }
        };

        self.run_generation(pending).await
    }

    /// Sends the current answer set for generation.
    ///
    /// Allowed once every question is answered, including after a failed
    /// generation and after edits to a completed draft.
    pub async fn generate(&self) -> EngineOutcome {
        let pending = {
            let mut session = self.session.write().await;
            if session.phase() == DraftPhase::Generating {
                return EngineOutcome::Busy;
            }
            if !session.ready_to_generate() {
                return EngineOutcome::NotReady;
            }
            Self::prepare_generation(&mut session)
        };

        self.run_generation(pending).await
    }

    /// Rewrites the user message at `index` and the answer it carries.
    ///
    /// Never changes the cursor, the phase, the transcript length or a
    /// generated result.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not address a user message; check with
    /// [`Self::can_edit`] first.
    pub async fn edit_answer(&self, index: usize, text: &str) -> EngineOutcome {
        let key = self.session.write().await.edit_answer(index, text);

        tracing::debug!("[DraftEngine] Edited transcript entry {} ({:?})", index, key);
        self.notifier.info(EDITED_MESSAGE);
        EngineOutcome::Edited { key }
    }

    fn prepare_generation(session: &mut DraftSession) -> PendingGeneration {
        let (template_id, prefilled) = session
            .template()
            .map(|t| (t.id, t.prefilled.clone()))
            .unwrap_or_default();
        let request = CompleteDraftRequest {
            template_id,
            answers: session.answers().clone(),
            prefilled,
        };
        let previous = session.begin_generation();

        PendingGeneration {
            epoch: session.epoch(),
            previous,
            request,
        }
    }

    async fn run_generation(&self, pending: PendingGeneration) -> EngineOutcome {
        tracing::info!(
            "[DraftEngine] Generating template {} with {} answer(s)",
            pending.request.template_id,
            pending.request.answers.len()
        );

        let response = self.service.complete_draft(pending.request).await;

        let mut session = self.session.write().await;
        if session.epoch() != pending.epoch || session.phase() != DraftPhase::Generating {
            tracing::debug!(
                "[DraftEngine] Dropping generation response for replaced session {}",
                pending.epoch
            );
            return EngineOutcome::Superseded;
        }

        match response {
            Ok(response) => {
                session.complete(DraftResult {
                    output: response.output,
                });
                drop(session);
                tracing::info!("[DraftEngine] Draft complete");
                self.notifier.success(DRAFTED_MESSAGE);
                EngineOutcome::Completed
            }
            Err(err) => {
                session.abort_generation(pending.previous);
                drop(session);
                tracing::warn!("[DraftEngine] Generation failed: {}", err);
                self.notifier.error(&err.to_string());
                EngineOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationManager;
    use crate::test_support::{MockDraftService, nda_response, output};
    use drafter_core::DrafterError;
    use drafter_core::notification::Severity;
    use drafter_core::service::BeginDraftResponse;
    use drafter_core::session::MessageRole;
    use std::time::Duration;

    struct Harness {
        engine: Arc<DraftSessionEngine>,
        service: Arc<MockDraftService>,
        notifications: NotificationManager,
    }

    fn harness(service: MockDraftService) -> Harness {
        let service = Arc::new(service);
        let notifications = NotificationManager::new(Duration::from_secs(60));
        let engine = Arc::new(DraftSessionEngine::new(
            service.clone(),
            Arc::new(notifications.clone()),
        ));
        Harness {
            engine,
            service,
            notifications,
        }
    }

    fn severities(manager: &NotificationManager) -> Vec<Severity> {
        manager.active().iter().map(|n| n.severity).collect()
    }

    async fn wait_for_phase(engine: &DraftSessionEngine, phase: DraftPhase) {
        while engine.phase().await != phase {
            tokio::task::yield_now().await;
        }
    }

    async fn started_nda(service: MockDraftService) -> Harness {
        let h = harness(service);
        h.service.push_begin(Ok(nda_response()));
        assert_eq!(
            h.engine.start("Draft an NDA").await,
            EngineOutcome::Started { question_count: 2 }
        );
        h
    }

    #[tokio::test]
    async fn test_start_seeds_first_question() {
        let h = started_nda(MockDraftService::new()).await;

        let snapshot = h.engine.snapshot().await;
        assert_eq!(snapshot.phase, DraftPhase::Collecting);
        assert_eq!(snapshot.cursor, 0);
        assert_eq!(snapshot.question_count, 2);
        assert_eq!(snapshot.transcript.len(), 1);
        let first = snapshot.transcript.get(0).unwrap();
        assert_eq!(first.role, MessageRole::System);
        assert_eq!(first.text, "Who is the counterparty?");
        assert_eq!(h.service.queries(), vec!["Draft an NDA".to_string()]);
        assert!(h.notifications.active().is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_is_ignored() {
        let h = harness(MockDraftService::new());

        assert_eq!(h.engine.start("   \n").await, EngineOutcome::Ignored);

        assert!(h.service.queries().is_empty());
        assert_eq!(h.engine.phase().await, DraftPhase::Idle);
        assert!(h.notifications.active().is_empty());
    }

    #[tokio::test]
    async fn test_failed_start_keeps_previous_session() {
        let h = started_nda(MockDraftService::new()).await;
        h.engine.submit_answer("Acme Corp").await;
        let before = h.engine.snapshot().await;

        h.service
            .push_begin(Err(DrafterError::service(Some(500), "Template matching failed")));
        let outcome = h.engine.start("Draft a lease").await;

        assert!(outcome.is_failed());
        assert_eq!(h.engine.snapshot().await, before);
        let active = h.notifications.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].severity, Severity::Error);
        assert_eq!(active[0].message, "Template matching failed");
    }

    #[tokio::test]
    async fn test_nda_dialogue_to_completion() {
        let h = started_nda(MockDraftService::new()).await;

        assert_eq!(
            h.engine.submit_answer("Acme Corp").await,
            EngineOutcome::Asked { cursor: 1 }
        );
        let snapshot = h.engine.snapshot().await;
        assert_eq!(snapshot.cursor, 1);
        assert_eq!(snapshot.transcript.len(), 3);
        let answer = snapshot.transcript.get(1).unwrap();
        assert_eq!(answer.role, MessageRole::User);
        assert_eq!(answer.text, "Acme Corp");
        assert_eq!(answer.key.as_deref(), Some("party_name"));
        assert_eq!(snapshot.transcript.get(2).unwrap().text, "What is the effective date?");
        assert_eq!(snapshot.answers.len(), 1);
        assert_eq!(snapshot.answers.get("party_name").unwrap(), "Acme Corp");
        assert!(h.service.complete_requests().is_empty());

        h.service.push_complete(Ok(output("NDA between us and Acme Corp")));
        assert_eq!(h.engine.submit_answer("2024-01-01").await, EngineOutcome::Completed);

        let snapshot = h.engine.snapshot().await;
        assert_eq!(snapshot.phase, DraftPhase::Complete);
        assert_eq!(snapshot.result.unwrap().output, "NDA between us and Acme Corp");
        assert_eq!(snapshot.transcript.len(), 4);
        assert_eq!(severities(&h.notifications), vec![Severity::Success]);

        let requests = h.service.complete_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].template_id, 7);
        assert_eq!(requests[0].answers.get("effective_date").unwrap(), "2024-01-01");
        assert_eq!(requests[0].prefilled.get("jurisdiction").unwrap(), "India");
    }

    #[tokio::test]
    async fn test_blank_answer_is_ignored() {
        let h = started_nda(MockDraftService::new()).await;

        assert_eq!(h.engine.submit_answer("  ").await, EngineOutcome::Ignored);

        let snapshot = h.engine.snapshot().await;
        assert_eq!(snapshot.cursor, 0);
        assert_eq!(snapshot.transcript.len(), 1);
        assert!(snapshot.answers.is_empty());
    }

    #[tokio::test]
    async fn test_submit_before_start_is_not_ready() {
        let h = harness(MockDraftService::new());
        assert_eq!(h.engine.submit_answer("Acme").await, EngineOutcome::NotReady);
        assert_eq!(h.engine.generate().await, EngineOutcome::NotReady);
    }

    #[tokio::test]
    async fn test_generation_needs_every_question_answered() {
        let mut response = nda_response();
        response.questions = (0..4).map(|i| (format!("k{i}"), format!("Q{i}?"))).collect();
        let h = harness(MockDraftService::new());
        h.service.push_begin(Ok(response));
        h.engine.start("Draft something").await;
        h.service.push_complete(Ok(output("done")));

        for i in 0..3 {
            assert!(matches!(
                h.engine.submit_answer(&format!("A{i}")).await,
                EngineOutcome::Asked { .. }
            ));
            assert_eq!(h.engine.generate().await, EngineOutcome::NotReady);
        }
        assert!(h.service.complete_requests().is_empty());

        assert_eq!(h.engine.submit_answer("A3").await, EngineOutcome::Completed);
        assert_eq!(h.service.complete_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_cursor_and_retries_explicitly() {
        let h = started_nda(MockDraftService::new()).await;
        h.engine.submit_answer("Acme Corp").await;

        h.service
            .push_complete(Err(DrafterError::invalid_response("Invalid server response")));
        let outcome = h.engine.submit_answer("2024-01-01").await;
        assert!(outcome.is_failed());

        let snapshot = h.engine.snapshot().await;
        assert_eq!(snapshot.phase, DraftPhase::Collecting);
        assert_eq!(snapshot.cursor, 2);
        assert!(snapshot.result.is_none());
        assert_eq!(severities(&h.notifications), vec![Severity::Error]);
        assert_eq!(h.engine.submit_answer("again").await, EngineOutcome::NotReady);
        assert_eq!(h.service.complete_requests().len(), 1);

        h.service.push_complete(Ok(output("second try")));
        assert_eq!(h.engine.generate().await, EngineOutcome::Completed);
        assert_eq!(h.service.complete_requests().len(), 2);
        assert_eq!(
            h.engine.snapshot().await.result.unwrap().output,
            "second try"
        );
    }

    #[tokio::test]
    async fn test_zero_question_template_is_immediately_generatable() {
        let h = harness(MockDraftService::new());
        h.service.push_begin(Ok(BeginDraftResponse {
            template_id: 3,
            template_title: Some("Lease".to_string()),
            prefilled: [("tenant".to_string(), "Jane".to_string())].into_iter().collect(),
            ..Default::default()
        }));

        assert_eq!(
            h.engine.start("Draft a lease for Jane").await,
            EngineOutcome::Started { question_count: 0 }
        );
        let snapshot = h.engine.snapshot().await;
        assert_eq!(snapshot.phase, DraftPhase::Collecting);
        assert!(snapshot.transcript.is_empty());
        assert_eq!(h.engine.submit_answer("anything").await, EngineOutcome::NotReady);

        h.service.push_complete(Ok(output("Lease for Jane")));
        assert_eq!(h.engine.generate().await, EngineOutcome::Completed);
        let requests = h.service.complete_requests();
        assert!(requests[0].answers.is_empty());
        assert_eq!(requests[0].prefilled.get("tenant").unwrap(), "Jane");
    }

    #[tokio::test]
    async fn test_edit_after_completion_does_not_regenerate() {
        let h = started_nda(MockDraftService::new()).await;
        h.engine.submit_answer("Acme Corp").await;
        h.service.push_complete(Ok(output("NDA with Acme Corp")));
        h.engine.submit_answer("2024-01-01").await;
        let before = h.engine.snapshot().await;

        let outcome = h.engine.edit_answer(1, "Acme Corporation Ltd.").await;

        assert_eq!(
            outcome,
            EngineOutcome::Edited {
                key: Some("party_name".to_string())
            }
        );
        let after = h.engine.snapshot().await;
        assert_eq!(after.answers.get("party_name").unwrap(), "Acme Corporation Ltd.");
        assert_eq!(after.transcript.get(1).unwrap().text, "Acme Corporation Ltd.");
        assert_eq!(after.result, before.result);
        assert_eq!(after.phase, DraftPhase::Complete);
        assert_eq!(after.cursor, before.cursor);
        assert_eq!(after.transcript.len(), before.transcript.len());
        assert_eq!(h.service.complete_requests().len(), 1);
        assert_eq!(
            severities(&h.notifications),
            vec![Severity::Success, Severity::Info]
        );

        h.service.push_complete(Ok(output("NDA with Acme Corporation Ltd.")));
        assert_eq!(h.engine.generate().await, EngineOutcome::Completed);
        let requests = h.service.complete_requests();
        assert_eq!(
            requests[1].answers.get("party_name").unwrap(),
            "Acme Corporation Ltd."
        );
    }

    #[tokio::test]
    async fn test_edit_is_idempotent() {
        let h = started_nda(MockDraftService::new()).await;
        h.engine.submit_answer("Acme Corp").await;

        h.engine.edit_answer(1, "Beta LLC").await;
        let once = h.engine.snapshot().await;
        h.engine.edit_answer(1, "Beta LLC").await;
        let twice = h.engine.snapshot().await;

        assert_eq!(once.transcript, twice.transcript);
        assert_eq!(once.answers, twice.answers);
        assert_eq!(twice.cursor, 1);
    }

    #[tokio::test]
    async fn test_can_edit_only_user_messages() {
        let h = started_nda(MockDraftService::new()).await;
        h.engine.submit_answer("Acme Corp").await;

        assert!(!h.engine.can_edit(0).await);
        assert!(h.engine.can_edit(1).await);
        assert!(!h.engine.can_edit(2).await);
        assert!(!h.engine.can_edit(9).await);
    }

    #[tokio::test]
    #[should_panic(expected = "does not address a user message")]
    async fn test_edit_system_message_panics() {
        let h = started_nda(MockDraftService::new()).await;
        h.engine.edit_answer(0, "rewritten question").await;
    }

    #[tokio::test]
    async fn test_submit_while_generating_is_busy() {
        let h = started_nda(MockDraftService::new().with_complete_gate()).await;
        h.engine.submit_answer("Acme Corp").await;
        h.service.push_complete(Ok(output("NDA")));

        let engine = h.engine.clone();
        let task = tokio::spawn(async move { engine.submit_answer("2024-01-01").await });
        wait_for_phase(&h.engine, DraftPhase::Generating).await;

        assert_eq!(h.engine.submit_answer("late answer").await, EngineOutcome::Busy);
        assert_eq!(h.engine.generate().await, EngineOutcome::Busy);
        assert_eq!(h.engine.snapshot().await.transcript.len(), 4);

        h.service.release_complete();
        assert_eq!(task.await.unwrap(), EngineOutcome::Completed);
        assert_eq!(h.service.complete_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_new_session_discards_late_generation_response() {
        let h = started_nda(MockDraftService::new().with_complete_gate()).await;
        h.engine.submit_answer("Acme Corp").await;
        h.service.push_complete(Ok(output("stale NDA")));

        let engine = h.engine.clone();
        let task = tokio::spawn(async move { engine.submit_answer("2024-01-01").await });
        wait_for_phase(&h.engine, DraftPhase::Generating).await;

        let mut lease = nda_response();
        lease.template_id = 9;
        lease.questions = [("tenant", "Who is the tenant?")].into_iter().collect();
        h.service.push_begin(Ok(lease));
        assert_eq!(
            h.engine.start("Draft a lease").await,
            EngineOutcome::Started { question_count: 1 }
        );

        h.service.release_complete();
        assert_eq!(task.await.unwrap(), EngineOutcome::Superseded);

        let snapshot = h.engine.snapshot().await;
        assert_eq!(snapshot.template_id, Some(9));
        assert_eq!(snapshot.phase, DraftPhase::Collecting);
        assert!(snapshot.result.is_none());
        assert!(snapshot.answers.is_empty());
        assert_eq!(snapshot.transcript.len(), 1);
        assert!(h.notifications.active().is_empty());
    }

    /// Spawns two overlapping starts for templates 1 and 2 and waits until
    /// both requests are in flight.
    async fn overlapping_starts(
        h: &Harness,
        newer: Result<BeginDraftResponse, DrafterError>,
    ) -> (
        tokio::task::JoinHandle<EngineOutcome>,
        tokio::task::JoinHandle<EngineOutcome>,
    ) {
        let mut first = nda_response();
        first.template_id = 1;
        h.service.push_begin(Ok(first));
        h.service.push_begin(newer);

        let engine = h.engine.clone();
        let older = tokio::spawn(async move { engine.start("first query").await });
        while h.service.queries().len() < 1 {
            tokio::task::yield_now().await;
        }
        let engine = h.engine.clone();
        let newer = tokio::spawn(async move { engine.start("second query").await });
        while h.service.queries().len() < 2 {
            tokio::task::yield_now().await;
        }
        (older, newer)
    }

    fn second_template() -> BeginDraftResponse {
        let mut second = nda_response();
        second.template_id = 2;
        second
    }

    #[tokio::test]
    async fn test_latest_start_wins() {
        let h = harness(MockDraftService::new().with_begin_gate());
        let (older, newer) = overlapping_starts(&h, Ok(second_template())).await;

        // The newer request resolves first; the older response must not
        // replace its session.
        h.service.release_begin(1);
        assert_eq!(
            newer.await.unwrap(),
            EngineOutcome::Started { question_count: 2 }
        );
        h.service.release_begin(0);
        assert_eq!(older.await.unwrap(), EngineOutcome::Superseded);
        assert_eq!(h.engine.snapshot().await.template_id, Some(2));
    }

    #[tokio::test]
    async fn test_starts_resolving_in_order_both_apply() {
        let h = harness(MockDraftService::new().with_begin_gate());
        let (older, newer) = overlapping_starts(&h, Ok(second_template())).await;

        h.service.release_begin(0);
        assert_eq!(
            older.await.unwrap(),
            EngineOutcome::Started { question_count: 2 }
        );
        assert_eq!(h.engine.snapshot().await.template_id, Some(1));

        h.service.release_begin(1);
        assert_eq!(
            newer.await.unwrap(),
            EngineOutcome::Started { question_count: 2 }
        );
        assert_eq!(h.engine.snapshot().await.template_id, Some(2));
    }

    #[tokio::test]
    async fn test_failed_newer_start_does_not_void_older_start() {
        let h = harness(MockDraftService::new().with_begin_gate());
        let (older, newer) = overlapping_starts(
            &h,
            Err(DrafterError::service(Some(500), "Request failed")),
        )
        .await;

        h.service.release_begin(1);
        assert!(newer.await.unwrap().is_failed());
        h.service.release_begin(0);
        assert_eq!(
            older.await.unwrap(),
            EngineOutcome::Started { question_count: 2 }
        );

        let snapshot = h.engine.snapshot().await;
        assert_eq!(snapshot.phase, DraftPhase::Collecting);
        assert_eq!(snapshot.template_id, Some(1));
        assert_eq!(severities(&h.notifications), vec![Severity::Error]);
    }

    #[tokio::test]
    async fn test_failed_newer_start_after_older_applied_keeps_session() {
        let h = harness(MockDraftService::new().with_begin_gate());
        let (older, newer) = overlapping_starts(
            &h,
            Err(DrafterError::service(Some(500), "Request failed")),
        )
        .await;

        h.service.release_begin(0);
        assert_eq!(
            older.await.unwrap(),
            EngineOutcome::Started { question_count: 2 }
        );
        h.service.release_begin(1);
        assert!(newer.await.unwrap().is_failed());

        let snapshot = h.engine.snapshot().await;
        assert_eq!(snapshot.phase, DraftPhase::Collecting);
        assert_eq!(snapshot.template_id, Some(1));
    }

    #[tokio::test]
    async fn test_restart_discards_previous_answers() {
        let h = started_nda(MockDraftService::new()).await;
        h.engine.submit_answer("Acme Corp").await;

        h.service.push_begin(Ok(nda_response()));
        h.engine.start("Draft another NDA").await;

        let snapshot = h.engine.snapshot().await;
        assert_eq!(snapshot.cursor, 0);
        assert!(snapshot.answers.is_empty());
        assert_eq!(snapshot.transcript.len(), 1);
        assert_eq!(snapshot.unanswered_keys.len(), 2);
    }
}
