//! Dispatches parsed REPL commands to the session engine and renders the
//! resulting snapshot.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use drafter_application::{DraftSessionEngine, EngineOutcome, NotificationManager};
use drafter_core::notification::Notifier;
use drafter_core::service::DraftService;
use drafter_core::session::DraftPhase;

use crate::commands::ReplCommand;
use crate::render;

const UPLOAD_EXTENSIONS: &[&str] = &["pdf", "docx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Repl {
    engine: DraftSessionEngine,
    service: Arc<dyn DraftService>,
    notifications: Arc<NotificationManager>,
    /// Transcript entries already printed for the current session.
    shown: usize,
    /// Set by `/new` without a query: the next line starts a new draft.
    awaiting_query: bool,
}

impl Repl {
    pub fn new(
        engine: DraftSessionEngine,
        service: Arc<dyn DraftService>,
        notifications: Arc<NotificationManager>,
    ) -> Self {
        Self {
            engine,
            service,
            notifications,
            shown: 0,
            awaiting_query: false,
        }
    }

    pub async fn prompt(&self) -> String {
        if self.awaiting_query {
            return "query> ".to_string();
        }
        match self.engine.phase().await {
            DraftPhase::Idle => "query> ",
            DraftPhase::Collecting => "answer> ",
            DraftPhase::Generating => "... ",
            DraftPhase::Complete => "done> ",
        }
        .to_string()
    }

    pub async fn handle(&mut self, command: ReplCommand) -> Flow {
        match command {
            ReplCommand::Quit => return Flow::Exit,
            ReplCommand::Text(text) => self.text(&text).await,
            ReplCommand::Vars => render::print_vars(&self.engine.snapshot().await),
            ReplCommand::Edit { number, text } => self.edit(number, &text).await,
            ReplCommand::Generate => {
                let outcome = self.engine.generate().await;
                self.show(outcome).await;
            }
            ReplCommand::New(Some(query)) => self.start(&query).await,
            ReplCommand::New(None) => {
                self.awaiting_query = true;
                println!("{}", "Describe the document you want to draft.".bright_blue());
            }
            ReplCommand::Upload(path) => self.upload(&path).await,
            ReplCommand::Save(path) => self.save(&path).await,
            ReplCommand::Transcript => {
                let snapshot = self.engine.snapshot().await;
                render::print_title(&snapshot);
                self.shown = render::print_messages(&snapshot, 0);
            }
            ReplCommand::Dismiss(number) => self.dismiss(number),
            ReplCommand::Health => self.health().await,
            ReplCommand::Help => render::print_help(),
            ReplCommand::Invalid(usage) => render::print_error(&usage),
        }
        Flow::Continue
    }

    async fn text(&mut self, text: &str) {
        if self.awaiting_query {
            self.start(text).await;
            return;
        }

        match self.engine.phase().await {
            DraftPhase::Idle => self.start(text).await,
            DraftPhase::Collecting => {
                let outcome = self.engine.submit_answer(text).await;
                self.show(outcome).await;
            }
            DraftPhase::Generating => self.show(EngineOutcome::Busy).await,
            DraftPhase::Complete => println!(
                "{}",
                "This draft is complete. Use /new to start another or /edit to change an answer."
                    .bright_black()
            ),
        }
    }

    async fn start(&mut self, query: &str) {
        let outcome = self.engine.start(query).await;
        if outcome == EngineOutcome::Ignored {
            return;
        }
        self.awaiting_query = false;
        self.show(outcome).await;
    }

    async fn show(&mut self, outcome: EngineOutcome) {
        match outcome {
            EngineOutcome::Started { question_count } => {
                let snapshot = self.engine.snapshot().await;
                render::print_title(&snapshot);
                self.shown = render::print_messages(&snapshot, 0);
                if question_count == 0 {
                    let outcome = self.engine.generate().await;
                    Box::pin(self.show(outcome)).await;
                } else {
                    render::print_progress(&snapshot);
                }
            }
            EngineOutcome::Asked { .. } => {
                let snapshot = self.engine.snapshot().await;
                self.shown = render::print_messages(&snapshot, self.shown);
                render::print_progress(&snapshot);
            }
            EngineOutcome::Completed => {
                let snapshot = self.engine.snapshot().await;
                self.shown = render::print_messages(&snapshot, self.shown);
                if let Some(result) = &snapshot.result {
                    render::print_result(&result.output);
                }
            }
            EngineOutcome::Failed(error) => {
                tracing::debug!("Operation failed: {}", error);
                let snapshot = self.engine.snapshot().await;
                if snapshot.phase == DraftPhase::Collecting && snapshot.unanswered_keys.is_empty() {
                    println!("{}", "Use /generate to try again.".bright_black());
                }
            }
            EngineOutcome::Busy => println!(
                "{}",
                "A document is being drafted, please wait.".bright_yellow()
            ),
            EngineOutcome::NotReady => println!(
                "{}",
                "Answer every question before generating.".bright_yellow()
            ),
            EngineOutcome::Edited { .. } | EngineOutcome::Superseded | EngineOutcome::Ignored => {}
        }
    }

    async fn edit(&mut self, number: usize, text: &str) {
        let index = number - 1;
        if !self.engine.can_edit(index).await {
            render::print_error(&format!("[{number}] is not one of your answers."));
            return;
        }

        self.engine.edit_answer(index, text).await;
        let snapshot = self.engine.snapshot().await;
        if let Some(message) = snapshot.transcript.get(index) {
            println!("{}", render::message_line(index, message).green());
        }
        if snapshot.is_complete() {
            println!(
                "{}",
                "Use /generate to redraft the document with this answer.".bright_black()
            );
        }
    }

    async fn upload(&self, path: &Path) {
        let Some(file_name) = upload_file_name(path) else {
            self.notifications
                .error("Please upload a .pdf or .docx file.");
            return;
        };

        let contents = match tokio::fs::read(path).await {
            Ok(contents) => contents,
            Err(e) => {
                self.notifications
                    .error(&format!("Could not read {}: {}", path.display(), e));
                return;
            }
        };

        self.notifications.info(&format!("Uploading {file_name}..."));
        match self.service.ingest(&file_name, contents).await {
            Ok(receipt) => {
                self.notifications.success("File ingested successfully.");
                if receipt.detected_variables > 0 {
                    println!(
                        "{}",
                        format!("Detected {} variable(s)", receipt.detected_variables)
                            .bright_black()
                    );
                }
            }
            Err(e) => {
                self.notifications.error(&e.to_string());
            }
        }
    }

    async fn save(&self, path: &Path) {
        let snapshot = self.engine.snapshot().await;
        let Some(result) = snapshot.result else {
            render::print_error("Nothing has been drafted yet.");
            return;
        };

        match tokio::fs::write(path, result.output).await {
            Ok(()) => {
                self.notifications
                    .success(&format!("Saved to {}", path.display()));
            }
            Err(e) => {
                self.notifications
                    .error(&format!("Could not write {}: {}", path.display(), e));
            }
        }
    }

    fn dismiss(&self, number: Option<usize>) {
        let Some(number) = number else {
            self.notifications.clear();
            return;
        };

        match self.notifications.active().get(number - 1) {
            Some(notification) => {
                self.notifications.dismiss(notification.id);
            }
            None => render::print_error(&format!("No notification {number}.")),
        }
    }

    async fn health(&self) {
        match self.service.health().await {
            Ok(message) => {
                self.notifications.info(&message);
            }
            Err(e) => {
                self.notifications
                    .error(&format!("Drafting service unavailable: {e}"));
            }
        }
    }
}

/// File name to send for an upload, if the extension is accepted.
fn upload_file_name(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    if !UPLOAD_EXTENSIONS.contains(&extension.as_str()) {
        return None;
    }
    path.file_name()?.to_str().map(str::to_string)
}
