use drafter_core::DrafterError;

/// What a session engine operation did.
///
/// Operations never return `Err`: service failures are reported through the
/// notifier and surface here as [`EngineOutcome::Failed`] after the session
/// has been rolled back to a resumable state.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOutcome {
    /// Blank input; nothing changed and nothing was reported.
    Ignored,
    /// A generation request is already in flight for this session.
    Busy,
    /// The session is not in a state that accepts this operation.
    NotReady,
    /// A new session replaced the previous one.
    Started { question_count: usize },
    /// The answer was recorded and the next question asked.
    Asked { cursor: usize },
    /// The generated document is stored on the session.
    Completed,
    /// A transcript message was rewritten.
    Edited { key: Option<String> },
    /// The remote call failed; the session is back in its previous phase.
    Failed(DrafterError),
    /// The response arrived for a session that has since been replaced.
    Superseded,
}

impl EngineOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
