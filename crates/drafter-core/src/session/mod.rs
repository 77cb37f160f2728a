//! Draft session domain module.
//!
//! # Module Structure
//!
//! - `model`: The session state machine (`DraftSession`, `DraftPhase`)
//! - `message`: Dialogue turn types (`MessageRole`, `TranscriptMessage`)
//! - `transcript`: The editable, ordered dialogue log (`Transcript`)
//! - `snapshot`: Read-only views for rendering (`SessionSnapshot`)

mod message;
mod model;
mod snapshot;
mod transcript;

// Re-export public API
pub use message::{MessageRole, TranscriptMessage};
pub use model::{AnswerStep, DraftPhase, DraftResult, DraftSession};
pub use snapshot::{SessionSnapshot, VariableStatus};
pub use transcript::Transcript;
