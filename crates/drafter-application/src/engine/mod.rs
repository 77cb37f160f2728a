//! Draft session engine module.
//!
//! - `session_engine`: The state machine driving the active draft (`DraftSessionEngine`)
//! - `outcome`: Per-operation results reported to the surface (`EngineOutcome`)

mod outcome;
mod session_engine;

pub use outcome::EngineOutcome;
pub use session_engine::DraftSessionEngine;
