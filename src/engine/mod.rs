//! Match engine and game sessions.
//!
//! - `MatchEngine`: Owns the session, validates input, schedules resolution
//! - `GameSession`: Board, counters, input lock, pending pair
//! - `SessionSnapshot`: Serializable renderer-safe view

mod match_engine;
mod session;

pub use match_engine::{IgnoreReason, MatchEngine, SelectOutcome};
pub use session::{CardView, GameSession, PendingPair, SessionId, SessionPhase, SessionSnapshot};
