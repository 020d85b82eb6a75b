//! # memory-match
//!
//! Game-state engine for a memory-matching ("concentration") card game.
//!
//! ## Design Principles
//!
//! 1. **Engine, not renderer**: The engine owns every piece of mutable game
//!    state and announces changes as `GameEvent`s. Rendering, animation and
//!    input translation live in the host.
//!
//! 2. **Explicit time**: Reveal and hide phases are deferred entries on a
//!    virtual clock, tagged with the session that scheduled them. The host
//!    advances the clock; a new deal revokes the old session's entries.
//!
//! 3. **Validate, don't trust**: Decks from any provider are checked for the
//!    pairing invariant before a board is dealt.
//!
//! ## Modules
//!
//! - `core`: Symbols, cards, players, RNG, configuration, errors
//! - `deck`: Deck validation, themes, deck providers
//! - `events`: Notifications and sinks
//! - `schedule`: Deferred callbacks on a virtual clock
//! - `engine`: Match engine and game sessions

pub mod core;
pub mod deck;
pub mod events;
pub mod schedule;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    symbols, Card, CardIndex, CardState, ConfigError, DeckError, EngineConfig, EngineError,
    GameRng, PlayerId, PlayerMap, ProviderError, Symbol,
};

pub use crate::deck::{Deck, DeckProvider, DeckRequest, Theme, ThemeDeckProvider};

pub use crate::events::{EventLog, EventSink, FnSink, GameEvent, NullSink};

pub use crate::schedule::{ScheduledEntry, ScheduledTask, Scheduler, TimerId};

pub use crate::engine::{
    CardView, GameSession, IgnoreReason, MatchEngine, PendingPair, SelectOutcome, SessionId,
    SessionPhase, SessionSnapshot,
};
