//! Notifications from the engine to a presentation layer.
//!
//! The engine never renders. Every state change it makes is announced as a
//! `GameEvent` to an `EventSink`, in the order the changes happen. A renderer
//! keeps its own index-to-visual mapping and reacts to these events; it never
//! reads or writes card state directly.
//!
//! ## Sinks
//!
//! - [`EventLog`]: Records events; hosts that poll drain it each frame
//! - `Vec<GameEvent>`: Plain recording
//! - [`FnSink`]: Forwards each event to a closure
//! - [`NullSink`]: Discards everything (headless simulation)

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Card, CardIndex, PlayerId};

/// A state change announced by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new board was dealt. Faces are included so the renderer can
    /// prepare them, but every card is Hidden and must be drawn face down.
    BoardReset { cards: Vector<Card> },

    /// A card was flipped face up.
    CardRevealed { index: CardIndex },

    /// The second flip of a turn completed a pair attempt.
    MoveRecorded { moves: u32 },

    /// Two revealed cards were locked in as a pair.
    PairMatched { first: CardIndex, second: CardIndex },

    /// Two revealed cards were turned back face down.
    CardsHidden { first: CardIndex, second: CardIndex },

    /// Counters after a match.
    ScoreUpdated { moves: u32, matched_pairs: u32 },

    /// Every pair has been found. Terminal for the session.
    GameWon { moves: u32 },

    /// The turn moved to another player (multi-player only).
    TurnPassed { player: PlayerId },

    /// A player's pair count changed (multi-player only).
    PlayerScored { player: PlayerId, score: u32 },
}

impl GameEvent {
    /// Short name of the event kind, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::BoardReset { .. } => "board_reset",
            GameEvent::CardRevealed { .. } => "card_revealed",
            GameEvent::MoveRecorded { .. } => "move_recorded",
            GameEvent::PairMatched { .. } => "pair_matched",
            GameEvent::CardsHidden { .. } => "cards_hidden",
            GameEvent::ScoreUpdated { .. } => "score_updated",
            GameEvent::GameWon { .. } => "game_won",
            GameEvent::TurnPassed { .. } => "turn_passed",
            GameEvent::PlayerScored { .. } => "player_scored",
        }
    }
}

/// Receiver of engine notifications.
pub trait EventSink {
    /// Called once per event, synchronously, in emission order.
    fn notify(&mut self, event: &GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn notify(&mut self, event: &GameEvent) {
        (**self).notify(event);
    }
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Sink that forwards each event to a closure.
///
/// ```
/// use memory_match::events::{EventSink, FnSink, GameEvent};
///
/// let mut seen = 0;
/// {
///     let mut sink = FnSink::new(|_: &GameEvent| seen += 1);
///     sink.notify(&GameEvent::MoveRecorded { moves: 1 });
/// }
/// assert_eq!(seen, 1);
/// ```
pub struct FnSink<F>(F);

impl<F> FnSink<F>
where
    F: FnMut(&GameEvent),
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        (self.0)(event);
    }
}

/// Recording sink.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Remove and return all recorded events.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forget recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Count recorded events matching a predicate.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    /// Most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }
}

impl EventSink for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
