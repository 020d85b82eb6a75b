//! Game sessions.
//!
//! A `GameSession` aggregates everything one deal needs: the board, the
//! counters, the input lock and the cards awaiting resolution. It is owned
//! exclusively by a `MatchEngine` and replaced wholesale by the next deal.
//!
//! ## Lifecycle
//!
//! ```text
//! start_game -> Active -> Won (terminal)
//! ```
//!
//! `Active` is only ever re-entered by dealing a fresh session.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Card, CardIndex, CardState, PlayerId, PlayerMap, Symbol};
use crate::deck::Deck;
use crate::schedule::TimerId;

/// Identifier of one deal. Increases with every `start_game`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl SessionId {
    /// Create a new session ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

/// Session progression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Active,
    Won,
}

/// Cards face up in the current turn, awaiting resolution.
///
/// Holds at most two indices: the first flip of a turn, then the pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPair {
    indices: SmallVec<[CardIndex; 2]>,
}

impl PendingPair {
    /// Record a flip.
    pub(crate) fn push(&mut self, index: CardIndex) {
        debug_assert!(self.indices.len() < 2, "a turn flips at most two cards");
        self.indices.push(index);
    }

    /// Number of face-up cards this turn.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if no card has been flipped this turn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The two cards of the turn, once both are face up.
    #[must_use]
    pub fn pair(&self) -> Option<(CardIndex, CardIndex)> {
        match self.indices.as_slice() {
            [first, second] => Some((*first, *second)),
            _ => None,
        }
    }

    /// Indices in flip order.
    #[must_use]
    pub fn indices(&self) -> &[CardIndex] {
        &self.indices
    }

    pub(crate) fn clear(&mut self) {
        self.indices.clear();
    }
}

/// State of one deal.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub(crate) id: SessionId,
    pub(crate) board: Vector<Card>,
    pub(crate) moves: u32,
    pub(crate) matched_pairs: u32,
    pub(crate) total_pairs: u32,
    pub(crate) input_locked: bool,
    pub(crate) pending: PendingPair,
    pub(crate) phase: SessionPhase,
    pub(crate) current_player: PlayerId,
    pub(crate) scores: PlayerMap<u32>,
    /// Outstanding resolution or win announcement.
    pub(crate) timer: Option<TimerId>,
}

impl GameSession {
    /// Deal a fresh session: every card Hidden, counters at zero, input open.
    pub(crate) fn new(id: SessionId, deck: Deck, player_count: usize) -> Self {
        let total_pairs = deck.pair_count() as u32;
        let board: Vector<Card> = deck.into_symbols().into_iter().map(Card::hidden).collect();

        Self {
            id,
            board,
            moves: 0,
            matched_pairs: 0,
            total_pairs,
            input_locked: false,
            pending: PendingPair::default(),
            phase: SessionPhase::Active,
            current_player: PlayerId::new(0),
            scores: PlayerMap::with_value(player_count, 0),
            timer: None,
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn board_size(&self) -> usize {
        self.board.len()
    }

    /// The board in position order.
    #[must_use]
    pub fn board(&self) -> &Vector<Card> {
        &self.board
    }

    /// Card at a position.
    #[must_use]
    pub fn card(&self, index: CardIndex) -> Option<&Card> {
        self.board.get(index.raw())
    }

    /// Completed pair attempts.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Pairs found so far.
    #[must_use]
    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// Pairs on the board.
    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    /// Whether flips are currently refused.
    #[must_use]
    pub fn input_locked(&self) -> bool {
        self.input_locked
    }

    /// Cards face up this turn.
    #[must_use]
    pub fn pending(&self) -> &PendingPair {
        &self.pending
    }

    /// Session progression.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Pairs found per player.
    #[must_use]
    pub fn scores(&self) -> &PlayerMap<u32> {
        &self.scores
    }

    /// Handle of the outstanding resolution or win announcement.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Check if every pair has been found.
    #[must_use]
    pub fn all_pairs_found(&self) -> bool {
        self.matched_pairs == self.total_pairs
    }

    pub(crate) fn set_state(&mut self, index: CardIndex, state: CardState) {
        if let Some(card) = self.board.get_mut(index.raw()) {
            card.state = state;
        }
    }

    /// Renderer-safe view of the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session: self.id,
            cards: self
                .board
                .iter()
                .enumerate()
                .map(|(i, card)| CardView {
                    index: CardIndex::new(i),
                    state: card.state,
                    face: card.visible_symbol().cloned(),
                })
                .collect(),
            moves: self.moves,
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs,
            input_locked: self.input_locked,
            pending: self.pending.indices().to_vec(),
            phase: self.phase,
            current_player: self.current_player,
            scores: self.scores.clone(),
        }
    }
}

/// A card as a renderer may see it: face only when face up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub index: CardIndex,
    pub state: CardState,
    pub face: Option<Symbol>,
}

/// Serializable view of a session for renderers that re-sync.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session: SessionId,
    pub cards: Vec<CardView>,
    pub moves: u32,
    pub matched_pairs: u32,
    pub total_pairs: u32,
    pub input_locked: bool,
    pub pending: Vec<CardIndex>,
    pub phase: SessionPhase,
    pub current_player: PlayerId,
    pub scores: PlayerMap<u32>,
}

impl SessionSnapshot {
    /// Players sharing the highest pair count.
    ///
    /// Empty while nobody has scored.
    #[must_use]
    pub fn leaders(&self) -> Vec<PlayerId> {
        let best = self.scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
        if best == 0 {
            return Vec::new();
        }
        self.scores
            .iter()
            .filter(|(_, s)| **s == best)
            .map(|(p, _)| p)
            .collect()
    }

    /// Cards in a given state.
    #[must_use]
    pub fn count_in(&self, state: CardState) -> usize {
        self.cards.iter().filter(|c| c.state == state).count()
    }
}
