//! Cards on the board.
//!
//! ## Identity
//!
//! A card is identified by its position on the board (`CardIndex`). Positions
//! are fixed when the board is dealt and never change during play, so the index
//! is all a renderer needs to map an input event back to a card.
//!
//! ## State machine
//!
//! ```text
//! Hidden -> Revealed -> Matched   (terminal)
//!                    -> Hidden    (mismatch)
//! ```

use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

/// Position of a card on the board (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardIndex(pub usize);

impl CardIndex {
    /// Create a new card index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw position.
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CardIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

impl From<usize> for CardIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Face state of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Face down.
    #[default]
    Hidden,
    /// Face up, waiting for the turn to resolve.
    Revealed,
    /// Paired and out of play.
    Matched,
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Pairing key.
    pub symbol: Symbol,

    /// Current face state.
    pub state: CardState,
}

impl Card {
    /// Create a face-down card.
    pub fn hidden(symbol: Symbol) -> Self {
        Self {
            symbol,
            state: CardState::Hidden,
        }
    }

    /// Check whether two cards form a pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.symbol == other.symbol
    }

    /// The symbol if it is currently visible, `None` while face down.
    #[must_use]
    pub fn visible_symbol(&self) -> Option<&Symbol> {
        match self.state {
            CardState::Hidden => None,
            CardState::Revealed | CardState::Matched => Some(&self.symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_index() {
        let idx = CardIndex::new(7);
        assert_eq!(idx.raw(), 7);
        assert_eq!(format!("{}", idx), "Card(7)");
        assert_eq!(CardIndex::from(7), idx);
    }

    #[test]
    fn test_card_starts_hidden() {
        let card = Card::hidden(Symbol::from("A"));
        assert_eq!(card.state, CardState::Hidden);
        assert!(card.visible_symbol().is_none());
    }

    #[test]
    fn test_visible_symbol() {
        let mut card = Card::hidden(Symbol::from("A"));
        card.state = CardState::Revealed;
        assert_eq!(card.visible_symbol(), Some(&Symbol::from("A")));

        card.state = CardState::Matched;
        assert_eq!(card.visible_symbol(), Some(&Symbol::from("A")));
    }

    #[test]
    fn test_pairs_with() {
        let a1 = Card::hidden(Symbol::from("A"));
        let a2 = Card::hidden(Symbol::from("A"));
        let b = Card::hidden(Symbol::from("B"));
        assert!(a1.pairs_with(&a2));
        assert!(!a1.pairs_with(&b));
    }
}
