//! Validated decks.
//!
//! A `Deck` can only be built from a symbol sequence in which every symbol
//! occurs exactly twice. The engine never trusts a provider to get this right.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{DeckError, Symbol};

/// A dealt sequence of symbols satisfying the pairing invariant.
///
/// Order is the board order and is never reshuffled after the deal.
///
/// ```
/// use memory_match::core::symbols;
/// use memory_match::deck::Deck;
///
/// let deck = Deck::new(symbols(["A", "B", "A", "B"])).unwrap();
/// assert_eq!(deck.len(), 4);
/// assert_eq!(deck.pair_count(), 2);
///
/// assert!(Deck::new(symbols(["A", "B", "A"])).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Deck {
    symbols: Vec<Symbol>,
}

impl Deck {
    /// Validate a symbol sequence and wrap it as a deck.
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, DeckError> {
        validate_pairs(&symbols)?;
        Ok(Self { symbols })
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a validated deck; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of distinct pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.symbols.len() / 2
    }

    /// Symbols in board order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Consume the deck and return its symbols.
    #[must_use]
    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}

impl<'de> Deserialize<'de> for Deck {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let symbols = Vec::<Symbol>::deserialize(deserializer)?;
        Deck::new(symbols).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Vec<Symbol>> for Deck {
    type Error = DeckError;

    fn try_from(symbols: Vec<Symbol>) -> Result<Self, Self::Error> {
        Deck::new(symbols)
    }
}

/// Check that every symbol appears exactly twice.
///
/// When several symbols are wrong, the one dealt first is reported.
pub fn validate_pairs(symbols: &[Symbol]) -> Result<(), DeckError> {
    if symbols.is_empty() {
        return Err(DeckError::Empty);
    }
    if symbols.len() % 2 != 0 {
        return Err(DeckError::OddLength { len: symbols.len() });
    }

    let mut counts: FxHashMap<&Symbol, usize> = FxHashMap::default();
    for symbol in symbols {
        *counts.entry(symbol).or_insert(0) += 1;
    }

    for symbol in symbols {
        let count = counts[symbol];
        if count != 2 {
            return Err(DeckError::BadMultiplicity {
                symbol: symbol.clone(),
                count,
            });
        }
    }

    Ok(())
}
