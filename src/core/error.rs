//! Error types.
//!
//! Only integration mistakes and bad input are errors. Clicking a card that
//! is already face up, or clicking while a turn resolves, is an expected
//! race in a live UI and is reported as an ignored selection instead.

use thiserror::Error;

use super::card::CardIndex;
use super::player::PlayerId;
use super::symbol::Symbol;

/// A deck that violates the pairing invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("deck is empty")]
    Empty,

    #[error("deck has an odd number of cards ({len})")]
    OddLength { len: usize },

    #[error("symbol `{symbol}` appears {count} times, expected exactly 2")]
    BadMultiplicity { symbol: Symbol, count: usize },
}

/// Failure of a deck provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("deck provider unavailable for theme `{theme}`: {reason}")]
    Unavailable { theme: String, reason: String },

    #[error("theme `{theme}` has {available} symbols, {requested} pairs requested")]
    NotEnoughSymbols {
        theme: String,
        requested: usize,
        available: usize,
    },
}

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count must be between 1 and 255, got {0}")]
    PlayerCount(usize),
}

/// Errors surfaced by the match engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid deck: {0}")]
    InvalidDeck(#[from] DeckError),

    #[error("{index} is out of range for a board of {board_size} cards")]
    IndexOutOfRange { index: CardIndex, board_size: usize },

    #[error("no active session; start a game first")]
    NoActiveSession,

    #[error("{player} is not seated at a table of {player_count}")]
    UnknownPlayer { player: PlayerId, player_count: usize },

    #[error(transparent)]
    ProviderUnavailable(#[from] ProviderError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_error_messages() {
        let err = DeckError::BadMultiplicity {
            symbol: Symbol::from("A"),
            count: 3,
        };
        assert_eq!(err.to_string(), "symbol `A` appears 3 times, expected exactly 2");
        assert_eq!(
            DeckError::OddLength { len: 5 }.to_string(),
            "deck has an odd number of cards (5)"
        );
    }

    #[test]
    fn test_provider_error_is_surfaced_unwrapped() {
        let provider = ProviderError::Unavailable {
            theme: "pokemon".into(),
            reason: "timed out".into(),
        };
        let err = EngineError::from(provider.clone());
        assert_eq!(err.to_string(), provider.to_string());
        assert_eq!(err, EngineError::ProviderUnavailable(provider));
    }

    #[test]
    fn test_index_out_of_range_message() {
        let err = EngineError::IndexOutOfRange {
            index: CardIndex::new(16),
            board_size: 16,
        };
        assert_eq!(err.to_string(), "Card(16) is out of range for a board of 16 cards");
    }

    #[test]
    fn test_unknown_player_message() {
        let err = EngineError::UnknownPlayer {
            player: PlayerId::new(2),
            player_count: 2,
        };
        assert_eq!(err.to_string(), "Player 3 is not seated at a table of 2");
    }
}
