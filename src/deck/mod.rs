//! Deck model and deck providers.
//!
//! ## Key Types
//!
//! - `Deck`: Symbol sequence where every symbol occurs exactly twice
//! - `Theme`: Built-in or host-supplied symbol sets
//! - `DeckRequest`: Theme plus pair count
//! - `DeckProvider`: Source of shuffled decks
//! - `ThemeDeckProvider`: Seeded provider over the built-in themes

pub mod pairing;
pub mod provider;
pub mod theme;

pub use pairing::{validate_pairs, Deck};
pub use provider::{DeckProvider, DeckRequest, ThemeDeckProvider, DEFAULT_PAIR_COUNT};
pub use theme::Theme;
