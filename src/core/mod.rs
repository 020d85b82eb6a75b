//! Core engine types: symbols, cards, players, RNG, configuration, errors.

pub mod symbol;
pub mod card;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use symbol::{symbols, Symbol};
pub use card::{Card, CardIndex, CardState};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::EngineConfig;
pub use error::{ConfigError, DeckError, EngineError, ProviderError};
