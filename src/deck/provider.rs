//! Deck providers.
//!
//! A provider turns a `DeckRequest` into a shuffled symbol sequence. The
//! engine validates whatever comes back, so a provider may be remote,
//! scripted, or buggy without corrupting a session.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::theme::Theme;
use crate::core::{GameRng, ProviderError, Symbol};

/// Pairs dealt in the reference configuration (a 4x4 board).
pub const DEFAULT_PAIR_COUNT: usize = 8;

/// What to deal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRequest {
    pub theme: Theme,
    pub pair_count: usize,
}

impl Default for DeckRequest {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            pair_count: DEFAULT_PAIR_COUNT,
        }
    }
}

impl DeckRequest {
    /// Request the default number of pairs from a theme.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            pair_count: DEFAULT_PAIR_COUNT,
        }
    }

    /// Set the number of pairs.
    #[must_use]
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }
}

/// Source of shuffled decks.
pub trait DeckProvider {
    /// Deal a symbol sequence for the request.
    ///
    /// Implementations should return every symbol exactly twice; the engine
    /// rejects anything else.
    fn provide_deck(&mut self, request: &DeckRequest) -> Result<Vec<Symbol>, ProviderError>;
}

impl<F> DeckProvider for F
where
    F: FnMut(&DeckRequest) -> Result<Vec<Symbol>, ProviderError>,
{
    fn provide_deck(&mut self, request: &DeckRequest) -> Result<Vec<Symbol>, ProviderError> {
        self(request)
    }
}

/// Deals from the built-in themes with a seeded shuffle.
///
/// ```
/// use memory_match::deck::{DeckProvider, DeckRequest, Theme, ThemeDeckProvider};
///
/// let mut provider = ThemeDeckProvider::new(42);
/// let deck = provider.provide_deck(&DeckRequest::new(Theme::Pokemon)).unwrap();
/// assert_eq!(deck.len(), 16);
/// ```
#[derive(Clone, Debug)]
pub struct ThemeDeckProvider {
    rng: GameRng,
}

impl ThemeDeckProvider {
    /// Create a provider with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Create a provider seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: GameRng::from_entropy(),
        }
    }

    /// Seed of the underlying RNG.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl DeckProvider for ThemeDeckProvider {
    fn provide_deck(&mut self, request: &DeckRequest) -> Result<Vec<Symbol>, ProviderError> {
        let available = request.theme.symbols();
        if request.pair_count > available.len() {
            return Err(ProviderError::NotEnoughSymbols {
                theme: request.theme.name().to_owned(),
                requested: request.pair_count,
                available: available.len(),
            });
        }

        let mut deck: Vec<Symbol> = available
            .into_iter()
            .take(request.pair_count)
            .flat_map(|s| [s.clone(), s])
            .collect();

        // Each deal advances a fresh stream derived from the theme.
        let mut stream = self.rng.for_context(request.theme.name());
        self.rng = GameRng::new(self.rng.next_u64());
        stream.shuffle(&mut deck);

        debug!(theme = %request.theme, pairs = request.pair_count, "dealt deck");
        Ok(deck)
    }
}
