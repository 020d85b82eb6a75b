//! Built-in symbol themes.
//!
//! The lists are the offline symbol sets of the reference game. Fetching
//! fresh names from a remote service is the host's concern; such a host can
//! wrap the result in `Theme::Custom`.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::Symbol;

const EMOJI: [&str; 8] = ["🎮", "🎯", "🎨", "🎭", "🎪", "🎸", "🎺", "🎼"];

const STAR_WARS: [&str; 8] = [
    "Luke", "Vader", "Leia", "Han", "Yoda", "Obi-Wan", "R2-D2", "C-3PO",
];

const POKEMON: [&str; 8] = [
    "Pikachu",
    "Charizard",
    "Bulbasaur",
    "Squirtle",
    "Jigglypuff",
    "Meowth",
    "Psyduck",
    "Snorlax",
];

/// A named set of symbols to deal pairs from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Emoji,
    #[serde(rename = "starwars")]
    StarWars,
    Pokemon,
    /// Host-supplied symbols.
    Custom { name: String, symbols: Vec<String> },
}

impl Theme {
    /// Look up a built-in theme by its wire name.
    ///
    /// Unknown names fall back to `Emoji`, as the reference game does.
    ///
    /// ```
    /// use memory_match::deck::Theme;
    ///
    /// assert_eq!(Theme::from_name("starwars"), Theme::StarWars);
    /// assert_eq!(Theme::from_name("nope"), Theme::Emoji);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "starwars" => Theme::StarWars,
            "pokemon" => Theme::Pokemon,
            _ => Theme::Emoji,
        }
    }

    /// Wire name of the theme.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Theme::Emoji => "emoji",
            Theme::StarWars => "starwars",
            Theme::Pokemon => "pokemon",
            Theme::Custom { name, .. } => name,
        }
    }

    /// Distinct symbols available in this theme.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        match self {
            Theme::Emoji => EMOJI.iter().copied().map(Symbol::from).collect(),
            Theme::StarWars => STAR_WARS.iter().copied().map(Symbol::from).collect(),
            Theme::Pokemon => POKEMON.iter().copied().map(Symbol::from).collect(),
            Theme::Custom { symbols, .. } => {
                let mut seen: FxHashSet<&str> = FxHashSet::default();
                symbols
                    .iter()
                    .filter(|s| seen.insert(s.as_str()))
                    .map(|s| Symbol::from(s.as_str()))
                    .collect()
            }
        }
    }

    /// Whether symbols are pictographs rather than text labels.
    ///
    /// Renderers use this to pick a card face layout.
    #[must_use]
    pub fn is_pictographic(&self) -> bool {
        matches!(self, Theme::Emoji)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
