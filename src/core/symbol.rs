//! Card symbols.
//!
//! A symbol is the pairing key of a card. The engine only compares symbols
//! for equality; what they look like on screen is the renderer's business
//! (an emoji, a character name, an image key).

use serde::{Deserialize, Serialize};

/// Opaque pairing key printed on the face of a card.
///
/// Two cards form a pair when their symbols are equal.
///
/// ```
/// use memory_match::core::Symbol;
///
/// let a = Symbol::from("Yoda");
/// let b = Symbol::new(String::from("Yoda"));
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "Yoda");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the symbol text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Self(value.to_string())
    }
}

/// Build a symbol sequence from anything string-like.
///
/// Convenience for tests and hosts that hold plain strings.
///
/// ```
/// use memory_match::core::{symbols, Symbol};
///
/// let deck = symbols(["A", "B", "A", "B"]);
/// assert_eq!(deck.len(), 4);
/// assert_eq!(deck[2], Symbol::from("A"));
/// ```
pub fn symbols<I, S>(items: I) -> Vec<Symbol>
where
    I: IntoIterator<Item = S>,
    S: Into<Symbol>,
{
    items.into_iter().map(Into::into).collect()
}
