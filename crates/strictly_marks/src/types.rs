//! Core domain types for grid-marking games.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How an empty cell is written in a saved record.
pub const EMPTY_SYMBOL: &str = " ";

/// The mark a player places in a cell.
///
/// Any non-blank text works ("X", "O", "★"); the single space is
/// reserved for empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[display("{}", _0)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol, rejecting empty and blank text.
    #[instrument]
    pub fn new(text: &str) -> Result<Self, SymbolError> {
        if text.is_empty() {
            return Err(SymbolError::Empty);
        }
        if text.trim().is_empty() {
            return Err(SymbolError::Blank);
        }
        Ok(Self(text.to_string()))
    }

    /// Builds a symbol from text known to be valid.
    pub(crate) fn from_static(text: &'static str) -> Self {
        debug_assert!(!text.trim().is_empty());
        Self(text.to_string())
    }

    /// Returns the symbol text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Symbol {
    type Error = SymbolError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(&text)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// Why a piece of text cannot be used as a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SymbolError {
    /// The text was empty.
    #[display("symbol must not be empty")]
    Empty,
    /// The text was whitespace only, which collides with the empty-cell marker.
    #[display("symbol must not be blank")]
    Blank,
}

/// A single cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Nobody has marked this cell yet.
    #[default]
    Empty,
    /// The cell holds a player's mark.
    Marked(Symbol),
}

impl Cell {
    /// Returns true if nobody has marked the cell.
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns true if the cell holds the given symbol.
    pub fn holds(&self, symbol: &Symbol) -> bool {
        matches!(self, Cell::Marked(mark) if mark == symbol)
    }

    /// Returns the mark in the cell, if any.
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Marked(symbol) => Some(symbol),
        }
    }

    /// Text written for this cell in a saved record.
    pub fn as_str(&self) -> &str {
        match self {
            Cell::Empty => EMPTY_SYMBOL,
            Cell::Marked(symbol) => symbol.as_str(),
        }
    }
}
