//! Validated starting configuration for a session.

use super::grid::GridError;
use super::types::SymbolError;
use super::{Grid, Player, Symbol};
use derive_more::{Display, Error, From};
use tracing::{debug, instrument};

/// Why a game setup was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SetupError {
    /// The grid dimensions were invalid.
    #[display("{}", _0)]
    #[from]
    Grid(GridError),
    /// A symbol could not be used.
    #[display("{}", _0)]
    #[from]
    Symbol(SymbolError),
    /// Both players were given the same mark.
    #[display("players must use different symbols, both use '{}'", symbol)]
    DuplicateSymbol {
        /// The shared symbol.
        symbol: Symbol,
    },
    /// The starting symbol does not belong to either player.
    #[display("starting symbol '{}' belongs to neither player", symbol)]
    UnknownFirst {
        /// The requested starting symbol.
        symbol: Symbol,
    },
}

/// Everything needed to start a fresh session.
///
/// Always valid once constructed: both dimensions are at least one,
/// the two players use different symbols, and `first` is one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    rows: usize,
    cols: usize,
    player_a: Player,
    player_b: Player,
    first: Symbol,
}

impl GameSetup {
    /// Validates and creates a setup.
    #[instrument(skip(player_a, player_b), fields(a = %player_a.describe(), b = %player_b.describe()))]
    pub fn new(
        rows: usize,
        cols: usize,
        player_a: Player,
        player_b: Player,
        first: Symbol,
    ) -> Result<Self, SetupError> {
        Grid::new(rows, cols)?;

        if player_a.symbol() == player_b.symbol() {
            return Err(SetupError::DuplicateSymbol {
                symbol: player_a.symbol().clone(),
            });
        }

        if &first != player_a.symbol() && &first != player_b.symbol() {
            return Err(SetupError::UnknownFirst { symbol: first });
        }

        debug!(rows, cols, %first, "Game setup validated");
        Ok(Self {
            rows,
            cols,
            player_a,
            player_b,
            first,
        })
    }

    /// Number of rows in a fresh grid.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in a fresh grid.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The first player.
    pub fn player_a(&self) -> &Player {
        &self.player_a
    }

    /// The second player.
    pub fn player_b(&self) -> &Player {
        &self.player_b
    }

    /// Symbol of whoever moves first.
    pub fn first(&self) -> &Symbol {
        &self.first
    }

    /// A fresh, empty grid with this setup's dimensions.
    pub fn empty_grid(&self) -> Grid {
        Grid::blank(self.rows, self.cols)
    }
}

/// 3x3, a human "Player" with X against an automated "Bot" with O; X starts.
impl Default for GameSetup {
    fn default() -> Self {
        let x = Symbol::from_static("X");
        let o = Symbol::from_static("O");
        Self {
            rows: 3,
            cols: 3,
            player_a: Player::human("Player", x.clone()),
            player_b: Player::automated("Bot", o),
            first: x,
        }
    }
}
