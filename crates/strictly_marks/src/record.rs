//! Saved-game record and its JSON codec.
//!
//! The record is what gets written after every move that does not end
//! the game, and read back once when a session starts:
//!
//! ```json
//! {
//!   "y_size": 3,
//!   "x_size": 3,
//!   "grid": [["X", " ", " "], [" ", "O", " "], [" ", " ", " "]],
//!   "player1": {"name": "Player", "symbol": "X", "kind": "human"},
//!   "player2": {"name": "Bot", "symbol": "O", "kind": "automated"},
//!   "current_player": "X"
//! }
//! ```
//!
//! Decoding is split in two steps. [`Record::decode`] parses the JSON
//! and rejects anything that is not a usable game; [`Record::restore`]
//! turns the record into typed grid and players.

use super::types::{Cell, EMPTY_SYMBOL};
use super::{Grid, Player, PlayerKind, Seat, Symbol};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Why stored bytes could not be turned into a game.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CodecError {
    /// The data is not JSON of the expected shape.
    #[display("malformed record: {}", _0)]
    Parse(#[error(not(source))] String),
    /// The JSON is well formed but does not describe a playable game.
    #[display("invalid record: {}", _0)]
    Invalid(#[error(not(source))] String),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Parse(err.to_string())
    }
}

/// Name older records give the automated second player.
pub const LEGACY_BOT_NAME: &str = "БОТ";

/// One player's entry in a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Display name.
    pub name: String,
    /// Mark text.
    pub symbol: String,
    /// Human or automated. Older records omit it; see [`Record::restore`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PlayerKind>,
}

impl PlayerRecord {
    fn capture(player: &Player) -> Self {
        Self {
            name: player.name().to_string(),
            symbol: player.symbol().as_str().to_string(),
            kind: Some(player.kind()),
        }
    }

    fn restore(&self, field: &str, implied: PlayerKind) -> Result<Player, CodecError> {
        let symbol = Symbol::new(&self.symbol)
            .map_err(|err| CodecError::Invalid(format!("{}.symbol: {}", field, err)))?;
        let kind = self.kind.unwrap_or(implied);
        Ok(Player::new(self.name.clone(), symbol, kind))
    }
}

/// Snapshot of a game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Number of rows.
    pub y_size: usize,
    /// Number of columns.
    pub x_size: usize,
    /// `y_size` rows of `x_size` cell texts; `" "` is an empty cell.
    pub grid: Vec<Vec<String>>,
    /// The first player.
    pub player1: PlayerRecord,
    /// The second player.
    pub player2: PlayerRecord,
    /// Symbol of whoever moves next.
    pub current_player: String,
}

/// A record turned back into typed game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredGame {
    /// The grid contents.
    pub grid: Grid,
    /// The first player.
    pub player_a: Player,
    /// The second player.
    pub player_b: Player,
    /// Whose turn it is.
    pub current: Seat,
}

impl Record {
    /// Captures the resumable state of a game.
    #[instrument(skip_all, fields(rows = grid.rows(), cols = grid.cols(), current = %current.symbol()))]
    pub fn capture(grid: &Grid, player_a: &Player, player_b: &Player, current: &Player) -> Self {
        Self {
            y_size: grid.rows(),
            x_size: grid.cols(),
            grid: grid
                .iter_rows()
                .map(|row| row.iter().map(|cell| cell.as_str().to_string()).collect())
                .collect(),
            player1: PlayerRecord::capture(player_a),
            player2: PlayerRecord::capture(player_b),
            current_player: current.symbol().as_str().to_string(),
        }
    }

    /// Serializes the record as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string_pretty(self).map_err(CodecError::from)
    }

    /// Parses and validates a record.
    #[instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let record: Record = serde_json::from_slice(bytes)?;
        record.restore()?;
        debug!(rows = record.y_size, cols = record.x_size, "Record decoded");
        Ok(record)
    }

    /// Rebuilds grid, players, and turn from the record.
    ///
    /// Fails if the dimensions disagree with the grid, a cell holds a
    /// symbol neither player uses, the players share a symbol, or the
    /// current player is unknown.
    ///
    /// A player without a `kind` is human, except a second player named
    /// [`LEGACY_BOT_NAME`], which is automated.
    #[instrument(skip(self), fields(rows = self.y_size, cols = self.x_size))]
    pub fn restore(&self) -> Result<RestoredGame, CodecError> {
        if self.y_size == 0 || self.x_size == 0 {
            return Err(CodecError::Invalid(format!(
                "grid size {}x{} has no cells",
                self.y_size, self.x_size
            )));
        }
        if self.grid.len() != self.y_size {
            return Err(CodecError::Invalid(format!(
                "y_size is {} but grid has {} rows",
                self.y_size,
                self.grid.len()
            )));
        }

        let second_kind = if self.player2.name == LEGACY_BOT_NAME {
            PlayerKind::Automated
        } else {
            PlayerKind::Human
        };
        let player_a = self.player1.restore("player1", PlayerKind::Human)?;
        let player_b = self.player2.restore("player2", second_kind)?;
        if player_a.symbol() == player_b.symbol() {
            return Err(CodecError::Invalid(format!(
                "both players use symbol '{}'",
                player_a.symbol()
            )));
        }

        let mut rows = Vec::with_capacity(self.y_size);
        for (row_index, row) in self.grid.iter().enumerate() {
            if row.len() != self.x_size {
                return Err(CodecError::Invalid(format!(
                    "x_size is {} but row {} has {} cells",
                    self.x_size,
                    row_index,
                    row.len()
                )));
            }
            let cells = row
                .iter()
                .map(|text| cell_from(text, &player_a, &player_b))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
        let grid = Grid::from_rows(rows).map_err(|err| CodecError::Invalid(err.to_string()))?;

        let current = if self.current_player == player_a.symbol().as_str() {
            Seat::A
        } else if self.current_player == player_b.symbol().as_str() {
            Seat::B
        } else {
            warn!(current = %self.current_player, "Current player matches neither symbol");
            return Err(CodecError::Invalid(format!(
                "current_player '{}' matches neither player",
                self.current_player
            )));
        };

        Ok(RestoredGame {
            grid,
            player_a,
            player_b,
            current,
        })
    }
}

fn cell_from(text: &str, player_a: &Player, player_b: &Player) -> Result<Cell, CodecError> {
    if text == EMPTY_SYMBOL {
        Ok(Cell::Empty)
    } else if text == player_a.symbol().as_str() {
        Ok(Cell::Marked(player_a.symbol().clone()))
    } else if text == player_b.symbol().as_str() {
        Ok(Cell::Marked(player_b.symbol().clone()))
    } else {
        Err(CodecError::Invalid(format!(
            "cell '{}' matches neither player",
            text
        )))
    }
}
