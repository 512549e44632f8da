//! Participants in a game.

use super::{Grid, Symbol};
use derive_getters::Getters;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Position an automated player answers with when the grid is full.
pub const FALLBACK_POSITION: usize = 1;

/// Whether moves come from outside input or are computed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerKind {
    /// Moves arrive from pointer or keyboard input.
    #[default]
    Human,
    /// Moves are picked uniformly at random among legal positions.
    #[serde(alias = "bot")]
    #[strum(to_string = "automated", serialize = "bot")]
    Automated,
}

/// Name and mark shared by every kind of player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Identity {
    /// Display name, free text.
    name: String,
    /// The mark this player places.
    symbol: Symbol,
}

impl Identity {
    /// Creates a new identity.
    pub fn new(name: impl Into<String>, symbol: Symbol) -> Self {
        Self {
            name: name.into(),
            symbol,
        }
    }
}

/// A participant in the game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Player {
    /// Waits for external input.
    Human(Identity),
    /// Computes its own moves.
    Automated(Identity),
}

impl Player {
    /// Creates a player of the given kind.
    pub fn new(name: impl Into<String>, symbol: Symbol, kind: PlayerKind) -> Self {
        let identity = Identity::new(name, symbol);
        match kind {
            PlayerKind::Human => Player::Human(identity),
            PlayerKind::Automated => Player::Automated(identity),
        }
    }

    /// Creates a human player.
    pub fn human(name: impl Into<String>, symbol: Symbol) -> Self {
        Self::new(name, symbol, PlayerKind::Human)
    }

    /// Creates an automated player.
    pub fn automated(name: impl Into<String>, symbol: Symbol) -> Self {
        Self::new(name, symbol, PlayerKind::Automated)
    }

    /// Returns the player's name and symbol.
    pub fn identity(&self) -> &Identity {
        match self {
            Player::Human(identity) | Player::Automated(identity) => identity,
        }
    }

    /// Returns the player's display name.
    pub fn name(&self) -> &str {
        self.identity().name()
    }

    /// Returns the player's mark.
    pub fn symbol(&self) -> &Symbol {
        self.identity().symbol()
    }

    /// Returns which variant this player is.
    pub fn kind(&self) -> PlayerKind {
        match self {
            Player::Human(_) => PlayerKind::Human,
            Player::Automated(_) => PlayerKind::Automated,
        }
    }

    /// Returns true for automated players.
    pub fn is_automated(&self) -> bool {
        matches!(self, Player::Automated(_))
    }

    /// Label of the form `name (symbol)`.
    pub fn describe(&self) -> String {
        format!("{} ({})", self.name(), self.symbol())
    }

    /// Picks a move for this player.
    ///
    /// Humans always answer `None`; their move comes from input.
    /// Automated players choose uniformly among the legal positions and
    /// fall back to [`FALLBACK_POSITION`] when there are none.
    #[instrument(skip(self, grid, rng), fields(player = %self.describe()))]
    pub fn select_move<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> Option<usize> {
        match self {
            Player::Human(_) => None,
            Player::Automated(_) => {
                let legal = grid.legal_positions();
                let position = legal.choose(rng).copied().unwrap_or(FALLBACK_POSITION);
                debug!(position, choices = legal.len(), "Automated player chose position");
                Some(position)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::str::FromStr;

    fn sym(text: &str) -> Symbol {
        Symbol::new(text).expect("valid symbol")
    }

    #[test]
    fn test_human_never_selects() {
        let player = Player::human("Alice", sym("X"));
        let grid = Grid::new(3, 3).expect("valid grid");
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(player.select_move(&grid, &mut rng), None);
    }

    #[test]
    fn test_automated_selects_only_empty_cell() {
        let bot = Player::automated("Bot", sym("O"));
        let mut grid = Grid::new(3, 3).expect("valid grid");
        for position in [1, 2, 3, 4, 6, 7, 8, 9] {
            assert!(grid.attempt_move(position, &sym("X")));
        }
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(bot.select_move(&grid, &mut rng), Some(5));
        }
    }

    #[test]
    fn test_automated_selects_legal_positions() {
        let bot = Player::automated("Bot", sym("O"));
        let mut grid = Grid::new(2, 3).expect("valid grid");
        assert!(grid.attempt_move(2, &sym("X")));
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let position = bot.select_move(&grid, &mut rng).expect("bot always answers");
            assert!(grid.legal_positions().contains(&position));
        }
    }

    #[test]
    fn test_automated_full_grid_falls_back() {
        let bot = Player::automated("Bot", sym("O"));
        let mut grid = Grid::new(1, 2).expect("valid grid");
        assert!(grid.attempt_move(1, &sym("X")));
        assert!(grid.attempt_move(2, &sym("O")));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(bot.select_move(&grid, &mut rng), Some(FALLBACK_POSITION));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(PlayerKind::from_str("human"), Ok(PlayerKind::Human));
        assert_eq!(PlayerKind::from_str("bot"), Ok(PlayerKind::Automated));
        assert_eq!(PlayerKind::Automated.to_string(), "automated");
        assert!(PlayerKind::from_str("robot").is_err());
    }

    #[test]
    fn test_describe() {
        let player = Player::new("Игрок", sym("X"), PlayerKind::Human);
        assert_eq!(player.describe(), "Игрок (X)");
        assert_eq!(player.kind(), PlayerKind::Human);
        assert!(!player.is_automated());
    }
}
