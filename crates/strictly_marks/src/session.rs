//! Game session controller.
//!
//! A [`Session`] owns the grid and both players, alternates turns,
//! detects the end of the game, and saves a [`Record`] after every move
//! that leaves the game open. Input handling outside the crate resolves
//! a click or key press to a position and calls [`Session::apply_move`].

use super::record::RestoredGame;
use super::rules;
use super::store::{Loaded, RecordStore};
use super::{GameSetup, Grid, Player, Record};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

/// One of the two places at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    /// The first player.
    A,
    /// The second player.
    B,
}

impl Seat {
    /// Returns the other seat.
    pub fn other(self) -> Self {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Moves are still being accepted.
    InProgress,
    /// The player in this seat completed a line.
    Won(Seat),
    /// The grid filled up with no line completed.
    Drawn,
}

/// What a call to [`Session::apply_move`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveResult {
    /// Nothing changed: illegal position or the game is already over.
    Ignored,
    /// The mark was placed and the turn passed to the other player.
    Continued,
    /// The mark was placed and won the game.
    Won,
    /// The mark was placed and filled the grid.
    Drawn,
}

/// A game between two players over one grid.
#[derive(Debug)]
pub struct Session<S> {
    setup: GameSetup,
    grid: Grid,
    player_a: Player,
    player_b: Player,
    current: Seat,
    outcome: Outcome,
    store: S,
    last_persist_failed: bool,
}

impl<S: RecordStore> Session<S> {
    /// Starts a fresh game, discarding any saved record.
    #[instrument(skip(setup, store), fields(rows = setup.rows(), cols = setup.cols()))]
    pub fn new(setup: GameSetup, mut store: S) -> Self {
        if let Err(err) = store.discard() {
            warn!(error = %err, "Could not discard saved record");
        }
        info!("Starting new session");
        Self::fresh(setup, store)
    }

    /// Resumes the saved game if there is one, otherwise starts fresh.
    ///
    /// A corrupt record is logged, discarded, and replaced by a fresh game.
    #[instrument(skip(setup, store), fields(rows = setup.rows(), cols = setup.cols()))]
    pub fn resume(setup: GameSetup, mut store: S) -> Self {
        let record = match store.load() {
            Loaded::Found(record) => record,
            Loaded::NotFound => {
                info!("No saved game, starting fresh");
                return Self::fresh(setup, store);
            }
            Loaded::Corrupt(err) => {
                warn!(error = %err, "Saved game is corrupt, starting fresh");
                return Self::new(setup, store);
            }
        };

        match record.restore() {
            Ok(restored) => Self::restored(setup, restored, store),
            Err(err) => {
                warn!(error = %err, "Saved game cannot be restored, starting fresh");
                Self::new(setup, store)
            }
        }
    }

    fn fresh(setup: GameSetup, store: S) -> Self {
        let current = if setup.first() == setup.player_a().symbol() {
            Seat::A
        } else {
            Seat::B
        };
        Self {
            grid: setup.empty_grid(),
            player_a: setup.player_a().clone(),
            player_b: setup.player_b().clone(),
            current,
            outcome: Outcome::InProgress,
            setup,
            store,
            last_persist_failed: false,
        }
    }

    fn restored(setup: GameSetup, restored: RestoredGame, store: S) -> Self {
        let RestoredGame {
            grid,
            player_a,
            player_b,
            current,
        } = restored;

        let outcome = match rules::winner_among(&grid, &[player_a.symbol(), player_b.symbol()]) {
            Some(symbol) if symbol == player_a.symbol() => Outcome::Won(Seat::A),
            Some(_) => Outcome::Won(Seat::B),
            None if grid.is_full() => Outcome::Drawn,
            None => Outcome::InProgress,
        };

        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            ?outcome,
            "Resumed saved session"
        );

        Self {
            setup,
            grid,
            player_a,
            player_b,
            current,
            outcome,
            store,
            last_persist_failed: false,
        }
    }

    /// Throws away the saved record and starts over from the setup.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        if let Err(err) = self.store.discard() {
            warn!(error = %err, "Could not discard saved record");
        }
        self.grid = self.setup.empty_grid();
        self.player_a = self.setup.player_a().clone();
        self.player_b = self.setup.player_b().clone();
        self.current = if self.setup.first() == self.player_a.symbol() {
            Seat::A
        } else {
            Seat::B
        };
        self.outcome = Outcome::InProgress;
        self.last_persist_failed = false;
        info!("Session restarted");
    }

    /// Places the current player's mark at a 1-based position.
    ///
    /// Illegal positions and moves after the game ended are ignored.
    /// When the game stays open the turn passes and the session is saved;
    /// a failed save is logged and play continues.
    #[instrument(skip(self), fields(player = %self.current_player().describe()))]
    pub fn apply_move(&mut self, position: usize) -> MoveResult {
        if self.outcome != Outcome::InProgress {
            debug!(outcome = ?self.outcome, "Game is over, move ignored");
            return MoveResult::Ignored;
        }

        #[cfg(debug_assertions)]
        let before = self.grid.clone();

        let symbol = self.current_player().symbol().clone();
        if !self.grid.attempt_move(position, &symbol) {
            debug!("Illegal move ignored");
            return MoveResult::Ignored;
        }

        #[cfg(debug_assertions)]
        assert_move_invariants(&before, &self.grid);

        if self.grid.has_winner(&symbol) {
            self.outcome = Outcome::Won(self.current);
            info!(winner = %self.current_player().describe(), "Game won");
            return MoveResult::Won;
        }

        if self.grid.is_full() {
            self.outcome = Outcome::Drawn;
            info!("Game drawn");
            return MoveResult::Drawn;
        }

        self.current = self.current.other();
        self.persist();
        debug!(next = %self.current_player().describe(), "Turn passed");
        MoveResult::Continued
    }

    /// Lets an automated current player take its turn.
    ///
    /// Does nothing when the game is over or a human is to move.
    #[instrument(skip(self, rng))]
    pub fn play_automated<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MoveResult {
        if self.outcome != Outcome::InProgress {
            return MoveResult::Ignored;
        }
        match self.current_player().select_move(&self.grid, rng) {
            Some(position) => self.apply_move(position),
            None => {
                debug!("Current player is human, waiting for input");
                MoveResult::Ignored
            }
        }
    }

    fn persist(&mut self) {
        let record = self.to_record();
        match self.store.save(&record) {
            Ok(()) => self.last_persist_failed = false,
            Err(err) => {
                warn!(error = %err, "Failed to save session, continuing in memory");
                self.last_persist_failed = true;
            }
        }
    }
}

impl<S> Session<S> {
    /// Captures the resumable state: grid, both players, and whose turn it is.
    pub fn to_record(&self) -> Record {
        Record::capture(
            &self.grid,
            &self.player_a,
            &self.player_b,
            self.current_player(),
        )
    }

    /// True when the game is open and an automated player is to move.
    pub fn awaiting_automated(&self) -> bool {
        self.outcome == Outcome::InProgress && self.current_player().is_automated()
    }

    /// The grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The first player.
    pub fn player_a(&self) -> &Player {
        &self.player_a
    }

    /// The second player.
    pub fn player_b(&self) -> &Player {
        &self.player_b
    }

    /// The player in the given seat.
    pub fn player(&self, seat: Seat) -> &Player {
        match seat {
            Seat::A => &self.player_a,
            Seat::B => &self.player_b,
        }
    }

    /// Whose turn it is. After the game ends, the player who moved last.
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// Seat of whoever is to move.
    pub fn current_seat(&self) -> Seat {
        self.current
    }

    /// Where the game stands.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The winning player, if any.
    pub fn winner(&self) -> Option<&Player> {
        match self.outcome {
            Outcome::Won(seat) => Some(self.player(seat)),
            Outcome::InProgress | Outcome::Drawn => None,
        }
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    /// Status text for the presentation layer.
    pub fn status_line(&self) -> String {
        match self.outcome {
            Outcome::InProgress => format!("Turn: {}", self.current_player().describe()),
            Outcome::Won(seat) => format!("{} wins!", self.player(seat).name()),
            Outcome::Drawn => "Draw!".to_string(),
        }
    }

    /// The setup used for fresh games and restarts.
    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    /// The record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// True if the most recent save attempt failed.
    pub fn last_persist_failed(&self) -> bool {
        self.last_persist_failed
    }
}

#[cfg(debug_assertions)]
fn assert_move_invariants(before: &Grid, after: &Grid) {
    use super::invariants::{InvariantSet, MoveInvariants};

    if let Err(violations) = MoveInvariants::check_all(before, after) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        panic!("Move invariants violated: {}", descriptions);
    }
}
