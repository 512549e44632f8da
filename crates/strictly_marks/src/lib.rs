//! Strictly Marks - grid-marking games with resumable sessions
//!
//! Generalized tic-tac-toe on any `rows x cols` grid, for two humans or
//! a human against a bot that plays uniformly random legal moves.
//!
//! # Architecture
//!
//! - **Grid**: cells, move validation, win and draw rules
//! - **Player**: human or automated, identified by name and symbol
//! - **Record**: JSON snapshot of a game in progress and its stores
//! - **Session**: turn order, end-of-game detection, saving after each move
//!
//! # Example
//!
//! ```
//! use strictly_marks::{GameSetup, MemoryStore, MoveResult, Session};
//!
//! let mut session = Session::new(GameSetup::default(), MemoryStore::new());
//! assert_eq!(session.apply_move(5), MoveResult::Continued);
//! assert_eq!(session.apply_move(5), MoveResult::Ignored);
//! assert!(session.store().contents().is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod grid;
mod invariants;
mod player;
mod record;
mod session;
mod setup;
mod store;
mod types;

pub mod rules;

// Crate-level exports - Domain types
pub use types::{Cell, EMPTY_SYMBOL, Symbol, SymbolError};

// Crate-level exports - Grid model
pub use grid::{Grid, GridError, MAX_CELLS};
pub use invariants::{
    InvariantSet, InvariantViolation, MonotonicGrid, MoveInvariants, SingleMarkPlaced,
    TransitionInvariant,
};

// Crate-level exports - Players
pub use player::{FALLBACK_POSITION, Identity, Player, PlayerKind};

// Crate-level exports - Setup
pub use setup::{GameSetup, SetupError};

// Crate-level exports - Persistence
pub use record::{CodecError, LEGACY_BOT_NAME, PlayerRecord, Record, RestoredGame};
pub use store::{DEFAULT_RECORD_PATH, JsonFileStore, Loaded, MemoryStore, RecordStore, StoreError};

// Crate-level exports - Session controller
pub use session::{MoveResult, Outcome, Seat, Session};
