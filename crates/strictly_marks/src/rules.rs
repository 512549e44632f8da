//! Game rules for grid-marking games.
//!
//! Pure functions over a [`Grid`](super::Grid). Kept apart from grid
//! storage so they can be checked on their own.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{has_winner, winner_among};
