//! Draw detection.

use super::super::{Grid, Symbol};
use super::win::has_winner;
use tracing::instrument;

/// Checks if every cell is marked.
#[instrument(skip(grid), fields(rows = grid.rows(), cols = grid.cols()))]
pub fn is_full(grid: &Grid) -> bool {
    grid.cells().iter().all(|cell| !cell.is_empty())
}

/// A full grid where neither symbol completed a line.
pub fn is_draw(grid: &Grid, first: &Symbol, second: &Symbol) -> bool {
    is_full(grid) && !has_winner(grid, first) && !has_winner(grid, second)
}
