//! The rectangular grid of cells.

use super::rules;
use super::types::{Cell, Symbol};
use derive_more::{Display, Error};
use std::fmt;
use tracing::{debug, instrument};

/// Largest number of cells a grid may hold.
pub const MAX_CELLS: usize = 10_000;

/// Why a grid could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GridError {
    /// One of the dimensions was zero.
    #[display("grid must have at least one row and one column, got {}x{}", rows, cols)]
    ZeroDimension {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// A row had a different length than the first row.
    #[display("row {} has {} cells, expected {}", row, found, expected)]
    Ragged {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The grid would hold more than [`MAX_CELLS`] cells.
    #[display("grid {}x{} is too large, at most {} cells are allowed", rows, cols, MAX_CELLS)]
    TooLarge {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
}

fn check_size(rows: usize, cols: usize) -> Result<(), GridError> {
    if rows == 0 || cols == 0 {
        return Err(GridError::ZeroDimension { rows, cols });
    }
    match rows.checked_mul(cols) {
        Some(cells) if cells <= MAX_CELLS => Ok(()),
        _ => Err(GridError::TooLarge { rows, cols }),
    }
}

/// A fixed-size `rows x cols` grid.
///
/// Positions are 1-based and row-major: position `p` lives at row
/// `(p - 1) / cols`, column `(p - 1) % cols`. Dimensions never change
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty grid.
    #[instrument]
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        check_size(rows, cols)?;
        Ok(Self::blank(rows, cols))
    }

    /// Creates an empty grid from dimensions already checked by `check_size`.
    pub(crate) fn blank(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Builds a grid from nested rows of cells.
    #[instrument(skip(rows), fields(row_count = rows.len()))]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        check_size(row_count, cols)?;

        let mut cells = Vec::with_capacity(row_count * cols);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            rows: row_count,
            cols,
            cells,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over the rows of the grid.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }

    /// Returns the cell at a zero-based row and column.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns the cell at a 1-based position.
    pub fn cell_at(&self, position: usize) -> Option<&Cell> {
        self.index_of(position).and_then(|index| self.cells.get(index))
    }

    /// Converts zero-based coordinates to a 1-based position.
    pub fn position_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col + 1)
    }

    /// Converts a 1-based position to zero-based `(row, col)`.
    pub fn coordinates(&self, position: usize) -> Option<(usize, usize)> {
        self.index_of(position)
            .map(|index| (index / self.cols, index % self.cols))
    }

    fn index_of(&self, position: usize) -> Option<usize> {
        (1..=self.cells.len())
            .contains(&position)
            .then(|| position - 1)
    }

    /// Places `symbol` at `position` if that cell exists and is empty.
    ///
    /// Returns false without touching the grid otherwise. This is the
    /// only way cells change.
    #[instrument(skip(self), fields(rows = self.rows, cols = self.cols))]
    pub fn attempt_move(&mut self, position: usize, symbol: &Symbol) -> bool {
        let Some(index) = self.index_of(position) else {
            debug!(position, "Position out of range");
            return false;
        };

        match &self.cells[index] {
            Cell::Empty => {
                self.cells[index] = Cell::Marked(symbol.clone());
                debug!(position, %symbol, "Mark placed");
                true
            }
            Cell::Marked(existing) => {
                debug!(position, %existing, "Cell already occupied");
                false
            }
        }
    }

    /// True if `symbol` fills a whole row, column, or (square grids only) diagonal.
    pub fn has_winner(&self, symbol: &Symbol) -> bool {
        rules::has_winner(self, symbol)
    }

    /// True if no empty cell remains.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// All empty positions in ascending order.
    #[instrument(skip(self))]
    pub fn legal_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index + 1)
            .collect()
    }

    /// Returns the grid as nested rows, for saving.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.iter_rows().map(<[Cell]>::to_vec).collect()
    }
}

/// Text rendering for logs: empty cells show their position number.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.iter_rows().enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for (col_index, cell) in row.iter().enumerate() {
                if col_index > 0 {
                    write!(f, "|")?;
                }
                match cell {
                    Cell::Empty => write!(f, "{}", row_index * self.cols + col_index + 1)?,
                    Cell::Marked(symbol) => write!(f, "{}", symbol)?,
                }
            }
        }
        Ok(())
    }
}
