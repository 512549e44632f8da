//! Win detection.

use super::super::{Grid, Symbol};
use tracing::instrument;

/// Checks whether `symbol` completes a line.
///
/// A line is a full row or a full column. Diagonals only count when
/// the grid is square.
#[instrument(skip(grid), fields(rows = grid.rows(), cols = grid.cols()))]
pub fn has_winner(grid: &Grid, symbol: &Symbol) -> bool {
    let rows = grid.rows();
    let cols = grid.cols();
    let holds = |row: usize, col: usize| grid.cell(row, col).is_some_and(|cell| cell.holds(symbol));

    if (0..rows).any(|row| (0..cols).all(|col| holds(row, col))) {
        return true;
    }

    if (0..cols).any(|col| (0..rows).all(|row| holds(row, col))) {
        return true;
    }

    if rows == cols {
        let n = rows;
        if (0..n).all(|i| holds(i, i)) || (0..n).all(|i| holds(i, n - 1 - i)) {
            return true;
        }
    }

    false
}

/// Returns the first of `symbols` that has completed a line.
pub fn winner_among<'a>(grid: &Grid, symbols: &[&'a Symbol]) -> Option<&'a Symbol> {
    symbols.iter().copied().find(|symbol| has_winner(grid, symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(text: &str) -> Symbol {
        Symbol::new(text).expect("valid symbol")
    }

    fn place(grid: &mut Grid, symbol: &Symbol, positions: &[usize]) {
        for &position in positions {
            assert!(grid.attempt_move(position, symbol));
        }
    }

    #[test]
    fn test_no_winner_empty_grid() {
        let grid = Grid::new(3, 3).expect("valid grid");
        assert!(!has_winner(&grid, &sym("X")));
    }

    #[test]
    fn test_winner_top_row() {
        let mut grid = Grid::new(3, 3).expect("valid grid");
        place(&mut grid, &sym("X"), &[1, 2, 3]);
        place(&mut grid, &sym("O"), &[4, 5]);
        assert!(has_winner(&grid, &sym("X")));
        assert!(!has_winner(&grid, &sym("O")));
    }

    #[test]
    fn test_winner_column() {
        let mut grid = Grid::new(3, 4).expect("valid grid");
        place(&mut grid, &sym("O"), &[2, 6, 10]);
        assert!(has_winner(&grid, &sym("O")));
    }

    #[test]
    fn test_winner_both_diagonals() {
        let mut grid = Grid::new(3, 3).expect("valid grid");
        place(&mut grid, &sym("X"), &[1, 5, 9]);
        assert!(has_winner(&grid, &sym("X")));

        let mut grid = Grid::new(3, 3).expect("valid grid");
        place(&mut grid, &sym("O"), &[3, 5, 7]);
        assert!(has_winner(&grid, &sym("O")));
    }

    #[test]
    fn test_no_diagonal_on_non_square_grid() {
        // 2x3: positions 1 and 5 form the "diagonal" from the top-left corner.
        let mut grid = Grid::new(2, 3).expect("valid grid");
        place(&mut grid, &sym("X"), &[1, 5]);
        assert!(!has_winner(&grid, &sym("X")));

        let mut grid = Grid::new(2, 3).expect("valid grid");
        place(&mut grid, &sym("X"), &[3, 5]);
        assert!(!has_winner(&grid, &sym("X")));
    }

    #[test]
    fn test_single_cell_grid() {
        let mut grid = Grid::new(1, 1).expect("valid grid");
        place(&mut grid, &sym("X"), &[1]);
        assert!(has_winner(&grid, &sym("X")));
    }

    #[test]
    fn test_winner_among_picks_line_owner() {
        let mut grid = Grid::new(3, 3).expect("valid grid");
        let x = sym("X");
        let o = sym("O");
        place(&mut grid, &o, &[4, 5, 6]);
        assert_eq!(winner_among(&grid, &[&x, &o]), Some(&o));
        assert_eq!(winner_among(&grid, &[&x]), None);
    }
}
