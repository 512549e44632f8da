//! Mapping terminal input onto grid positions.

use crossterm::event::KeyCode;
use ratatui::layout::Rect;

/// Width of one cell box in terminal columns.
pub const CELL_WIDTH: u16 = 7;
/// Height of one cell box in terminal rows.
pub const CELL_HEIGHT: u16 = 3;
/// Gap between neighbouring cells.
pub const MARGIN: u16 = 1;

/// Where the grid was drawn on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardLayout {
    /// Left edge of the first column.
    pub x: u16,
    /// Top edge of the first row.
    pub y: u16,
    /// Number of grid rows.
    pub rows: usize,
    /// Number of grid columns.
    pub cols: usize,
}

fn span(count: usize, size: u16) -> u16 {
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    count
        .saturating_mul(size)
        .saturating_add(count.saturating_sub(1).saturating_mul(MARGIN))
}

impl BoardLayout {
    /// Creates a layout with its top-left corner at `(x, y)`.
    pub fn new(x: u16, y: u16, rows: usize, cols: usize) -> Self {
        Self { x, y, rows, cols }
    }

    /// Layout for a grid centred inside `area`.
    pub fn centered_in(area: Rect, rows: usize, cols: usize) -> Self {
        let width = span(cols, CELL_WIDTH);
        let height = span(rows, CELL_HEIGHT);
        Self::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            rows,
            cols,
        )
    }

    /// Total width including margins.
    pub fn width(&self) -> u16 {
        span(self.cols, CELL_WIDTH)
    }

    /// Total height including margins.
    pub fn height(&self) -> u16 {
        span(self.rows, CELL_HEIGHT)
    }

    /// Screen rectangle of the cell at a 1-based position.
    pub fn cell_rect(&self, position: usize) -> Option<Rect> {
        if position == 0 || position > self.rows.saturating_mul(self.cols) {
            return None;
        }
        let index = position - 1;
        let row = u16::try_from(index / self.cols).ok()?;
        let col = u16::try_from(index % self.cols).ok()?;
        let x = self
            .x
            .checked_add(col.checked_mul(CELL_WIDTH + MARGIN)?)?;
        let y = self
            .y
            .checked_add(row.checked_mul(CELL_HEIGHT + MARGIN)?)?;
        Some(Rect::new(x, y, CELL_WIDTH, CELL_HEIGHT))
    }

    /// The 1-based position under a terminal coordinate.
    ///
    /// Clicks on the margins between cells or outside the grid hit nothing.
    pub fn position_at(&self, column: u16, row: u16) -> Option<usize> {
        let col = axis_index(column.checked_sub(self.x)?, CELL_WIDTH, self.cols)?;
        let row = axis_index(row.checked_sub(self.y)?, CELL_HEIGHT, self.rows)?;
        Some(row * self.cols + col + 1)
    }
}

fn axis_index(offset: u16, size: u16, count: usize) -> Option<usize> {
    let stride = size + MARGIN;
    if offset % stride >= size {
        return None;
    }
    let index = usize::from(offset / stride);
    (index < count).then_some(index)
}

/// Moves a 1-based cursor with the arrow keys, stopping at the edges.
pub fn move_cursor(position: usize, key: KeyCode, rows: usize, cols: usize) -> usize {
    let total = rows.saturating_mul(cols);
    if total == 0 {
        return position;
    }
    let index = position.clamp(1, total) - 1;
    let (row, col) = (index / cols, index % cols);

    let (row, col) = match key {
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(cols - 1)),
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(rows - 1), col),
        _ => (row, col),
    };
    row * cols + col + 1
}

/// The position a digit key selects, if it is on the grid.
pub fn digit_position(key: KeyCode, total: usize) -> Option<usize> {
    match key {
        KeyCode::Char(c) => c
            .to_digit(10)
            .map(|digit| digit as usize)
            .filter(|&position| (1..=total).contains(&position)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_at_cell_interiors() {
        let layout = BoardLayout::new(10, 5, 3, 3);
        assert_eq!(layout.position_at(10, 5), Some(1));
        assert_eq!(layout.position_at(16, 7), Some(1));
        assert_eq!(layout.position_at(18, 5), Some(2));
        assert_eq!(layout.position_at(26, 13), Some(9));
    }

    #[test]
    fn test_position_at_margins_and_outside() {
        let layout = BoardLayout::new(10, 5, 3, 3);
        // Column gap after the first cell.
        assert_eq!(layout.position_at(17, 5), None);
        // Row gap under the first row.
        assert_eq!(layout.position_at(10, 8), None);
        assert_eq!(layout.position_at(9, 5), None);
        assert_eq!(layout.position_at(10, 4), None);
        assert_eq!(layout.position_at(33, 5), None);
        assert_eq!(layout.position_at(10, 17), None);
    }

    #[test]
    fn test_cell_rect_agrees_with_position_at() {
        let layout = BoardLayout::new(2, 1, 2, 4);
        for position in 1..=8 {
            let rect = layout.cell_rect(position).expect("on grid");
            assert_eq!(layout.position_at(rect.x, rect.y), Some(position));
            assert_eq!(
                layout.position_at(rect.x + rect.width - 1, rect.y + rect.height - 1),
                Some(position)
            );
        }
        assert_eq!(layout.cell_rect(0), None);
        assert_eq!(layout.cell_rect(9), None);
    }

    #[test]
    fn test_centered_in() {
        let layout = BoardLayout::centered_in(Rect::new(0, 0, 43, 21), 3, 3);
        assert_eq!(layout.width(), 23);
        assert_eq!(layout.height(), 11);
        assert_eq!((layout.x, layout.y), (10, 5));
    }

    #[test]
    fn test_move_cursor_clamps() {
        assert_eq!(move_cursor(1, KeyCode::Left, 3, 3), 1);
        assert_eq!(move_cursor(1, KeyCode::Up, 3, 3), 1);
        assert_eq!(move_cursor(1, KeyCode::Right, 3, 3), 2);
        assert_eq!(move_cursor(3, KeyCode::Right, 3, 3), 3);
        assert_eq!(move_cursor(5, KeyCode::Down, 3, 3), 8);
        assert_eq!(move_cursor(8, KeyCode::Down, 3, 3), 8);
        assert_eq!(move_cursor(4, KeyCode::Enter, 3, 3), 4);
    }

    #[test]
    fn test_move_cursor_on_wide_grid() {
        assert_eq!(move_cursor(5, KeyCode::Down, 2, 5), 10);
        assert_eq!(move_cursor(6, KeyCode::Up, 2, 5), 1);
    }

    #[test]
    fn test_huge_dimensions_do_not_overflow() {
        let layout = BoardLayout::new(0, 0, usize::MAX, 2);
        assert_eq!(layout.cell_rect(usize::MAX), None);
        assert_eq!(move_cursor(1, KeyCode::Right, usize::MAX, 2), 2);
    }

    #[test]
    fn test_digit_position() {
        assert_eq!(digit_position(KeyCode::Char('5'), 9), Some(5));
        assert_eq!(digit_position(KeyCode::Char('7'), 6), None);
        assert_eq!(digit_position(KeyCode::Char('0'), 9), None);
        assert_eq!(digit_position(KeyCode::Char('x'), 9), None);
    }
}
