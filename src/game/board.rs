use serde::{Deserialize, Serialize};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Length of a line that wins the game
pub const CONNECT: usize = 4;

/// Win-check axes as (row step, col step), in the order they are tried:
/// horizontal, vertical, diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

/// A cell coordinate. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropError {
    ColumnFull,
    InvalidColumn,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom. Positions off the board read
    /// as empty.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(Cell::Empty)
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Lowest empty row in a column, scanning up from the bottom.
    /// `None` for a full or out-of-range column.
    pub fn available_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, DropError> {
        if col >= COLS {
            return Err(DropError::InvalidColumn);
        }

        let row = self.available_row(col).ok_or(DropError::ColumnFull)?;
        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Reset a cell to empty. Only the engine's undo path uses this, and it
    /// always clears the topmost piece of a column, so gravity still holds.
    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = Cell::Empty;
    }

    /// Check if the board is completely full.
    ///
    /// Gravity fills every column from the bottom, so a full top row means a
    /// full board.
    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(|&cell| cell != Cell::Empty)
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Check if the last move at (row, col) resulted in a win
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        self.winning_line(row, col).is_some()
    }

    /// The line completed by the piece at (row, col), if any.
    ///
    /// Axes are tried in `DIRECTIONS` order and the first one holding at least
    /// `CONNECT` consecutive pieces is reported. The line starts with the
    /// placed cell, followed by the forward run and then the backward run.
    pub fn winning_line(&self, row: usize, col: usize) -> Option<Vec<Position>> {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return None;
        }

        for (dr, dc) in DIRECTIONS {
            let forward = self.run(row, col, dr, dc, cell);
            let backward = self.run(row, col, -dr, -dc, cell);
            if forward.len() + backward.len() + 1 >= CONNECT {
                let mut line = Vec::with_capacity(forward.len() + backward.len() + 1);
                line.push(Position::new(row, col));
                line.extend(forward);
                line.extend(backward);
                return Some(line);
            }
        }

        None
    }

    /// Consecutive `cell` pieces stepping away from (row, col), excluding the
    /// starting cell.
    fn run(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> Vec<Position> {
        let mut found = Vec::new();
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while r >= 0
            && r < ROWS as isize
            && c >= 0
            && c < COLS as isize
            && self.cells[r as usize][c as usize] == cell
        {
            found.push(Position::new(r as usize, c as usize));
            r += dr;
            c += dc;
        }
        found
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        // Drop first piece in column 3
        let row = board.drop_piece(3, Cell::Player1).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::Player1);

        // Drop second piece in same column
        let row = board.drop_piece(3, Cell::Player2).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Cell::Player2);
    }

    #[test]
    fn test_available_row() {
        let mut board = Board::new();
        assert_eq!(board.available_row(2), Some(5));
        board.drop_piece(2, Cell::Player1).unwrap();
        assert_eq!(board.available_row(2), Some(4));
        assert_eq!(board.available_row(COLS), None);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();

        // Fill column 0
        for _ in 0..ROWS {
            board.drop_piece(0, Cell::Player1).unwrap();
        }

        assert!(board.is_column_full(0));
        assert_eq!(board.available_row(0), None);
        let before = board;
        assert_eq!(board.drop_piece(0, Cell::Player2), Err(DropError::ColumnFull));
        assert_eq!(board, before);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(board.drop_piece(7, Cell::Player1), Err(DropError::InvalidColumn));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, Cell::Player1).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.piece_count(), ROWS * COLS);
    }

    #[test]
    fn test_top_row_decides_fullness() {
        let mut board = Board::new();
        for col in 0..COLS - 1 {
            for _ in 0..ROWS {
                board.drop_piece(col, Cell::Player2).unwrap();
            }
        }
        assert!(!board.is_full());
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        // Create horizontal line at bottom row
        for col in 0..4 {
            board.drop_piece(col, Cell::Player1).unwrap();
        }
        let line = board.winning_line(5, 2).unwrap(); // Check middle of the line
        assert_eq!(line[0], Position::new(5, 2));
        assert_eq!(
            line,
            vec![
                Position::new(5, 2),
                Position::new(5, 3),
                Position::new(5, 1),
                Position::new(5, 0),
            ]
        );
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        // Create vertical line in column 3
        for _ in 0..4 {
            board.drop_piece(3, Cell::Player2).unwrap();
        }
        assert!(board.check_win(2, 3)); // Check the 4th piece
        let mut line = board.winning_line(2, 3).unwrap();
        line.sort_by_key(|p| p.row);
        assert_eq!(
            line,
            (2..6).map(|row| Position::new(row, 3)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new();
        // Create diagonal / pattern
        board.drop_piece(0, Cell::Player1).unwrap();

        board.drop_piece(1, Cell::Player2).unwrap();
        board.drop_piece(1, Cell::Player1).unwrap();

        board.drop_piece(2, Cell::Player2).unwrap();
        board.drop_piece(2, Cell::Player2).unwrap();
        board.drop_piece(2, Cell::Player1).unwrap();

        board.drop_piece(3, Cell::Player2).unwrap();
        board.drop_piece(3, Cell::Player2).unwrap();
        board.drop_piece(3, Cell::Player2).unwrap();
        let row = board.drop_piece(3, Cell::Player1).unwrap();

        assert!(board.check_win(row, 3));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::new();
        // Create diagonal \ pattern
        board.drop_piece(6, Cell::Player1).unwrap();

        board.drop_piece(5, Cell::Player2).unwrap();
        board.drop_piece(5, Cell::Player1).unwrap();

        board.drop_piece(4, Cell::Player2).unwrap();
        board.drop_piece(4, Cell::Player2).unwrap();
        board.drop_piece(4, Cell::Player1).unwrap();

        board.drop_piece(3, Cell::Player2).unwrap();
        board.drop_piece(3, Cell::Player2).unwrap();
        board.drop_piece(3, Cell::Player2).unwrap();
        let row = board.drop_piece(3, Cell::Player1).unwrap();

        assert!(board.check_win(row, 3));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, Cell::Player1).unwrap();
        }
        assert!(!board.check_win(5, 1)); // Only 3 in a row
    }

    #[test]
    fn test_gap_breaks_line() {
        let mut board = Board::new();
        for col in [0, 1, 3, 4] {
            board.drop_piece(col, Cell::Player1).unwrap();
        }
        assert!(!board.check_win(5, 1));
        assert!(!board.check_win(5, 3));
    }

    #[test]
    fn test_line_longer_than_four_reports_every_cell() {
        let mut board = Board::new();
        for col in [0, 1, 3, 4] {
            board.drop_piece(col, Cell::Player2).unwrap();
        }
        let row = board.drop_piece(2, Cell::Player2).unwrap();
        let line = board.winning_line(row, 2).unwrap();
        assert_eq!(line.len(), 5);
    }

    #[test]
    fn test_horizontal_reported_before_vertical() {
        let mut board = Board::new();
        // Vertical three in column 3, horizontal three on row 2 around it
        for _ in 0..3 {
            board.drop_piece(3, Cell::Player1).unwrap();
        }
        for col in [0, 1, 2] {
            for _ in 0..3 {
                board.drop_piece(col, Cell::Player2).unwrap();
            }
            board.drop_piece(col, Cell::Player1).unwrap();
        }
        let row = board.drop_piece(3, Cell::Player1).unwrap();
        assert_eq!(row, 2);
        let line = board.winning_line(row, 3).unwrap();
        assert!(line.iter().all(|p| p.row == 2));
    }

    #[test]
    fn test_off_board_reads_empty() {
        let mut board = Board::new();
        for col in 0..COLS {
            board.drop_piece(col, Cell::Player1).unwrap();
        }
        assert_eq!(board.get(ROWS, 0), Cell::Empty);
        assert_eq!(board.get(5, COLS), Cell::Empty);
        assert!(board.winning_line(ROWS, COLS).is_none());
    }

    #[test]
    fn test_empty_cell_never_wins() {
        let board = Board::new();
        assert!(board.winning_line(5, 0).is_none());
    }
}
