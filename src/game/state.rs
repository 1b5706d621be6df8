use serde::{Deserialize, Serialize};

use super::board::{DropError, Position, COLS};
use super::{Board, Cell, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is out of range")]
    InvalidColumn,
    #[error("game is over")]
    GameOver,
}

impl From<DropError> for MoveError {
    fn from(e: DropError) -> Self {
        match e {
            DropError::ColumnFull => MoveError::ColumnFull,
            DropError::InvalidColumn => MoveError::InvalidColumn,
        }
    }
}

/// A placed piece, as recorded in the move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

/// What a successful `apply_move` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub row: usize,
    pub col: usize,
    pub player: Player,
    /// Cells of the completed line when the move won the game
    pub winning_line: Option<Vec<Position>>,
    /// Set when the move ended the game
    pub outcome: Option<GameOutcome>,
}

/// The board engine: grid, move history and turn order.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    history: Vec<Move>,
    current_player: Player,
    status: GameStatus,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            history: Vec::new(),
            current_player: Player::One, // Player 1 starts
            status: GameStatus::InProgress,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.board.get(row, col)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(GameOutcome::Winner(player)),
            GameStatus::Draw => Some(GameOutcome::Draw),
        }
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Moves in the order they were played
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Row a piece dropped into `col` would land on, if the column accepts one
    pub fn available_row(&self, col: usize) -> Option<usize> {
        self.board.available_row(col)
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    pub fn is_board_full(&self) -> bool {
        self.board.is_full()
    }

    /// Drop the current player's piece into `column`.
    ///
    /// On error nothing changes. On success the move is recorded, the
    /// terminal conditions are evaluated and, if the game goes on, the turn
    /// passes to the other player. A terminal move leaves the mover as the
    /// current player.
    pub fn apply_move(&mut self, column: usize) -> Result<MoveResult, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let player = self.current_player;
        let row = self.board.drop_piece(column, player.to_cell())?;
        self.history.push(Move {
            row,
            col: column,
            player,
        });

        let winning_line = self.board.winning_line(row, column);
        let outcome = if winning_line.is_some() {
            self.status = GameStatus::Won(player);
            Some(GameOutcome::Winner(player))
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
            Some(GameOutcome::Draw)
        } else {
            self.current_player = player.other();
            None
        };

        Ok(MoveResult {
            row,
            col: column,
            player,
            winning_line,
            outcome,
        })
    }

    /// Take back the most recent move.
    ///
    /// Returns the undone move, or `None` when there is nothing to undo or the
    /// game has already ended (a finished game can only be restarted).
    pub fn undo_last_move(&mut self) -> Option<Move> {
        if self.is_terminal() {
            return None;
        }
        let last = self.history.pop()?;
        self.board.clear(last.row, last.col);
        self.current_player = last.player;
        Some(last)
    }

    /// Start over with an empty board and Player 1 to move
    pub fn restart(&mut self) {
        *self = GameState::initial();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
