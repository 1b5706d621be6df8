//! Core Connect Four game logic: board representation, player types, the
//! game state machine with undo, and the command/event session around it.

mod board;
mod player;
mod session;
mod state;

pub use board::{Board, Cell, Position, COLS, CONNECT, ROWS};
pub use player::Player;
pub use session::{Command, GameEvent, GameSession};
pub use state::{GameOutcome, GameState, GameStatus, Move, MoveError, MoveResult};
