use super::board::Position;
use super::state::{GameOutcome, GameState, MoveError};
use super::Player;

/// Requests the presentation layer can make of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(usize),
    Undo,
    Restart,
}

/// What happened as a result of a command. Renderers and the score keeper
/// consume these; neither reads back into the engine to find out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    MoveApplied {
        row: usize,
        col: usize,
        player: Player,
    },
    GameWon {
        player: Player,
        cells: Vec<Position>,
    },
    GameDraw,
    Undone {
        row: usize,
        col: usize,
        restored_player: Player,
    },
    Restarted,
}

/// Drives a `GameState` from typed commands and reports events.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    state: GameState,
}

impl GameSession {
    pub fn new() -> Self {
        GameSession {
            state: GameState::initial(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply a command.
    ///
    /// `ColumnFull` and `InvalidColumn` come back as errors. Moving after the
    /// game has ended and undoing with nothing to undo are no-ops that yield
    /// no events.
    pub fn dispatch(&mut self, command: Command) -> Result<Vec<GameEvent>, MoveError> {
        match command {
            Command::Move(col) => self.request_move(col),
            Command::Undo => Ok(self.request_undo().into_iter().collect()),
            Command::Restart => Ok(vec![self.request_restart()]),
        }
    }

    pub fn request_move(&mut self, col: usize) -> Result<Vec<GameEvent>, MoveError> {
        let result = match self.state.apply_move(col) {
            Ok(result) => result,
            Err(MoveError::GameOver) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut events = vec![GameEvent::MoveApplied {
            row: result.row,
            col: result.col,
            player: result.player,
        }];
        match result.outcome {
            Some(GameOutcome::Winner(player)) => events.push(GameEvent::GameWon {
                player,
                cells: result.winning_line.unwrap_or_default(),
            }),
            Some(GameOutcome::Draw) => events.push(GameEvent::GameDraw),
            None => {}
        }
        Ok(events)
    }

    pub fn request_undo(&mut self) -> Option<GameEvent> {
        self.state.undo_last_move().map(|undone| GameEvent::Undone {
            row: undone.row,
            col: undone.col,
            restored_player: undone.player,
        })
    }

    pub fn request_restart(&mut self) -> GameEvent {
        self.state.restart();
        GameEvent::Restarted
    }
}
