use crate::config::UiConfig;
use crate::game::{Command, GameEvent, GameSession, MoveError, Player, Position, COLS};
use crate::scores::{ScoreKeeper, MAX_NAME_LEN};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Duration;

use super::confetti::{self, Confetti};
use super::game_view::{self, GameView};

const START_COLUMN: usize = COLS / 2;

enum InputMode {
    Normal,
    Naming { player: Player, buffer: String },
}

pub struct App {
    session: GameSession,
    scores: ScoreKeeper,
    confetti: Confetti,
    ui: UiConfig,
    selected_column: usize,
    winning_cells: Vec<Position>,
    mode: InputMode,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(scores: ScoreKeeper, ui: UiConfig) -> Self {
        App {
            session: GameSession::new(),
            scores,
            confetti: Confetti::new(ui.confetti_ticks),
            ui,
            selected_column: START_COLUMN,
            winning_cells: Vec::new(),
            mode: InputMode::Normal,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.confetti.tick();
        }
        Ok(())
    }

    /// Wait up to one tick for a key press
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(self.ui.tick_ms))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if matches!(self.mode, InputMode::Naming { .. }) {
            self.handle_naming_key(key);
            return;
        }

        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.run_command(Command::Move(self.selected_column));
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.run_command(Command::Move(self.selected_column));
            }
            KeyCode::Char('u') => self.run_command(Command::Undo),
            KeyCode::Char('r') => self.run_command(Command::Restart),
            KeyCode::Char('n') => self.start_naming(Player::One),
            KeyCode::Char('N') => self.start_naming(Player::Two),
            KeyCode::Char('x') => {
                self.message = Some(match self.scores.reset_scores() {
                    Ok(()) => "Scores reset.".to_string(),
                    Err(e) => format!("Could not save scores: {e}"),
                });
            }
            _ => {}
        }
    }

    fn start_naming(&mut self, player: Player) {
        self.mode = InputMode::Naming {
            player,
            buffer: self.scores.name(player).to_string(),
        };
    }

    fn handle_naming_key(&mut self, key: KeyEvent) {
        let InputMode::Naming { player, buffer } = &mut self.mode else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => {
                if buffer.chars().count() < MAX_NAME_LEN {
                    buffer.push(c);
                }
            }
            KeyCode::Enter => {
                let player = *player;
                let name = std::mem::take(buffer);
                self.mode = InputMode::Normal;
                self.message = Some(match self.scores.set_player_name(player, &name) {
                    Ok(()) => format!("Player {} is now {}.", player.number(), self.scores.name(player)),
                    Err(e) => e.to_string(),
                });
            }
            _ => {}
        }
    }

    /// Send a command to the session and react to what it reports
    fn run_command(&mut self, command: Command) {
        match self.session.dispatch(command) {
            // No-ops: input after the game ended, or undo with an empty history
            Ok(events) if events.is_empty() => {
                let text = if self.session.state().is_terminal() {
                    "Game over! Press 'r' to restart."
                } else {
                    "Nothing to undo."
                };
                self.message = Some(text.to_string());
            }
            Ok(events) => {
                for event in &events {
                    self.apply_event(event);
                }
            }
            Err(MoveError::ColumnFull) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
        }
    }

    fn apply_event(&mut self, event: &GameEvent) {
        if let Err(e) = self.scores.observe(event) {
            self.message = Some(format!("Could not save scores: {e}"));
        }

        match event {
            GameEvent::MoveApplied { .. } => {}
            GameEvent::GameWon { player, cells } => {
                self.winning_cells = cells.clone();
                self.confetti
                    .burst(self.ui.confetti_particles, &game_view::confetti_palette(*player));
                self.message
                    .get_or_insert_with(|| format!("{} wins!", self.scores.name(*player)));
            }
            GameEvent::GameDraw => {
                self.message.get_or_insert_with(|| "It's a draw!".to_string());
            }
            GameEvent::Undone { col, .. } => {
                self.selected_column = *col;
                self.message = Some("Move undone.".to_string());
            }
            GameEvent::Restarted => {
                self.winning_cells.clear();
                self.confetti.clear();
                self.selected_column = START_COLUMN;
                self.message = Some("New game started!".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let name_prompt = match &self.mode {
            InputMode::Naming { player, buffer } => Some((*player, buffer.as_str())),
            InputMode::Normal => None,
        };
        let view = GameView {
            state: self.session.state(),
            names: self.scores.names(),
            scores: self.scores.scores(),
            selected_column: self.selected_column,
            winning_cells: &self.winning_cells,
            message: self.message.as_deref(),
            name_prompt,
        };

        let board_area = game_view::render(frame, &view);
        confetti::render(frame, &self.confetti, board_area);
    }
}
