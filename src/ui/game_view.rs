use crate::game::{Cell, GameState, GameStatus, Player, Position, COLS, ROWS};
use crate::scores::{PlayerNames, ScoreRecord};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the game screen draws, borrowed from the app for one frame.
pub struct GameView<'a> {
    pub state: &'a GameState,
    pub names: &'a PlayerNames,
    pub scores: &'a ScoreRecord,
    pub selected_column: usize,
    pub winning_cells: &'a [Position],
    pub message: Option<&'a str>,
    /// Player being renamed and the text typed so far
    pub name_prompt: Option<(Player, &'a str)>,
}

pub fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

/// Confetti colours for a win: mostly the winner's colour, with some accents.
pub fn confetti_palette(winner: Player) -> [Color; 6] {
    let main = player_color(winner);
    let light = match winner {
        Player::One => Color::LightRed,
        Player::Two => Color::LightYellow,
    };
    [main, main, light, Color::Cyan, Color::Green, Color::Magenta]
}

/// Render the game screen and return the area the board occupies.
pub fn render(frame: &mut Frame, view: &GameView) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(10),    // Board
            Constraint::Length(3),  // Scores
            Constraint::Length(3),  // Message
            Constraint::Length(4),  // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_board(frame, view, chunks[1]);
    render_scores(frame, view, chunks[2]);
    render_message(frame, view, chunks[3]);
    render_controls(frame, chunks[4]);

    chunks[1]
}

pub fn status_text(state: &GameState, names: &PlayerNames) -> String {
    match state.status() {
        GameStatus::InProgress => format!("{}'s Turn", names.get(state.current_player())),
        GameStatus::Won(player) => format!("{} Wins!", names.get(player)),
        GameStatus::Draw => "It's a Draw!".to_string(),
    }
}

fn render_header(frame: &mut Frame, view: &GameView, area: Rect) {
    let color = match view.state.status() {
        GameStatus::InProgress => player_color(view.state.current_player()),
        GameStatus::Won(player) => player_color(player),
        GameStatus::Draw => Color::White,
    };

    let header = Paragraph::new(status_text(view.state, view.names))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, view: &GameView, area: Rect) {
    let state = view.state;
    let selected = view.selected_column;
    let current_color = player_color(state.current_player());

    // Landing spot of the selected column, shown while the game is live
    let preview = if state.is_terminal() {
        None
    } else {
        state
            .available_row(selected)
            .map(|row| Position::new(row, selected))
    };

    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        if col == selected {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(current_color)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let here = Position::new(row, col);
            let span = match state.cell(row, col) {
                Cell::Empty if preview == Some(here) => Span::styled(
                    " ○ ",
                    Style::default().fg(current_color).add_modifier(Modifier::DIM),
                ),
                Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Cell::Player1 => piece_span(Player::One, view.winning_cells.contains(&here)),
                Cell::Player2 => piece_span(Player::Two, view.winning_cells.contains(&here)),
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected && !state.is_terminal() {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(current_color)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn piece_span(owner: Player, winning: bool) -> Span<'static> {
    let mut style = Style::default().fg(player_color(owner));
    if winning {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    Span::styled(" ● ", style)
}

fn render_scores(frame: &mut Frame, view: &GameView, area: Rect) {
    let bold = |player| {
        Style::default()
            .fg(player_color(player))
            .add_modifier(Modifier::BOLD)
    };
    let line = Line::from(vec![
        Span::styled(view.names.get(Player::One).to_string(), bold(Player::One)),
        Span::raw(format!(": {}   ", view.scores.player1_wins)),
        Span::styled(view.names.get(Player::Two).to_string(), bold(Player::Two)),
        Span::raw(format!(": {}   ", view.scores.player2_wins)),
        Span::raw(format!(
            "Draws: {}   Games: {}",
            view.scores.draws, view.scores.total_games
        )),
    ]);

    let widget = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Scores"));
    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, view: &GameView, area: Rect) {
    let (text, style) = match view.name_prompt {
        Some((player, typed)) => (
            format!("Name for Player {}: {}_", player.number(), typed),
            Style::default().fg(Color::Cyan),
        ),
        None => (
            view.message.unwrap_or("").to_string(),
            Style::default().fg(Color::Yellow),
        ),
    };

    let msg_widget = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("←/→: Move  |  Enter: Drop  |  1-7: Drop in column  |  Q: Quit");
    let line2 = Line::from("U: Undo  |  R: Restart  |  n/N: Rename Player 1/2  |  X: Reset scores");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
