use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::config::AppConfig;
use connect_four::scores::{JsonFileStore, MemoryStore, ScoreKeeper};
use connect_four::ui::App;

/// Two-player Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect4.toml")]
    config: PathBuf,

    /// Override where scores and player names are stored
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Keep scores in memory only for this session
    #[arg(long)]
    no_save: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(path) = cli.scores.clone() {
        config.storage.scores_path = path;
    }

    let scores = open_scores(&cli, &config);

    run(App::new(scores, config.ui)).context("running terminal UI")
}

/// Open the score store, degrading to defaults (with a warning) rather than
/// refusing to start when stored data is unreadable.
fn open_scores(cli: &Cli, config: &AppConfig) -> ScoreKeeper {
    let fallback_names = config.players.names();
    if cli.no_save {
        return ScoreKeeper::fresh(Box::new(MemoryStore::new()), fallback_names);
    }

    let path = &config.storage.scores_path;
    let store = match JsonFileStore::open(path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Warning: {e}; scores will not be saved this session");
            return ScoreKeeper::fresh(Box::new(MemoryStore::new()), fallback_names);
        }
    };

    match ScoreKeeper::load_or_recover(Box::new(store), fallback_names.clone()) {
        Ok((keeper, problems)) => {
            for problem in problems {
                eprintln!("Warning: {problem}; using the default for that value");
            }
            keeper
        }
        Err(e) => {
            eprintln!("Warning: {e}; scores will not be saved this session");
            ScoreKeeper::fresh(Box::new(MemoryStore::new()), fallback_names)
        }
    }
}

/// Puts the terminal back in cooked mode on the main screen when dropped,
/// whichever way `run` exits.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, Show);
    }
}

fn run(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let _guard = TerminalGuard;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.run(&mut terminal)
}
