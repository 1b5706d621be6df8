//! Terminal UI: the game screen with hover preview, scoreboard and name
//! editing, plus the confetti shown when a game is won.

mod app;
pub mod confetti;
pub mod game_view;

pub use app::App;
