use serde::{Deserialize, Serialize};

use crate::game::{GameOutcome, Player};

/// Tally of finished games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRecord {
    pub player1_wins: u32,
    pub player2_wins: u32,
    pub draws: u32,
    pub total_games: u32,
}

impl ScoreRecord {
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Winner(Player::One) => self.player1_wins += 1,
            GameOutcome::Winner(Player::Two) => self.player2_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.total_games += 1;
    }

    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1_wins,
            Player::Two => self.player2_wins,
        }
    }
}

/// Display names for both players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerNames {
    pub player1: String,
    pub player2: String,
}

impl PlayerNames {
    pub fn get(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player1,
            Player::Two => &self.player2,
        }
    }

    pub fn set(&mut self, player: Player, name: String) {
        match player {
            Player::One => self.player1 = name,
            Player::Two => self.player2 = name,
        }
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        PlayerNames {
            player1: Player::One.default_name().to_string(),
            player2: Player::Two.default_name().to_string(),
        }
    }
}
