use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::scores::{PlayerNames, MAX_NAME_LEN};

/// Names used until players pick their own.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub player1: String,
    pub player2: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        let names = PlayerNames::default();
        PlayersConfig {
            player1: names.player1,
            player2: names.player2,
        }
    }
}

impl PlayersConfig {
    pub fn names(&self) -> PlayerNames {
        PlayerNames {
            player1: self.player1.clone(),
            player2: self.player2.clone(),
        }
    }
}

/// Where scores and names are kept between runs.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub scores_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            scores_path: PathBuf::from("connect4_scores.json"),
        }
    }
}

/// Terminal UI timing and the celebration effect.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Input poll timeout, which is also the animation frame length
    pub tick_ms: u64,
    /// Particles spawned when a game is won; 0 disables confetti
    pub confetti_particles: usize,
    /// Frames a particle lives for
    pub confetti_ticks: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            tick_ms: 50,
            confetti_particles: 120,
            confetti_ticks: 60,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub players: PlayersConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, name) in [
            ("players.player1", &self.players.player1),
            ("players.player2", &self.players.player2),
        ] {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if trimmed.chars().count() > MAX_NAME_LEN {
                return Err(ConfigError::Validation(format!(
                    "{key} must be at most {MAX_NAME_LEN} characters"
                )));
            }
        }

        if self.storage.scores_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.scores_path must not be empty".into(),
            ));
        }

        if self.ui.tick_ms == 0 {
            return Err(ConfigError::Validation("ui.tick_ms must be > 0".into()));
        }
        if self.ui.tick_ms > 1000 {
            return Err(ConfigError::Validation(
                "ui.tick_ms must be <= 1000".into(),
            ));
        }
        if self.ui.confetti_particles > 1000 {
            return Err(ConfigError::Validation(
                "ui.confetti_particles must be <= 1000".into(),
            ));
        }
        if self.ui.confetti_particles > 0 && self.ui.confetti_ticks == 0 {
            return Err(ConfigError::Validation(
                "ui.confetti_ticks must be > 0 when confetti is enabled".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
