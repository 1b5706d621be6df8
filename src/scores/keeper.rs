use serde::de::DeserializeOwned;
use serde::Serialize;

use super::record::{PlayerNames, ScoreRecord};
use super::store::KeyValueStore;
use crate::error::StoreError;
use crate::game::{GameEvent, GameOutcome, Player};

pub const SCORES_KEY: &str = "connect4.scores";
pub const NAMES_KEY: &str = "connect4.player_names";

/// Longest accepted display name, in characters
pub const MAX_NAME_LEN: usize = 20;

/// Owns the score tally and player names, and writes them through to a
/// key-value store whenever they change.
pub struct ScoreKeeper {
    store: Box<dyn KeyValueStore>,
    scores: ScoreRecord,
    names: PlayerNames,
}

impl ScoreKeeper {
    /// Load scores and names from `store`. Missing scores start at zero and
    /// missing names fall back to `fallback_names`; values that fail to
    /// decode are errors.
    pub fn load(
        store: Box<dyn KeyValueStore>,
        fallback_names: PlayerNames,
    ) -> Result<Self, StoreError> {
        let scores = read_value(&*store, SCORES_KEY)?.unwrap_or_default();
        let names = read_value(&*store, NAMES_KEY)?.unwrap_or(fallback_names);
        Ok(ScoreKeeper {
            store,
            scores,
            names,
        })
    }

    /// Load like [`ScoreKeeper::load`], but a stored value that fails to
    /// decode is replaced by its default instead of failing the whole load.
    /// The decode errors are returned next to the keeper so the caller can
    /// report them. Values that did decode are kept, and the undecodable key
    /// is only overwritten once its value changes.
    pub fn load_or_recover(
        store: Box<dyn KeyValueStore>,
        fallback_names: PlayerNames,
    ) -> Result<(Self, Vec<StoreError>), StoreError> {
        let mut problems = Vec::new();
        let scores = recover(
            read_value(&*store, SCORES_KEY),
            ScoreRecord::default(),
            &mut problems,
        )?;
        let names = recover(read_value(&*store, NAMES_KEY), fallback_names, &mut problems)?;
        let keeper = ScoreKeeper {
            store,
            scores,
            names,
        };
        Ok((keeper, problems))
    }

    /// Start from zero scores and the given names without reading `store`.
    pub fn fresh(store: Box<dyn KeyValueStore>, names: PlayerNames) -> Self {
        ScoreKeeper {
            store,
            scores: ScoreRecord::default(),
            names,
        }
    }

    pub fn scores(&self) -> &ScoreRecord {
        &self.scores
    }

    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    pub fn name(&self, player: Player) -> &str {
        self.names.get(player)
    }

    /// Record terminal outcomes carried by a game event; other events are
    /// ignored.
    pub fn observe(&mut self, event: &GameEvent) -> Result<(), StoreError> {
        match event {
            GameEvent::GameWon { player, .. } => {
                self.record_outcome(GameOutcome::Winner(*player))
            }
            GameEvent::GameDraw => self.record_outcome(GameOutcome::Draw),
            _ => Ok(()),
        }
    }

    /// Count a finished game. The tally only changes once it has been
    /// written.
    pub fn record_outcome(&mut self, outcome: GameOutcome) -> Result<(), StoreError> {
        let mut scores = self.scores;
        scores.record(outcome);
        write_value(&mut *self.store, SCORES_KEY, &scores)?;
        self.scores = scores;
        Ok(())
    }

    /// Rename a player. The name is trimmed and must be non-empty and at most
    /// `MAX_NAME_LEN` characters.
    pub fn set_player_name(&mut self, player: Player, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidName("name must not be empty".into()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(StoreError::InvalidName(format!(
                "name must be at most {MAX_NAME_LEN} characters"
            )));
        }

        let mut names = self.names.clone();
        names.set(player, name.to_string());
        write_value(&mut *self.store, NAMES_KEY, &names)?;
        self.names = names;
        Ok(())
    }

    pub fn reset_scores(&mut self) -> Result<(), StoreError> {
        let scores = ScoreRecord::default();
        write_value(&mut *self.store, SCORES_KEY, &scores)?;
        self.scores = scores;
        Ok(())
    }
}

fn read_value<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Decode {
                key: key.to_string(),
                source: e,
            }),
        None => Ok(None),
    }
}

/// Swap an undecodable value for `default`, collecting the decode error.
/// Store failures still propagate.
fn recover<T>(
    read: Result<Option<T>, StoreError>,
    default: T,
    problems: &mut Vec<StoreError>,
) -> Result<T, StoreError> {
    match read {
        Ok(value) => Ok(value.unwrap_or(default)),
        Err(e @ StoreError::Decode { .. }) => {
            problems.push(e);
            Ok(default)
        }
        Err(e) => Err(e),
    }
}

fn write_value<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    store.set(key, serde_json::to_string(value)?)
}
