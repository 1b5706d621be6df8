//! Score persistence: the win/draw tally and player names, kept in a simple
//! key-value store that survives between runs.

mod keeper;
mod record;
mod store;

pub use keeper::{ScoreKeeper, MAX_NAME_LEN, NAMES_KEY, SCORES_KEY};
pub use record::{PlayerNames, ScoreRecord};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
