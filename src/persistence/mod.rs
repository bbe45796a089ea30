//! Best score persistence
//!
//! The only durable artifact is a single JSON record:
//! `{ "best_score": <non-negative integer> }`. It is read once when a
//! session starts and written at most once per game over.
//!
//! Missing or corrupt records are not errors: they count as a best score of
//! zero and a fresh record is written in their place.

pub mod storage;

use serde::{Deserialize, Serialize};

use crate::error::PersistError;

pub use storage::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub use storage::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;

/// The persisted record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub best_score: u32,
}

/// Raw access to wherever the record lives
pub trait ScoreStore {
    /// Stored text, or `None` if nothing has been written yet
    fn read(&self) -> Result<Option<String>, PersistError>;
    fn write(&mut self, contents: &str) -> Result<(), PersistError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn read(&self) -> Result<Option<String>, PersistError> {
        (**self).read()
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistError> {
        (**self).write(contents)
    }
}

/// Read the best score, recovering from a missing or corrupt record
pub fn load_best(store: &mut dyn ScoreStore) -> u32 {
    let parsed = match store.read() {
        Ok(Some(text)) => serde_json::from_str::<BestScoreRecord>(&text).map_err(PersistError::from),
        Ok(None) => {
            log::info!("No best score stored yet, starting from 0");
            return recreate(store);
        }
        Err(e) => Err(e),
    };
    match parsed {
        Ok(record) => {
            log::info!("Loaded best score {}", record.best_score);
            record.best_score
        }
        Err(e) => {
            log::warn!("Best score unreadable ({e}), resetting to 0");
            recreate(store)
        }
    }
}

/// Write `best` as the new record
pub fn save_best(store: &mut dyn ScoreStore, best: u32) -> Result<(), PersistError> {
    let json = serde_json::to_string(&BestScoreRecord { best_score: best })?;
    store.write(&json)?;
    log::info!("Best score {} saved", best);
    Ok(())
}

fn recreate(store: &mut dyn ScoreStore) -> u32 {
    if let Err(e) = save_best(store, 0) {
        log::warn!("Could not recreate best score record: {e}");
    }
    0
}
