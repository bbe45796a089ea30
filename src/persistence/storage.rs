//! Storage backends for the best score record

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, io, path::PathBuf};

use super::ScoreStore;
use crate::error::PersistError;

/// In-process store, used by tests and `--memory` runs
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    contents: Option<String>,
    /// Number of successful writes
    pub writes: u32,
}

impl MemoryStore {
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            writes: 0,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ScoreStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, PersistError> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistError> {
        self.contents = Some(contents.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// JSON file in the user's local data directory
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_local_dir>/color-hit/best_score.json`
    pub fn in_data_dir() -> Result<Self, PersistError> {
        dirs::data_local_dir()
            .map(|dir| Self::new(dir.join("color-hit").join("best_score.json")))
            .ok_or(PersistError::Unavailable)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for JsonFileStore {
    fn read(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, contents)?;
        log::debug!("Wrote best score record to {:?}", self.path);
        Ok(())
    }
}

/// Browser LocalStorage entry
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "color_hit_best_score";

    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, PersistError> {
        Self::storage()?
            .get_item(Self::STORAGE_KEY)
            .map_err(|_| PersistError::Unavailable)
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistError> {
        Self::storage()?
            .set_item(Self::STORAGE_KEY, contents)
            .map_err(|_| PersistError::Unavailable)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::persistence::{load_best, save_best};

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("color-hit-test-{}-{name}", std::process::id()))
            .join("best_score.json")
    }

    #[test]
    fn test_file_store_creates_directory_and_round_trips() {
        let path = scratch_path("roundtrip");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.read().unwrap(), None);

        save_best(&mut store, 77).unwrap();
        assert!(path.exists());
        assert_eq!(load_best(&mut store), 77);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_recovers_from_garbage() {
        let path = scratch_path("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "\u{0}\u{1}garbage").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert_eq!(load_best(&mut store), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"best_score":0}"#);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
