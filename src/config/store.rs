use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::classify::FillState;

use super::core::StorageConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable home of the three visibility flags.
pub trait ConfigStore {
    fn visibility(&self, fill: FillState) -> Option<bool>;
    fn set_visibility(&mut self, fill: FillState, shown: bool) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    flags: HashMap<FillState, bool>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of flag writes seen so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ConfigStore for MemoryStore {
    fn visibility(&self, fill: FillState) -> Option<bool> {
        self.flags.get(&fill).copied()
    }

    fn set_visibility(&mut self, fill: FillState, shown: bool) -> Result<(), ConfigError> {
        self.flags.insert(fill, shown);
        self.writes += 1;
        Ok(())
    }
}

/// Keeps the whole [`StorageConfig`] in a pretty-printed JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    config: StorageConfig,
}

impl JsonFileStore {
    /// Loads `path`, falling back to defaults when the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let config = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StorageConfig::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, config })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let raw = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl ConfigStore for JsonFileStore {
    fn visibility(&self, fill: FillState) -> Option<bool> {
        Some(self.config.shown(fill))
    }

    fn set_visibility(&mut self, fill: FillState, shown: bool) -> Result<(), ConfigError> {
        self.config.set_shown(fill, shown);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "storage_layout_{}_{}.json",
            tag,
            std::process::id()
        ))
    }

    #[test]
    fn memory_store_starts_empty() {
        let mut store = MemoryStore::new();
        assert_eq!(store.visibility(FillState::Full), None);
        store.set_visibility(FillState::Full, false).unwrap();
        assert_eq!(store.visibility(FillState::Full), Some(false));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn json_store_survives_reopen() {
        let path = scratch_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.visibility(FillState::Empty), Some(true));
        store.set_visibility(FillState::Empty, false).unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(reopened.visibility(FillState::Empty), Some(false));
        assert_eq!(reopened.visibility(FillState::Partial), Some(true));
    }

    #[test]
    fn json_store_rejects_garbage() {
        let path = scratch_path("garbage");
        fs::write(&path, "not json").unwrap();
        let err = JsonFileStore::open(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, ConfigError::Serde(_)));
    }
}
