//! Keyed persistence for intermediate investigation artifacts.
//!
//! The algorithms never touch fixed paths; they speak to an
//! [`ArtifactStore`] so that caching policy stays decoupled and
//! independently testable with an in-memory fake.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Error type for artifact storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying filesystem error.
    #[error("Artifact IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored payload did not (de)serialize.
    #[error("Artifact JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Well-known artifact keys used by the investigation phases.
pub mod keys {
    /// Build id -> debug id map produced by the resolve phase.
    pub const DEBUG_IDS: &str = "debug_ids";
    /// Raw listing lines of the first bad build.
    pub const BAD_SYMBOLS: &str = "bad_symbols";
    /// Raw listing lines of the last good build.
    pub const GOOD_SYMBOLS: &str = "good_symbols";
    /// Bisection boundary record.
    pub const BOUNDARY: &str = "boundary";
    /// Final candidate function names.
    pub const CANDIDATES: &str = "candidates";
}

/// Keyed get/put storage for JSON artifact payloads.
pub trait ArtifactStore {
    fn put(&self, key: &str, json: &str) -> StoreResult<()>;
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
}

/// Serialize `value` and store it under `key`.
pub fn put_json<T: Serialize>(
    store: &dyn ArtifactStore,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    store.put(key, &json)
}

/// Load and deserialize the artifact under `key`, if present.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn ArtifactStore,
    key: &str,
) -> StoreResult<Option<T>> {
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Directory-backed store writing one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first `put`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    pub fn artifact_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ArtifactStore for JsonFileStore {
    fn put(&self, key: &str, json: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.artifact_path(key), json)?;
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.artifact_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for MemoryStore {
    fn put(&self, key: &str, json: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), json.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(entries.get(key).cloned())
    }
}
