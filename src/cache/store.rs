//! Cache Store Module
//!
//! File-backed key-value store mapping cache keys to entries. The whole
//! mapping is read on lookup and rewritten on every update.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::CacheEntry;
use crate::error::StoreError;

/// Persisted mapping from cache key to entry.
pub type CacheMap = HashMap<String, CacheEntry>;

// == Cache Store ==
/// JSON file holding the full cache mapping.
///
/// Writes go through a temporary file and a rename, so readers never see a
/// partially written mapping. `put` serializes writers within the process;
/// two misses on the same key still both write, and the later one wins.
#[derive(Debug)]
pub struct CacheStore {
    /// Location of the cache file
    path: PathBuf,
    /// Single-writer guard over load-modify-save
    writer: Mutex<()>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store for `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: Mutex::new(()),
        }
    }

    /// Creates a store and initializes the file with an empty mapping if it
    /// does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);

        if tokio::fs::metadata(&store.path).await.is_err() {
            tokio::fs::create_dir_all(store.parent_dir()).await?;
            store.save(&CacheMap::new()).await?;
            debug!("Initialized empty cache file at {}", store.path.display());
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Load ==
    /// Reads the full mapping.
    ///
    /// A missing, unreadable or corrupt file yields an empty mapping. Entries
    /// that fail to parse are skipped.
    pub async fn load(&self) -> CacheMap {
        match self.read_map().await {
            Ok(map) => map,
            Err(e) => {
                warn!("{}; continuing with an empty cache", e);
                CacheMap::new()
            }
        }
    }

    async fn read_map(&self) -> Result<CacheMap, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Cache file {} not found", self.path.display());
                return Ok(CacheMap::new());
            }
            Err(e) => return Err(StoreError::Read(e.to_string())),
        };

        if content.trim().is_empty() {
            return Ok(CacheMap::new());
        }

        let raw: HashMap<String, Value> =
            serde_json::from_str(&content).map_err(|e| StoreError::Read(e.to_string()))?;

        // Malformed entries are dropped individually so the rest survive.
        let mut map = CacheMap::with_capacity(raw.len());
        for (key, value) in raw {
            match serde_json::from_value::<CacheEntry>(value) {
                Ok(entry) => {
                    map.insert(key, entry);
                }
                Err(e) => warn!("Skipping malformed cache entry {}: {}", key, e),
            }
        }
        Ok(map)
    }

    // == Save ==
    /// Serializes and atomically replaces the full mapping.
    pub async fn save(&self, map: &CacheMap) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(map)?;
        let path = self.path.clone();
        let dir = self.parent_dir().to_path_buf();

        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(json.as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await?
    }

    // == Put ==
    /// Inserts or overwrites one entry and persists the whole mapping.
    pub async fn put(&self, key: String, entry: CacheEntry) -> Result<(), StoreError> {
        let _guard = self.writer.lock().await;

        let mut map = self.load().await;
        map.insert(key, entry);
        self.save(&map).await
    }

    /// Looks up a single entry.
    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        self.load().await.remove(key)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}
