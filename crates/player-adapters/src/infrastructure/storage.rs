//! Storage providers
//!
//! `FileStorageProvider` keeps key-value pairs in a JSON file under the
//! platform config directory:
//! - Linux: ~/.config/quirkverse/player/storage.json
//! - macOS: ~/Library/Application Support/io.quirkverse.player/storage.json
//! - Windows: C:\Users\<User>\AppData\Roaming\quirkverse\player\storage.json
//!
//! `MemoryStorageProvider` is process-local and used by tests and by
//! short-lived tools that should not touch the user's session.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use directories::ProjectDirs;
use quirkverse_player_ports::outbound::StorageProvider;

const STORAGE_FILE: &str = "storage.json";

/// In-memory storage
#[derive(Clone, Default)]
pub struct MemoryStorageProvider {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorageProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn save(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn load(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// File-backed storage with an in-memory cache.
///
/// Every write rewrites the whole file. Read and write failures are logged
/// and never surfaced; the cache stays authoritative for the process.
#[derive(Clone)]
pub struct FileStorageProvider {
    storage_path: PathBuf,
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for FileStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStorageProvider {
    /// Storage in the platform config directory
    pub fn new() -> Self {
        Self::with_path(Self::default_path())
    }

    /// Storage at an explicit file path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let storage_path = path.into();
        let cache = read_storage_file(&storage_path);

        tracing::debug!(path = %storage_path.display(), entries = cache.len(), "File storage initialized");

        Self {
            storage_path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn default_path() -> PathBuf {
        match ProjectDirs::from("io", "quirkverse", "player") {
            Some(dirs) => dirs.config_dir().join(STORAGE_FILE),
            None => PathBuf::from("quirkverse_storage.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    fn persist(&self) {
        if let Some(parent) = self.storage_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::error!("Failed to create storage directory: {}", e);
                return;
            }
        }

        let data = {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            serde_json::to_string_pretty(&*cache)
        };

        match data {
            Ok(data) => {
                if let Err(e) = fs::write(&self.storage_path, data) {
                    tracing::error!("Failed to write storage file: {}", e);
                }
            }
            Err(e) => tracing::error!("Failed to serialize storage data: {}", e),
        }
    }
}

fn read_storage_file(path: &Path) -> HashMap<String, String> {
    if !path.exists() {
        return HashMap::new();
    }

    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Failed to parse storage file: {}", e);
                HashMap::new()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read storage file: {}", e);
            HashMap::new()
        }
    }
}

impl StorageProvider for FileStorageProvider {
    fn save(&self, key: &str, value: &str) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn load(&self, key: &str) -> Option<String> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) {
        let removed = self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some();
        if removed {
            self.persist();
        }
    }
}
