use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
    sync::Mutex,
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};

use super::get_data_file_path;

pub const NAV_OPEN_KEY: &str = "sidenav:open";
pub const NAV_EXPANDED_KEY: &str = "sidenav:expanded";
pub const NAV_ACTIVE_KEY: &str = "sidenav:active";
pub const LESSON_COLUMNS_KEY: &str = "lesson:columns";

const STATE_FILE: &str = "state.json";

/// String-keyed persistence shared by the navigation panel and the lesson
/// view. Values are JSON fragments; anything unreadable reads as absent.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

pub fn get_json<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("[Store] Ignoring unreadable value for {}: {}", key, e);
            None
        }
    }
}

pub fn set_json<T: Serialize>(store: &dyn StateStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => eprintln!("[Store] Failed to serialize value for {}: {}", key, e),
    }
}

/// Store backed by a single JSON map file in the app data directory.
/// Every set rewrites the file, so the last writer wins.
pub struct DiskStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl DiskStore {
    pub fn load() -> Self {
        Self::load_from(get_data_file_path(STATE_FILE))
    }

    pub fn load_from(path: PathBuf) -> Self {
        let values = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(values) => values,
                    Err(e) => {
                        eprintln!("[Store] Ignoring unreadable {}: {}", path.display(), e);
                        BTreeMap::new()
                    }
                },
                Err(e) => {
                    eprintln!("[Store] Failed to read {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Self { path, values: Mutex::new(values) }
    }

    fn persist(&self, values: &BTreeMap<String, String>) {
        match serde_json::to_string_pretty(values) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    eprintln!("[Store] Failed to write {}: {}", self.path.display(), e);
                }
            }
            Err(e) => eprintln!("[Store] Failed to serialize state: {}", e),
        }
    }
}

impl StateStore for DiskStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok().and_then(|values| values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
            self.persist(&values);
        }
    }
}

#[cfg(test)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self { values: Mutex::new(BTreeMap::new()) }
    }
}

#[cfg(test)]
impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok().and_then(|values| values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }
}
