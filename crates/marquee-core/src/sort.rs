//! Persist and restore the global sort preference across sessions.
//!
//! One small JSON file holding the sort token. The path is injectable so
//! tests (and multiple app instances) get isolated stores.

use std::path::PathBuf;

use marquee_api::types::SortKey;

const FILE_NAME: &str = "sort.json";

/// Durable store for the current sort key.
#[derive(Debug, Clone)]
pub struct SortStore {
    path: PathBuf,
}

impl SortStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform data dir (`~/.local/share/marquee/sort.json`
    /// or equivalent), falling back to the working directory.
    pub fn default_location() -> Self {
        let path = crate::config::project_dirs()
            .map(|d| d.data_dir().join(FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(FILE_NAME));
        Self::new(path)
    }

    /// Read the stored key; `rating` when the file is missing or holds an
    /// unrecognized token.
    pub fn get(&self) -> SortKey {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Persist the key. Write failures are logged but not propagated —
    /// losing a sort preference must never break the page.
    pub fn set(&self, key: SortKey) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string(&key) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    tracing::warn!("Failed to save sort preference: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize sort preference: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, SortStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SortStore::new(dir.path().join("sort.json"));
        (dir, store)
    }

    #[test]
    fn test_roundtrip_every_token() {
        let (_dir, store) = temp_store();
        for &key in SortKey::ALL {
            store.set(key);
            assert_eq!(store.get(), key);
        }
    }

    #[test]
    fn test_survives_reload() {
        let (dir, store) = temp_store();
        store.set(SortKey::Recent);

        // A fresh store on the same path models an app restart.
        let reloaded = SortStore::new(dir.path().join("sort.json"));
        assert_eq!(reloaded.get(), SortKey::Recent);
    }

    #[test]
    fn test_empty_store_defaults_to_rating() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get(), SortKey::Rating);
    }

    #[test]
    fn test_unrecognized_token_defaults_to_rating() {
        let (_dir, store) = temp_store();
        std::fs::write(store.path.clone(), "\"releaseYear\"").unwrap();
        assert_eq!(store.get(), SortKey::Rating);
    }
}
