//! Favorite cities, persisted through a [`LocalStorage`].
//!
//! The set is read once when the store is loaded and written back in full
//! after every toggle. Unreadable or corrupt storage starts an empty set,
//! and a failed write leaves the in-memory set authoritative.

use serde::{Deserialize, Serialize};
use skyboard_core::StorageError;

use crate::storage::LocalStorage;

/// Storage key holding the JSON list of favorite city names
pub const FAVORITES_KEY: &str = "favoriteCities";

/// City names, each present at most once, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(Vec<String>);

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from names, dropping repeats after their first occurrence.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            let name = name.into();
            if !set.contains(&name) {
                set.0.push(name);
            }
        }
        set
    }

    pub fn contains(&self, city: &str) -> bool {
        self.0.iter().any(|c| c == city)
    }

    /// Add `city` if absent, remove it if present. Returns true if it was added.
    pub fn toggle(&mut self, city: &str) -> bool {
        if self.contains(city) {
            self.0.retain(|c| c != city);
            false
        } else {
            self.0.push(city.to_string());
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The user's favorites plus the storage they persist to.
pub struct FavoritesStore {
    storage: Box<dyn LocalStorage>,
    favorites: FavoriteSet,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("favorites", &self.favorites)
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Read the persisted favorites once.
    pub fn load(storage: Box<dyn LocalStorage>) -> Self {
        let favorites = match Self::read(storage.as_ref()) {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::warn!("Starting with no favorites: {}", e);
                FavoriteSet::new()
            }
        };

        tracing::info!("Loaded {} favorite cities", favorites.len());
        Self { storage, favorites }
    }

    fn read(storage: &dyn LocalStorage) -> Result<FavoriteSet, StorageError> {
        let Some(raw) = storage.get_item(FAVORITES_KEY)? else {
            return Ok(FavoriteSet::new());
        };

        let names: Vec<String> =
            serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
                key: FAVORITES_KEY.to_string(),
                message: e.to_string(),
            })?;

        Ok(FavoriteSet::from_names(names))
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        self.favorites.contains(city)
    }

    /// Flip `city` in the set and write the whole set back.
    pub fn toggle(&mut self, city: &str) -> &FavoriteSet {
        let added = self.favorites.toggle(city);
        tracing::info!(
            "{} {} favorites",
            if added { "Added to" } else { "Removed from" },
            city
        );

        if let Err(e) = self.persist() {
            tracing::warn!("Failed to save favorites: {}", e);
        }

        &self.favorites
    }

    fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.favorites).map_err(|e| StorageError::WriteFailed {
            key: FAVORITES_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.storage.set_item(FAVORITES_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage, StorageResult};
    use std::sync::Arc;

    /// Shares one MemoryStorage between the store and the test body.
    struct Shared(Arc<MemoryStorage>);

    impl LocalStorage for Shared {
        fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
            self.0.set_item(key, value)
        }
    }

    struct ReadOnly;

    impl LocalStorage for ReadOnly {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(Some(r#"["Oslo"]"#.to_string()))
        }

        fn set_item(&self, key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: "read-only".to_string(),
            })
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut store = FavoritesStore::load(Box::new(MemoryStorage::new()));
        assert!(store.favorites().is_empty());

        let after_add = store.toggle("Paris").clone();
        assert_eq!(after_add, FavoriteSet::from_names(["Paris"]));

        let after_remove = store.toggle("Paris");
        assert!(after_remove.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_original_set() {
        let seeded = MemoryStorage::with_item(FAVORITES_KEY, r#"["Dubai","Tokyo"]"#);
        let mut store = FavoritesStore::load(Box::new(seeded));
        let original = store.favorites().clone();

        store.toggle("Sydney");
        store.toggle("Sydney");
        assert_eq!(store.favorites(), &original);

        store.toggle("Dubai");
        store.toggle("Dubai");
        assert!(store.is_favorite("Dubai"));
        assert_eq!(store.favorites().len(), 2);
    }

    #[test]
    fn test_every_toggle_is_written_back() {
        let backing = Arc::new(MemoryStorage::new());
        let mut store = FavoritesStore::load(Box::new(Shared(backing.clone())));

        store.toggle("London");
        assert_eq!(
            backing.get_item(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"["London"]"#)
        );

        store.toggle("Tokyo");
        store.toggle("London");
        assert_eq!(
            backing.get_item(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"["Tokyo"]"#)
        );
    }

    #[test]
    fn test_corrupt_storage_loads_empty() {
        let seeded = MemoryStorage::with_item(FAVORITES_KEY, "{not json");
        let store = FavoritesStore::load(Box::new(seeded));
        assert!(store.favorites().is_empty());

        let wrong_shape = MemoryStorage::with_item(FAVORITES_KEY, r#"{"Paris":true}"#);
        let store = FavoritesStore::load(Box::new(wrong_shape));
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_duplicates_collapse_on_load() {
        let seeded = MemoryStorage::with_item(FAVORITES_KEY, r#"["Paris","Rome","Paris"]"#);
        let store = FavoritesStore::load(Box::new(seeded));
        assert_eq!(store.favorites().iter().collect::<Vec<_>>(), vec!["Paris", "Rome"]);
    }

    #[test]
    fn test_failed_write_keeps_in_memory_toggle() {
        let mut store = FavoritesStore::load(Box::new(ReadOnly));
        assert!(store.is_favorite("Oslo"));

        store.toggle("Bergen");
        assert!(store.is_favorite("Bergen"));
        store.toggle("Oslo");
        assert!(!store.is_favorite("Oslo"));
    }

    #[test]
    fn test_favorites_survive_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = FavoritesStore::load(Box::new(FileStorage::new(dir.path())));
        store.toggle("New York");
        store.toggle("Sydney");
        drop(store);

        let reloaded = FavoritesStore::load(Box::new(FileStorage::new(dir.path())));
        assert_eq!(
            reloaded.favorites().iter().collect::<Vec<_>>(),
            vec!["New York", "Sydney"]
        );
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut set = FavoriteSet::new();
        assert!(set.toggle("paris"));
        assert!(!set.contains("Paris"));
    }
}
