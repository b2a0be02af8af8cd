//! Key-value persistence for progression and settings
//!
//! Values are JSON strings stored under fixed keys. Loading never fails from
//! the caller's point of view: missing or corrupt data falls back to defaults
//! and is logged. Saving reports errors so the caller can decide.

mod error;
mod file;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use error::PersistenceError;
pub use file::FileStorage;

use crate::progression::Progression;

/// Storage key for the progression record
pub const PROGRESSION_KEY: &str = "neonDashData";

/// String key-value store
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// In-process storage, used by tests and as a fallback when no directory is available
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Read and decode a JSON value. `Ok(None)` when the key is absent.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, PersistenceError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| PersistenceError::Deserialize {
            key: key.to_string(),
            source,
        })
}

/// Encode and write a JSON value
pub fn save_json<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(value).map_err(|source| PersistenceError::Serialize {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &json)
}

/// Load a value, falling back to its default on any problem
pub fn load_or_default<T: DeserializeOwned + Default>(storage: &dyn Storage, key: &str) -> T {
    match load_json(storage, key) {
        Ok(Some(value)) => {
            log::info!("Loaded '{}' from storage", key);
            value
        }
        Ok(None) => {
            log::info!("No stored '{}', using defaults", key);
            T::default()
        }
        Err(e) => {
            log::warn!("Ignoring stored '{}': {}", key, e);
            T::default()
        }
    }
}

/// Load progression with its invariants repaired
pub fn load_progression(storage: &dyn Storage) -> Progression {
    let mut progression: Progression = load_or_default(storage, PROGRESSION_KEY);
    if progression.sanitize() {
        log::warn!("Repaired stored progression (equipped '{}')", progression.equipped_skin);
    }
    progression
}

pub fn save_progression(
    storage: &mut dyn Storage,
    progression: &Progression,
) -> Result<(), PersistenceError> {
    save_json(storage, PROGRESSION_KEY, progression)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_progression_is_default() {
        let storage = MemoryStorage::new();
        assert_eq!(load_progression(&storage), Progression::default());
    }

    #[test]
    fn test_progression_round_trip() {
        let mut storage = MemoryStorage::new();
        let mut p = Progression::default();
        p.apply_reward(75);
        assert_eq!(p.buy_or_equip("crimson"), crate::progression::ShopOutcome::Purchased);
        save_progression(&mut storage, &p).unwrap();

        assert_eq!(
            storage.get(PROGRESSION_KEY).unwrap().as_deref(),
            Some(r#"{"orbs":25,"unlockedSkins":["default","crimson"],"equippedSkin":"crimson"}"#)
        );
        assert_eq!(load_progression(&storage), p);
    }

    #[test]
    fn test_corrupt_progression_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.set(PROGRESSION_KEY, "{not json").unwrap();
        assert_eq!(load_progression(&storage), Progression::default());

        let err = load_json::<Progression>(&storage, PROGRESSION_KEY).unwrap_err();
        assert!(matches!(err, PersistenceError::Deserialize { .. }));
    }

    #[test]
    fn test_loaded_progression_is_sanitized() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                PROGRESSION_KEY,
                r#"{"orbs":7,"unlockedSkins":["gold"],"equippedSkin":"void"}"#,
            )
            .unwrap();
        let p = load_progression(&storage);
        assert_eq!(p.orbs, 7);
        assert!(p.owns("default"));
        assert!(p.owns("gold"));
        assert_eq!(p.equipped_skin, "default");
    }

    #[test]
    fn test_memory_storage_remove() {
        let mut storage = MemoryStorage::new();
        storage.set("a", "1").unwrap();
        assert_eq!(storage.len(), 1);
        storage.remove("a").unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.get("a").unwrap(), None);
    }
}
