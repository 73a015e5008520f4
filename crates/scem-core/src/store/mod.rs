// ── Key/value persistence ──
//
// A tiny string key/value store abstraction. Values are JSON documents
// except for the selected equipment id, which is kept as a bare string.
// `MemoryStore` backs tests; `JsonFileStore` backs the binary.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CoreError;

/// Persisted key layout.
pub mod keys {
    pub const SELECTED_EQUIPMENT_ID: &str = "selectedEquipmentId";
    pub const SELECTED_EQUIPMENT_DATA: &str = "selectedEquipmentData";
    pub const RECENT_EQUIPMENT: &str = "recentEquipment";

    /// Observation list for one piece of equipment.
    pub fn observations(equipment_id: &str) -> String {
        format!("observations:{equipment_id}")
    }

    /// Image reference attached to an interlock.
    pub fn interlock_image(interlock_id: u32) -> String {
        format!("interlockImage:{interlock_id}")
    }
}

/// String key/value storage, injected wherever state is persisted.
pub trait KvStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), CoreError>;

    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

/// Read and decode a JSON value. A missing key is `Ok(None)`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, CoreError> {
    let Some(raw) = store.get(key) else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| CoreError::Decode {
            key: key.to_owned(),
            source,
        })
}

/// Encode a value as JSON and store it.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), CoreError> {
    let raw = serde_json::to_string(value).map_err(|source| CoreError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn json_helpers_round_trip_through_store() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "list", &vec!["a", "b"]).unwrap();
        let back: Option<Vec<String>> = load_json(&store, "list").unwrap();
        assert_eq!(back, Some(vec!["a".to_owned(), "b".to_owned()]));
    }

    #[test]
    fn load_json_missing_key_is_none() {
        let store = MemoryStore::new();
        let back: Option<Vec<String>> = load_json(&store, "absent").unwrap();
        assert!(back.is_none());
    }

    #[test]
    fn load_json_reports_corrupt_value() {
        let mut store = MemoryStore::new();
        store.set("bad", "{not json".into()).unwrap();
        let err = load_json::<Vec<String>>(&store, "bad").unwrap_err();
        assert!(matches!(err, CoreError::Decode { ref key, .. } if key == "bad"));
    }

    #[test]
    fn key_builders() {
        assert_eq!(keys::observations("motor-001"), "observations:motor-001");
        assert_eq!(keys::interlock_image(3), "interlockImage:3");
    }
}
