// ── Equipment directory ──
//
// Holds the monitored equipment table and the current selection. Every
// successful selection is mirrored to the key/value store together with
// a short most-recent-first history.

mod catalog;

pub use catalog::catalog;

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::Equipment;
use crate::store::{KvStore, keys, load_json, save_json};

/// Length of the recently viewed list.
pub const RECENT_LIMIT: usize = 5;

/// Outcome of a selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Changed,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct EquipmentDirectory {
    records: Vec<Equipment>,
    selected: Option<usize>,
    recent: Vec<Equipment>,
}

impl EquipmentDirectory {
    /// Directory over `records` with the first record selected.
    pub fn new(records: Vec<Equipment>) -> Self {
        let selected = if records.is_empty() { None } else { Some(0) };
        Self {
            records,
            selected,
            recent: Vec::new(),
        }
    }

    /// Directory over `records`, restoring the saved selection and
    /// recently viewed list. A saved id that no longer names a record
    /// falls back to the first record.
    pub fn restore(records: Vec<Equipment>, store: &dyn KvStore) -> Self {
        let mut dir = Self::new(records);

        if let Some(saved) = store.get(keys::SELECTED_EQUIPMENT_ID) {
            match dir.position(&saved) {
                Some(idx) => dir.selected = Some(idx),
                None => debug!(id = %saved, "saved equipment id no longer exists"),
            }
        }

        match load_json::<Vec<Equipment>>(store, keys::RECENT_EQUIPMENT) {
            Ok(Some(mut recent)) => {
                recent.truncate(RECENT_LIMIT);
                dir.recent = recent;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "ignoring unreadable recent equipment list"),
        }

        dir
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|e| e.id == id)
    }

    pub fn records(&self) -> &[Equipment] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&Equipment> {
        self.records.iter().find(|e| e.id == id)
    }

    pub fn selected(&self) -> Option<&Equipment> {
        self.selected.and_then(|i| self.records.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Recently viewed equipment, most recent first.
    pub fn recent(&self) -> &[Equipment] {
        &self.recent
    }

    /// Select the record with `id` and mirror the selection to `store`.
    ///
    /// Unknown ids leave the selection untouched and write nothing.
    /// Persistence failures are logged; the in-memory selection still
    /// changes.
    pub fn handle_equipment_change(
        &mut self,
        id: &str,
        store: &mut dyn KvStore,
    ) -> SelectionChange {
        let Some(idx) = self.position(id) else {
            debug!(id, "ignoring selection of unknown equipment");
            return SelectionChange::Unknown;
        };
        self.selected = Some(idx);

        let Some(equipment) = self.records.get(idx).cloned() else {
            return SelectionChange::Unknown;
        };
        self.recent.retain(|e| e.id != equipment.id);
        self.recent.insert(0, equipment.clone());
        self.recent.truncate(RECENT_LIMIT);

        if let Err(e) = self.persist(&equipment, store) {
            warn!(error = %e, id, "failed to persist equipment selection");
        }
        debug!(id, "equipment selected");
        SelectionChange::Changed
    }

    fn persist(&self, equipment: &Equipment, store: &mut dyn KvStore) -> Result<(), CoreError> {
        store.set(keys::SELECTED_EQUIPMENT_ID, equipment.id.clone())?;
        save_json(store, keys::SELECTED_EQUIPMENT_DATA, equipment)?;
        save_json(store, keys::RECENT_EQUIPMENT, &self.recent)?;
        Ok(())
    }

    /// Select the record `offset` places from the current one (wrapping).
    pub fn cycle(&mut self, offset: isize, store: &mut dyn KvStore) -> SelectionChange {
        let len = self.records.len();
        if len == 0 {
            return SelectionChange::Unknown;
        }
        let current = self.selected.unwrap_or(0);
        let step = offset.unsigned_abs() % len;
        let next = if offset >= 0 {
            (current + step) % len
        } else {
            (current + len - step) % len
        };
        let Some(id) = self.records.get(next).map(|e| e.id.clone()) else {
            return SelectionChange::Unknown;
        };
        self.handle_equipment_change(&id, store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_directory_selects_first_record() {
        let dir = EquipmentDirectory::restore(catalog(), &MemoryStore::new());
        assert_eq!(dir.selected().unwrap().id, "motor-001");
        assert!(dir.recent().is_empty());
    }

    #[test]
    fn known_id_updates_selection_and_store() {
        let mut store = MemoryStore::new();
        let mut dir = EquipmentDirectory::new(catalog());

        assert_eq!(
            dir.handle_equipment_change("pump-001", &mut store),
            SelectionChange::Changed
        );
        let selected = dir.selected().unwrap().clone();
        assert_eq!(selected.id, "pump-001");
        assert_eq!(
            store.get(keys::SELECTED_EQUIPMENT_ID).as_deref(),
            Some("pump-001")
        );
        let snapshot: Equipment = load_json(&store, keys::SELECTED_EQUIPMENT_DATA)
            .unwrap()
            .unwrap();
        assert_eq!(snapshot, selected);
    }

    #[test]
    fn unknown_id_changes_nothing() {
        let mut store = MemoryStore::new();
        let mut dir = EquipmentDirectory::new(catalog());
        assert_eq!(
            dir.handle_equipment_change("nope", &mut store),
            SelectionChange::Unknown
        );
        assert_eq!(dir.selected().unwrap().id, "motor-001");
        assert!(store.is_empty());
    }

    #[test]
    fn recent_list_dedupes_and_caps() {
        let mut store = MemoryStore::new();
        let mut dir = EquipmentDirectory::new(catalog());
        for id in ["plc-001", "pump-001", "plc-001", "drive-001", "motor-001"] {
            dir.handle_equipment_change(id, &mut store);
        }
        let ids: Vec<&str> = dir.recent().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["motor-001", "drive-001", "plc-001", "pump-001"]);

        let mut many = catalog();
        for i in 0..4 {
            let mut extra = many[0].clone();
            extra.id = format!("extra-{i}");
            many.push(extra);
        }
        let mut dir = EquipmentDirectory::new(many);
        for i in 0..4 {
            dir.handle_equipment_change(&format!("extra-{i}"), &mut store);
        }
        dir.handle_equipment_change("pump-001", &mut store);
        dir.handle_equipment_change("plc-001", &mut store);
        assert_eq!(dir.recent().len(), RECENT_LIMIT);
        assert_eq!(dir.recent()[0].id, "plc-001");

        let persisted: Vec<Equipment> = load_json(&store, keys::RECENT_EQUIPMENT)
            .unwrap()
            .unwrap();
        assert_eq!(persisted, dir.recent());
    }

    #[test]
    fn restore_uses_saved_selection() {
        let mut store = MemoryStore::new();
        let mut dir = EquipmentDirectory::new(catalog());
        dir.handle_equipment_change("drive-001", &mut store);

        let restored = EquipmentDirectory::restore(catalog(), &store);
        assert_eq!(restored.selected().unwrap().id, "drive-001");
        assert_eq!(restored.recent().len(), 1);
    }

    #[test]
    fn restore_ignores_stale_id() {
        let mut store = MemoryStore::new();
        store
            .set(keys::SELECTED_EQUIPMENT_ID, "retired-009".into())
            .unwrap();
        let dir = EquipmentDirectory::restore(catalog(), &store);
        assert_eq!(dir.selected().unwrap().id, "motor-001");
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let mut store = MemoryStore::new();
        let mut dir = EquipmentDirectory::new(catalog());
        dir.cycle(-1, &mut store);
        assert_eq!(dir.selected().unwrap().id, "pump-001");
        dir.cycle(1, &mut store);
        assert_eq!(dir.selected().unwrap().id, "motor-001");
        dir.cycle(2, &mut store);
        assert_eq!(dir.selected().unwrap().id, "drive-001");
    }
}
