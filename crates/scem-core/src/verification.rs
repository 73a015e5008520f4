// ── Equipment verification state ──
//
// Checklist and sign-off are screen-local state. Observations and
// interlock image references are persisted per equipment / interlock.

use tracing::warn;

use crate::error::CoreError;
use crate::model::{ChecklistItem, OverallStatus};
use crate::sample::{ENGINEERS, default_checklist};
use crate::store::{KvStore, keys, load_json, save_json};

/// Longest observation accepted.
pub const OBSERVATION_MAX: usize = 200;

/// Who verified and confirmed an inspection, and the verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignOff {
    pub verified_by: Option<String>,
    pub confirmed_by: Option<String>,
    pub overall: OverallStatus,
}

/// Step through the engineer list: unset → first → … → last → unset.
pub fn next_engineer(current: Option<&str>) -> Option<String> {
    let next = match current.and_then(|c| ENGINEERS.iter().position(|e| *e == c)) {
        None => ENGINEERS.first(),
        Some(i) => ENGINEERS.get(i + 1),
    };
    next.map(|s| (*s).to_owned())
}

impl SignOff {
    pub fn cycle_verified_by(&mut self) {
        self.verified_by = next_engineer(self.verified_by.as_deref());
    }

    pub fn cycle_confirmed_by(&mut self) {
        self.confirmed_by = next_engineer(self.confirmed_by.as_deref());
    }

    pub fn cycle_overall(&mut self) {
        self.overall = match self.overall {
            OverallStatus::Good => OverallStatus::Bad,
            OverallStatus::Bad => OverallStatus::Worst,
            OverallStatus::Worst => OverallStatus::Good,
        };
    }
}

/// Checklist being worked through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
}

impl Default for Checklist {
    fn default() -> Self {
        Self {
            items: default_checklist(),
        }
    }
}

impl Checklist {
    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.is_checked = !item.is_checked;
        }
    }

    pub fn set_comment(&mut self, index: usize, comment: impl Into<String>) {
        if let Some(item) = self.items.get_mut(index) {
            item.comment = comment.into();
        }
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_checked).count()
    }
}

// ── Persisted observations ──────────────────────────────────────────

/// Observations recorded for `equipment_id`. Unreadable entries are
/// logged and treated as empty.
pub fn observations(store: &dyn KvStore, equipment_id: &str) -> Vec<String> {
    match load_json(store, &keys::observations(equipment_id)) {
        Ok(list) => list.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, equipment_id, "ignoring unreadable observations");
            Vec::new()
        }
    }
}

/// Append an observation. Blank text is ignored; long text is rejected.
pub fn add_observation(
    store: &mut dyn KvStore,
    equipment_id: &str,
    text: &str,
) -> Result<Vec<String>, CoreError> {
    let text = text.trim();
    let mut list = observations(store, equipment_id);
    if text.is_empty() {
        return Ok(list);
    }
    if text.chars().count() > OBSERVATION_MAX {
        return Err(CoreError::ValidationFailed {
            message: format!("Observation must be less than {OBSERVATION_MAX} characters"),
        });
    }
    list.push(text.to_owned());
    save_json(store, &keys::observations(equipment_id), &list)?;
    Ok(list)
}

/// Remove the observation at `index`. Out-of-range indexes are ignored.
pub fn remove_observation(
    store: &mut dyn KvStore,
    equipment_id: &str,
    index: usize,
) -> Result<Vec<String>, CoreError> {
    let mut list = observations(store, equipment_id);
    if index >= list.len() {
        return Ok(list);
    }
    list.remove(index);
    let key = keys::observations(equipment_id);
    if list.is_empty() {
        store.remove(&key)?;
    } else {
        save_json(store, &key, &list)?;
    }
    Ok(list)
}

// ── Persisted interlock images ──────────────────────────────────────

pub fn interlock_image(store: &dyn KvStore, interlock_id: u32) -> Option<String> {
    store.get(&keys::interlock_image(interlock_id))
}

/// Attach an image reference (file path or data URL) to an interlock.
/// An empty reference clears it.
pub fn set_interlock_image(
    store: &mut dyn KvStore,
    interlock_id: u32,
    reference: &str,
) -> Result<(), CoreError> {
    let key = keys::interlock_image(interlock_id);
    let reference = reference.trim();
    if reference.is_empty() {
        store.remove(&key)
    } else {
        store.set(&key, reference.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn engineer_cycle_wraps_through_unset() {
        let mut s = SignOff::default();
        s.cycle_verified_by();
        assert_eq!(s.verified_by.as_deref(), Some("John Smith"));
        for _ in 0..4 {
            s.cycle_verified_by();
        }
        assert_eq!(s.verified_by.as_deref(), Some("Tom Brown"));
        s.cycle_verified_by();
        assert_eq!(s.verified_by, None);
    }

    #[test]
    fn overall_cycles() {
        let mut s = SignOff::default();
        assert_eq!(s.overall, OverallStatus::Good);
        s.cycle_overall();
        s.cycle_overall();
        assert_eq!(s.overall, OverallStatus::Worst);
        s.cycle_overall();
        assert_eq!(s.overall, OverallStatus::Good);
    }

    #[test]
    fn checklist_toggle_and_comment() {
        let mut c = Checklist::default();
        c.toggle(1);
        c.set_comment(1, "ok");
        c.toggle(99);
        assert_eq!(c.checked_count(), 1);
        assert_eq!(c.items()[1].status_label(), "Checked");
        assert_eq!(c.items()[1].comment, "ok");
        assert_eq!(c.items()[0].status_label(), "Not Checked");
    }

    #[test]
    fn observations_are_kept_per_equipment() {
        let mut store = MemoryStore::new();
        add_observation(&mut store, "motor-001", "Noise at DS bearing").unwrap();
        add_observation(&mut store, "motor-001", "  ").unwrap();
        add_observation(&mut store, "pump-001", "Seal leak").unwrap();

        assert_eq!(observations(&store, "motor-001"), ["Noise at DS bearing"]);
        assert_eq!(observations(&store, "pump-001"), ["Seal leak"]);

        let left = remove_observation(&mut store, "motor-001", 0).unwrap();
        assert!(left.is_empty());
        assert!(store.get(&keys::observations("motor-001")).is_none());
    }

    #[test]
    fn overlong_observation_is_rejected() {
        let mut store = MemoryStore::new();
        let err = add_observation(&mut store, "motor-001", &"o".repeat(201)).unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }

    #[test]
    fn interlock_image_set_and_clear() {
        let mut store = MemoryStore::new();
        set_interlock_image(&mut store, 2, "/tmp/vib.png").unwrap();
        assert_eq!(interlock_image(&store, 2).as_deref(), Some("/tmp/vib.png"));
        set_interlock_image(&mut store, 2, "").unwrap();
        assert!(interlock_image(&store, 2).is_none());
    }
}
