// scem-core: Equipment, alarm, and inspection state behind the sCEM dashboard.

pub mod alarm;
pub mod configuration;
pub mod equipment;
pub mod error;
pub mod model;
pub mod paging;
pub mod periodic;
pub mod sample;
pub mod store;
pub mod trend;
pub mod verification;

// ── Primary re-exports ──────────────────────────────────────────────
pub use alarm::{ACKNOWLEDGED_WINDOW, AlarmAction, AlarmFilter, AlarmQueue, AlarmRecord};
pub use configuration::{
    ConfigurationRegistry, EditError, EquipmentForm, EquipmentQuery, FieldErrors, ParameterForm,
};
pub use equipment::{EquipmentDirectory, SelectionChange};
pub use error::CoreError;
pub use paging::Pagination;
pub use periodic::PeriodicTask;
pub use store::{JsonFileStore, KvStore, MemoryStore};
pub use trend::TrendSnapshot;
pub use verification::{Checklist, SignOff};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Equipment
    Criticality, Equipment, RunStatus, SpareParts,
    // Alarms
    Alarm, AlarmId, AlarmLevel, NewAlarm,
    // Configuration
    AlertPriority, ConfiguredEquipment, DataType, EquipmentState, Parameter,
    // Inspection
    ChecklistItem, InspectionRecord, InspectionStatus, Interlock, OverallStatus, ParameterReading,
};
