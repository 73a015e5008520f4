//! Domain model types shared by the core services and the TUI.

pub mod alarm;
pub mod configuration;
pub mod equipment;
pub mod inspection;

pub use alarm::{ALARM_TIME_FORMAT, Alarm, AlarmId, AlarmLevel, NewAlarm};
pub use configuration::{
    AlertPriority, COMMON_UNITS, ConfiguredEquipment, DataType, EQUIPMENT_TYPES, EquipmentState,
    Parameter,
};
pub use equipment::{Criticality, Equipment, RunStatus, SpareParts};
pub use inspection::{
    ChecklistItem, InspectionRecord, InspectionStatus, Interlock, OverallStatus, ParameterReading,
};
