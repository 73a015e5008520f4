// ── Equipment configuration types ──
//
// Records edited on the configuration screen. These are independent of
// the monitored-equipment directory: they describe what should be
// monitored and with which thresholds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use super::equipment::Criticality;

/// Equipment categories offered by the configuration form.
pub const EQUIPMENT_TYPES: &[&str] = &[
    "Rotating Machinery",
    "Electrical",
    "Instrumentation",
    "Hydraulic",
    "Pneumatic",
    "Other",
];

/// Units offered by the parameter form. Any other non-empty unit is
/// accepted as a custom unit.
pub const COMMON_UNITS: &[&str] = &[
    "mm/s",
    "°C",
    "Ampere (A)",
    "RPM",
    "V",
    "Hz",
    "Bar",
    "PSI",
    "ms",
    "%",
    "Boolean",
    "Text",
];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum DataType {
    #[default]
    Numeric,
    Boolean,
    Text,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum AlertPriority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

/// Whether a configured equipment record is in service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum EquipmentState {
    #[default]
    Active,
    Inactive,
}

impl EquipmentState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

/// A monitored parameter of a configured equipment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub lower_threshold: Option<f64>,
    pub upper_threshold: Option<f64>,
    pub data_type: DataType,
    pub alert_priority: AlertPriority,
    pub monitoring_enabled: bool,
    pub remarks: String,
}

/// A configured equipment record with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguredEquipment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub criticality: Criticality,
    pub status: EquipmentState,
    pub description: String,
    pub last_updated: DateTime<Utc>,
    pub parameters: Vec<Parameter>,
}

/// Fresh identifier for configuration records.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}
