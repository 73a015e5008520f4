// ── Inspection, verification, and monitoring records ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Completion state of a planned inspection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum InspectionStatus {
    Done,
    #[serde(rename = "Not Done")]
    #[strum(serialize = "Not Done")]
    NotDone,
}

/// One row of the planning & reports table.
///
/// Criticality is free text here: the inspection plan uses its own
/// vocabulary ("Critical") alongside the equipment tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRecord {
    pub sn: u32,
    pub plant: String,
    pub equipment: String,
    pub critical_level: String,
    pub last_inspection_date: String,
    pub planned_inspection_date: String,
    pub last_observation: String,
    pub status: InspectionStatus,
    pub remarks: String,
}

/// A live reading row on the parameter monitoring screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterReading {
    pub sn: u32,
    pub name: String,
    pub unit: String,
    pub min: f64,
    pub max: f64,
    pub present: f64,
    pub remarks: String,
}

impl ParameterReading {
    /// Rows without a name are placeholders for unassigned slots.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
    }

    pub fn in_range(&self) -> bool {
        self.present >= self.min && self.present <= self.max
    }
}

/// A safety interlock tracked during equipment verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interlock {
    pub id: u32,
    pub name: String,
    pub description: String,
}

/// One line of the equipment checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub parameter: String,
    pub is_checked: bool,
    pub comment: String,
}

impl ChecklistItem {
    pub fn status_label(&self) -> &'static str {
        if self.is_checked { "Checked" } else { "Not Checked" }
    }
}

/// Overall verdict recorded after a verification.
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
pub enum OverallStatus {
    #[default]
    Good,
    Bad,
    Worst,
}
