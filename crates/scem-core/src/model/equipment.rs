// ── Monitored equipment types ──
//
// The fixed set of plant equipment shown in the KPI row and used to
// select which parameter table, observations, and inspection dates apply.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Criticality tier shared by monitored and configured equipment.
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
pub enum Criticality {
    #[serde(rename = "Most critical")]
    #[strum(serialize = "Most critical")]
    MostCritical,
    #[default]
    High,
    Medium,
    Low,
}

/// Operating state reported for a monitored piece of equipment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum RunStatus {
    Run,
    Standby,
    Stop,
}

/// Whether spare parts are on hand for the equipment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum SpareParts {
    Available,
    Unavailable,
}

/// A monitored equipment record from the static directory.
///
/// Dates are kept as display strings (`MM/DD/YYYY`) exactly as they are
/// shown and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub plant: String,
    pub criticality: Criticality,
    pub status: RunStatus,
    pub spare_parts: SpareParts,
    pub last_inspection_date: String,
    pub scheduled_inspection_date: String,
    pub actual_inspection_date: String,
}

impl Equipment {
    /// Name with its icon glyph, as shown in selectors.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.icon)
    }
}
