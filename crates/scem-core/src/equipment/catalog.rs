use crate::model::{Criticality, Equipment, RunStatus, SpareParts};

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    name: &str,
    icon: &str,
    kind: &str,
    plant: &str,
    criticality: Criticality,
    status: RunStatus,
    dates: [&str; 3],
) -> Equipment {
    let [last, scheduled, actual] = dates;
    Equipment {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
        kind: kind.into(),
        plant: plant.into(),
        criticality,
        status,
        spare_parts: SpareParts::Available,
        last_inspection_date: last.into(),
        scheduled_inspection_date: scheduled.into(),
        actual_inspection_date: actual.into(),
    }
}

/// The monitored equipment known to the dashboard.
pub fn catalog() -> Vec<Equipment> {
    vec![
        record(
            "motor-001",
            "Motor",
            "🔧",
            "Rotating Machinery",
            "RCM-1",
            Criticality::MostCritical,
            RunStatus::Run,
            ["11/28/2025", "12/28/2025", "11/28/2025"],
        ),
        record(
            "plc-001",
            "PLC",
            "🖥️",
            "Electrical",
            "Control Room",
            Criticality::High,
            RunStatus::Run,
            ["11/15/2025", "12/15/2025", "11/15/2025"],
        ),
        record(
            "drive-001",
            "XYZ Drive",
            "⚙️",
            "Electrical",
            "MCC Room",
            Criticality::High,
            RunStatus::Standby,
            ["12/01/2025", "01/01/2026", "12/01/2025"],
        ),
        record(
            "pump-001",
            "Centrifugal Pump",
            "💧",
            "Rotating Machinery",
            "Pump House",
            Criticality::Medium,
            RunStatus::Run,
            ["11/20/2025", "12/20/2025", "11/20/2025"],
        ),
    ]
}
