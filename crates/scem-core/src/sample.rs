// ── Plant sample data ──
//
// Fixed reference data the screens render: parameter tables per
// equipment, inspection plan, interlocks, engineers, and the default
// checklist.

use chrono::{DateTime, Utc};

use crate::model::configuration::new_record_id;
use crate::model::{
    AlertPriority, ChecklistItem, ConfiguredEquipment, DataType, EquipmentState,
    InspectionRecord, InspectionStatus, Interlock, Parameter, ParameterReading,
};
use crate::equipment::catalog;

/// Rows per parameter table, including blank slots.
pub const PARAMETER_ROWS: usize = 8;

/// Equipment whose table is shown for unknown ids.
pub const FALLBACK_EQUIPMENT_ID: &str = "motor-001";

pub const ENGINEERS: &[&str] = &[
    "John Smith",
    "Jane Doe",
    "Mike Johnson",
    "Sarah Williams",
    "Tom Brown",
];

/// Messages cycled through the scrolling ticker.
pub const TICKER_MESSAGES: &[&str] = &[
    "⚠ Scrolling Display for Important alerts, messages etc.",
    "Critical: Motor #3 temperature exceeding threshold",
    "Warning: Scheduled maintenance for Pump #7 tomorrow",
    "Info: System update completed successfully",
    "Alert: Vibration levels abnormal on Bearing DS-01 ⚠",
];

/// Observations listed on the main dashboard.
pub const IMAGE_OBSERVATIONS: &[&str] = &[
    "Predefined observations - xxxxxxxxxxxxx",
    "xxxxxxxxxxxxxxxxxxx",
    "xxxxxxxxxxxxxxxxxxx",
];

type Row = (&'static str, &'static str, f64, f64, f64);

const MOTOR: [Row; 6] = [
    ("Vibration DS", "mm/s", 0.0, 10.0, 4.5),
    ("Vibration NDS", "mm/s", 0.0, 10.0, 3.8),
    ("Temperature Bearing - DS", "°C", 20.0, 80.0, 55.0),
    ("Temperature Bearing - NDS", "°C", 20.0, 80.0, 52.0),
    ("Current", "A", 0.0, 100.0, 45.0),
    ("Speed", "RPM", 0.0, 3000.0, 1480.0),
];

const PLC: [Row; 6] = [
    ("CPU Temperature", "°C", 20.0, 60.0, 38.0),
    ("Power Supply Voltage", "V", 20.0, 28.0, 24.0),
    ("Communication Status", "Status", 0.0, 1.0, 1.0),
    ("Scan Time", "ms", 0.0, 100.0, 25.0),
    ("I/O Module Status", "Status", 0.0, 1.0, 1.0),
    ("Memory Usage", "%", 0.0, 100.0, 65.0),
];

const DRIVE: [Row; 6] = [
    ("Output Frequency", "Hz", 0.0, 60.0, 50.0),
    ("Output Current", "A", 0.0, 200.0, 85.0),
    ("DC Bus Voltage", "V", 300.0, 800.0, 650.0),
    ("Heat Sink Temperature", "°C", 20.0, 70.0, 45.0),
    ("Drive Status", "Status", 0.0, 1.0, 1.0),
    ("Efficiency", "%", 85.0, 100.0, 96.0),
];

const PUMP: [Row; 6] = [
    ("Flow Rate", "L/min", 0.0, 500.0, 350.0),
    ("Discharge Pressure", "bar", 0.0, 20.0, 15.0),
    ("Bearing Temperature", "°C", 20.0, 80.0, 55.0),
    ("Motor Current", "A", 0.0, 150.0, 75.0),
    ("Vibration Level", "mm/s", 0.0, 8.0, 2.5),
    ("Efficiency", "%", 70.0, 100.0, 88.0),
];

fn rows_for(equipment_id: &str) -> Option<&'static [Row; 6]> {
    match equipment_id {
        "motor-001" => Some(&MOTOR),
        "plc-001" => Some(&PLC),
        "drive-001" => Some(&DRIVE),
        "pump-001" => Some(&PUMP),
        _ => None,
    }
}

/// Parameter table for `equipment_id`, padded with blank rows to
/// [`PARAMETER_ROWS`]. Unknown ids get the motor table.
pub fn parameter_readings(equipment_id: &str) -> Vec<ParameterReading> {
    let rows = rows_for(equipment_id).unwrap_or(&MOTOR);
    (1..=PARAMETER_ROWS)
        .map(|sn| {
            let (name, unit, min, max, present) = rows
                .get(sn - 1)
                .copied()
                .unwrap_or(("", "", 0.0, 0.0, 0.0));
            ParameterReading {
                sn: u32::try_from(sn).unwrap_or(u32::MAX),
                name: name.into(),
                unit: unit.into(),
                min,
                max,
                present,
                remarks: String::new(),
            }
        })
        .collect()
}

/// Configured-equipment records mirroring the monitored catalog, used
/// to seed the configuration screen.
pub fn configured_equipment(now: DateTime<Utc>) -> Vec<ConfiguredEquipment> {
    catalog()
        .into_iter()
        .map(|e| {
            let parameters = rows_for(&e.id)
                .map(|rows| {
                    rows.iter()
                        .map(|&(name, unit, min, max, _)| {
                            let numeric = unit != "Status";
                            Parameter {
                                id: new_record_id(),
                                name: name.into(),
                                unit: unit.into(),
                                lower_threshold: numeric.then_some(min),
                                upper_threshold: numeric.then_some(max),
                                data_type: if numeric {
                                    DataType::Numeric
                                } else {
                                    DataType::Boolean
                                },
                                alert_priority: AlertPriority::Medium,
                                monitoring_enabled: true,
                                remarks: String::new(),
                            }
                        })
                        .collect()
                })
                .unwrap_or_default();
            ConfiguredEquipment {
                id: new_record_id(),
                name: e.name,
                kind: e.kind,
                criticality: e.criticality,
                status: EquipmentState::Active,
                description: format!("{} at {}", e.id, e.plant),
                last_updated: now,
                parameters,
            }
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn inspection(
    sn: u32,
    plant: &str,
    equipment: &str,
    critical_level: &str,
    last: &str,
    planned: &str,
    observation: &str,
    status: InspectionStatus,
) -> InspectionRecord {
    InspectionRecord {
        sn,
        plant: plant.into(),
        equipment: equipment.into(),
        critical_level: critical_level.into(),
        last_inspection_date: last.into(),
        planned_inspection_date: planned.into(),
        last_observation: observation.into(),
        status,
        remarks: String::new(),
    }
}

/// The inspection plan shown on the planning & reports screen.
pub fn inspection_records() -> Vec<InspectionRecord> {
    vec![
        inspection(
            1,
            "RCM-1",
            "Main Motor",
            "Most critical",
            "12/01/2024",
            "12/15/2024",
            "1. Noise from DS bearing area.",
            InspectionStatus::Done,
        ),
        inspection(
            2,
            "RCM-1",
            "Main Motor",
            "Most critical",
            "11/15/2024",
            "12/01/2024",
            "1. Temperature was normal",
            InspectionStatus::Done,
        ),
        inspection(
            3,
            "RCM-2",
            "Pump #3",
            "Critical",
            "11/20/2024",
            "12/10/2024",
            "1. Vibration levels normal",
            InspectionStatus::NotDone,
        ),
        inspection(
            4,
            "RCM-2",
            "Compressor",
            "Medium",
            "11/25/2024",
            "12/20/2024",
            "",
            InspectionStatus::NotDone,
        ),
        inspection(
            5,
            "RCM-3",
            "Conveyor Belt",
            "Low",
            "11/10/2024",
            "12/25/2024",
            "",
            InspectionStatus::NotDone,
        ),
    ]
}

/// Interlocks verified on the equipment verification screen.
pub fn interlocks() -> Vec<Interlock> {
    [
        (1, "High Temperature", "Image taken for this with instrument at site"),
        (2, "Vibration Interlock", "Image taken for this with sensors at site"),
        (3, "Safety Interlock", "Image taken for this at site"),
        (4, "High Current", "Image taken for this with instrument at site"),
        (5, "xxxxxxxxxxxxx", "Image taken for this with sensors at site"),
        (6, "xxxxxxxxxxxxx", "Image taken for this at site"),
    ]
    .into_iter()
    .map(|(id, name, description)| Interlock {
        id,
        name: name.into(),
        description: description.into(),
    })
    .collect()
}

/// Checklist every verification starts from.
pub fn default_checklist() -> Vec<ChecklistItem> {
    [
        "Temperature of Bearing",
        "Vibration in Motor",
        "Physical - Dust",
        "Overall status",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, parameter)| ChecklistItem {
        id: (i + 1).to_string(),
        parameter: parameter.into(),
        is_checked: false,
        comment: String::new(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_has_six_readings_and_two_blanks() {
        for id in ["motor-001", "plc-001", "drive-001", "pump-001"] {
            let rows = parameter_readings(id);
            assert_eq!(rows.len(), PARAMETER_ROWS);
            assert_eq!(rows.iter().filter(|r| r.is_blank()).count(), 2, "{id}");
            assert!(rows.iter().filter(|r| !r.is_blank()).all(ParameterReading::in_range));
        }
    }

    #[test]
    fn unknown_equipment_falls_back_to_motor() {
        assert_eq!(
            parameter_readings("nope"),
            parameter_readings(FALLBACK_EQUIPMENT_ID)
        );
        assert_eq!(parameter_readings("nope")[0].name, "Vibration DS");
    }

    #[test]
    fn inspection_plan_has_two_done() {
        let records = inspection_records();
        assert_eq!(records.len(), 5);
        assert_eq!(
            records
                .iter()
                .filter(|r| r.status == InspectionStatus::Done)
                .count(),
            2
        );
    }

    #[test]
    fn interlocks_and_checklist() {
        assert_eq!(interlocks().len(), 6);
        let checklist = default_checklist();
        assert_eq!(checklist.len(), 4);
        assert!(checklist.iter().all(|c| !c.is_checked));
    }
}
