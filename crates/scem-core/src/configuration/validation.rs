// ── Form validation ──
//
// Equipment and parameter forms hold raw user input. Validation either
// yields a clean draft or a field → message map for inline display.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{AlertPriority, Criticality, DataType};

pub mod field {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const DESCRIPTION: &str = "description";
    pub const UNIT: &str = "unit";
    pub const LOWER_THRESHOLD: &str = "lowerThreshold";
    pub const UPPER_THRESHOLD: &str = "upperThreshold";
    pub const REMARKS: &str = "remarks";
}

const EQUIPMENT_NAME_MIN: usize = 3;
const PARAMETER_NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const TEXT_MAX: usize = 200;

/// Validation messages keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, keeping the first message per field.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn check_name(errors: &mut FieldErrors, name: &str, min: usize) {
    let len = char_len(name);
    if len < min {
        errors.insert(field::NAME, format!("Name must be at least {min} characters"));
    } else if len > NAME_MAX {
        errors.insert(
            field::NAME,
            format!("Name must be less than {NAME_MAX} characters"),
        );
    }
}

// ── Equipment ───────────────────────────────────────────────────────

/// Raw equipment form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentForm {
    pub name: String,
    pub kind: String,
    pub criticality: Criticality,
    pub description: String,
}

/// Validated equipment fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentDraft {
    pub name: String,
    pub kind: String,
    pub criticality: Criticality,
    pub description: String,
}

impl EquipmentForm {
    /// Validate against the schema and against `other_names`, the names
    /// of every other configured record (the record being edited is
    /// excluded by the caller).
    pub fn validate<'a, I>(&self, other_names: I) -> Result<EquipmentDraft, FieldErrors>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();

        check_name(&mut errors, name, EQUIPMENT_NAME_MIN);
        if self.kind.trim().is_empty() {
            errors.insert(field::TYPE, "Equipment type is required");
        }
        if char_len(&self.description) > TEXT_MAX {
            errors.insert(
                field::DESCRIPTION,
                format!("Description must be less than {TEXT_MAX} characters"),
            );
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        if other_names.into_iter().any(|n| n == name) {
            errors.insert(field::NAME, "Equipment with this name already exists");
            return Err(errors);
        }

        Ok(EquipmentDraft {
            name: name.to_owned(),
            kind: self.kind.trim().to_owned(),
            criticality: self.criticality,
            description: self.description.clone(),
        })
    }
}

// ── Parameter ───────────────────────────────────────────────────────

/// Raw parameter form input. Thresholds are the text typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterForm {
    pub name: String,
    pub unit: String,
    pub lower_threshold: String,
    pub upper_threshold: String,
    pub data_type: DataType,
    pub alert_priority: AlertPriority,
    pub monitoring_enabled: bool,
    pub remarks: String,
}

impl Default for ParameterForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            unit: String::new(),
            lower_threshold: String::new(),
            upper_threshold: String::new(),
            data_type: DataType::default(),
            alert_priority: AlertPriority::default(),
            monitoring_enabled: true,
            remarks: String::new(),
        }
    }
}

/// Validated parameter fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDraft {
    pub name: String,
    pub unit: String,
    pub lower_threshold: Option<f64>,
    pub upper_threshold: Option<f64>,
    pub data_type: DataType,
    pub alert_priority: AlertPriority,
    pub monitoring_enabled: bool,
    pub remarks: String,
}

fn parse_threshold(
    errors: &mut FieldErrors,
    key: &'static str,
    raw: &str,
) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            errors.insert(key, "Threshold must be a number");
            None
        }
    }
}

impl ParameterForm {
    /// Validate the form. Thresholds only apply to numeric parameters
    /// and are dropped for the other data types.
    pub fn validate(&self) -> Result<ParameterDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();
        let unit = self.unit.trim();

        check_name(&mut errors, name, PARAMETER_NAME_MIN);
        if unit.is_empty() {
            errors.insert(field::UNIT, "Unit is required");
        }
        if char_len(&self.remarks) > TEXT_MAX {
            errors.insert(
                field::REMARKS,
                format!("Remarks must be less than {TEXT_MAX} characters"),
            );
        }

        let (lower, upper) = if self.data_type == DataType::Numeric {
            (
                parse_threshold(&mut errors, field::LOWER_THRESHOLD, &self.lower_threshold),
                parse_threshold(&mut errors, field::UPPER_THRESHOLD, &self.upper_threshold),
            )
        } else {
            (None, None)
        };
        if let (Some(lo), Some(hi)) = (lower, upper) {
            if lo >= hi {
                errors.insert(
                    field::LOWER_THRESHOLD,
                    "Lower threshold must be less than upper threshold",
                );
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ParameterDraft {
            name: name.to_owned(),
            unit: unit.to_owned(),
            lower_threshold: lower,
            upper_threshold: upper,
            data_type: self.data_type,
            alert_priority: self.alert_priority,
            monitoring_enabled: self.monitoring_enabled,
            remarks: self.remarks.clone(),
        })
    }
}
