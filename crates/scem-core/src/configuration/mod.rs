// ── Equipment configuration registry ──
//
// In-memory CRUD over configured equipment and their parameters. Every
// mutation bumps the owning record's `last_updated`; deleting a record
// drops its parameters with it.

pub mod validation;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::model::configuration::new_record_id;
use crate::model::{ConfiguredEquipment, Criticality, EquipmentState, Parameter};
use crate::sample;

pub use validation::{EquipmentForm, FieldErrors, ParameterForm};

/// Why a configuration edit was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("invalid input: {0}")]
    Invalid(FieldErrors),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl From<FieldErrors> for EditError {
    fn from(errors: FieldErrors) -> Self {
        Self::Invalid(errors)
    }
}

fn equipment_not_found(id: &str) -> EditError {
    EditError::NotFound {
        entity: "equipment",
        id: id.to_owned(),
    }
}

fn parameter_not_found(id: &str) -> EditError {
    EditError::NotFound {
        entity: "parameter",
        id: id.to_owned(),
    }
}

/// Search + criticality filter for the equipment list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentQuery {
    pub search: String,
    pub criticality: Option<Criticality>,
}

impl EquipmentQuery {
    pub fn matches(&self, equipment: &ConfiguredEquipment) -> bool {
        let q = self.search.to_lowercase();
        (q.is_empty() || equipment.name.to_lowercase().contains(&q))
            && self.criticality.is_none_or(|c| c == equipment.criticality)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigurationRegistry {
    equipment: Vec<ConfiguredEquipment>,
}

impl ConfigurationRegistry {
    pub fn new(equipment: Vec<ConfiguredEquipment>) -> Self {
        Self { equipment }
    }

    /// Registry seeded with the plant's monitored equipment.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::new(sample::configured_equipment(now))
    }

    pub fn records(&self) -> &[ConfiguredEquipment] {
        &self.equipment
    }

    pub fn get(&self, id: &str) -> Option<&ConfiguredEquipment> {
        self.equipment.iter().find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut ConfiguredEquipment, EditError> {
        self.equipment
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| equipment_not_found(id))
    }

    pub fn filtered(&self, query: &EquipmentQuery) -> Vec<&ConfiguredEquipment> {
        self.equipment.iter().filter(|e| query.matches(e)).collect()
    }

    fn names_except<'a>(&'a self, id: Option<&'a str>) -> impl Iterator<Item = &'a str> + 'a {
        self.equipment
            .iter()
            .filter(move |e| Some(e.id.as_str()) != id)
            .map(|e| e.name.as_str())
    }

    // ── Equipment ────────────────────────────────────────────────────

    /// Add a new active record with no parameters. Returns its id.
    pub fn add_equipment(
        &mut self,
        form: &EquipmentForm,
        now: DateTime<Utc>,
    ) -> Result<String, EditError> {
        let draft = form.validate(self.names_except(None))?;
        let id = new_record_id();
        info!(id = %id, name = %draft.name, "equipment added");
        self.equipment.push(ConfiguredEquipment {
            id: id.clone(),
            name: draft.name,
            kind: draft.kind,
            criticality: draft.criticality,
            status: EquipmentState::Active,
            description: draft.description,
            last_updated: now,
            parameters: Vec::new(),
        });
        Ok(id)
    }

    pub fn update_equipment(
        &mut self,
        id: &str,
        form: &EquipmentForm,
        now: DateTime<Utc>,
    ) -> Result<(), EditError> {
        if self.get(id).is_none() {
            return Err(equipment_not_found(id));
        }
        let draft = form.validate(self.names_except(Some(id)))?;
        let record = self.get_mut(id)?;
        record.name = draft.name;
        record.kind = draft.kind;
        record.criticality = draft.criticality;
        record.description = draft.description;
        record.last_updated = now;
        debug!(id, "equipment updated");
        Ok(())
    }

    /// Flip a record between active and inactive.
    pub fn toggle_status(
        &mut self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<EquipmentState, EditError> {
        let record = self.get_mut(id)?;
        record.status = record.status.toggled();
        record.last_updated = now;
        Ok(record.status)
    }

    /// Remove a record and all of its parameters.
    pub fn delete_equipment(&mut self, id: &str) -> Result<ConfiguredEquipment, EditError> {
        let pos = self
            .equipment
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| equipment_not_found(id))?;
        let removed = self.equipment.remove(pos);
        info!(id, parameters = removed.parameters.len(), "equipment deleted");
        Ok(removed)
    }

    // ── Parameters ───────────────────────────────────────────────────

    pub fn add_parameter(
        &mut self,
        equipment_id: &str,
        form: &ParameterForm,
        now: DateTime<Utc>,
    ) -> Result<String, EditError> {
        let record = self.get_mut(equipment_id)?;
        let draft = form.validate()?;
        let id = new_record_id();
        record.parameters.push(Parameter {
            id: id.clone(),
            name: draft.name,
            unit: draft.unit,
            lower_threshold: draft.lower_threshold,
            upper_threshold: draft.upper_threshold,
            data_type: draft.data_type,
            alert_priority: draft.alert_priority,
            monitoring_enabled: draft.monitoring_enabled,
            remarks: draft.remarks,
        });
        record.last_updated = now;
        debug!(equipment_id, parameter_id = %id, "parameter added");
        Ok(id)
    }

    pub fn update_parameter(
        &mut self,
        equipment_id: &str,
        parameter_id: &str,
        form: &ParameterForm,
        now: DateTime<Utc>,
    ) -> Result<(), EditError> {
        let record = self.get_mut(equipment_id)?;
        let draft = form.validate()?;
        let param = record
            .parameters
            .iter_mut()
            .find(|p| p.id == parameter_id)
            .ok_or_else(|| parameter_not_found(parameter_id))?;
        param.name = draft.name;
        param.unit = draft.unit;
        param.lower_threshold = draft.lower_threshold;
        param.upper_threshold = draft.upper_threshold;
        param.data_type = draft.data_type;
        param.alert_priority = draft.alert_priority;
        param.monitoring_enabled = draft.monitoring_enabled;
        param.remarks = draft.remarks;
        record.last_updated = now;
        Ok(())
    }

    pub fn delete_parameter(
        &mut self,
        equipment_id: &str,
        parameter_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Parameter, EditError> {
        let record = self.get_mut(equipment_id)?;
        let pos = record
            .parameters
            .iter()
            .position(|p| p.id == parameter_id)
            .ok_or_else(|| parameter_not_found(parameter_id))?;
        let removed = record.parameters.remove(pos);
        record.last_updated = now;
        Ok(removed)
    }
}

/// Form pre-filled from an existing record, for editing.
impl From<&ConfiguredEquipment> for EquipmentForm {
    fn from(e: &ConfiguredEquipment) -> Self {
        Self {
            name: e.name.clone(),
            kind: e.kind.clone(),
            criticality: e.criticality,
            description: e.description.clone(),
        }
    }
}

impl From<&Parameter> for ParameterForm {
    fn from(p: &Parameter) -> Self {
        let fmt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        Self {
            name: p.name.clone(),
            unit: p.unit.clone(),
            lower_threshold: fmt(p.lower_threshold),
            upper_threshold: fmt(p.upper_threshold),
            data_type: p.data_type,
            alert_priority: p.alert_priority,
            monitoring_enabled: p.monitoring_enabled,
            remarks: p.remarks.clone(),
        }
    }
}
