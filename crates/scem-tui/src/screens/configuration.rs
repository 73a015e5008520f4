//! Equipment configuration: CRUD over configured equipment and their
//! monitored parameters.

use std::str::FromStr;

use chrono::{Local, Utc};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};
use strum::IntoEnumIterator;
use tracing::debug;

use scem_core::configuration::validation::field;
use scem_core::model::configuration::{COMMON_UNITS, EQUIPMENT_TYPES};
use scem_core::{
    AlertPriority, ConfigurationRegistry, ConfiguredEquipment, Criticality, DataType, EditError,
    EquipmentForm, EquipmentQuery, EquipmentState, Parameter, ParameterForm,
};

use crate::action::{Action, ConfirmAction, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{Form, FormField, FormOutcome};
use crate::widgets::{panel, sub_tabs};

const SELECT_TYPE: &str = "Select type";
const SELECT_UNIT: &str = "Select unit";
const CUSTOM_UNIT: &str = "Custom";
const CUSTOM_UNIT_KEY: &str = "customUnit";
const CRITICALITY_KEY: &str = "criticality";
const DATA_TYPE_KEY: &str = "dataType";
const PRIORITY_KEY: &str = "alertPriority";
const MONITORING_KEY: &str = "monitoringEnabled";

#[derive(Debug, Clone, PartialEq, Eq)]
enum View {
    List,
    Parameters { equipment_id: String },
}

/// Open modal form and the record it edits (`None` when adding).
#[derive(Debug, Clone)]
enum Editing {
    Equipment {
        id: Option<String>,
        form: Form,
    },
    Parameter {
        equipment_id: String,
        parameter_id: Option<String>,
        form: Form,
    },
}

// ── Form construction ──────────────────────────────────────────────

fn equipment_form(existing: Option<&ConfiguredEquipment>) -> Form {
    let base = existing.map(EquipmentForm::from).unwrap_or_default();
    let types: Vec<&str> = std::iter::once(SELECT_TYPE)
        .chain(EQUIPMENT_TYPES.iter().copied())
        .collect();
    let criticalities: Vec<String> = Criticality::iter().map(|c| c.to_string()).collect();
    let title = if existing.is_some() {
        "Edit Equipment"
    } else {
        "Add Equipment"
    };
    Form::new(
        title,
        vec![
            FormField::text(field::NAME, "Name *", &base.name),
            FormField::choice(field::TYPE, "Type *", &types, &base.kind),
            FormField::choice(
                CRITICALITY_KEY,
                "Criticality *",
                &criticalities,
                &base.criticality.to_string(),
            ),
            FormField::text(field::DESCRIPTION, "Description", &base.description),
        ],
    )
}

fn read_equipment_form(form: &Form) -> EquipmentForm {
    let kind = match form.choice(field::TYPE) {
        Some(SELECT_TYPE) | None => String::new(),
        Some(kind) => kind.to_owned(),
    };
    EquipmentForm {
        name: form.text(field::NAME),
        kind,
        criticality: form
            .choice(CRITICALITY_KEY)
            .and_then(|c| Criticality::from_str(c).ok())
            .unwrap_or_default(),
        description: form.text(field::DESCRIPTION),
    }
}

fn parameter_form(existing: Option<&Parameter>) -> Form {
    let base = existing.map(ParameterForm::from).unwrap_or_default();
    let units: Vec<&str> = std::iter::once(SELECT_UNIT)
        .chain(COMMON_UNITS.iter().copied())
        .chain(std::iter::once(CUSTOM_UNIT))
        .collect();
    let (unit_choice, custom) = if base.unit.is_empty() || COMMON_UNITS.contains(&base.unit.as_str())
    {
        (base.unit.as_str(), "")
    } else {
        (CUSTOM_UNIT, base.unit.as_str())
    };
    let data_types: Vec<String> = DataType::iter().map(|d| d.to_string()).collect();
    let priorities: Vec<String> = AlertPriority::iter().map(|p| p.to_string()).collect();
    let title = if existing.is_some() {
        "Edit Parameter"
    } else {
        "Add Parameter"
    };

    let mut form = Form::new(
        title,
        vec![
            FormField::text(field::NAME, "Name *", &base.name),
            FormField::choice(field::UNIT, "Unit *", &units, unit_choice),
            FormField::text(CUSTOM_UNIT_KEY, "Custom unit", custom),
            FormField::choice(
                DATA_TYPE_KEY,
                "Data type",
                &data_types,
                &base.data_type.to_string(),
            ),
            FormField::text(field::LOWER_THRESHOLD, "Lower threshold", &base.lower_threshold),
            FormField::text(field::UPPER_THRESHOLD, "Upper threshold", &base.upper_threshold),
            FormField::choice(
                PRIORITY_KEY,
                "Alert priority",
                &priorities,
                &base.alert_priority.to_string(),
            ),
            FormField::toggle(MONITORING_KEY, "Monitoring", base.monitoring_enabled),
            FormField::text(field::REMARKS, "Remarks", &base.remarks),
        ],
    );
    sync_parameter_fields(&mut form);
    form
}

/// Custom unit only for "Custom"; thresholds only for numeric data.
fn sync_parameter_fields(form: &mut Form) {
    let custom = form.choice(field::UNIT) == Some(CUSTOM_UNIT);
    let numeric = form.choice(DATA_TYPE_KEY) == Some("Numeric");
    form.set_visible(CUSTOM_UNIT_KEY, custom);
    form.set_visible(field::LOWER_THRESHOLD, numeric);
    form.set_visible(field::UPPER_THRESHOLD, numeric);
}

fn read_parameter_form(form: &Form) -> ParameterForm {
    let unit = match form.choice(field::UNIT) {
        Some(CUSTOM_UNIT) => form.text(CUSTOM_UNIT_KEY),
        Some(SELECT_UNIT) | None => String::new(),
        Some(unit) => unit.to_owned(),
    };
    ParameterForm {
        name: form.text(field::NAME),
        unit,
        lower_threshold: form.text(field::LOWER_THRESHOLD),
        upper_threshold: form.text(field::UPPER_THRESHOLD),
        data_type: form
            .choice(DATA_TYPE_KEY)
            .and_then(|d| DataType::from_str(d).ok())
            .unwrap_or_default(),
        alert_priority: form
            .choice(PRIORITY_KEY)
            .and_then(|p| AlertPriority::from_str(p).ok())
            .unwrap_or_default(),
        monitoring_enabled: form.toggle(MONITORING_KEY),
        remarks: form.text(field::REMARKS),
    }
}

fn threshold(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

// ── Screen ─────────────────────────────────────────────────────────

pub struct ConfigurationScreen {
    focused: bool,
    registry: ConfigurationRegistry,
    query: EquipmentQuery,
    view: View,
    table_state: TableState,
    param_state: TableState,
    editing: Option<Editing>,
}

impl ConfigurationScreen {
    pub fn new() -> Self {
        Self::with_registry(ConfigurationRegistry::seeded(Utc::now()))
    }

    pub fn with_registry(registry: ConfigurationRegistry) -> Self {
        Self {
            focused: false,
            registry,
            query: EquipmentQuery::default(),
            view: View::List,
            table_state: TableState::default().with_selected(Some(0)),
            param_state: TableState::default().with_selected(Some(0)),
            editing: None,
        }
    }

    fn visible(&self) -> Vec<&ConfiguredEquipment> {
        self.registry.filtered(&self.query)
    }

    fn selected_equipment(&self) -> Option<&ConfiguredEquipment> {
        let idx = self.table_state.selected()?;
        self.visible().get(idx).copied()
    }

    fn current_equipment(&self) -> Option<&ConfiguredEquipment> {
        match &self.view {
            View::List => self.selected_equipment(),
            View::Parameters { equipment_id } => self.registry.get(equipment_id),
        }
    }

    fn selected_parameter(&self) -> Option<&Parameter> {
        let idx = self.param_state.selected()?;
        self.current_equipment()?.parameters.get(idx)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        clamp_state(&mut self.table_state, len);
        let params = match &self.view {
            View::Parameters { equipment_id } => self
                .registry
                .get(equipment_id)
                .map_or(0, |e| e.parameters.len()),
            View::List => 0,
        };
        clamp_state(&mut self.param_state, params);
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let (state, len) = match &self.view {
            View::List => {
                let len = self.visible().len();
                (&mut self.table_state, len)
            }
            View::Parameters { equipment_id } => {
                let len = self
                    .registry
                    .get(equipment_id)
                    .map_or(0, |e| e.parameters.len());
                (&mut self.param_state, len)
            }
        };
        if len == 0 {
            state.select(None);
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = state.selected().unwrap_or(0) as isize;
        #[allow(clippy::cast_possible_wrap)]
        let next = (current + delta).clamp(0, len as isize - 1);
        state.select(Some(next as usize));
    }

    fn cycle_criticality(&mut self) {
        let all: Vec<Criticality> = Criticality::iter().collect();
        self.query.criticality = match self.query.criticality {
            None => all.first().copied(),
            Some(c) => all
                .iter()
                .position(|x| *x == c)
                .and_then(|i| all.get(i + 1))
                .copied(),
        };
        self.table_state.select(Some(0));
        self.clamp_selection();
    }

    // ── List view keys ───────────────────────────────────────────────

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('f') => self.cycle_criticality(),
            KeyCode::Char('a') => {
                self.editing = Some(Editing::Equipment {
                    id: None,
                    form: equipment_form(None),
                });
            }
            KeyCode::Char('e') => {
                let record = self.selected_equipment()?;
                self.editing = Some(Editing::Equipment {
                    id: Some(record.id.clone()),
                    form: equipment_form(Some(record)),
                });
            }
            KeyCode::Char('d') => {
                let record = self.selected_equipment()?;
                return Some(Action::ShowConfirm(ConfirmAction::DeleteEquipment {
                    id: record.id.clone(),
                    name: record.name.clone(),
                }));
            }
            KeyCode::Char('t') => {
                let id = self.selected_equipment()?.id.clone();
                return Some(match self.registry.toggle_status(&id, Utc::now()) {
                    Ok(state) => {
                        let name = self.registry.get(&id).map_or("", |e| e.name.as_str());
                        Action::Notify(Notification::info(format!("{name} is now {state}")))
                    }
                    Err(e) => Action::Notify(Notification::error(e.to_string())),
                });
            }
            KeyCode::Enter => {
                let equipment_id = self.selected_equipment()?.id.clone();
                debug!(equipment_id, "opening parameters");
                self.view = View::Parameters { equipment_id };
                self.param_state.select(Some(0));
                self.clamp_selection();
            }
            _ => {}
        }
        None
    }

    fn handle_parameter_key(&mut self, key: KeyEvent, equipment_id: String) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('a') => {
                self.editing = Some(Editing::Parameter {
                    equipment_id,
                    parameter_id: None,
                    form: parameter_form(None),
                });
            }
            KeyCode::Char('e') => {
                let param = self.selected_parameter()?;
                self.editing = Some(Editing::Parameter {
                    equipment_id,
                    parameter_id: Some(param.id.clone()),
                    form: parameter_form(Some(param)),
                });
            }
            KeyCode::Char('d') => {
                let param = self.selected_parameter()?;
                return Some(Action::ShowConfirm(ConfirmAction::DeleteParameter {
                    equipment_id,
                    parameter_id: param.id.clone(),
                    name: param.name.clone(),
                }));
            }
            _ => {}
        }
        None
    }

    // ── Forms ────────────────────────────────────────────────────────

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        let outcome = match self.editing.as_mut()? {
            Editing::Equipment { form, .. } => form.handle_key(key),
            Editing::Parameter { form, .. } => {
                let outcome = form.handle_key(key);
                sync_parameter_fields(form);
                outcome
            }
        };
        match outcome {
            FormOutcome::Continue => None,
            FormOutcome::Cancel => {
                self.editing = None;
                None
            }
            FormOutcome::Submit => self.submit(),
        }
    }

    /// Apply the open form. Validation errors keep the form open.
    fn submit(&mut self) -> Option<Action> {
        let editing = self.editing.take()?;
        let now = Utc::now();
        let (result, message, mut editing) = match editing {
            Editing::Equipment { id, form } => {
                let input = read_equipment_form(&form);
                let (result, verb) = match &id {
                    Some(id) => (self.registry.update_equipment(id, &input, now), "updated"),
                    None => (
                        self.registry.add_equipment(&input, now).map(|_| ()),
                        "added",
                    ),
                };
                let message = format!("Equipment {} {verb}", input.name.trim());
                (result, message, Editing::Equipment { id, form })
            }
            Editing::Parameter {
                equipment_id,
                parameter_id,
                form,
            } => {
                let input = read_parameter_form(&form);
                let (result, verb) = match &parameter_id {
                    Some(pid) => (
                        self.registry
                            .update_parameter(&equipment_id, pid, &input, now),
                        "updated",
                    ),
                    None => (
                        self.registry
                            .add_parameter(&equipment_id, &input, now)
                            .map(|_| ()),
                        "added",
                    ),
                };
                let message = format!("Parameter {} {verb}", input.name.trim());
                (
                    result,
                    message,
                    Editing::Parameter {
                        equipment_id,
                        parameter_id,
                        form,
                    },
                )
            }
        };

        match result {
            Ok(()) => {
                self.clamp_selection();
                Some(Action::Notify(Notification::success(message)))
            }
            Err(EditError::Invalid(errors)) => {
                debug!(fields = errors.len(), "form rejected");
                match &mut editing {
                    Editing::Equipment { form, .. } | Editing::Parameter { form, .. } => {
                        form.set_errors(errors);
                    }
                }
                self.editing = Some(editing);
                None
            }
            Err(e @ EditError::NotFound { .. }) => {
                Some(Action::Notify(Notification::error(e.to_string())))
            }
        }
    }

    fn apply_confirmed(&mut self, confirm: &ConfirmAction) -> Option<Action> {
        let notification = match confirm {
            ConfirmAction::DeleteEquipment { id, .. } => {
                match self.registry.delete_equipment(id) {
                    Ok(removed) => {
                        if self.view
                            == (View::Parameters {
                                equipment_id: id.clone(),
                            })
                        {
                            self.view = View::List;
                        }
                        Notification::success(format!("Equipment {} deleted", removed.name))
                    }
                    Err(e) => Notification::error(e.to_string()),
                }
            }
            ConfirmAction::DeleteParameter {
                equipment_id,
                parameter_id,
                ..
            } => match self
                .registry
                .delete_parameter(equipment_id, parameter_id, Utc::now())
            {
                Ok(removed) => Notification::success(format!("Parameter {} deleted", removed.name)),
                Err(e) => Notification::error(e.to_string()),
            },
        };
        self.clamp_selection();
        Some(Action::Notify(notification))
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

        let names: Vec<String> = Criticality::iter().map(|c| c.to_string()).collect();
        let labels: Vec<&str> = std::iter::once("All")
            .chain(names.iter().map(String::as_str))
            .collect();
        let active = self.query.criticality.map_or(0, |c| {
            Criticality::iter().position(|x| x == c).map_or(0, |i| i + 1)
        });
        let mut status = sub_tabs::render_sub_tabs(" Criticality: ", &labels, active);
        if !self.query.search.is_empty() {
            status.push_span(Span::styled(
                format!("   Search: {}", self.query.search),
                Style::default().fg(theme::AMBER),
            ));
        }
        frame.render_widget(Paragraph::new(status), layout[0]);

        let visible = self.visible();
        let block = panel(
            format!(
                "Equipment Configuration ({}/{})",
                visible.len(),
                self.registry.records().len()
            ),
            true,
        );
        let header = Row::new(
            ["Name", "Type", "Criticality", "Status", "Params", "Last Updated"]
                .into_iter()
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = visible
            .iter()
            .map(|e| {
                let status_color = match e.status {
                    EquipmentState::Active => theme::SUCCESS_GREEN,
                    EquipmentState::Inactive => theme::BORDER_GRAY,
                };
                Row::new(vec![
                    Cell::from(e.name.clone()),
                    Cell::from(e.kind.clone()),
                    Cell::from(e.criticality.to_string())
                        .style(Style::default().fg(theme::criticality_color(e.criticality))),
                    Cell::from(e.status.to_string()).style(Style::default().fg(status_color)),
                    Cell::from(e.parameters.len().to_string()),
                    Cell::from(
                        e.last_updated
                            .with_timezone(&Local)
                            .format("%m/%d/%Y %H:%M")
                            .to_string(),
                    ),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(17),
        ];
        if rows.is_empty() {
            let inner = block.inner(layout[1]);
            frame.render_widget(block, layout[1]);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No equipment matches the current filters",
                    theme::placeholder(),
                )),
                inner,
            );
        } else {
            let table = Table::new(rows, widths)
                .header(header)
                .block(block)
                .row_highlight_style(theme::table_selected());
            let mut state = self.table_state;
            frame.render_stateful_widget(table, layout[1], &mut state);
        }

        let hints = Line::from(vec![
            Span::styled("  a ", theme::key_hint_key()),
            Span::styled("add  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("t ", theme::key_hint_key()),
            Span::styled("activate/deactivate  ", theme::key_hint()),
            Span::styled("f ", theme::key_hint_key()),
            Span::styled("criticality  ", theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("parameters", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn render_parameters(&self, frame: &mut Frame, area: Rect, equipment: &ConfiguredEquipment) {
        let layout = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

        let summary = vec![
            Line::from(vec![
                Span::styled(format!(" {} ", equipment.name), theme::title_style()),
                Span::styled(
                    format!(" {}  ·  {}  ·  ", equipment.kind, equipment.criticality),
                    Style::default().fg(theme::DIM_WHITE),
                ),
                Span::styled(
                    equipment.status.to_string(),
                    Style::default().fg(match equipment.status {
                        EquipmentState::Active => theme::SUCCESS_GREEN,
                        EquipmentState::Inactive => theme::BORDER_GRAY,
                    }),
                ),
            ]),
            Line::from(Span::styled(
                format!(" {}", equipment.description),
                theme::placeholder(),
            )),
        ];
        frame.render_widget(Paragraph::new(summary), layout[0]);

        let block = panel(
            format!("Parameters ({})", equipment.parameters.len()),
            true,
        );
        let header = Row::new(
            [
                "Name", "Unit", "Lower", "Upper", "Type", "Priority", "Monitor", "Remarks",
            ]
            .into_iter()
            .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = equipment
            .parameters
            .iter()
            .map(|p| {
                let (monitor, color) = if p.monitoring_enabled {
                    ("On", theme::SUCCESS_GREEN)
                } else {
                    ("Off", theme::BORDER_GRAY)
                };
                Row::new(vec![
                    Cell::from(p.name.clone()),
                    Cell::from(p.unit.clone()),
                    Cell::from(threshold(p.lower_threshold)),
                    Cell::from(threshold(p.upper_threshold)),
                    Cell::from(p.data_type.to_string()),
                    Cell::from(p.alert_priority.to_string()),
                    Cell::from(monitor).style(Style::default().fg(color)),
                    Cell::from(p.remarks.clone()),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Fill(2),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Fill(2),
        ];
        if rows.is_empty() {
            let inner = block.inner(layout[1]);
            frame.render_widget(block, layout[1]);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No parameters configured. Press a to add one.",
                    theme::placeholder(),
                )),
                inner,
            );
        } else {
            let table = Table::new(rows, widths)
                .header(header)
                .block(block)
                .row_highlight_style(theme::table_selected());
            let mut state = self.param_state;
            frame.render_stateful_widget(table, layout[1], &mut state);
        }

        let hints = Line::from(vec![
            Span::styled("  a ", theme::key_hint_key()),
            Span::styled("add  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("back", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }
}

fn clamp_state(state: &mut TableState, len: usize) {
    let selected = match state.selected() {
        _ if len == 0 => None,
        Some(i) => Some(i.min(len - 1)),
        None => Some(0),
    };
    state.select(selected);
}

impl Default for ConfigurationScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ConfigurationScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing.is_some() {
            return Ok(self.handle_form_key(key));
        }
        let action = match self.view.clone() {
            View::List => self.handle_list_key(key),
            View::Parameters { equipment_id } => self.handle_parameter_key(key, equipment_id),
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SearchInput(query) => {
                self.query.search.clone_from(query);
                self.table_state.select(Some(0));
                self.clamp_selection();
            }
            Action::CloseSearch => {
                self.query.search.clear();
                self.clamp_selection();
            }
            Action::GoBack => {
                if self.editing.take().is_none() && self.view != View::List {
                    self.view = View::List;
                    self.clamp_selection();
                }
            }
            Action::Confirmed(confirm) => return Ok(self.apply_confirmed(confirm)),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        match &self.view {
            View::List => self.render_list(frame, area),
            View::Parameters { equipment_id } => match self.registry.get(equipment_id) {
                Some(equipment) => self.render_parameters(frame, area, equipment),
                None => self.render_list(frame, area),
            },
        }

        match &self.editing {
            Some(Editing::Equipment { form, .. } | Editing::Parameter { form, .. }) => {
                form.render(frame, area);
            }
            None => {}
        }
    }

    fn captures_input(&self) -> bool {
        self.editing.is_some()
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Configuration"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::action::NotificationLevel;

    fn press(screen: &mut ConfigurationScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_text(screen: &mut ConfigurationScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn notified(action: Option<Action>, level: NotificationLevel) -> String {
        match action {
            Some(Action::Notify(n)) if n.level == level => n.message,
            other => panic!("expected {level:?} notification, got {other:?}"),
        }
    }

    fn screen() -> ConfigurationScreen {
        ConfigurationScreen::new()
    }

    fn editing_form(screen: &ConfigurationScreen) -> &Form {
        match screen.editing.as_ref().unwrap() {
            Editing::Equipment { form, .. } | Editing::Parameter { form, .. } => form,
        }
    }

    #[test]
    fn add_equipment_through_form() {
        let mut s = screen();
        let before = s.registry.records().len();
        press(&mut s, KeyCode::Char('a'));
        assert!(s.captures_input());
        type_text(&mut s, "  Boiler Feed Pump ");
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Right);
        let msg = notified(press(&mut s, KeyCode::Enter), NotificationLevel::Success);
        assert_eq!(msg, "Equipment Boiler Feed Pump added");
        assert!(!s.captures_input());
        assert_eq!(s.registry.records().len(), before + 1);
        let added = s.registry.records().last().unwrap();
        assert_eq!(added.kind, "Rotating Machinery");
        assert_eq!(added.status, EquipmentState::Active);
    }

    #[test]
    fn invalid_form_stays_open_with_errors() {
        let mut s = screen();
        press(&mut s, KeyCode::Char('a'));
        type_text(&mut s, "ab");
        assert!(press(&mut s, KeyCode::Enter).is_none());
        assert!(s.captures_input());
        let errors = editing_form(&s).errors();
        assert!(errors.get(field::NAME).is_some());
        assert_eq!(errors.get(field::TYPE), Some("Equipment type is required"));
    }

    #[test]
    fn duplicate_name_is_rejected_on_edit() {
        let mut s = screen();
        let other = s.registry.records()[1].name.clone();
        press(&mut s, KeyCode::Char('e'));
        // clear the existing name, then type another record's name
        press(&mut s, KeyCode::End);
        for _ in 0..60 {
            press(&mut s, KeyCode::Backspace);
        }
        type_text(&mut s, &other);
        assert!(press(&mut s, KeyCode::Enter).is_none());
        assert_eq!(
            editing_form(&s).errors().get(field::NAME),
            Some("Equipment with this name already exists")
        );
        press(&mut s, KeyCode::Esc);
        assert!(!s.captures_input());
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut s = screen();
        let before = s.registry.records().len();
        let confirm = match press(&mut s, KeyCode::Char('d')) {
            Some(Action::ShowConfirm(c)) => c,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(s.registry.records().len(), before);
        let msg = notified(
            s.update(&Action::Confirmed(confirm)).unwrap(),
            NotificationLevel::Success,
        );
        assert!(msg.ends_with("deleted"));
        assert_eq!(s.registry.records().len(), before - 1);
    }

    #[test]
    fn toggle_status_flips_state() {
        let mut s = screen();
        let msg = notified(press(&mut s, KeyCode::Char('t')), NotificationLevel::Info);
        assert!(msg.ends_with("is now Inactive"));
        assert_eq!(s.registry.records()[0].status, EquipmentState::Inactive);
    }

    #[test]
    fn criticality_filter_cycles_back_to_all() {
        let mut s = screen();
        let total = s.registry.records().len();
        for _ in 0..Criticality::iter().count() {
            press(&mut s, KeyCode::Char('f'));
            let c = s.query.criticality.unwrap();
            assert!(s.visible().iter().all(|e| e.criticality == c));
        }
        press(&mut s, KeyCode::Char('f'));
        assert_eq!(s.query.criticality, None);
        assert_eq!(s.visible().len(), total);
    }

    #[test]
    fn search_narrows_list() {
        let mut s = screen();
        s.update(&Action::SearchInput("mot".into())).unwrap();
        assert!(s.visible().iter().all(|e| e.name.to_lowercase().contains("mot")));
        s.update(&Action::CloseSearch).unwrap();
        assert_eq!(s.visible().len(), s.registry.records().len());
    }

    #[test]
    fn parameter_form_tracks_data_type_and_unit() {
        let mut s = screen();
        press(&mut s, KeyCode::Enter);
        assert!(matches!(s.view, View::Parameters { .. }));
        press(&mut s, KeyCode::Char('a'));

        let form = editing_form(&s);
        assert_eq!(form.active_key(), Some(field::NAME));
        type_text(&mut s, "Oil Pressure");
        // unit: step left from "Select unit" wraps to "Custom"
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Left);
        assert_eq!(editing_form(&s).choice(field::UNIT), Some(CUSTOM_UNIT));
        press(&mut s, KeyCode::Down);
        assert_eq!(editing_form(&s).active_key(), Some(CUSTOM_UNIT_KEY));
        type_text(&mut s, "kPa");
        // data type -> Boolean hides the thresholds
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Right);
        press(&mut s, KeyCode::Down);
        assert_eq!(editing_form(&s).active_key(), Some(PRIORITY_KEY));

        let input = read_parameter_form(editing_form(&s));
        assert_eq!(input.unit, "kPa");
        assert_eq!(input.data_type, DataType::Boolean);

        let msg = notified(press(&mut s, KeyCode::Enter), NotificationLevel::Success);
        assert_eq!(msg, "Parameter Oil Pressure added");
    }

    #[test]
    fn threshold_order_is_validated() {
        let mut s = screen();
        press(&mut s, KeyCode::Enter);
        press(&mut s, KeyCode::Char('a'));
        type_text(&mut s, "Temp");
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Right); // mm/s
        press(&mut s, KeyCode::Down); // data type (custom unit hidden)
        press(&mut s, KeyCode::Down); // lower
        type_text(&mut s, "10");
        press(&mut s, KeyCode::Down); // upper
        type_text(&mut s, "5");
        assert!(press(&mut s, KeyCode::Enter).is_none());
        assert_eq!(
            editing_form(&s).errors().get(field::LOWER_THRESHOLD),
            Some("Lower threshold must be less than upper threshold")
        );
    }

    #[test]
    fn delete_parameter_and_go_back() {
        let mut s = screen();
        press(&mut s, KeyCode::Enter);
        let id = s.current_equipment().unwrap().id.clone();
        let before = s.registry.get(&id).unwrap().parameters.len();
        assert!(before > 0);
        let confirm = match press(&mut s, KeyCode::Char('d')) {
            Some(Action::ShowConfirm(c @ ConfirmAction::DeleteParameter { .. })) => c,
            other => panic!("unexpected {other:?}"),
        };
        s.update(&Action::Confirmed(confirm)).unwrap();
        assert_eq!(s.registry.get(&id).unwrap().parameters.len(), before - 1);

        s.update(&Action::GoBack).unwrap();
        assert_eq!(s.view, View::List);
    }

    #[test]
    fn renders_list_and_form() {
        let mut s = screen();
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|f| s.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Equipment Configuration"));
        assert!(text.contains("Motor"));

        press(&mut s, KeyCode::Char('a'));
        terminal.draw(|f| s.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Add Equipment"));
    }
}
