//! Parameter monitoring: live readings table plus trend charts.

use std::collections::HashMap;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, TableState};
use tui_input::Input;

use scem_core::sample::{self, FALLBACK_EQUIPMENT_ID};
use scem_core::trend::TrendChart;
use scem_core::{Equipment, ParameterReading, TrendSnapshot};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{panel, text_field};

/// Remarks typed by the operator, keyed by (equipment id, S/N).
type RemarkKey = (String, u32);

/// Chart points per series, pre-computed so datasets can borrow them.
struct ChartPoints {
    title: String,
    bounds: [f64; 2],
    series: Vec<(&'static str, Vec<(f64, f64)>)>,
}

impl ChartPoints {
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn from_chart(chart: &TrendChart) -> Self {
        Self {
            title: format!("{} ({})", chart.title, chart.unit),
            bounds: chart.y_bounds(),
            series: chart
                .series
                .iter()
                .map(|s| {
                    let pts = s
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, v)| (i as f64, *v))
                        .collect();
                    (s.name, pts)
                })
                .collect(),
        }
    }
}

pub struct MonitoringScreen {
    focused: bool,
    equipment: Option<Arc<Equipment>>,
    readings: Vec<ParameterReading>,
    remarks: HashMap<RemarkKey, String>,
    table_state: TableState,
    editing: Option<Input>,
    labels: Vec<String>,
    charts: Vec<ChartPoints>,
}

impl MonitoringScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            equipment: None,
            readings: sample::parameter_readings(FALLBACK_EQUIPMENT_ID),
            remarks: HashMap::new(),
            table_state: TableState::default().with_selected(Some(0)),
            editing: None,
            labels: Vec::new(),
            charts: Vec::new(),
        }
    }

    fn equipment_id(&self) -> &str {
        self.equipment
            .as_ref()
            .map_or(FALLBACK_EQUIPMENT_ID, |e| e.id.as_str())
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_reading(&self) -> Option<&ParameterReading> {
        self.readings.get(self.selected_index())
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.readings.len();
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = self.selected_index() as isize;
        #[allow(clippy::cast_possible_wrap)]
        let next = (current + delta).clamp(0, len as isize - 1);
        self.table_state.select(Some(next as usize));
    }

    fn remark_for(&self, reading: &ParameterReading) -> String {
        self.remarks
            .get(&(self.equipment_id().to_owned(), reading.sn))
            .cloned()
            .unwrap_or_else(|| reading.remarks.clone())
    }

    fn begin_edit(&mut self) {
        let Some(reading) = self.selected_reading() else {
            return;
        };
        if reading.is_blank() {
            return;
        }
        let current = self.remark_for(reading);
        self.editing = Some(Input::new(current));
    }

    fn commit_edit(&mut self) {
        let Some(input) = self.editing.take() else {
            return;
        };
        let Some(sn) = self.selected_reading().map(|r| r.sn) else {
            return;
        };
        self.remarks.insert(
            (self.equipment_id().to_owned(), sn),
            input.value().trim().to_owned(),
        );
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let title = self.equipment.as_ref().map_or_else(
            || "Parameters".to_owned(),
            |e| format!("Parameters · {}", e.display_name()),
        );
        let block = panel(title, self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let header = Row::new(
            ["S/N", "Parameter", "Unit", "Min", "Max", "Present", "Remarks"]
                .into_iter()
                .map(|h| Cell::from(h).style(theme::table_header())),
        );

        let selected = self.selected_index();
        let rows: Vec<Row> = self
            .readings
            .iter()
            .enumerate()
            .map(|(i, r)| {
                if r.is_blank() {
                    return Row::new(vec![Cell::from(r.sn.to_string())]).style(theme::table_row());
                }
                let present_style = if r.in_range() {
                    Style::default().fg(theme::SUCCESS_GREEN)
                } else {
                    Style::default()
                        .fg(theme::ERROR_RED)
                        .add_modifier(Modifier::BOLD)
                };
                let remarks = if i == selected && self.editing.is_some() {
                    Cell::from("")
                } else {
                    Cell::from(self.remark_for(r)).style(Style::default().fg(theme::DIM_WHITE))
                };
                Row::new(vec![
                    Cell::from(r.sn.to_string()),
                    Cell::from(r.name.clone()).style(Style::default().fg(theme::NEON_CYAN)),
                    Cell::from(r.unit.clone()),
                    Cell::from(format!("{}", r.min)),
                    Cell::from(format!("{}", r.max)),
                    Cell::from(format!("{}", r.present)).style(present_style),
                    remarks,
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Fill(3),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Fill(2),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .row_highlight_style(theme::table_selected());
        let mut state = self.table_state;
        frame.render_stateful_widget(table, layout[0], &mut state);

        // Inline remark editor over the selected row's remarks cell.
        if let Some(input) = &self.editing {
            let areas = Layout::horizontal(widths).spacing(1).split(layout[0]);
            let offset = u16::try_from(selected.saturating_sub(state.offset())).unwrap_or(0);
            let y = layout[0].y + 1 + offset;
            if let Some(col) = areas.last() {
                if y < layout[0].bottom() {
                    let cell = Rect::new(col.x, y, col.width, 1);
                    frame.render_widget(
                        Paragraph::new("").style(Style::default().bg(theme::BG_HIGHLIGHT)),
                        cell,
                    );
                    text_field::render_inline(frame, cell, input, true);
                }
            }
        }

        let hints = if self.editing.is_some() {
            Line::from(vec![
                Span::styled("  Enter ", theme::key_hint_key()),
                Span::styled("save  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled("  j/k ", theme::key_hint_key()),
                Span::styled("navigate  ", theme::key_hint()),
                Span::styled("r ", theme::key_hint_key()),
                Span::styled("edit remarks  ", theme::key_hint()),
                Span::styled("[/] ", theme::key_hint_key()),
                Span::styled("equipment", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn render_chart(&self, frame: &mut Frame, area: Rect, chart: &ChartPoints) {
        let block = panel(chart.title.as_str(), false);
        let datasets: Vec<Dataset> = chart
            .series
            .iter()
            .enumerate()
            .map(|(i, (name, pts))| {
                let color = theme::CHART_SERIES
                    .get(i % theme::CHART_SERIES.len())
                    .copied()
                    .unwrap_or(theme::NEON_CYAN);
                Dataset::default()
                    .name(*name)
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(color))
                    .data(pts)
            })
            .collect();

        let axis_style = Style::default().fg(theme::BORDER_GRAY);
        let x_max = self.labels.len().saturating_sub(1).max(1) as f64;
        let x_labels: Vec<Span> = match (self.labels.first(), self.labels.last()) {
            (Some(first), Some(last)) => vec![
                Span::styled(first.clone(), axis_style),
                Span::styled(
                    self.labels
                        .get(self.labels.len() / 2)
                        .cloned()
                        .unwrap_or_default(),
                    axis_style,
                ),
                Span::styled(last.clone(), axis_style),
            ],
            _ => Vec::new(),
        };
        let [lo, hi] = chart.bounds;
        let y_labels = vec![
            Span::styled(format!("{lo:.1}"), axis_style),
            Span::styled(format!("{:.1}", (lo + hi) / 2.0), axis_style),
            Span::styled(format!("{hi:.1}"), axis_style),
        ];

        let widget = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds(chart.bounds)
                    .labels(y_labels),
            );
        frame.render_widget(widget, area);
    }

    fn render_charts(&self, frame: &mut Frame, area: Rect) {
        if self.charts.is_empty() {
            let block = panel("Trends", false);
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(Span::styled("  Waiting for trend data…", theme::placeholder())),
                inner,
            );
            return;
        }

        let rows = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let cells: Vec<Rect> = rows
            .iter()
            .flat_map(|row| {
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(*row)
                    .to_vec()
            })
            .collect();
        for (chart, cell) in self.charts.iter().zip(cells) {
            self.render_chart(frame, cell, chart);
        }
    }
}

impl Default for MonitoringScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for MonitoringScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(input) = self.editing.as_mut() {
            match key.code {
                KeyCode::Enter => self.commit_edit(),
                KeyCode::Esc => self.editing = None,
                _ => {
                    text_field::handle_edit_key(input, key);
                }
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('r') | KeyCode::Enter => self.begin_edit(),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::EquipmentSelected(equipment) => {
                self.readings = sample::parameter_readings(&equipment.id);
                self.equipment = Some(Arc::clone(equipment));
                self.editing = None;
                self.table_state.select(Some(0));
            }
            Action::TrendUpdated(snapshot) => self.set_trend(snapshot),
            Action::GoBack => self.editing = None,
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let table_height = u16::try_from(self.readings.len())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let layout =
            Layout::vertical([Constraint::Length(table_height), Constraint::Min(8)]).split(area);
        self.render_table(frame, layout[0]);
        self.render_charts(frame, layout[1]);
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
        "Monitoring"
    }
}

impl MonitoringScreen {
    fn set_trend(&mut self, snapshot: &TrendSnapshot) {
        self.labels.clone_from(&snapshot.labels);
        self.charts = snapshot.charts.iter().map(ChartPoints::from_chart).collect();
    }
}
