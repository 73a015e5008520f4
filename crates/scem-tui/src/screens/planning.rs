//! Planning & reports: the inspection plan table.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Clear, Paragraph, Row, Table, TableState, Wrap};

use scem_core::paging::Pagination;
use scem_core::sample;
use scem_core::{InspectionRecord, InspectionStatus};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{centered_rect, panel, sub_tabs};

const PAGE_SIZE: usize = 5;

/// Status filter for the inspection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Done,
    NotDone,
}

impl StatusFilter {
    fn next(self) -> Self {
        match self {
            Self::All => Self::Done,
            Self::Done => Self::NotDone,
            Self::NotDone => Self::All,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::All => 0,
            Self::Done => 1,
            Self::NotDone => 2,
        }
    }

    fn matches(self, status: InspectionStatus) -> bool {
        match self {
            Self::All => true,
            Self::Done => status == InspectionStatus::Done,
            Self::NotDone => status == InspectionStatus::NotDone,
        }
    }
}

pub struct PlanningScreen {
    focused: bool,
    records: Vec<InspectionRecord>,
    filtered: Vec<usize>,
    search_query: String,
    filter: StatusFilter,
    pagination: Pagination,
    table_state: TableState,
    detail_open: bool,
}

impl PlanningScreen {
    pub fn new() -> Self {
        let mut screen = Self {
            focused: false,
            records: sample::inspection_records(),
            filtered: Vec::new(),
            search_query: String::new(),
            filter: StatusFilter::All,
            pagination: Pagination::new(PAGE_SIZE),
            table_state: TableState::default().with_selected(Some(0)),
            detail_open: false,
        };
        screen.recompute_filtered();
        screen
    }

    fn recompute_filtered(&mut self) {
        let q = self.search_query.to_lowercase();
        self.filtered = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.filter.matches(r.status))
            .filter(|(_, r)| {
                q.is_empty()
                    || r.plant.to_lowercase().contains(&q)
                    || r.equipment.to_lowercase().contains(&q)
                    || r.critical_level.to_lowercase().contains(&q)
                    || r.last_observation.to_lowercase().contains(&q)
            })
            .map(|(i, _)| i)
            .collect();
        self.pagination.first();
        self.table_state.select(Some(0));
    }

    fn page_records(&self) -> Vec<&InspectionRecord> {
        self.pagination
            .slice(&self.filtered)
            .iter()
            .filter_map(|&i| self.records.get(i))
            .collect()
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_record(&self) -> Option<&InspectionRecord> {
        self.page_records().get(self.selected_index()).copied()
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.page_records().len();
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = self.selected_index() as isize;
        #[allow(clippy::cast_possible_wrap)]
        let next = (current + delta).clamp(0, len as isize - 1);
        self.table_state.select(Some(next as usize));
    }

    fn reset(&mut self) {
        self.search_query.clear();
        self.filter = StatusFilter::All;
        self.recompute_filtered();
    }

    fn render_detail(frame: &mut Frame, area: Rect, record: &InspectionRecord) {
        let popup = centered_rect(64, 14, area);
        frame.render_widget(Clear, popup);
        let block = panel(format!("Inspection #{}", record.sn), true)
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let field = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("  {label:<20}"), Style::default().fg(theme::DIM_WHITE)),
                Span::styled(value, Style::default().fg(theme::NEON_CYAN)),
            ])
        };
        let dash = |s: &str| if s.is_empty() { "-".to_owned() } else { s.to_owned() };
        let lines = vec![
            Line::from(""),
            field("Plant", record.plant.clone()),
            field("Equipment", record.equipment.clone()),
            field("Critical level", record.critical_level.clone()),
            field("Last inspection", record.last_inspection_date.clone()),
            field("Planned inspection", record.planned_inspection_date.clone()),
            field("Status", record.status.to_string()),
            field("Observation", dash(&record.last_observation)),
            field("Remarks", dash(&record.remarks)),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Esc ", theme::key_hint_key()),
                Span::styled("close", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

impl Default for PlanningScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PlanningScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.detail_open {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.detail_open = false;
            }
            return Ok(None);
        }

        let total = self.filtered.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('f') => {
                self.filter = self.filter.next();
                self.recompute_filtered();
            }
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('n') | KeyCode::Right => {
                self.pagination.next(total);
                self.table_state.select(Some(0));
            }
            KeyCode::Char('p') | KeyCode::Left => {
                self.pagination.prev();
                self.table_state.select(Some(0));
            }
            KeyCode::Char('g') => {
                self.pagination.first();
                self.table_state.select(Some(0));
            }
            KeyCode::Char('G') => {
                self.pagination.last(total);
                self.table_state.select(Some(0));
            }
            KeyCode::Enter => {
                if self.selected_record().is_some() {
                    self.detail_open = true;
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SearchInput(query) => {
                self.search_query.clone_from(query);
                self.recompute_filtered();
            }
            Action::CloseSearch => {
                self.search_query.clear();
                self.recompute_filtered();
            }
            Action::GoBack => self.detail_open = false,
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let total = self.filtered.len();
        let title = if self.search_query.is_empty() {
            format!("Inspection Plan ({total}/{})", self.records.len())
        } else {
            format!("Inspection Plan ({total}/{}) [\"{}\"]", self.records.len(), self.search_query)
        };
        let block = panel(title, self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // filter
            Constraint::Min(1),    // table
            Constraint::Length(1), // paging
            Constraint::Length(1), // hints
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(
                " Status: ",
                &["All", "Done", "Not Done"],
                self.filter.index(),
            )),
            layout[0],
        );

        let header = Row::new(
            [
                "S.N",
                "Plant",
                "Equipment",
                "Critical level",
                "Last Inspection",
                "Planned",
                "Last Observation",
                "Status",
                "Remarks",
            ]
            .into_iter()
            .map(|h| Cell::from(h).style(theme::table_header())),
        );

        let page = self.page_records();
        let rows: Vec<Row> = page
            .iter()
            .map(|r| {
                let status_style = match r.status {
                    InspectionStatus::Done => theme::badge(theme::STEEL_BLUE),
                    InspectionStatus::NotDone => Style::default().fg(theme::DIM_WHITE),
                };
                let observation = if r.last_observation.is_empty() {
                    "-".to_owned()
                } else {
                    format!("{} 📷", r.last_observation)
                };
                Row::new(vec![
                    Cell::from(r.sn.to_string()),
                    Cell::from(r.plant.clone()),
                    Cell::from(r.equipment.clone()),
                    Cell::from(r.critical_level.clone()).style(
                        Style::default()
                            .fg(theme::INDUSTRIAL_RED)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Cell::from(r.last_inspection_date.clone()),
                    Cell::from(r.planned_inspection_date.clone()),
                    Cell::from(observation).style(Style::default().fg(theme::INDUSTRIAL_RED)),
                    Cell::from(format!(" {} ", r.status)).style(status_style),
                    Cell::from(if r.remarks.is_empty() {
                        "-".to_owned()
                    } else {
                        r.remarks.clone()
                    }),
                ])
                .style(theme::table_row())
            })
            .collect();

        if rows.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  No inspection records match", theme::placeholder())),
                layout[1],
            );
        } else {
            let widths = [
                Constraint::Length(4),
                Constraint::Length(8),
                Constraint::Fill(2),
                Constraint::Length(15),
                Constraint::Length(16),
                Constraint::Length(11),
                Constraint::Fill(3),
                Constraint::Length(10),
                Constraint::Fill(1),
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::table_selected());
            let mut state = self.table_state;
            frame.render_stateful_widget(table, layout[1], &mut state);
        }

        let (from, to) = self.pagination.showing(total);
        let paging = Line::from(vec![
            Span::styled(
                format!(" Showing {from} to {to} of {total}"),
                theme::key_hint(),
            ),
            Span::styled(
                format!(
                    "   Page {} of {}",
                    self.pagination.page(),
                    self.pagination.total_pages(total).max(1)
                ),
                Style::default().fg(theme::DIM_WHITE),
            ),
        ]);
        frame.render_widget(Paragraph::new(paging), layout[2]);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("f ", theme::key_hint_key()),
            Span::styled("status  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reset  ", theme::key_hint()),
            Span::styled("n/p ", theme::key_hint_key()),
            Span::styled("page  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("details", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);

        if self.detail_open {
            if let Some(record) = self.selected_record() {
                Self::render_detail(frame, area, record);
            }
        }
    }

    fn captures_input(&self) -> bool {
        self.detail_open
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Planning"
    }
}
