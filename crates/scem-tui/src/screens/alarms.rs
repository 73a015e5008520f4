//! Alarms screen: searchable, filterable, paginated alarm log.
//!
//! The log is the archived live alarms (newest first) followed by a fixed
//! block of generated historic records.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Clear, Paragraph, Row, Table, TableState, Wrap};

use scem_core::alarm::log::{self, AlarmFilter, AlarmRecord};
use scem_core::paging::{DEFAULT_PAGE_SIZE, Pagination};
use scem_core::FieldErrors;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{Form, FormField, FormOutcome};
use crate::widgets::{centered_rect, panel};

/// Historic records generated when the screen is created.
pub const HISTORY_SIZE: usize = 50;

const EVENT_FROM: &str = "eventFrom";
const EVENT_TO: &str = "eventTo";
const RECOVERED_FROM: &str = "recoveredFrom";
const RECOVERED_TO: &str = "recoveredTo";

fn format_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format(log::FILTER_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Step through `[None, Some(options[0]), …]`, wrapping back to `None`.
fn next_option<T: Clone + PartialEq>(current: Option<&T>, options: &[T]) -> Option<T> {
    match current.and_then(|c| options.iter().position(|o| o == c)) {
        None => options.first().cloned(),
        Some(i) => options.get(i + 1).cloned(),
    }
}

pub struct AlarmsScreen {
    focused: bool,
    history: Vec<AlarmRecord>,
    combined: Vec<AlarmRecord>,
    filtered: Vec<usize>,
    filter: AlarmFilter,
    pagination: Pagination,
    table_state: TableState,
    date_form: Option<Form>,
    detail_open: bool,
}

impl AlarmsScreen {
    pub fn new() -> Self {
        Self::with_history(log::generate_history(HISTORY_SIZE, &mut rand::thread_rng()))
    }

    pub fn with_history(history: Vec<AlarmRecord>) -> Self {
        let mut screen = Self {
            focused: false,
            combined: history.clone(),
            history,
            filtered: Vec::new(),
            filter: AlarmFilter::default(),
            pagination: Pagination::new(DEFAULT_PAGE_SIZE),
            table_state: TableState::default().with_selected(Some(0)),
            date_form: None,
            detail_open: false,
        };
        screen.recompute_filtered();
        screen
    }

    fn recompute_filtered(&mut self) {
        self.filtered = self
            .combined
            .iter()
            .enumerate()
            .filter(|(_, r)| self.filter.matches(r))
            .map(|(i, _)| i)
            .collect();
    }

    /// Filters changed: recompute and go back to the first page.
    fn refilter(&mut self) {
        self.recompute_filtered();
        self.pagination.first();
        self.table_state.select(Some(0));
    }

    fn page_records(&self) -> Vec<&AlarmRecord> {
        self.pagination
            .slice(&self.filtered)
            .iter()
            .filter_map(|&i| self.combined.get(i))
            .collect()
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_record(&self) -> Option<&AlarmRecord> {
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

    fn cycle_level(&mut self) {
        let levels = log::unique_levels(&self.combined);
        self.filter.level = next_option(self.filter.level.as_ref(), &levels);
        self.refilter();
    }

    fn cycle_device(&mut self) {
        let devices = log::unique_devices(&self.combined);
        self.filter.device = next_option(self.filter.device.as_ref(), &devices);
        self.refilter();
    }

    fn open_date_form(&mut self) {
        self.date_form = Some(Form::new(
            "Date Range (YYYY/MM/DD)",
            vec![
                FormField::text(EVENT_FROM, "Event from", &format_date(self.filter.event_from)),
                FormField::text(EVENT_TO, "Event to", &format_date(self.filter.event_to)),
                FormField::text(
                    RECOVERED_FROM,
                    "Recovered from",
                    &format_date(self.filter.recovered_from),
                ),
                FormField::text(
                    RECOVERED_TO,
                    "Recovered to",
                    &format_date(self.filter.recovered_to),
                ),
            ],
        ));
    }

    /// Parse the date form. Blank fields clear that bound.
    fn submit_date_form(&mut self) {
        let Some(form) = self.date_form.as_mut() else {
            return;
        };
        let mut errors = FieldErrors::new();
        let mut parse = |key: &'static str| {
            let raw = form.text(key);
            if raw.trim().is_empty() {
                return None;
            }
            let parsed = log::parse_filter_date(&raw);
            if parsed.is_none() {
                errors.insert(key, "Use YYYY/MM/DD");
            }
            parsed
        };
        let event_from = parse(EVENT_FROM);
        let event_to = parse(EVENT_TO);
        let recovered_from = parse(RECOVERED_FROM);
        let recovered_to = parse(RECOVERED_TO);

        if !errors.is_empty() {
            form.set_errors(errors);
            return;
        }
        self.filter.event_from = event_from;
        self.filter.event_to = event_to;
        self.filter.recovered_from = recovered_from;
        self.filter.recovered_to = recovered_to;
        self.date_form = None;
        self.refilter();
    }

    fn render_filters(&self, frame: &mut Frame, area: Rect) {
        let value_style = Style::default().fg(theme::NEON_CYAN);
        let any = |s: String| if s.is_empty() { "any".to_owned() } else { s };
        let search = if self.filter.search.is_empty() {
            "-".to_owned()
        } else {
            format!("\"{}\"", self.filter.search)
        };

        let top = Line::from(vec![
            Span::styled(" Search ", theme::key_hint()),
            Span::styled(search, value_style),
            Span::styled("   Level ", theme::key_hint()),
            match self.filter.level {
                Some(level) => Span::styled(
                    level.to_string(),
                    Style::default()
                        .fg(theme::alarm_level_color(level))
                        .add_modifier(Modifier::BOLD),
                ),
                None => Span::styled("all", value_style),
            },
            Span::styled("   Device ", theme::key_hint()),
            Span::styled(
                self.filter.device.clone().unwrap_or_else(|| "all".to_owned()),
                value_style,
            ),
        ]);
        let bottom = Line::from(vec![
            Span::styled(" Event ", theme::key_hint()),
            Span::styled(
                format!(
                    "{} → {}",
                    any(format_date(self.filter.event_from)),
                    any(format_date(self.filter.event_to))
                ),
                value_style,
            ),
            Span::styled("   Recovered ", theme::key_hint()),
            Span::styled(
                format!(
                    "{} → {}",
                    any(format_date(self.filter.recovered_from)),
                    any(format_date(self.filter.recovered_to))
                ),
                value_style,
            ),
        ]);
        frame.render_widget(Paragraph::new(vec![top, bottom]), area);
    }

    fn render_detail(frame: &mut Frame, area: Rect, record: &AlarmRecord) {
        let popup = centered_rect(70, 13, area);
        frame.render_widget(Clear, popup);
        let block = panel(format!("Alarm {}", record.alarm_no), true)
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let field = |label: &'static str, value: Span<'static>| {
            Line::from(vec![
                Span::styled(format!("  {label:<16}"), Style::default().fg(theme::DIM_WHITE)),
                value,
            ])
        };
        let text = |s: &str| Span::styled(s.to_owned(), Style::default().fg(theme::NEON_CYAN));
        let lines = vec![
            Line::from(""),
            field("No.", text(&record.no)),
            field(
                "Level",
                Span::styled(
                    format!(" {} ", record.level),
                    theme::badge(theme::alarm_level_color(record.level)),
                ),
            ),
            field("Alarm No.", text(&record.alarm_no)),
            field("Message", text(&record.message)),
            field("Device", text(&record.device)),
            field("Event time", text(&record.event_time)),
            field("Recovered time", text(&record.recovered_time)),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Esc ", theme::key_hint_key()),
                Span::styled("close", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

impl Default for AlarmsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AlarmsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(form) = self.date_form.as_mut() {
            match form.handle_key(key) {
                FormOutcome::Continue => {}
                FormOutcome::Cancel => self.date_form = None,
                FormOutcome::Submit => self.submit_date_form(),
            }
            return Ok(None);
        }

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
            KeyCode::Char('z') => {
                self.pagination.cycle_page_size();
                self.table_state.select(Some(0));
            }
            KeyCode::Char('l') => self.cycle_level(),
            KeyCode::Char('d') => self.cycle_device(),
            KeyCode::Char('D') => self.open_date_form(),
            KeyCode::Char('c') => {
                self.filter.clear();
                self.refilter();
                return Ok(Some(Action::CloseSearch));
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
            Action::AlarmsUpdated(queue) => {
                self.combined = log::combine(queue.archived(), &self.history);
                self.recompute_filtered();
                self.pagination.clamp(self.filtered.len());
                let len = self.page_records().len();
                if len > 0 && self.selected_index() >= len {
                    self.table_state.select(Some(len - 1));
                }
            }
            Action::SearchInput(query) => {
                self.filter.search.clone_from(query);
                self.refilter();
            }
            Action::CloseSearch => {
                if !self.filter.search.is_empty() {
                    self.filter.search.clear();
                    self.refilter();
                }
            }
            Action::GoBack => {
                self.detail_open = false;
                self.date_form = None;
            }
            _ => {}
        }
        Ok(None)
    }

    #[allow(clippy::too_many_lines)]
    fn render(&self, frame: &mut Frame, area: Rect) {
        let total = self.filtered.len();
        let title = format!("Alarm Log ({total}/{})", self.combined.len());
        let block = panel(title, self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(2), // filters
            Constraint::Min(1),    // table
            Constraint::Length(1), // paging
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_filters(frame, layout[0]);

        let header = Row::new(
            ["NO.", "ALARM LEVEL & No. & MESSAGE", "DEVICE", "EVENT TIME", "RECOVERED TIME"]
                .into_iter()
                .map(|h| Cell::from(h).style(theme::table_header())),
        );

        let rows: Vec<Row> = self
            .page_records()
            .into_iter()
            .map(|r| {
                let message = Line::from(vec![
                    Span::styled(
                        format!(" {} ", r.level),
                        theme::badge(theme::alarm_level_color(r.level)),
                    ),
                    Span::styled(
                        format!(" {}: ", r.alarm_no),
                        Style::default().fg(theme::BORDER_GRAY),
                    ),
                    Span::styled(r.message.clone(), theme::table_row()),
                ]);
                let recovered_style = if r.is_recovered() {
                    theme::table_row()
                } else {
                    Style::default().fg(theme::AMBER)
                };
                Row::new(vec![
                    Cell::from(r.no.clone()),
                    Cell::from(message),
                    Cell::from(r.device.clone()),
                    Cell::from(r.event_time.clone()),
                    Cell::from(r.recovered_time.clone()).style(recovered_style),
                ])
                .style(theme::table_row())
            })
            .collect();

        if rows.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  No alarms match the filters", theme::placeholder())),
                layout[1],
            );
        } else {
            let widths = [
                Constraint::Length(8),
                Constraint::Fill(1),
                Constraint::Length(12),
                Constraint::Length(20),
                Constraint::Length(20),
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::table_selected());
            let mut state = self.table_state;
            frame.render_stateful_widget(table, layout[1], &mut state);
        }

        let (from, to) = self.pagination.showing(total);
        let paging = Line::from(vec![
            Span::styled(" Rows per page: ", theme::key_hint()),
            Span::styled(
                self.pagination.page_size().to_string(),
                Style::default().fg(theme::NEON_CYAN),
            ),
            Span::styled(format!("   Showing {from} to {to} of {total}"), theme::key_hint()),
            Span::styled("   PAGE ", theme::key_hint()),
            Span::styled(
                format!(
                    "{} / {}",
                    self.pagination.page(),
                    self.pagination.total_pages(total).max(1)
                ),
                Style::default().fg(theme::DIM_WHITE),
            ),
        ]);
        frame.render_widget(Paragraph::new(paging), layout[2]);

        let hints = Line::from(vec![
            Span::styled("  / ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("l ", theme::key_hint_key()),
            Span::styled("level  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("device  ", theme::key_hint()),
            Span::styled("D ", theme::key_hint_key()),
            Span::styled("dates  ", theme::key_hint()),
            Span::styled("c ", theme::key_hint_key()),
            Span::styled("clear  ", theme::key_hint()),
            Span::styled("z ", theme::key_hint_key()),
            Span::styled("rows  ", theme::key_hint()),
            Span::styled("n/p g/G ", theme::key_hint_key()),
            Span::styled("page  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("details", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);

        if let Some(form) = &self.date_form {
            form.render(frame, area);
        } else if self.detail_open {
            if let Some(record) = self.selected_record() {
                Self::render_detail(frame, area, record);
            }
        }
    }

    fn captures_input(&self) -> bool {
        self.date_form.is_some() || self.detail_open
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Alarms"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use scem_core::{AlarmAction, AlarmLevel, AlarmQueue, NewAlarm};

    fn screen() -> AlarmsScreen {
        let mut rng = StdRng::seed_from_u64(42);
        AlarmsScreen::with_history(log::generate_history(HISTORY_SIZE, &mut rng))
    }

    fn press(screen: &mut AlarmsScreen, code: KeyCode) {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    fn type_text(screen: &mut AlarmsScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    #[test]
    fn starts_with_history_on_first_page() {
        let s = screen();
        assert_eq!(s.filtered.len(), HISTORY_SIZE);
        assert_eq!(s.page_records().len(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut s = screen();
        press(&mut s, KeyCode::Char('n'));
        assert_eq!(s.pagination.page(), 2);
        press(&mut s, KeyCode::Char('l'));
        assert_eq!(s.pagination.page(), 1);
        assert!(s.filter.level.is_some());
        let level = s.filter.level.unwrap();
        assert!(s.page_records().iter().all(|r| r.level == level));
    }

    #[test]
    fn level_filter_wraps_back_to_all() {
        let mut s = screen();
        let levels = log::unique_levels(&s.combined).len();
        for _ in 0..=levels {
            press(&mut s, KeyCode::Char('l'));
        }
        assert_eq!(s.filter.level, None);
    }

    #[test]
    fn date_form_rejects_bad_dates() {
        let mut s = screen();
        press(&mut s, KeyCode::Char('D'));
        assert!(s.captures_input());
        type_text(&mut s, "12/01/2024");
        press(&mut s, KeyCode::Enter);

        let form = s.date_form.as_ref().unwrap();
        assert_eq!(form.errors().get(EVENT_FROM), Some("Use YYYY/MM/DD"));
        assert_eq!(s.filter.event_from, None);
    }

    #[test]
    fn date_form_applies_range() {
        let mut s = screen();
        press(&mut s, KeyCode::Char('D'));
        type_text(&mut s, "2024/12/10");
        press(&mut s, KeyCode::Tab);
        type_text(&mut s, "2024/12/12");
        press(&mut s, KeyCode::Enter);

        assert!(s.date_form.is_none());
        assert!(s.filter.event_from.is_some());
        assert!(s.page_records().iter().all(|r| {
            let date = &r.event_time[..10];
            ("2024/12/10"..="2024/12/12").contains(&date)
        }));
    }

    #[test]
    fn archived_alarms_lead_the_log() {
        let mut s = screen();
        let mut rng = StdRng::seed_from_u64(1);
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let mut queue = AlarmQueue::new();
        for i in 0..11 {
            queue.apply(AlarmAction::raise(
                NewAlarm::new(AlarmLevel::Warning, format!("alarm {i}"), "PUMP-07"),
                &now,
                &mut rng,
            ));
            let id = queue.current().unwrap().id.clone();
            queue.apply(AlarmAction::Acknowledge {
                id,
                at: "2025/03/01 08:00:00".into(),
            });
        }
        assert_eq!(queue.archived().len(), 1);

        s.update(&Action::AlarmsUpdated(Arc::new(queue))).unwrap();
        assert_eq!(s.combined.len(), HISTORY_SIZE + 1);
        assert_eq!(s.combined[0].message, "alarm 0");
    }

    #[test]
    fn clear_resets_everything() {
        let mut s = screen();
        s.update(&Action::SearchInput("motor".into())).unwrap();
        press(&mut s, KeyCode::Char('d'));
        press(&mut s, KeyCode::Char('c'));
        assert!(!s.filter.is_active());
        assert_eq!(s.filtered.len(), HISTORY_SIZE);
    }

    #[test]
    fn renders_log() {
        let s = screen();
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|f| s.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Alarm Log"));
        assert!(text.contains("Rows per page: 15"));
        assert!(text.contains("PAGE 1 / 4"));
    }
}
