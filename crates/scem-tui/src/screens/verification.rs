//! Equipment verification: interlock evidence, observations by the person
//! checking, the inspection checklist and sign-off.

use std::collections::BTreeMap;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap};
use tui_input::Input;

use scem_core::sample;
use scem_core::verification::OBSERVATION_MAX;
use scem_core::{Checklist, Equipment, Interlock, SignOff};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::{centered_rect, panel, sub_tabs, text_field};

/// Which list the cursor keys drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Interlocks,
    Observations,
    Checklist,
}

impl Pane {
    const ALL: [Pane; 3] = [Self::Interlocks, Self::Observations, Self::Checklist];

    fn index(self) -> usize {
        match self {
            Self::Interlocks => 0,
            Self::Observations => 1,
            Self::Checklist => 2,
        }
    }

    fn step(self, forward: bool) -> Self {
        let len = Self::ALL.len();
        let i = if forward {
            (self.index() + 1) % len
        } else {
            (self.index() + len - 1) % len
        };
        Self::ALL[i]
    }
}

/// Text being entered in the input dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditTarget {
    InterlockImage(u32),
    Observation,
    Comment(usize),
}

impl EditTarget {
    fn title(self) -> String {
        match self {
            Self::InterlockImage(id) => format!("Image reference for interlock #{id}"),
            Self::Observation => "Add observation".to_owned(),
            Self::Comment(i) => format!("Comment for checklist item {}", i + 1),
        }
    }
}

pub struct VerificationScreen {
    focused: bool,
    equipment: Option<Arc<Equipment>>,
    interlocks: Vec<Interlock>,
    images: Arc<BTreeMap<u32, String>>,
    observations: Arc<Vec<String>>,
    checklist: Checklist,
    sign_off: SignOff,
    pane: Pane,
    interlock_state: ListState,
    observation_state: ListState,
    checklist_state: TableState,
    editing: Option<(EditTarget, Input)>,
}

impl VerificationScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            equipment: None,
            interlocks: sample::interlocks(),
            images: Arc::new(BTreeMap::new()),
            observations: Arc::new(Vec::new()),
            checklist: Checklist::default(),
            sign_off: SignOff::default(),
            pane: Pane::default(),
            interlock_state: ListState::default().with_selected(Some(0)),
            observation_state: ListState::default(),
            checklist_state: TableState::default().with_selected(Some(0)),
            editing: None,
        }
    }

    fn selected_interlock(&self) -> Option<&Interlock> {
        self.interlock_state
            .selected()
            .and_then(|i| self.interlocks.get(i))
    }

    fn pane_len(&self) -> usize {
        match self.pane {
            Pane::Interlocks => self.interlocks.len(),
            Pane::Observations => self.observations.len(),
            Pane::Checklist => self.checklist.items().len(),
        }
    }

    fn pane_selected(&self) -> Option<usize> {
        match self.pane {
            Pane::Interlocks => self.interlock_state.selected(),
            Pane::Observations => self.observation_state.selected(),
            Pane::Checklist => self.checklist_state.selected(),
        }
    }

    fn pane_select(&mut self, idx: Option<usize>) {
        match self.pane {
            Pane::Interlocks => self.interlock_state.select(idx),
            Pane::Observations => self.observation_state.select(idx),
            Pane::Checklist => self.checklist_state.select(idx),
        }
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.pane_len();
        if len == 0 {
            self.pane_select(None);
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = self.pane_selected().unwrap_or(0) as isize;
        #[allow(clippy::cast_possible_wrap)]
        let next = (current + delta).clamp(0, len as isize - 1);
        self.pane_select(Some(next as usize));
    }

    fn begin_edit(&mut self, target: EditTarget) {
        let value = match target {
            EditTarget::InterlockImage(id) => self.images.get(&id).cloned().unwrap_or_default(),
            EditTarget::Observation => String::new(),
            EditTarget::Comment(i) => self
                .checklist
                .items()
                .get(i)
                .map(|item| item.comment.clone())
                .unwrap_or_default(),
        };
        self.editing = Some((target, Input::new(value)));
    }

    fn commit_edit(&mut self) -> Option<Action> {
        let (target, input) = self.editing.take()?;
        let text = input.value().to_owned();
        match target {
            EditTarget::InterlockImage(interlock_id) => Some(Action::SetInterlockImage {
                interlock_id,
                reference: text,
            }),
            EditTarget::Observation => {
                let Some(equipment) = &self.equipment else {
                    return Some(Action::Notify(Notification::warning(
                        "Select equipment before adding observations",
                    )));
                };
                Some(Action::AddObservation {
                    equipment_id: equipment.id.clone(),
                    text,
                })
            }
            EditTarget::Comment(index) => {
                self.checklist.set_comment(index, text.trim());
                None
            }
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Esc => {
                self.editing = None;
                None
            }
            _ => {
                if let Some((_, input)) = self.editing.as_mut() {
                    text_field::handle_edit_key(input, key);
                }
                None
            }
        }
    }

    fn add_key(&mut self) -> Option<Action> {
        match self.pane {
            Pane::Interlocks => {
                let id = self.selected_interlock()?.id;
                self.begin_edit(EditTarget::InterlockImage(id));
            }
            Pane::Observations => self.begin_edit(EditTarget::Observation),
            Pane::Checklist => {
                let idx = self.checklist_state.selected()?;
                self.begin_edit(EditTarget::Comment(idx));
            }
        }
        None
    }

    fn remove_key(&mut self) -> Option<Action> {
        match self.pane {
            Pane::Interlocks => {
                let id = self.selected_interlock()?.id;
                self.images.contains_key(&id).then_some(Action::SetInterlockImage {
                    interlock_id: id,
                    reference: String::new(),
                })
            }
            Pane::Observations => {
                let equipment = self.equipment.as_ref()?;
                let index = self.observation_state.selected()?;
                (index < self.observations.len()).then(|| Action::RemoveObservation {
                    equipment_id: equipment.id.clone(),
                    index,
                })
            }
            Pane::Checklist => {
                let idx = self.checklist_state.selected()?;
                self.checklist.set_comment(idx, "");
                None
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_interlock_list(&self, frame: &mut Frame, area: Rect) {
        let block = panel(
            "Critical / Important Interlock List",
            self.pane == Pane::Interlocks,
        );
        let items: Vec<ListItem> = self
            .interlocks
            .iter()
            .map(|i| {
                let marker = if self.images.contains_key(&i.id) { "📷 " } else { "   " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme::SUCCESS_GREEN)),
                    Span::styled(i.name.clone(), theme::table_row()),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(theme::table_selected());
        let mut state = self.interlock_state;
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_interlock_boxes(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).split(area);
        let cells: Vec<Rect> = rows
            .iter()
            .flat_map(|row| {
                Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1), Constraint::Fill(1)])
                    .split(*row)
                    .to_vec()
            })
            .collect();

        let selected = self.interlock_state.selected();
        for (i, (interlock, cell)) in self.interlocks.iter().zip(cells).enumerate() {
            let is_selected = self.pane == Pane::Interlocks && selected == Some(i);
            let block = panel(format!("#{} {}", interlock.id, interlock.name), is_selected);
            let inner = block.inner(cell);
            frame.render_widget(block, cell);

            let image = match self.images.get(&interlock.id) {
                Some(reference) => Line::from(vec![
                    Span::styled("📷 ", Style::default().fg(theme::SUCCESS_GREEN)),
                    Span::styled(reference.clone(), Style::default().fg(theme::NEON_CYAN)),
                ]),
                None => Line::from(Span::styled("No image attached", theme::placeholder())),
            };
            let lines = vec![
                Line::from(Span::styled(interlock.description.clone(), theme::table_row())),
                image,
            ];
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        }
    }

    fn render_dates(&self, frame: &mut Frame, area: Rect) {
        let block = panel("Inspection Dates", false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let row = |label: &'static str, value: Option<&String>| {
            Line::from(vec![
                Span::styled(label, Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    value.cloned().unwrap_or_else(|| "--/--/----".to_owned()),
                    Style::default().fg(theme::NEON_CYAN),
                ),
            ])
        };
        let eq = self.equipment.as_deref();
        let lines = vec![
            row("Last:      ", eq.map(|e| &e.last_inspection_date)),
            row("Scheduled: ", eq.map(|e| &e.scheduled_inspection_date)),
            row("Actual:    ", eq.map(|e| &e.actual_inspection_date)),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_observations(&self, frame: &mut Frame, area: Rect) {
        let block = panel(
            format!("Observations by person checking ({})", self.observations.len()),
            self.pane == Pane::Observations,
        );
        if self.observations.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No observations yet. Press a to add one.",
                    theme::placeholder(),
                )),
                inner,
            );
            return;
        }
        let items: Vec<ListItem> = self
            .observations
            .iter()
            .map(|o| ListItem::new(Span::styled(format!("• {o}"), theme::table_row())))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(theme::table_selected());
        let mut state = self.observation_state;
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_sign_off(&self, frame: &mut Frame, area: Rect) {
        let block = panel("Sign-off", false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let name = |n: &Option<String>| {
            n.as_ref().map_or_else(
                || Span::styled("Select name...", theme::placeholder()),
                |n| Span::styled(n.clone(), Style::default().fg(theme::NEON_CYAN)),
            )
        };
        let label = |s: &'static str| Span::styled(s, Style::default().fg(theme::DIM_WHITE));
        let overall = self.sign_off.overall;
        let lines = vec![
            Line::from(vec![label("Verified By:  "), name(&self.sign_off.verified_by)]),
            Line::from(vec![label("Confirmed By: "), name(&self.sign_off.confirmed_by)]),
            Line::from(vec![
                label("Overall:      "),
                Span::styled(
                    format!(" {overall} "),
                    theme::badge(theme::overall_status_color(overall)),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_checklist(&self, frame: &mut Frame, area: Rect) {
        let block = panel(
            format!(
                "Checklist ({}/{} checked)",
                self.checklist.checked_count(),
                self.checklist.items().len()
            ),
            self.pane == Pane::Checklist,
        );
        let header = Row::new(
            ["#", "Parameter", "Status", "Comment"]
                .into_iter()
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = self
            .checklist
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let (mark, color) = if item.is_checked {
                    ("[x] ", theme::SUCCESS_GREEN)
                } else {
                    ("[ ] ", theme::BORDER_GRAY)
                };
                let comment = if item.comment.is_empty() {
                    Cell::from("Add comment...").style(theme::placeholder())
                } else {
                    Cell::from(item.comment.clone())
                };
                Row::new(vec![
                    Cell::from((i + 1).to_string()),
                    Cell::from(item.parameter.clone()),
                    Cell::from(format!("{mark}{}", item.status_label()))
                        .style(Style::default().fg(color)),
                    comment,
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Length(3),
            Constraint::Fill(2),
            Constraint::Length(16),
            Constraint::Fill(3),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(if self.pane == Pane::Checklist {
                theme::table_selected()
            } else {
                theme::table_row()
            });
        let mut state = self.checklist_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_editor(&self, frame: &mut Frame, area: Rect, target: EditTarget, input: &Input) {
        let popup = centered_rect(70, 6, area);
        frame.render_widget(Clear, popup);
        let layout = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).split(popup);
        text_field::render_input(frame, layout[0], &target.title(), input, true);

        let mut hints = vec![
            Span::styled("  Enter ", theme::key_hint_key()),
            Span::styled("save  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ];
        if target == EditTarget::Observation {
            let count = input.value().trim().chars().count();
            let style = if count > OBSERVATION_MAX {
                Style::default()
                    .fg(theme::ERROR_RED)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::key_hint()
            };
            hints.push(Span::styled(format!("   {count}/{OBSERVATION_MAX}"), style));
        }
        frame.render_widget(
            Paragraph::new(Line::from(hints)).style(Style::default().bg(theme::BG_DARK)),
            layout[1],
        );
    }
}

impl Default for VerificationScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for VerificationScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing.is_some() {
            return Ok(self.handle_edit_key(key));
        }

        let action = match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.pane = self.pane.step(false);
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.pane = self.pane.step(true);
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('a') => self.add_key(),
            KeyCode::Char('x') => self.remove_key(),
            KeyCode::Char('m') | KeyCode::Enter if self.pane == Pane::Checklist => {
                if let Some(i) = self.checklist_state.selected() {
                    self.begin_edit(EditTarget::Comment(i));
                }
                None
            }
            KeyCode::Char(' ') if self.pane == Pane::Checklist => {
                if let Some(i) = self.checklist_state.selected() {
                    self.checklist.toggle(i);
                }
                None
            }
            KeyCode::Char('v') => {
                self.sign_off.cycle_verified_by();
                None
            }
            KeyCode::Char('c') => {
                self.sign_off.cycle_confirmed_by();
                None
            }
            KeyCode::Char('o') => {
                self.sign_off.cycle_overall();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::EquipmentSelected(equipment) => {
                self.equipment = Some(Arc::clone(equipment));
            }
            Action::ObservationsUpdated {
                equipment_id,
                observations,
            } => {
                if self
                    .equipment
                    .as_ref()
                    .is_none_or(|e| &e.id == equipment_id)
                {
                    self.observations = Arc::clone(observations);
                    let len = self.observations.len();
                    let selected = match self.observation_state.selected() {
                        _ if len == 0 => None,
                        Some(i) => Some(i.min(len - 1)),
                        None => Some(0),
                    };
                    self.observation_state.select(selected);
                }
            }
            Action::InterlockImagesUpdated(images) => self.images = Arc::clone(images),
            Action::GoBack => self.editing = None,
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(1),     // pane selector
            Constraint::Percentage(40), // interlocks
            Constraint::Length(6),     // dates / observations / sign-off
            Constraint::Min(7),        // checklist
            Constraint::Length(1),     // hints
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(
                " Pane: ",
                &["Interlocks", "Observations", "Checklist"],
                self.pane.index(),
            )),
            layout[0],
        );

        let top = Layout::horizontal([Constraint::Length(40), Constraint::Min(20)]).split(layout[1]);
        self.render_interlock_list(frame, top[0]);
        self.render_interlock_boxes(frame, top[1]);

        let middle = Layout::horizontal([
            Constraint::Length(30),
            Constraint::Min(30),
            Constraint::Length(36),
        ])
        .split(layout[2]);
        self.render_dates(frame, middle[0]);
        self.render_observations(frame, middle[1]);
        self.render_sign_off(frame, middle[2]);

        self.render_checklist(frame, layout[3]);

        let mut hints = vec![
            Span::styled("  ←/→ ", theme::key_hint_key()),
            Span::styled("pane  ", theme::key_hint()),
            Span::styled("j/k ", theme::key_hint_key()),
            Span::styled("select  ", theme::key_hint()),
        ];
        let pane_hints: &[(&str, &str)] = match self.pane {
            Pane::Interlocks => &[("a ", "attach image  "), ("x ", "clear image  ")],
            Pane::Observations => &[("a ", "add  "), ("x ", "remove  ")],
            Pane::Checklist => &[("Space ", "check  "), ("m ", "comment  ")],
        };
        for (k, label) in pane_hints {
            hints.push(Span::styled(*k, theme::key_hint_key()));
            hints.push(Span::styled(*label, theme::key_hint()));
        }
        hints.extend([
            Span::styled("v/c ", theme::key_hint_key()),
            Span::styled("sign-off  ", theme::key_hint()),
            Span::styled("o ", theme::key_hint_key()),
            Span::styled("status", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(Line::from(hints)), layout[4]);

        if let Some((target, input)) = &self.editing {
            self.render_editor(frame, area, *target, input);
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
        "Verification"
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

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(screen: &mut VerificationScreen, code: KeyCode) -> Option<Action> {
        screen.handle_key_event(key(code)).unwrap()
    }

    fn type_text(screen: &mut VerificationScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn with_motor() -> VerificationScreen {
        let mut screen = VerificationScreen::new();
        let motor = scem_core::equipment::catalog().into_iter().next().unwrap();
        screen
            .update(&Action::EquipmentSelected(Arc::new(motor)))
            .unwrap();
        screen
    }

    #[test]
    fn attaching_an_image_emits_action() {
        let mut screen = with_motor();
        press(&mut screen, KeyCode::Char('j'));
        press(&mut screen, KeyCode::Char('a'));
        assert!(screen.captures_input());
        type_text(&mut screen, "site/vib.png");
        let action = press(&mut screen, KeyCode::Enter);
        match action {
            Some(Action::SetInterlockImage {
                interlock_id,
                reference,
            }) => {
                assert_eq!(interlock_id, 2);
                assert_eq!(reference, "site/vib.png");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!screen.captures_input());
    }

    #[test]
    fn clearing_only_when_image_present() {
        let mut screen = with_motor();
        assert!(press(&mut screen, KeyCode::Char('x')).is_none());

        let images: BTreeMap<u32, String> = [(1, "a.png".to_owned())].into_iter().collect();
        screen
            .update(&Action::InterlockImagesUpdated(Arc::new(images)))
            .unwrap();
        match press(&mut screen, KeyCode::Char('x')) {
            Some(Action::SetInterlockImage { reference, .. }) => assert!(reference.is_empty()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn observation_add_and_remove() {
        let mut screen = with_motor();
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.pane, Pane::Observations);

        press(&mut screen, KeyCode::Char('a'));
        type_text(&mut screen, "Loose guard");
        match press(&mut screen, KeyCode::Enter) {
            Some(Action::AddObservation { equipment_id, text }) => {
                assert_eq!(equipment_id, "motor-001");
                assert_eq!(text, "Loose guard");
            }
            other => panic!("unexpected {other:?}"),
        }

        screen
            .update(&Action::ObservationsUpdated {
                equipment_id: "motor-001".into(),
                observations: Arc::new(vec!["Loose guard".into()]),
            })
            .unwrap();
        assert_eq!(screen.observation_state.selected(), Some(0));
        match press(&mut screen, KeyCode::Char('x')) {
            Some(Action::RemoveObservation { index, .. }) => assert_eq!(index, 0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn observation_without_equipment_warns() {
        let mut screen = VerificationScreen::new();
        press(&mut screen, KeyCode::Right);
        press(&mut screen, KeyCode::Char('a'));
        type_text(&mut screen, "note");
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::Notify(_))
        ));
    }

    #[test]
    fn checklist_toggle_and_comment() {
        let mut screen = with_motor();
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.pane, Pane::Checklist);
        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(screen.checklist.checked_count(), 1);

        press(&mut screen, KeyCode::Char('m'));
        type_text(&mut screen, "  warm ");
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.checklist.items()[0].comment, "warm");

        press(&mut screen, KeyCode::Char('x'));
        assert_eq!(screen.checklist.items()[0].comment, "");
    }

    #[test]
    fn escape_cancels_editor() {
        let mut screen = with_motor();
        press(&mut screen, KeyCode::Char('a'));
        type_text(&mut screen, "zzz");
        assert!(press(&mut screen, KeyCode::Esc).is_none());
        assert!(!screen.captures_input());
    }

    #[test]
    fn renders_all_sections() {
        let screen = with_motor();
        let mut terminal = Terminal::new(TestBackend::new(160, 45)).unwrap();
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("High Temperature"));
        assert!(text.contains("Observations by person checking"));
        assert!(text.contains("Temperature of Bearing"));
        assert!(text.contains("11/28/2025"));
    }
}
