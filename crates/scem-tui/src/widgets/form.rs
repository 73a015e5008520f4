//! Modal form: a vertical list of labelled fields with inline errors.
//!
//! Fields are text inputs, option pickers or on/off toggles. The form
//! owns navigation between fields; the caller reads values back by key
//! once [`FormOutcome::Submit`] is returned and feeds validation errors
//! in with [`Form::set_errors`].

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use tui_input::Input;

use scem_core::FieldErrors;

use crate::theme;

use super::{centered_rect, panel, text_field, to_u16};

const LABEL_WIDTH: u16 = 20;

#[derive(Debug, Clone)]
pub enum FieldKind {
    Text(Input),
    Choice { options: Vec<String>, index: usize },
    Toggle(bool),
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub visible: bool,
}

impl FormField {
    pub fn text(key: &'static str, label: &'static str, value: &str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text(Input::new(value.to_owned())),
            visible: true,
        }
    }

    /// Picker over `options`, starting at `selected` if present, else the
    /// first option.
    pub fn choice<S: AsRef<str>>(
        key: &'static str,
        label: &'static str,
        options: &[S],
        selected: &str,
    ) -> Self {
        let options: Vec<String> = options.iter().map(|o| o.as_ref().to_owned()).collect();
        let index = options.iter().position(|o| o == selected).unwrap_or(0);
        Self {
            key,
            label,
            kind: FieldKind::Choice { options, index },
            visible: true,
        }
    }

    pub fn toggle(key: &'static str, label: &'static str, on: bool) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Toggle(on),
            visible: true,
        }
    }

    fn display_value(&self) -> String {
        match &self.kind {
            FieldKind::Text(input) => input.value().to_owned(),
            FieldKind::Choice { options, index } => {
                format!("◂ {} ▸", options.get(*index).map_or("", String::as_str))
            }
            FieldKind::Toggle(on) => {
                if *on {
                    "[x] Yes".to_owned()
                } else {
                    "[ ] No".to_owned()
                }
            }
        }
    }
}

/// What the caller should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Continue,
    Submit,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct Form {
    title: String,
    fields: Vec<FormField>,
    active: usize,
    errors: FieldErrors,
}

impl Form {
    pub fn new(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            fields,
            active: 0,
            errors: FieldErrors::new(),
        }
    }

    pub fn active_key(&self) -> Option<&'static str> {
        self.fields.get(self.active).map(|f| f.key)
    }

    fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Current text of a text field (empty for other kinds).
    pub fn text(&self, key: &str) -> String {
        match self.field(key).map(|f| &f.kind) {
            Some(FieldKind::Text(input)) => input.value().to_owned(),
            _ => String::new(),
        }
    }

    /// Selected option of a choice field.
    pub fn choice(&self, key: &str) -> Option<&str> {
        match self.field(key).map(|f| &f.kind) {
            Some(FieldKind::Choice { options, index }) => options.get(*index).map(String::as_str),
            _ => None,
        }
    }

    pub fn toggle(&self, key: &str) -> bool {
        matches!(self.field(key).map(|f| &f.kind), Some(FieldKind::Toggle(true)))
    }

    /// Show or hide a field. Hidden fields are skipped by navigation and
    /// the active field moves off a field that becomes hidden.
    pub fn set_visible(&mut self, key: &str, visible: bool) {
        if let Some(f) = self.fields.iter_mut().find(|f| f.key == key) {
            f.visible = visible;
        }
        if !self.fields.get(self.active).is_some_and(|f| f.visible) {
            self.step(-1);
        }
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn step(&mut self, delta: isize) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        let mut idx = self.active;
        for _ in 0..len {
            idx = if delta >= 0 {
                (idx + 1) % len
            } else {
                (idx + len - 1) % len
            };
            if self.fields.get(idx).is_some_and(|f| f.visible) {
                self.active = idx;
                return;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => return FormOutcome::Cancel,
            KeyCode::Enter => return FormOutcome::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.step(1);
                return FormOutcome::Continue;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.step(-1);
                return FormOutcome::Continue;
            }
            _ => {}
        }

        let Some(field) = self.fields.get_mut(self.active) else {
            return FormOutcome::Continue;
        };
        match &mut field.kind {
            FieldKind::Text(input) => {
                text_field::handle_edit_key(input, key);
            }
            FieldKind::Choice { options, index } => {
                let len = options.len().max(1);
                match key.code {
                    KeyCode::Right | KeyCode::Char(' ' | 'l') => *index = (*index + 1) % len,
                    KeyCode::Left | KeyCode::Char('h') => *index = (*index + len - 1) % len,
                    _ => {}
                }
            }
            FieldKind::Toggle(on) => {
                if matches!(key.code, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) {
                    *on = !*on;
                }
            }
        }
        FormOutcome::Continue
    }

    fn visible_fields(&self) -> impl Iterator<Item = (usize, &FormField)> {
        self.fields.iter().enumerate().filter(|(_, f)| f.visible)
    }

    fn height(&self) -> u16 {
        let rows: usize = self
            .visible_fields()
            .map(|(_, f)| 1 + usize::from(self.errors.get(f.key).is_some()))
            .sum();
        // borders + blank line + hints
        to_u16(rows).saturating_add(4)
    }

    /// Draw the form centered over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(72, self.height(), area);
        frame.render_widget(Clear, popup);
        let block = panel(self.title.as_str(), true).style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut constraints = Vec::new();
        for (_, f) in self.visible_fields() {
            constraints.push(Constraint::Length(1));
            if self.errors.get(f.key).is_some() {
                constraints.push(Constraint::Length(1));
            }
        }
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(inner);

        let mut row = 0;
        for (i, f) in self.visible_fields() {
            let Some(&line_area) = rows.get(row) else {
                break;
            };
            row += 1;
            let active = i == self.active;
            let cols = Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)])
                .split(line_area);

            let marker = if active { "▸ " } else { "  " };
            let label_style = if active {
                Style::default()
                    .fg(theme::NEON_CYAN)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::DIM_WHITE)
            };
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(marker, theme::key_hint_key()),
                    Span::styled(f.label, label_style),
                ])),
                cols[0],
            );

            match &f.kind {
                FieldKind::Text(input) => {
                    if active {
                        frame.render_widget(
                            Paragraph::new("").style(Style::default().bg(theme::BG_HIGHLIGHT)),
                            cols[1],
                        );
                    }
                    text_field::render_inline(frame, cols[1], input, active);
                }
                _ => {
                    let style = if active {
                        Style::default().fg(theme::STEEL_BLUE).bg(theme::BG_HIGHLIGHT)
                    } else {
                        Style::default().fg(theme::NEON_CYAN)
                    };
                    frame.render_widget(
                        Paragraph::new(Span::styled(f.display_value(), style)),
                        cols[1],
                    );
                }
            }

            if let Some(message) = self.errors.get(f.key) {
                if let Some(&err_area) = rows.get(row) {
                    row += 1;
                    frame.render_widget(
                        Paragraph::new(Line::from(vec![
                            Span::raw(" ".repeat(usize::from(LABEL_WIDTH))),
                            Span::styled(
                                format!("✗ {message}"),
                                Style::default().fg(theme::ERROR_RED),
                            ),
                        ])),
                        err_area,
                    );
                }
            }
        }

        if let Some(&hint_area) = rows.last() {
            let hints = Line::from(vec![
                Span::styled("  Tab ", theme::key_hint_key()),
                Span::styled("next  ", theme::key_hint()),
                Span::styled("←/→ ", theme::key_hint_key()),
                Span::styled("choose  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("save  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(hints), hint_area);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample() -> Form {
        Form::new(
            "Add Parameter",
            vec![
                FormField::text("name", "Name", ""),
                FormField::choice("dataType", "Data Type", &["Numeric", "Boolean"], "Numeric"),
                FormField::text("lower", "Lower", ""),
                FormField::toggle("monitoring", "Monitoring", true),
            ],
        )
    }

    #[test]
    fn typing_goes_to_active_text_field() {
        let mut form = sample();
        for c in "Speed".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(form.text("name"), "Speed");
    }

    #[test]
    fn choices_and_toggles_cycle() {
        let mut form = sample();
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.active_key(), Some("dataType"));
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.choice("dataType"), Some("Boolean"));
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.choice("dataType"), Some("Numeric"));

        form.handle_key(key(KeyCode::Up));
        form.handle_key(key(KeyCode::Up));
        assert_eq!(form.active_key(), Some("monitoring"));
        form.handle_key(key(KeyCode::Char(' ')));
        assert!(!form.toggle("monitoring"));
    }

    #[test]
    fn hidden_fields_are_skipped() {
        let mut form = sample();
        form.set_visible("lower", false);
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.active_key(), Some("monitoring"));
    }

    #[test]
    fn enter_and_esc_end_the_form() {
        let mut form = sample();
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Submit);
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormOutcome::Cancel);
    }

    #[test]
    fn renders_inline_errors() {
        let mut form = sample();
        let mut errors = FieldErrors::new();
        errors.insert("name", "Name is required");
        form.set_errors(errors);

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| form.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Add Parameter"));
        assert!(text.contains("Name is required"));
    }
}
