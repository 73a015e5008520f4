//! Main dashboard: inspection image comparison, observations, checklist
//! summary, inspection dates and the sign-off block.

use std::collections::BTreeMap;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use scem_core::sample::IMAGE_OBSERVATIONS;
use scem_core::{Checklist, Equipment, SignOff};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::panel;

const INSPECTION_COMMENTS: &[&str] = &["More vibrations", "Noise from bearings", "Motor heated up"];

/// Wrap-around cursor over the attached image references.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ImageCursor(usize);

impl ImageCursor {
    fn step(&mut self, forward: bool, len: usize) {
        if len == 0 {
            self.0 = 0;
            return;
        }
        self.0 = if forward {
            (self.0 + 1) % len
        } else if self.0 == 0 {
            len - 1
        } else {
            self.0 - 1
        };
    }
}

pub struct DashboardScreen {
    focused: bool,
    equipment: Option<Arc<Equipment>>,
    observations: Arc<Vec<String>>,
    images: Vec<String>,
    inspection_image: ImageCursor,
    last_image: ImageCursor,
    checklist: Checklist,
    sign_off: SignOff,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            equipment: None,
            observations: Arc::new(Vec::new()),
            images: Vec::new(),
            inspection_image: ImageCursor::default(),
            last_image: ImageCursor::default(),
            checklist: Checklist::default(),
            sign_off: SignOff::default(),
        }
    }

    fn set_images(&mut self, images: &BTreeMap<u32, String>) {
        self.images = images.values().cloned().collect();
        let len = self.images.len();
        for cursor in [&mut self.inspection_image, &mut self.last_image] {
            if cursor.0 >= len {
                cursor.0 = 0;
            }
        }
    }

    fn render_image(&self, frame: &mut Frame, area: Rect, title: &str, cursor: ImageCursor, keys: &str) {
        let block = panel(format!("📷 {title}"), false).title_style(theme::heading());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        let pad = inner.height.saturating_sub(4) / 2;
        for _ in 0..pad {
            lines.push(Line::from(""));
        }
        match self.images.get(cursor.0) {
            Some(reference) => {
                lines.push(Line::from(Span::styled("▲", theme::key_hint())));
                lines.push(Line::from(vec![
                    Span::styled("◀  ", theme::key_hint()),
                    Span::styled(
                        reference.clone(),
                        Style::default()
                            .fg(theme::NEON_CYAN)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("  ▶", theme::key_hint()),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("Image {} of {}", cursor.0 + 1, self.images.len()),
                    theme::key_hint(),
                )));
                lines.push(Line::from(Span::styled("▼", theme::key_hint())));
            }
            None => {
                lines.push(Line::from(Span::styled("📷", theme::placeholder())));
                lines.push(Line::from(Span::styled("Equipment Image", theme::table_row())));
                lines.push(Line::from(Span::styled("No image available", theme::placeholder())));
            }
        }
        let body = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            body[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(keys.to_owned(), theme::key_hint()))
                .alignment(Alignment::Right),
            body[1],
        );
    }

    fn render_observations(frame: &mut Frame, area: Rect) {
        let block = panel("Observations", false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(Span::styled(
                "Based on image comparison (old and latest)",
                theme::heading(),
            )),
            Line::from(""),
        ];
        for (i, text) in IMAGE_OBSERVATIONS.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                format!("{}. {text}", i + 1),
                theme::table_row(),
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn render_checklist(&self, frame: &mut Frame, area: Rect) {
        let block = panel(
            format!(
                "Checklist ({}/{})",
                self.checklist.checked_count(),
                self.checklist.items().len()
            ),
            false,
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(Span::styled("Various parameters of equipment", theme::heading())),
            Line::from(""),
        ];
        for (i, item) in self.checklist.items().iter().enumerate() {
            let status_color = if item.is_checked {
                theme::SUCCESS_GREEN
            } else {
                theme::BORDER_GRAY
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{}. {:<24}", i + 1, item.parameter), theme::table_row()),
                Span::styled(item.status_label(), Style::default().fg(status_color)),
            ]));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn render_person_notes(&self, frame: &mut Frame, area: Rect) {
        let block = panel("Observations by person checking", false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        if self.observations.is_empty() {
            lines.push(Line::from(Span::styled(
                "• No observations recorded",
                theme::placeholder(),
            )));
        } else {
            for text in self.observations.iter() {
                lines.push(Line::from(Span::styled(format!("• {text}"), theme::table_row())));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Comments during inspection",
            theme::heading(),
        )));
        for (i, text) in INSPECTION_COMMENTS.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                format!("{}. {text}", i + 1),
                theme::table_row(),
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = panel("Inspection", self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cols = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(inner);

        let label = |s: &'static str| Span::styled(s, Style::default().fg(theme::DIM_WHITE));
        let value = |s: String| Span::styled(s, Style::default().fg(theme::NEON_CYAN));
        let date = |f: fn(&Equipment) -> &String| {
            self.equipment
                .as_ref()
                .map_or_else(|| "--/--/----".to_owned(), |e| f(e).clone())
        };
        let overall = self.sign_off.overall;
        let dates = vec![
            Line::from(vec![
                label("Last Inspection Date:      "),
                value(date(|e| &e.last_inspection_date)),
            ]),
            Line::from(vec![
                label("Scheduled Inspection Date: "),
                value(date(|e| &e.scheduled_inspection_date)),
            ]),
            Line::from(vec![
                label("Actual Inspection Date:    "),
                value(date(|e| &e.actual_inspection_date)),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Overall Equipment Status   "),
                Span::styled(
                    format!(" {overall} "),
                    theme::badge(theme::overall_status_color(overall)),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(dates), cols[0]);

        let name = |n: &Option<String>| {
            n.as_ref().map_or_else(
                || Span::styled("Select name...", theme::placeholder()),
                |n| value(n.clone()),
            )
        };
        let people = vec![
            Line::from(vec![label("Verified By   "), name(&self.sign_off.verified_by)]),
            Line::from(vec![label("Confirmed By  "), name(&self.sign_off.confirmed_by)]),
            Line::from(""),
            Line::from(vec![
                Span::styled("v ", theme::key_hint_key()),
                Span::styled("verified  ", theme::key_hint()),
                Span::styled("c ", theme::key_hint_key()),
                Span::styled("confirmed  ", theme::key_hint()),
                Span::styled("o ", theme::key_hint_key()),
                Span::styled("overall status", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(people), cols[1]);
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let len = self.images.len();
        match key.code {
            KeyCode::Char('h') => self.inspection_image.step(false, len),
            KeyCode::Char('l') => self.inspection_image.step(true, len),
            KeyCode::Char('H') => self.last_image.step(false, len),
            KeyCode::Char('L') => self.last_image.step(true, len),
            KeyCode::Char('v') => self.sign_off.cycle_verified_by(),
            KeyCode::Char('c') => self.sign_off.cycle_confirmed_by(),
            KeyCode::Char('o') => self.sign_off.cycle_overall(),
            _ => {}
        }
        Ok(None)
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
                }
            }
            Action::InterlockImagesUpdated(images) => self.set_images(images),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Percentage(38), // images
            Constraint::Min(8),         // info columns
            Constraint::Length(7),      // dates + sign-off
        ])
        .split(area);

        let images = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(rows[0]);
        self.render_image(
            frame,
            images[0],
            "Image Captured During Inspection",
            self.inspection_image,
            "h/l browse ",
        );
        self.render_image(
            frame,
            images[1],
            "Last Image Captured",
            self.last_image,
            "H/L browse ",
        );

        let info = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .split(rows[1]);
        Self::render_observations(frame, info[0]);
        self.render_checklist(frame, info[1]);
        self.render_person_notes(frame, info[2]);

        self.render_status(frame, rows[2]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Dashboard"
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
    use scem_core::OverallStatus;

    fn press(screen: &mut DashboardScreen, c: char) {
        screen
            .handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
            .unwrap();
    }

    fn render_text(screen: &DashboardScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(150, 45)).unwrap();
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn image_cursor_wraps_both_ways() {
        let mut cursor = ImageCursor::default();
        cursor.step(false, 3);
        assert_eq!(cursor, ImageCursor(2));
        cursor.step(true, 3);
        assert_eq!(cursor, ImageCursor(0));
        cursor.step(true, 0);
        assert_eq!(cursor, ImageCursor(0));
    }

    #[test]
    fn panels_browse_independently() {
        let mut screen = DashboardScreen::new();
        let images: BTreeMap<u32, String> = [(1, "a.png".to_owned()), (4, "b.png".to_owned())]
            .into_iter()
            .collect();
        screen
            .update(&Action::InterlockImagesUpdated(Arc::new(images)))
            .unwrap();
        press(&mut screen, 'l');
        assert_eq!(screen.inspection_image, ImageCursor(1));
        assert_eq!(screen.last_image, ImageCursor(0));
        press(&mut screen, 'H');
        assert_eq!(screen.last_image, ImageCursor(1));
    }

    #[test]
    fn sign_off_keys_cycle() {
        let mut screen = DashboardScreen::new();
        press(&mut screen, 'v');
        press(&mut screen, 'o');
        assert_eq!(screen.sign_off.verified_by.as_deref(), Some("John Smith"));
        assert_eq!(screen.sign_off.overall, OverallStatus::Bad);
    }

    #[test]
    fn observations_follow_selected_equipment() {
        let mut screen = DashboardScreen::new();
        let motor = scem_core::equipment::catalog().into_iter().next().unwrap();
        screen
            .update(&Action::EquipmentSelected(Arc::new(motor)))
            .unwrap();
        screen
            .update(&Action::ObservationsUpdated {
                equipment_id: "plc-001".into(),
                observations: Arc::new(vec!["ignored".into()]),
            })
            .unwrap();
        assert!(screen.observations.is_empty());
        screen
            .update(&Action::ObservationsUpdated {
                equipment_id: "motor-001".into(),
                observations: Arc::new(vec!["Oil leak at flange".into()]),
            })
            .unwrap();
        assert!(render_text(&screen).contains("Oil leak at flange"));
    }

    #[test]
    fn renders_placeholders_without_images() {
        let text = render_text(&DashboardScreen::new());
        assert!(text.contains("No image available"));
        assert!(text.contains("Select name..."));
        assert!(text.contains("Overall Equipment Status"));
    }
}
