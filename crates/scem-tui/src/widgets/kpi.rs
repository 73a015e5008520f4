//! KPI card row describing the selected equipment.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use scem_core::{Equipment, SpareParts};

use crate::theme;

use super::panel;

/// Rows the KPI strip occupies, borders included.
pub const HEIGHT: u16 = 4;

fn card(frame: &mut Frame, area: Rect, title: &str, value: Line<'_>) {
    let block = panel(title, false);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(value).alignment(Alignment::Center), inner);
}

fn value(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default()
            .fg(theme::DIM_WHITE)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Render the KPI strip. `position` is `(index, total)` of the selected
/// record so the selector card can show where `[`/`]` will go.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    equipment: Option<&Equipment>,
    position: Option<(usize, usize)>,
) {
    let Some(eq) = equipment else {
        frame.render_widget(
            Paragraph::new(Span::styled("No equipment selected", theme::placeholder()))
                .alignment(Alignment::Center),
            area,
        );
        return;
    };

    let cols = Layout::horizontal([
        Constraint::Fill(3), // selector
        Constraint::Fill(2), // plant
        Constraint::Fill(2), // criticality
        Constraint::Fill(2), // status
        Constraint::Fill(2), // spares
        Constraint::Fill(5), // dates
    ])
    .split(area);

    let selector = match position {
        Some((idx, total)) => format!("◂ {} ▸  {}/{}", eq.display_name(), idx + 1, total),
        None => eq.display_name(),
    };
    card(
        frame,
        cols[0],
        "Equipment",
        Line::from(vec![
            Span::styled("[ ", theme::key_hint_key()),
            Span::styled(
                selector,
                Style::default()
                    .fg(theme::NEON_CYAN)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ]", theme::key_hint_key()),
        ]),
    );

    card(frame, cols[1], "Plant", value(eq.plant.clone()));

    card(
        frame,
        cols[2],
        "Criticality",
        Line::from(Span::styled(
            eq.criticality.to_string(),
            Style::default()
                .fg(theme::criticality_color(eq.criticality))
                .add_modifier(Modifier::BOLD),
        )),
    );

    card(
        frame,
        cols[3],
        "Status",
        Line::from(Span::styled(
            format!(" {} ", eq.status),
            theme::badge(theme::run_status_color(eq.status)),
        )),
    );

    let spares_color = match eq.spare_parts {
        SpareParts::Available => theme::SUCCESS_GREEN,
        SpareParts::Unavailable => theme::ERROR_RED,
    };
    card(
        frame,
        cols[4],
        "Spare Parts",
        Line::from(Span::styled(
            eq.spare_parts.to_string(),
            Style::default().fg(spares_color),
        )),
    );

    card(
        frame,
        cols[5],
        "Inspection",
        Line::from(vec![
            Span::styled("Last ", theme::key_hint()),
            Span::styled(eq.last_inspection_date.clone(), theme::table_row()),
            Span::styled("  Sched ", theme::key_hint()),
            Span::styled(eq.scheduled_inspection_date.clone(), theme::table_row()),
            Span::styled("  Actual ", theme::key_hint()),
            Span::styled(eq.actual_inspection_date.clone(), theme::table_row()),
        ]),
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn shows_selected_equipment() {
        let records = scem_core::equipment::catalog();
        let motor = records.first().unwrap();
        let mut terminal = Terminal::new(TestBackend::new(160, HEIGHT)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), Some(motor), Some((0, records.len()))))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Motor"));
        assert!(text.contains("RCM-1"));
        assert!(text.contains("Most critical"));
        assert!(text.contains("Run"));
    }

    #[test]
    fn placeholder_without_selection() {
        let mut terminal = Terminal::new(TestBackend::new(80, HEIGHT)).unwrap();
        terminal.draw(|f| render(f, f.area(), None, None)).unwrap();
        assert!(buffer_text(&terminal).contains("No equipment selected"));
    }
}
