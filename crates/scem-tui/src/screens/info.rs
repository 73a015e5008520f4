//! Static information pages: system architecture and the spare tab.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::component::Component;
use crate::theme;
use crate::widgets::panel;

/// A tile in the icon row: glyph + caption.
type Tile = (&'static str, &'static str);

pub struct InfoScreen {
    id: &'static str,
    title: &'static str,
    tiles: &'static [Tile],
    body: &'static [&'static str],
    bullets: &'static [&'static str],
    focused: bool,
}

impl InfoScreen {
    pub fn architecture() -> Self {
        Self {
            id: "Architecture",
            title: "System Architecture",
            tiles: &[
                ("🖥", "Server"),
                ("🛢", "Database"),
                ("🌐", "Network"),
                ("🖵", "HMI"),
                ("⚙", "PLC"),
                ("📶", "IoT"),
            ],
            body: &["System architecture diagrams and network topology will be displayed here."],
            bullets: &[],
            focused: false,
        }
    }

    pub fn spare() -> Self {
        Self {
            id: "Spare",
            title: "Spare Tab",
            tiles: &[
                ("📦", "Spare Parts"),
                ("⚙", "Settings"),
                ("📄", "Reports"),
                ("🔧", "Maintenance"),
            ],
            body: &["This tab is reserved for future features and custom modules."],
            bullets: &[
                "Spare parts inventory",
                "Additional reports",
                "Custom configurations",
                "Extended functionality",
            ],
            focused: false,
        }
    }

    fn render_tiles(&self, frame: &mut Frame, area: Rect) {
        let constraints = vec![Constraint::Fill(1); self.tiles.len().max(1)];
        let cols = Layout::horizontal(constraints).spacing(1).split(area);
        for ((glyph, caption), col) in self.tiles.iter().zip(cols.iter()) {
            let block = panel("", false);
            let inner = block.inner(*col);
            frame.render_widget(block, *col);
            let lines = vec![
                Line::from(Span::styled(*glyph, Style::default().fg(theme::STEEL_BLUE))),
                Line::from(Span::styled(*caption, theme::table_row())),
            ];
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
        }
    }
}

impl Component for InfoScreen {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel(self.title, self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(4), // tiles
            Constraint::Length(1),
            Constraint::Min(1), // description
        ])
        .split(inner);

        self.render_tiles(frame, layout[1]);

        let mut lines = vec![Line::from(Span::styled(
            self.title,
            Style::default()
                .fg(theme::NEON_CYAN)
                .add_modifier(Modifier::BOLD),
        ))];
        lines.push(Line::from(""));
        for text in self.body {
            lines.push(Line::from(Span::styled(*text, theme::table_row())));
        }
        if !self.bullets.is_empty() {
            lines.push(Line::from(""));
            for bullet in self.bullets {
                lines.push(Line::from(Span::styled(
                    format!("• {bullet}"),
                    theme::key_hint(),
                )));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Content coming soon...",
            theme::placeholder(),
        )));

        let body = centered_column(layout[3], 70);
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            body,
        );
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        self.id
    }
}

fn centered_column(area: Rect, width: u16) -> Rect {
    let w = width.min(area.width);
    Rect::new(area.x + (area.width - w) / 2, area.y, w, area.height)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(screen: &InfoScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
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
    fn architecture_lists_components() {
        let text = render_text(&InfoScreen::architecture());
        for caption in ["Server", "Database", "Network", "HMI", "PLC", "IoT"] {
            assert!(text.contains(caption), "missing {caption}");
        }
    }

    #[test]
    fn spare_tab_lists_future_features() {
        let text = render_text(&InfoScreen::spare());
        assert!(text.contains("reserved for future features"));
        assert!(text.contains("Spare parts inventory"));
    }
}
