//! Reusable widgets and layout helpers shared by screens and overlays.

pub mod form;
pub mod kpi;
pub mod sub_tabs;
pub mod text_field;

use ratatui::layout::Rect;
use ratatui::widgets::{Block, BorderType, Borders};

use crate::theme;

/// Rounded panel with a styled title; focused panels get the accent border.
pub fn panel(title: impl Into<String>, focused: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title.into()))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        })
}

/// A `width` x `height` rect centered in `area`, shrunk to leave a margin.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width.saturating_sub(4));
    let h = height.min(area.height.saturating_sub(2));
    let x = area.width.saturating_sub(w) / 2;
    let y = area.height.saturating_sub(h) / 2;
    Rect::new(area.x + x, area.y + y, w, h)
}

/// Clamp a length to `u16` for layout math.
pub fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let r = centered_rect(60, 20, area);
        assert_eq!(r, Rect::new(20, 10, 60, 20));

        let tiny = Rect::new(0, 0, 10, 5);
        let r = centered_rect(60, 20, tiny);
        assert!(r.width <= 6 && r.height <= 3);
    }
}
