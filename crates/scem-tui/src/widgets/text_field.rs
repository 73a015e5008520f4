//! Single-line text entry backed by `tui_input`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_input::{Input, InputRequest};

use crate::theme;

use super::to_u16;

/// Apply an editing key to `input`. Returns `false` for keys that are not
/// editing keys (Enter, Esc, Tab, arrows up/down) so callers can handle them.
pub fn handle_edit_key(input: &mut Input, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let request = match key.code {
        KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
        KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
        KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
        KeyCode::Char('e') if ctrl => InputRequest::GoToEnd,
        KeyCode::Char(c) if !ctrl => InputRequest::InsertChar(c),
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return false,
    };
    input.handle(request);
    true
}

/// Draw `input` inside a bordered box, placing the terminal cursor when
/// `active`.
pub fn render_input(frame: &mut Frame, area: Rect, title: &str, input: &Input, active: bool) {
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(if active {
            theme::title_style()
        } else {
            Style::default().fg(theme::DIM_WHITE)
        })
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if active {
            theme::border_focused()
        } else {
            theme::border_default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_inline(frame, inner, input, active);
}

/// Draw `input` on a single line with horizontal scrolling.
pub fn render_inline(frame: &mut Frame, area: Rect, input: &Input, active: bool) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let width = usize::from(area.width.saturating_sub(1)).max(1);
    let scroll = input.visual_scroll(width);
    let paragraph = Paragraph::new(Span::styled(
        input.value().to_owned(),
        Style::default().fg(theme::NEON_CYAN),
    ))
    .scroll((0, to_u16(scroll)));
    frame.render_widget(paragraph, area);

    if active {
        let offset = to_u16(input.visual_cursor().saturating_sub(scroll));
        frame.set_cursor_position((area.x + offset.min(area.width - 1), area.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_deleting() {
        let mut input = Input::default();
        for c in "pump".chars() {
            assert!(handle_edit_key(&mut input, key(KeyCode::Char(c))));
        }
        handle_edit_key(&mut input, key(KeyCode::Backspace));
        assert_eq!(input.value(), "pum");

        handle_edit_key(&mut input, key(KeyCode::Home));
        handle_edit_key(&mut input, key(KeyCode::Char('>')));
        assert_eq!(input.value(), ">pum");
    }

    #[test]
    fn ctrl_u_clears_line() {
        let mut input = Input::new("motor".into());
        handle_edit_key(
            &mut input,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert_eq!(input.value(), "");
    }

    #[test]
    fn navigation_keys_are_not_consumed() {
        let mut input = Input::default();
        assert!(!handle_edit_key(&mut input, key(KeyCode::Enter)));
        assert!(!handle_edit_key(&mut input, key(KeyCode::Esc)));
        assert!(!handle_edit_key(&mut input, key(KeyCode::Up)));
        assert!(!handle_edit_key(&mut input, key(KeyCode::Tab)));
    }
}
