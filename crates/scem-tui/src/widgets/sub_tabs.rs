//! Inline option bar used for in-screen filters and pane selectors.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme;

/// One line of labels with the active one bracketed and highlighted.
///
/// `prefix` is rendered first in the hint style (e.g. `"Status: "`).
pub fn render_sub_tabs<'a>(prefix: &'a str, labels: &[&'a str], active_index: usize) -> Line<'a> {
    let mut spans = Vec::with_capacity(labels.len() * 2 + 1);
    if !prefix.is_empty() {
        spans.push(Span::styled(prefix, theme::key_hint()));
    }

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::key_hint()));
        }
        if i == active_index {
            spans.push(Span::styled(
                format!("[{label}]"),
                theme::tab_inactive()
                    .fg(theme::STEEL_BLUE)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(*label, theme::tab_inactive()));
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_label_is_bracketed() {
        let line = render_sub_tabs("Status: ", &["All", "Done", "Not Done"], 1);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Status: All  [Done]  Not Done");
    }
}
