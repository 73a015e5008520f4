//! Terminal input and heartbeats, merged into one channel.
//!
//! A background task polls crossterm's `EventStream` alongside two
//! intervals taken from `[ui]` config: a slow tick that drives the ticker
//! and toast expiry, and a fast render tick.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use scem_config::UiConfig;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// New terminal size as (cols, rows).
    Resize(u16, u16),
    Tick,
    Render,
}

/// Map a raw crossterm event onto the few the dashboard reacts to.
/// Key releases and repeats, mouse and focus events are dropped.
fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
        _ => None,
    }
}

fn heartbeat(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Handle to the background reader. Dropping it stops the task.
pub struct TerminalEvents {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl TerminalEvents {
    pub fn spawn(ui: &UiConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let mut tick = heartbeat(ui.tick_rate());
        let mut render = heartbeat(ui.render_rate());

        let token = cancel.clone();
        tokio::spawn(async move {
            let mut input = EventStream::new();
            loop {
                let event = tokio::select! {
                    () = token.cancelled() => break,
                    _ = tick.tick() => Event::Tick,
                    _ = render.tick() => Event::Render,
                    Some(Ok(raw)) = input.next() => match translate(raw) {
                        Some(event) => event,
                        None => continue,
                    },
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, cancel }
    }

    /// Next event, or `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for TerminalEvents {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn only_key_presses_pass_through() {
        assert!(matches!(translate(key(KeyEventKind::Press)), Some(Event::Key(_))));
        assert_eq!(translate(key(KeyEventKind::Release)), None);
        assert_eq!(translate(key(KeyEventKind::Repeat)), None);
    }

    #[test]
    fn resize_and_focus() {
        assert_eq!(translate(CrosstermEvent::Resize(120, 40)), Some(Event::Resize(120, 40)));
        assert_eq!(translate(CrosstermEvent::FocusLost), None);
    }
}
