//! Application core: event loop, shared dashboard state, action dispatch.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use scem_config::Config;
use scem_core::alarm::generator;
use scem_core::model::ALARM_TIME_FORMAT;
use scem_core::{
    Alarm, AlarmAction, AlarmQueue, EquipmentDirectory, KvStore, NewAlarm, PeriodicTask,
    SelectionChange, equipment, sample, trend, verification,
};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, TerminalEvents};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::{centered_rect, kpi, to_u16};

const CLOCK_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";
const TICKER_SEPARATOR: &str = "   ◆   ";
const FOOTER_ROWS: usize = 5;
const TOAST_SECS: u64 = 3;

fn clock_now() -> String {
    Local::now().format(CLOCK_FORMAT).to_string()
}

fn alarm_timestamp() -> String {
    Local::now().format(ALARM_TIME_FORMAT).to_string()
}

/// Top-level application state and event loop.
pub struct App {
    config: Config,
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    search_active: bool,
    search_query: String,
    /// Terminal size for responsive layout.
    terminal_size: (u16, u16),
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,

    // ── Shared dashboard state ────────────────────────────────────
    alarms: AlarmQueue,
    directory: EquipmentDirectory,
    store: Box<dyn KvStore>,
    rng: StdRng,
    clock: String,
    ticker_offset: usize,
    footer_expanded: bool,

    clock_task: PeriodicTask,
    trend_task: PeriodicTask,
    generator_task: PeriodicTask,
}

impl App {
    /// Create the app with every screen. The equipment selection is
    /// restored from `store`.
    pub fn new(config: Config, store: Box<dyn KvStore>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();
        let directory = EquipmentDirectory::restore(equipment::catalog(), store.as_ref());

        Self {
            config,
            active_screen: ScreenId::default(),
            screens,
            running: true,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            pending_confirm: None,
            notification: None,
            alarms: AlarmQueue::new(),
            directory,
            store,
            rng: StdRng::from_entropy(),
            clock: clock_now(),
            ticker_offset: 0,
            footer_expanded: false,
            clock_task: PeriodicTask::new("clock"),
            trend_task: PeriodicTask::new("trend"),
            generator_task: PeriodicTask::new("alarm-generator"),
        }
    }

    /// Initialize screens and push the initial state to them.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }

        self.publish_selection()?;
        self.publish_alarms()?;
        self.publish_interlock_images()?;
        self.action_tx.send(Action::RefreshTrend)?;
        Ok(())
    }

    /// Timers only send actions; all state changes happen in the loop.
    fn start_timers(&mut self) {
        let tx = self.action_tx.clone();
        self.clock_task.start(self.config.ui.clock_interval(), move || {
            let _ = tx.send(Action::ClockTick);
        });

        let tx = self.action_tx.clone();
        self.trend_task
            .start(self.config.monitoring.chart_refresh(), move || {
                let _ = tx.send(Action::RefreshTrend);
            });

        if self.config.alarms.demo_generator {
            let tx = self.action_tx.clone();
            self.generator_task
                .start(self.config.alarms.generator_interval(), move || {
                    let _ = tx.send(Action::GenerateDemoAlarm);
                });
        }
    }

    fn stop_timers(&mut self) {
        self.clock_task.stop();
        self.trend_task.stop();
        self.generator_task.stop();
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;
        self.start_timers();

        let mut events = TerminalEvents::spawn(&self.config.ui);

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.stop_timers();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────

    /// Map a key event to an action. Modal layers are checked first,
    /// then global keys, then the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        // The alarm popup is modal until everything is acknowledged.
        if let Some(current) = self.alarms.current() {
            return Ok(match key.code {
                KeyCode::Enter | KeyCode::Char('a') => {
                    Some(Action::AcknowledgeAlarm(current.id.clone()))
                }
                KeyCode::Char('A') if self.alarms.remaining_pending() > 0 => {
                    Some(Action::AcknowledgeAllAlarms)
                }
                _ => None,
            });
        }

        if self.search_active {
            return match key.code {
                KeyCode::Esc => {
                    self.search_query.clear();
                    Ok(Some(Action::CloseSearch))
                }
                KeyCode::Enter => Ok(Some(Action::SearchSubmit)),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Open forms and text fields see every key.
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if screen.captures_input() {
                return screen.handle_key_event(key);
            }
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                return Ok(Some(Action::ToggleHelp));
            }
            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('F')) => {
                return Ok(Some(Action::ToggleFooter));
            }
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => return Ok(Some(Action::RaiseTestAlarm)),
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => return Ok(Some(Action::RaiseTestBurst)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='8')) => {
                let n = u8::try_from(c).map_or(0, |b| b - b'0');
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (_, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            (KeyModifiers::NONE, KeyCode::Char('[')) if self.active_screen.shows_kpi() => {
                return Ok(Some(Action::CycleEquipment(-1)));
            }
            (KeyModifiers::NONE, KeyCode::Char(']')) if self.active_screen.shows_kpi() => {
                return Ok(Some(Action::CycleEquipment(1)));
            }

            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    // ── Dispatch ─────────────────────────────────────────────────

    /// Process a single action: update app state and propagate to screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::Resize(w, h) => self.terminal_size = (*w, *h),
            Action::Render => {}

            Action::Tick => {
                if let Some((_, created)) = &self.notification {
                    if created.elapsed().as_secs() >= TOAST_SECS {
                        self.notification = None;
                    }
                }
                self.ticker_offset = self.ticker_offset.wrapping_add(1);
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if self.search_active {
                        self.close_search()?;
                    }
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::ToggleFooter => self.footer_expanded = !self.footer_expanded,

            Action::OpenSearch => {
                self.search_active = true;
                self.search_query.clear();
            }
            Action::CloseSearch => self.close_search()?,
            Action::SearchSubmit => self.search_active = false,

            // ── Timers ───────────────────────────────────────────
            Action::ClockTick => self.clock = clock_now(),
            Action::RefreshTrend => {
                let snapshot = trend::generate(
                    &Local::now(),
                    self.config.monitoring.history_points,
                    &mut self.rng,
                );
                self.action_tx
                    .send(Action::TrendUpdated(Arc::new(snapshot)))?;
            }
            Action::GenerateDemoAlarm => {
                let alarm = generator::random_alarm(&mut self.rng);
                self.raise_alarm(alarm)?;
            }

            // ── Alarms ───────────────────────────────────────────
            Action::RaiseAlarm(alarm) => self.raise_alarm(alarm.clone())?,
            Action::RaiseTestAlarm => {
                let alarm = generator::random_test_alarm(&mut self.rng);
                self.raise_alarm(alarm)?;
            }
            Action::RaiseTestBurst => {
                for alarm in generator::test_burst(&mut self.rng) {
                    self.raise_alarm(alarm)?;
                }
            }
            Action::AcknowledgeAlarm(id) => {
                let changed = self.alarms.apply(AlarmAction::Acknowledge {
                    id: id.clone(),
                    at: alarm_timestamp(),
                });
                if changed {
                    info!(id = %id, "alarm acknowledged");
                    self.publish_alarms()?;
                }
            }
            Action::AcknowledgeAllAlarms => {
                let count = self.alarms.pending().len();
                if self.alarms.apply(AlarmAction::AcknowledgeAll {
                    at: alarm_timestamp(),
                }) {
                    info!(count, "all alarms acknowledged");
                    self.publish_alarms()?;
                }
            }

            // ── Equipment selection ──────────────────────────────
            Action::CycleEquipment(offset) => {
                if self.directory.cycle(*offset, self.store.as_mut()) == SelectionChange::Changed {
                    self.publish_selection()?;
                }
            }
            Action::SelectEquipment(id) => {
                if self
                    .directory
                    .handle_equipment_change(id, self.store.as_mut())
                    == SelectionChange::Changed
                {
                    self.publish_selection()?;
                }
            }

            // ── Persisted notes ──────────────────────────────────
            Action::AddObservation { equipment_id, text } => {
                match verification::add_observation(self.store.as_mut(), equipment_id, text) {
                    Ok(list) => {
                        self.publish_observations(equipment_id, list)?;
                        self.notify(Notification::success("Observation added"))?;
                    }
                    Err(e) => {
                        warn!(error = %e, equipment_id, "observation rejected");
                        self.notify(Notification::error(e.to_string()))?;
                    }
                }
            }
            Action::RemoveObservation {
                equipment_id,
                index,
            } => match verification::remove_observation(self.store.as_mut(), equipment_id, *index)
            {
                Ok(list) => {
                    self.publish_observations(equipment_id, list)?;
                    self.notify(Notification::info("Observation removed"))?;
                }
                Err(e) => self.notify(Notification::error(e.to_string()))?,
            },
            Action::SetInterlockImage {
                interlock_id,
                reference,
            } => {
                match verification::set_interlock_image(
                    self.store.as_mut(),
                    *interlock_id,
                    reference,
                ) {
                    Ok(()) => {
                        self.publish_interlock_images()?;
                        let msg = if reference.trim().is_empty() {
                            "Interlock image cleared"
                        } else {
                            "Interlock image attached"
                        };
                        self.notify(Notification::success(msg))?;
                    }
                    Err(e) => self.notify(Notification::error(e.to_string()))?,
                }
            }

            // ── Confirmation ─────────────────────────────────────
            Action::ShowConfirm(confirm) => self.pending_confirm = Some(confirm.clone()),
            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.action_tx.send(Action::Confirmed(confirm))?;
                }
            }
            Action::ConfirmNo => self.pending_confirm = None,

            // ── Notifications ────────────────────────────────────
            Action::Notify(n) => self.notification = Some((n.clone(), Instant::now())),
            Action::DismissNotification => self.notification = None,

            // Data updates go to ALL screens so they stay in sync
            broadcast if broadcast.is_broadcast() => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(broadcast)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            // Everything else goes to the active screen only
            other => self.update_active(other)?,
        }
        Ok(())
    }

    fn update_active(&mut self, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn close_search(&mut self) -> Result<()> {
        self.search_active = false;
        self.search_query.clear();
        self.update_active(&Action::CloseSearch)
    }

    fn notify(&self, notification: Notification) -> Result<()> {
        self.action_tx.send(Action::Notify(notification))?;
        Ok(())
    }

    fn raise_alarm(&mut self, alarm: NewAlarm) -> Result<()> {
        let action = AlarmAction::raise(alarm, &Local::now(), &mut self.rng);
        if let AlarmAction::Raise(raised) = &action {
            info!(level = %raised.level, device = %raised.device, "alarm raised");
        }
        self.alarms.apply(action);
        self.publish_alarms()
    }

    fn publish_alarms(&self) -> Result<()> {
        self.action_tx
            .send(Action::AlarmsUpdated(Arc::new(self.alarms.clone())))?;
        Ok(())
    }

    fn publish_selection(&self) -> Result<()> {
        let Some(selected) = self.directory.selected() else {
            return Ok(());
        };
        self.action_tx
            .send(Action::EquipmentSelected(Arc::new(selected.clone())))?;
        let list = verification::observations(self.store.as_ref(), &selected.id);
        self.publish_observations(&selected.id, list)
    }

    fn publish_observations(&self, equipment_id: &str, list: Vec<String>) -> Result<()> {
        self.action_tx.send(Action::ObservationsUpdated {
            equipment_id: equipment_id.to_owned(),
            observations: Arc::new(list),
        })?;
        Ok(())
    }

    fn publish_interlock_images(&self) -> Result<()> {
        let images: BTreeMap<u32, String> = sample::interlocks()
            .iter()
            .filter_map(|i| {
                verification::interlock_image(self.store.as_ref(), i.id).map(|r| (i.id, r))
            })
            .collect();
        self.action_tx
            .send(Action::InterlockImagesUpdated(Arc::new(images)))?;
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let show_kpi = self.active_screen.shows_kpi();

        let layout = Layout::vertical([
            Constraint::Length(1),                                   // header
            Constraint::Length(1),                                   // ticker
            Constraint::Length(if show_kpi { kpi::HEIGHT } else { 0 }), // KPI cards
            Constraint::Min(1),                                      // screen content
            Constraint::Length(self.footer_height()),                // footer
            Constraint::Length(1),                                   // tab bar
            Constraint::Length(1),                                   // status bar
        ])
        .split(area);

        self.render_header(frame, layout[0]);
        self.render_ticker(frame, layout[1]);
        if show_kpi {
            let position = self
                .directory
                .selected_index()
                .map(|i| (i, self.directory.records().len()));
            kpi::render(frame, layout[2], self.directory.selected(), position);
        }
        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[3]);
        }
        self.render_footer(frame, layout[4]);
        self.render_tab_bar(frame, layout[5]);
        self.render_status_bar(frame, layout[6]);

        // Overlays (last = topmost)
        if let Some((ref notif, _)) = self.notification {
            self.render_notification(frame, area, notif);
        }
        if let Some(ref confirm) = self.pending_confirm {
            self.render_confirm_dialog(frame, area, confirm);
        }
        if let Some(alarm) = self.alarms.current() {
            self.render_alarm_popup(frame, area, alarm);
        }
        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    fn footer_height(&self) -> u16 {
        if self.footer_expanded {
            let rows = self.alarms.footer_alarms().len().clamp(1, FOOTER_ROWS);
            to_u16(rows).saturating_add(2)
        } else {
            1
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let clock_width = to_u16(self.clock.chars().count()).saturating_add(2);
        let cols = Layout::horizontal([Constraint::Min(10), Constraint::Length(clock_width)])
            .split(area);

        let title = Line::from(vec![
            Span::styled(" sCEM ", theme::badge(theme::INDUSTRIAL_RED)),
            Span::styled(
                " Smart Critical Equipment Monitoring",
                theme::title_style(),
            ),
            Span::styled(" │ ", theme::key_hint()),
            Span::styled(
                self.active_screen.title(),
                Style::default().fg(theme::DIM_WHITE),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), cols[0]);
        frame.render_widget(
            Paragraph::new(Span::styled(
                self.clock.as_str(),
                Style::default().fg(theme::NEON_CYAN),
            ))
            .alignment(Alignment::Right),
            cols[1],
        );
    }

    fn render_ticker(&self, frame: &mut Frame, area: Rect) {
        let text: Vec<char> = sample::TICKER_MESSAGES
            .iter()
            .flat_map(|m| m.chars().chain(TICKER_SEPARATOR.chars()))
            .collect();
        if text.is_empty() {
            return;
        }
        let start = self.ticker_offset % text.len();
        let visible: String = text
            .iter()
            .cycle()
            .skip(start)
            .take(usize::from(area.width))
            .collect();
        frame.render_widget(
            Paragraph::new(Span::styled(visible, Style::default().fg(theme::AMBER)))
                .style(Style::default().bg(theme::BG_HIGHLIGHT)),
            area,
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let acked = self.alarms.footer_alarms();
        if !self.footer_expanded {
            let mut spans = vec![
                Span::styled(" ▲ F ", theme::key_hint_key()),
                Span::styled(
                    format!("Acknowledged alarms ({}) ", acked.len()),
                    Style::default().fg(theme::DIM_WHITE),
                ),
            ];
            match acked.first() {
                Some(latest) => spans.extend(footer_alarm_spans(latest)),
                None => spans.push(Span::styled(
                    "│ No acknowledged alarms",
                    theme::placeholder(),
                )),
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), area);
            return;
        }

        let block = Block::default()
            .title(format!(" ▼ Acknowledged alarms ({}) ", acked.len()))
            .title_style(theme::title_style())
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = if acked.is_empty() {
            vec![Line::from(Span::styled(
                " No acknowledged alarms",
                theme::placeholder(),
            ))]
        } else {
            acked
                .iter()
                .take(FOOTER_ROWS)
                .map(|a| Line::from(footer_alarm_spans(a)))
                .collect()
        };
        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Render the bottom tab bar showing all 8 screens.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let narrow = self.terminal_size.0 < 110;
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                let label = if narrow { id.label_short() } else { id.label() };
                Line::from(Span::styled(format!(" {} {label} ", id.number()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );
        frame.render_widget(tabs, area);
    }

    /// Render the bottom status bar with alarm state and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.search_active {
            let line = Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme::CORAL)),
                Span::styled(&self.search_query, Style::default().fg(theme::NEON_CYAN)),
                Span::styled("█", Style::default().fg(theme::NEON_CYAN)),
                Span::styled("  Esc cancel  Enter keep", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let pending = self.alarms.pending().len();
        let alarm_indicator = if pending == 0 {
            Span::styled("● no pending alarms", Style::default().fg(theme::SUCCESS_GREEN))
        } else {
            Span::styled(
                format!("● {pending} pending alarm(s)"),
                Style::default().fg(theme::ERROR_RED),
            )
        };
        let equipment = self
            .directory
            .selected()
            .map_or_else(|| "no equipment".to_owned(), |e| e.display_name());

        let line = Line::from(vec![
            Span::raw(" "),
            alarm_indicator,
            Span::styled(format!(" │ {equipment}"), Style::default().fg(theme::DIM_WHITE)),
            Span::styled(
                " │ ? help  / search  [ ] equipment  F footer  ^T test alarm  ^B burst  q quit",
                theme::key_hint(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Level-colored card for the newest pending alarm.
    fn render_alarm_popup(&self, frame: &mut Frame, area: Rect, alarm: &Alarm) {
        let remaining = self.alarms.remaining_pending();
        let color = theme::alarm_level_color(alarm.level);
        let popup = centered_rect(64, 11, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" ⚠ {} ALARM ", alarm.level))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let label = |s: &'static str| Span::styled(s, Style::default().fg(theme::BORDER_GRAY));
        let value = |s: String| Span::styled(s, Style::default().fg(theme::DIM_WHITE));
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", alarm.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![label("  Device:    "), value(alarm.device.clone())]),
            Line::from(vec![label("  Time:      "), value(alarm.event_time.clone())]),
            Line::from(vec![label("  Alarm No:  "), value(alarm.id.short_number())]),
        ];
        lines.push(if remaining > 0 {
            Line::from(Span::styled(
                format!("  +{remaining} more pending"),
                Style::default().fg(theme::AMBER),
            ))
        } else {
            Line::from("")
        });

        let mut hints = vec![
            Span::styled("  Enter ", theme::key_hint_key()),
            Span::styled("acknowledge  ", theme::key_hint()),
        ];
        if remaining > 0 {
            hints.push(Span::styled("A ", theme::key_hint_key()));
            hints.push(Span::styled("acknowledge all", theme::key_hint()));
        }
        lines.push(Line::from(hints));
        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Render the help overlay centered on screen.
    #[allow(clippy::unused_self)]
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_area = centered_rect(62, 24, area);
        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let heading = |s: &'static str| {
            Line::from(Span::styled(s, Style::default().fg(theme::NEON_CYAN)))
        };
        let row = |k: &'static str, v: &'static str| {
            Line::from(vec![
                Span::styled(k, theme::key_hint_key()),
                Span::styled(v, theme::key_hint()),
            ])
        };
        let help_text = vec![
            Line::from(""),
            heading("  Navigation"),
            Line::from(Span::styled("  ─────────", theme::key_hint())),
            row("  1-8       ", "Jump to screen"),
            row("  Tab       ", "Next screen (Shift+Tab previous)"),
            row("  j/k ↑/↓   ", "Move up/down"),
            row("  Enter     ", "Select / open"),
            row("  Esc       ", "Back / close"),
            row("  [ ]       ", "Previous / next equipment"),
            Line::from(""),
            heading("  Alarms"),
            Line::from(Span::styled("  ──────", theme::key_hint())),
            row("  Enter / a ", "Acknowledge shown alarm"),
            row("  A         ", "Acknowledge all pending"),
            row("  Ctrl+T    ", "Raise a test alarm"),
            row("  Ctrl+B    ", "Raise a burst of test alarms"),
            row("  F         ", "Expand / collapse footer"),
            Line::from(""),
            heading("  Global"),
            Line::from(Span::styled("  ──────", theme::key_hint())),
            Line::from(vec![
                Span::styled("  /         ", theme::key_hint_key()),
                Span::styled("Search              ", theme::key_hint()),
                Span::styled("q  ", theme::key_hint_key()),
                Span::styled("Quit", theme::key_hint()),
            ]),
            Line::from(Span::styled(
                "                         Esc or ? to close",
                theme::key_hint(),
            )),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Render a centered confirmation dialog.
    #[allow(clippy::unused_self)]
    fn render_confirm_dialog(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let dialog_area = centered_rect(56, 5, area);
        frame.render_widget(Clear, dialog_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::AMBER));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!("  {confirm}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Render a notification toast in the bottom-right corner.
    #[allow(clippy::unused_self)]
    fn render_notification(&self, frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = to_u16(notif.message.chars().count());
        let width = msg_len
            .saturating_add(6)
            .clamp(20, 60)
            .min(area.width);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
            NotificationLevel::Error => (theme::ERROR_RED, "✗"),
            NotificationLevel::Warning => (theme::AMBER, "!"),
            NotificationLevel::Info => (theme::NEON_CYAN, "·"),
        };

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(&notif.message, Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

fn footer_alarm_spans(alarm: &Alarm) -> Vec<Span<'static>> {
    vec![
        Span::styled("│ ", theme::key_hint()),
        Span::styled(
            format!("{:<8} ", alarm.level),
            Style::default()
                .fg(theme::alarm_level_color(alarm.level))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(alarm.message.clone(), Style::default().fg(theme::DIM_WHITE)),
        Span::styled(format!("  {}", alarm.device), theme::placeholder()),
        Span::styled(
            format!(
                "  ack {}",
                alarm.acknowledged_time.as_deref().unwrap_or("-")
            ),
            theme::key_hint(),
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use scem_core::store::keys;
    use scem_core::{AlarmLevel, MemoryStore};

    fn app() -> App {
        App::new(Config::default(), Box::new(MemoryStore::new()))
    }

    fn drain(app: &mut App) -> Vec<Action> {
        let mut out = Vec::new();
        while let Ok(action) = app.action_rx.try_recv() {
            out.push(action);
        }
        out
    }

    /// Process `action` and everything it triggers.
    fn run(app: &mut App, action: Action) -> Vec<Action> {
        let mut seen = Vec::new();
        app.process_action(&action).unwrap();
        loop {
            let batch = drain(app);
            if batch.is_empty() {
                break;
            }
            for a in batch {
                app.process_action(&a).unwrap();
                seen.push(a);
            }
        }
        seen
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn restores_first_equipment_without_saved_state() {
        let app = app();
        assert_eq!(app.directory.selected().unwrap().id, "motor-001");
    }

    #[test]
    fn raised_alarms_are_lifo_and_broadcast() {
        let mut app = app();
        run(&mut app, Action::RaiseAlarm(NewAlarm::new(AlarmLevel::Info, "first", "A")));
        let seen = run(
            &mut app,
            Action::RaiseAlarm(NewAlarm::new(AlarmLevel::Critical, "second", "B")),
        );
        assert!(seen.iter().any(|a| matches!(a, Action::AlarmsUpdated(q) if q.pending().len() == 2)));
        assert_eq!(app.alarms.current().unwrap().message, "second");
    }

    #[test]
    fn popup_is_modal_until_acknowledged() {
        let mut app = app();
        run(&mut app, Action::RaiseTestAlarm);
        assert!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap().is_none());
        assert!(app.handle_key_event(key(KeyCode::Char('A'))).unwrap().is_none());

        let ack = app.handle_key_event(key(KeyCode::Enter)).unwrap().unwrap();
        run(&mut app, ack);
        assert!(!app.alarms.has_pending());
        assert_eq!(app.alarms.acknowledged().len(), 1);
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn burst_then_acknowledge_all() {
        let mut app = app();
        run(&mut app, Action::RaiseTestBurst);
        assert_eq!(app.alarms.pending().len(), generator::BURST_SIZE);
        let action = app.handle_key_event(key(KeyCode::Char('A'))).unwrap().unwrap();
        assert!(matches!(action, Action::AcknowledgeAllAlarms));
        run(&mut app, action);
        assert!(app.alarms.pending().is_empty());
        assert_eq!(app.alarms.acknowledged().len(), generator::BURST_SIZE);
    }

    #[test]
    fn cycling_equipment_persists_and_broadcasts() {
        let mut app = app();
        let seen = run(&mut app, Action::CycleEquipment(1));
        let selected = app.directory.selected().unwrap().id.clone();
        assert_eq!(selected, "plc-001");
        assert_eq!(app.store.get(keys::SELECTED_EQUIPMENT_ID).as_deref(), Some("plc-001"));
        assert!(seen
            .iter()
            .any(|a| matches!(a, Action::EquipmentSelected(e) if e.id == "plc-001")));
        assert!(seen
            .iter()
            .any(|a| matches!(a, Action::ObservationsUpdated { equipment_id, .. } if equipment_id == "plc-001")));
    }

    #[test]
    fn unknown_selection_changes_nothing() {
        let mut app = app();
        let seen = run(&mut app, Action::SelectEquipment("nope".into()));
        assert!(seen.is_empty());
        assert!(app.store.get(keys::SELECTED_EQUIPMENT_ID).is_none());
    }

    #[test]
    fn bracket_keys_only_on_kpi_screens() {
        let mut app = app();
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char(']'))).unwrap(),
            Some(Action::CycleEquipment(1))
        ));
        run(&mut app, Action::SwitchScreen(ScreenId::Alarms));
        assert!(!matches!(
            app.handle_key_event(key(KeyCode::Char(']'))).unwrap(),
            Some(Action::CycleEquipment(_))
        ));
    }

    #[test]
    fn observations_are_persisted() {
        let mut app = app();
        let seen = run(
            &mut app,
            Action::AddObservation {
                equipment_id: "motor-001".into(),
                text: "Guard loose".into(),
            },
        );
        assert!(seen.iter().any(|a| matches!(
            a,
            Action::ObservationsUpdated { observations, .. } if observations.as_slice() == ["Guard loose"]
        )));
        assert!(app.store.get(&keys::observations("motor-001")).is_some());
        assert_eq!(
            app.notification.as_ref().unwrap().0.level,
            NotificationLevel::Success
        );
    }

    #[test]
    fn overlong_observation_is_rejected() {
        let mut app = app();
        run(
            &mut app,
            Action::AddObservation {
                equipment_id: "motor-001".into(),
                text: "x".repeat(verification::OBSERVATION_MAX + 1),
            },
        );
        assert_eq!(
            app.notification.as_ref().unwrap().0.level,
            NotificationLevel::Error
        );
        assert!(verification::observations(app.store.as_ref(), "motor-001").is_empty());
    }

    #[test]
    fn interlock_image_broadcasts_map() {
        let mut app = app();
        let seen = run(
            &mut app,
            Action::SetInterlockImage {
                interlock_id: 3,
                reference: "site/safety.jpg".into(),
            },
        );
        assert!(seen.iter().any(|a| matches!(
            a,
            Action::InterlockImagesUpdated(m) if m.get(&3).map(String::as_str) == Some("site/safety.jpg")
        )));
    }

    #[test]
    fn confirm_yes_is_forwarded() {
        let mut app = app();
        let confirm = ConfirmAction::DeleteEquipment {
            id: "x".into(),
            name: "X".into(),
        };
        run(&mut app, Action::ShowConfirm(confirm.clone()));
        assert!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap().is_none());
        let yes = app.handle_key_event(key(KeyCode::Char('y'))).unwrap().unwrap();
        let seen = run(&mut app, yes);
        assert!(app.pending_confirm.is_none());
        assert!(seen.iter().any(|a| matches!(a, Action::Confirmed(c) if *c == confirm)));
    }

    #[test]
    fn search_bar_collects_query() {
        let mut app = app();
        run(&mut app, Action::SwitchScreen(ScreenId::Planning));
        let open = app.handle_key_event(key(KeyCode::Char('/'))).unwrap().unwrap();
        run(&mut app, open);
        assert!(app.search_active);
        for c in "mo".chars() {
            let action = app.handle_key_event(key(KeyCode::Char(c))).unwrap().unwrap();
            run(&mut app, action);
        }
        assert_eq!(app.search_query, "mo");
        let close = app.handle_key_event(key(KeyCode::Esc)).unwrap().unwrap();
        run(&mut app, close);
        assert!(!app.search_active);
        assert!(app.search_query.is_empty());
    }

    #[test]
    fn footer_toggles() {
        let mut app = app();
        assert_eq!(app.footer_height(), 1);
        let action = app.handle_key_event(key(KeyCode::Char('F'))).unwrap().unwrap();
        run(&mut app, action);
        assert!(app.footer_expanded);
        assert_eq!(app.footer_height(), 3);
    }

    #[test]
    fn renders_shell_and_popup() {
        let mut app = app();
        app.init_screens().unwrap();
        run(&mut app, Action::Render);
        let text = screen_text(&app);
        assert!(text.contains("Smart Critical Equipment Monitoring"));
        assert!(text.contains("Main Dashboard"));
        assert!(text.contains("Motor"));
        assert!(text.contains("No acknowledged alarms"));

        run(
            &mut app,
            Action::RaiseAlarm(NewAlarm::new(AlarmLevel::Critical, "Overheat", "Pump 7")),
        );
        let text = screen_text(&app);
        assert!(text.contains("CRITICAL ALARM"));
        assert!(text.contains("Overheat"));
    }
}
