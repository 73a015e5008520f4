//! Control-room palette and semantic styling for the dashboard.

use ratatui::style::{Color, Modifier, Style};

use scem_core::{AlarmLevel, Criticality, OverallStatus, RunStatus};

// ── Core Palette ──────────────────────────────────────────────────────

pub const STEEL_BLUE: Color = Color::Rgb(86, 156, 214); // #569cd6
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const AMBER: Color = Color::Rgb(255, 191, 0); // #ffbf00
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 85, 85); // #ff5555
pub const INDUSTRIAL_RED: Color = Color::Rgb(220, 60, 60); // #dc3c3c

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29
pub const LIGHT_BLUE: Color = Color::Rgb(139, 233, 253); // #8be9fd

/// Chart series colors for multi-line graphs.
pub const CHART_SERIES: &[Color] = &[NEON_CYAN, CORAL, AMBER, SUCCESS_GREEN, LIGHT_BLUE];

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Section heading inside a panel.
pub fn heading() -> Style {
    Style::default()
        .fg(INDUSTRIAL_RED)
        .add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(STEEL_BLUE)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(NEON_CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(STEEL_BLUE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default()
        .fg(STEEL_BLUE)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Muted placeholder text.
pub fn placeholder() -> Style {
    Style::default().fg(BORDER_GRAY)
}

// ── Domain colors ─────────────────────────────────────────────────────

pub fn alarm_level_color(level: AlarmLevel) -> Color {
    match level {
        AlarmLevel::Critical => ERROR_RED,
        AlarmLevel::Warning => AMBER,
        AlarmLevel::Info => STEEL_BLUE,
    }
}

pub fn criticality_color(criticality: Criticality) -> Color {
    match criticality {
        Criticality::MostCritical => ERROR_RED,
        Criticality::High => CORAL,
        Criticality::Medium => AMBER,
        Criticality::Low => SUCCESS_GREEN,
    }
}

pub fn run_status_color(status: RunStatus) -> Color {
    match status {
        RunStatus::Run => SUCCESS_GREEN,
        RunStatus::Standby => AMBER,
        RunStatus::Stop => ERROR_RED,
    }
}

pub fn overall_status_color(status: OverallStatus) -> Color {
    match status {
        OverallStatus::Good => SUCCESS_GREEN,
        OverallStatus::Bad => AMBER,
        OverallStatus::Worst => ERROR_RED,
    }
}

/// Solid badge: dark text on a colored background.
pub fn badge(color: Color) -> Style {
    Style::default()
        .fg(BG_DARK)
        .bg(color)
        .add_modifier(Modifier::BOLD)
}
