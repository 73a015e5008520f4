//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use scem_core::{AlarmId, AlarmQueue, Equipment, NewAlarm, TrendSnapshot};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Warning,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// A destructive edit waiting for y/n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteEquipment {
        id: String,
        name: String,
    },
    DeleteParameter {
        equipment_id: String,
        parameter_id: String,
        name: String,
    },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteEquipment { name, .. } => {
                write!(f, "Delete {name} and all of its parameters?")
            }
            Self::DeleteParameter { name, .. } => write!(f, "Delete parameter {name}?"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ─────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,
    ToggleFooter,

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,

    // ── Timers ────────────────────────────────────────────────────
    ClockTick,
    RefreshTrend,
    GenerateDemoAlarm,

    // ── Alarms ────────────────────────────────────────────────────
    RaiseAlarm(NewAlarm),
    RaiseTestAlarm,
    RaiseTestBurst,
    AcknowledgeAlarm(AlarmId),
    AcknowledgeAllAlarms,

    // ── Equipment selection ───────────────────────────────────────
    CycleEquipment(isize),
    SelectEquipment(String),

    // ── Persisted notes ───────────────────────────────────────────
    AddObservation { equipment_id: String, text: String },
    RemoveObservation { equipment_id: String, index: usize },
    SetInterlockImage { interlock_id: u32, reference: String },

    // ── Data updates (broadcast to every screen) ──────────────────
    EquipmentSelected(Arc<Equipment>),
    AlarmsUpdated(Arc<AlarmQueue>),
    TrendUpdated(Arc<TrendSnapshot>),
    ObservationsUpdated {
        equipment_id: String,
        observations: Arc<Vec<String>>,
    },
    InterlockImagesUpdated(Arc<BTreeMap<u32, String>>),

    // ── Confirmation ──────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,
    /// Delivered to the active screen once the user pressed `y`.
    Confirmed(ConfirmAction),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}

impl Action {
    /// Data updates every screen receives, whichever is active.
    pub fn is_broadcast(&self) -> bool {
        matches!(
            self,
            Self::EquipmentSelected(_)
                | Self::AlarmsUpdated(_)
                | Self::TrendUpdated(_)
                | Self::ObservationsUpdated { .. }
                | Self::InterlockImagesUpdated(_)
        )
    }
}
