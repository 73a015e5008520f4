//! Alarm queue, demo alarm generation, and the searchable alarm log.

pub mod generator;
pub mod log;
mod queue;

pub use log::{AlarmFilter, AlarmRecord};
pub use queue::{ACKNOWLEDGED_WINDOW, AlarmAction, AlarmQueue};
