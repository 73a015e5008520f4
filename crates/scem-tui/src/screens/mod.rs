//! Screen implementations. Each screen is a top-level Component.

pub mod alarms;
pub mod configuration;
pub mod dashboard;
pub mod info;
pub mod monitoring;
pub mod planning;
pub mod verification;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create screen components for the tab bar.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(dashboard::DashboardScreen::new()),
        ),
        (
            ScreenId::Verification,
            Box::new(verification::VerificationScreen::new()),
        ),
        (
            ScreenId::Monitoring,
            Box::new(monitoring::MonitoringScreen::new()),
        ),
        (
            ScreenId::Configuration,
            Box::new(configuration::ConfigurationScreen::new()),
        ),
        (ScreenId::Planning, Box::new(planning::PlanningScreen::new())),
        (ScreenId::Alarms, Box::new(alarms::AlarmsScreen::new())),
        (
            ScreenId::Architecture,
            Box::new(info::InfoScreen::architecture()),
        ),
        (ScreenId::Spare, Box::new(info::InfoScreen::spare())),
    ]
}
