//! Screen identifier enum.

use std::fmt;

/// Identifies each primary screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard, // 1
    Verification,  // 2
    Monitoring,    // 3
    Configuration, // 4
    Planning,      // 5
    Alarms,        // 6
    Architecture,  // 7
    Spare,         // 8
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 8] = [
        Self::Dashboard,
        Self::Verification,
        Self::Monitoring,
        Self::Configuration,
        Self::Planning,
        Self::Alarms,
        Self::Architecture,
        Self::Spare,
    ];

    /// Numeric key (1-8) for this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Dashboard => 1,
            Self::Verification => 2,
            Self::Monitoring => 3,
            Self::Configuration => 4,
            Self::Planning => 5,
            Self::Alarms => 6,
            Self::Architecture => 7,
            Self::Spare => 8,
        }
    }

    /// Screen from a numeric key (1-8). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.number() == n)
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Full page name, shown in the header.
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Main Dashboard",
            Self::Verification => "Equipment Verification",
            Self::Monitoring => "Parameter Monitoring",
            Self::Configuration => "Equipment Configuration",
            Self::Planning => "Planning & Reports",
            Self::Alarms => "Alarms",
            Self::Architecture => "System Architecture",
            Self::Spare => "Spare Tab",
        }
    }

    /// Label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Verification => "Verification",
            Self::Monitoring => "Monitoring",
            Self::Configuration => "Configuration",
            Self::Planning => "Planning",
            Self::Alarms => "Alarms",
            Self::Architecture => "Architecture",
            Self::Spare => "Spare",
        }
    }

    /// Compact label for narrow terminals (< 110 cols).
    pub fn label_short(self) -> &'static str {
        match self {
            Self::Dashboard => "Dash",
            Self::Verification => "Verif",
            Self::Monitoring => "Mon",
            Self::Configuration => "Conf",
            Self::Planning => "Plan",
            Self::Alarms => "Alm",
            Self::Architecture => "Arch",
            Self::Spare => "Spare",
        }
    }

    /// Screens that show the KPI cards and react to `[` / `]`.
    pub fn shows_kpi(self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Verification | Self::Monitoring | Self::Configuration
        )
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip() {
        for s in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(s.number()), Some(s));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(9), None);
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(ScreenId::Spare.next(), ScreenId::Dashboard);
        assert_eq!(ScreenId::Dashboard.prev(), ScreenId::Spare);
        assert_eq!(ScreenId::Monitoring.next(), ScreenId::Configuration);
    }

    #[test]
    fn kpi_screens() {
        let kpi: Vec<_> = ScreenId::ALL.into_iter().filter(|s| s.shows_kpi()).collect();
        assert_eq!(kpi.len(), 4);
        assert!(!ScreenId::Alarms.shows_kpi());
    }
}
