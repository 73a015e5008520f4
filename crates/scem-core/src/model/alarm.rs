// ── Alarm domain types ──

use std::fmt;

use chrono::{DateTime, TimeZone};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Timestamp layout for every alarm time (event, acknowledgement,
/// recovery). Dates sort lexically in this form, which the alarm log's
/// date-range filter relies on.
pub const ALARM_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Alarm severity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum AlarmLevel {
    Critical,
    Warning,
    Info,
}

/// Identifier of a raised alarm: `alarm-<epoch millis>-<base36 suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlarmId(String);

impl AlarmId {
    /// Build a fresh id from the raise time and a random suffix.
    pub fn generate<Tz: TimeZone, R: Rng + ?Sized>(now: &DateTime<Tz>, rng: &mut R) -> Self {
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..BASE36.len());
                char::from(BASE36.get(idx).copied().unwrap_or(b'0'))
            })
            .collect();
        Self(format!("alarm-{}-{suffix}", now.timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short alarm number shown in the alarm log (`ALM-` + first 8
    /// characters of the random suffix, upper-cased).
    pub fn short_number(&self) -> String {
        let suffix = self.0.rsplit('-').next().unwrap_or(&self.0);
        let head: String = suffix.chars().take(8).collect();
        format!("ALM-{}", head.to_uppercase())
    }
}

impl fmt::Display for AlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AlarmId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for AlarmId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The content of an alarm before it is raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlarm {
    pub level: AlarmLevel,
    pub message: String,
    pub device: String,
}

impl NewAlarm {
    pub fn new(level: AlarmLevel, message: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            device: device.into(),
        }
    }
}

/// A raised alarm. Lives in exactly one of the queue's collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    pub id: AlarmId,
    pub level: AlarmLevel,
    pub message: String,
    pub device: String,
    pub event_time: String,
    pub acknowledged: bool,
    pub acknowledged_time: Option<String>,
}

impl Alarm {
    /// Materialize a pending alarm.
    pub fn raised(id: AlarmId, alarm: NewAlarm, event_time: impl Into<String>) -> Self {
        Self {
            id,
            level: alarm.level,
            message: alarm.message,
            device: alarm.device,
            event_time: event_time.into(),
            acknowledged: false,
            acknowledged_time: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_id_has_timestamp_and_suffix() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let id = AlarmId::generate(&now, &mut rng);

        let parts: Vec<&str> = id.as_str().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "alarm");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), ID_SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn ids_from_same_instant_differ() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(1);
        let a = AlarmId::generate(&now, &mut rng);
        let b = AlarmId::generate(&now, &mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn short_number_uses_suffix() {
        let id = AlarmId::from("alarm-1700000000000-abc123xyz");
        assert_eq!(id.short_number(), "ALM-ABC123XY");
    }

    #[test]
    fn level_labels_are_uppercase() {
        assert_eq!(AlarmLevel::Critical.to_string(), "CRITICAL");
        assert_eq!(
            serde_json::to_string(&AlarmLevel::Warning).unwrap(),
            "\"WARNING\""
        );
    }
}
