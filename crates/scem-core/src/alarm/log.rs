// ── Alarm log ──
//
// The searchable alarm history: archived alarms from the live queue
// followed by historic records. Filtering mirrors the alarms screen's
// controls; every bound is optional and inclusive.

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::model::{Alarm, AlarmLevel};

/// Recovered-time placeholder for alarms that have not recovered.
pub const NOT_RECOVERED: &str = "-";

/// Date layout used by the range filters (`YYYY/MM/DD`).
pub const FILTER_DATE_FORMAT: &str = "%Y/%m/%d";

const HISTORIC_MESSAGES: &[&str] = &[
    "Motor temperature exceeded threshold",
    "Vibration levels abnormal",
    "High current detected",
    "Safety interlock triggered",
    "Bearing temperature high",
    "Speed deviation detected",
    "Pressure limit exceeded",
    "Flow rate abnormal",
];

const HISTORIC_DEVICES: &[&str] = &[
    "MOTOR-01",
    "BEARING-DS",
    "PUMP-07",
    "MOTOR-03",
    "SAFETY-01",
    "COMP-02",
];

/// One row of the alarm log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmRecord {
    pub no: String,
    pub level: AlarmLevel,
    pub alarm_no: String,
    pub message: String,
    pub device: String,
    pub event_time: String,
    pub recovered_time: String,
}

impl AlarmRecord {
    /// Log row for an alarm archived out of the live queue. Its
    /// acknowledgement time stands in as the recovery time.
    pub fn from_archived(alarm: &Alarm) -> Self {
        Self {
            no: alarm.id.to_string(),
            level: alarm.level,
            alarm_no: alarm.id.short_number(),
            message: alarm.message.clone(),
            device: alarm.device.clone(),
            event_time: alarm.event_time.clone(),
            recovered_time: alarm
                .acknowledged_time
                .clone()
                .unwrap_or_else(|| NOT_RECOVERED.to_owned()),
        }
    }

    pub fn is_recovered(&self) -> bool {
        self.recovered_time != NOT_RECOVERED
    }

    fn event_date(&self) -> &str {
        date_part(&self.event_time)
    }

    fn recovered_date(&self) -> Option<&str> {
        self.is_recovered().then(|| date_part(&self.recovered_time))
    }
}

fn date_part(timestamp: &str) -> &str {
    timestamp.split(' ').next().unwrap_or(timestamp)
}

/// Generate `count` historic alarm records from December 2024.
pub fn generate_history<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<AlarmRecord> {
    let levels: Vec<AlarmLevel> = AlarmLevel::iter().collect();
    (0..count)
        .map(|i| {
            let level = levels.choose(rng).copied().unwrap_or(AlarmLevel::Info);
            let message = HISTORIC_MESSAGES.choose(rng).copied().unwrap_or_default();
            let device = HISTORIC_DEVICES.choose(rng).copied().unwrap_or_default();
            let event_time = random_december_time(rng);
            let recovered_time = if rng.gen_bool(0.7) {
                random_december_time(rng)
            } else {
                NOT_RECOVERED.to_owned()
            };
            AlarmRecord {
                no: format!("{:04}", i + 1),
                level,
                alarm_no: format!("ALM-{:03}", rng.gen_range(0..1000)),
                message: message.to_owned(),
                device: device.to_owned(),
                event_time,
                recovered_time,
            }
        })
        .collect()
}

fn random_december_time<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "2024/12/{:02} {:02}:{:02}:{:02}",
        rng.gen_range(1..=10),
        rng.gen_range(0..24),
        rng.gen_range(0..60),
        rng.gen_range(0..60),
    )
}

/// Archived alarms first (newest first), then the historic records.
pub fn combine(archived: &[Alarm], history: &[AlarmRecord]) -> Vec<AlarmRecord> {
    archived
        .iter()
        .map(AlarmRecord::from_archived)
        .chain(history.iter().cloned())
        .collect()
}

/// Levels present in `records`, in first-seen order.
pub fn unique_levels(records: &[AlarmRecord]) -> Vec<AlarmLevel> {
    let mut out = Vec::new();
    for r in records {
        if !out.contains(&r.level) {
            out.push(r.level);
        }
    }
    out
}

/// Devices present in `records`, in first-seen order.
pub fn unique_devices(records: &[AlarmRecord]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for r in records {
        if !out.iter().any(|d| d == &r.device) {
            out.push(r.device.clone());
        }
    }
    out
}

/// Parse a `YYYY/MM/DD` filter bound typed by the user.
pub fn parse_filter_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), FILTER_DATE_FORMAT).ok()
}

/// Alarm log filter. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmFilter {
    pub search: String,
    pub level: Option<AlarmLevel>,
    pub device: Option<String>,
    pub event_from: Option<NaiveDate>,
    pub event_to: Option<NaiveDate>,
    pub recovered_from: Option<NaiveDate>,
    pub recovered_to: Option<NaiveDate>,
}

impl AlarmFilter {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.level.is_some()
            || self.device.is_some()
            || self.event_from.is_some()
            || self.event_to.is_some()
            || self.recovered_from.is_some()
            || self.recovered_to.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, record: &AlarmRecord) -> bool {
        let q = self.search.to_lowercase();
        let matches_search = q.is_empty()
            || record.message.to_lowercase().contains(&q)
            || record.device.to_lowercase().contains(&q)
            || record.alarm_no.to_lowercase().contains(&q);
        if !matches_search {
            return false;
        }
        if self.level.is_some_and(|l| l != record.level) {
            return false;
        }
        if self.device.as_ref().is_some_and(|d| d != &record.device) {
            return false;
        }
        if !within(record.event_date(), self.event_from, self.event_to) {
            return false;
        }
        // Unrecovered alarms are never excluded by the recovered range.
        match record.recovered_date() {
            Some(date) => within(date, self.recovered_from, self.recovered_to),
            None => true,
        }
    }

    pub fn apply<'a>(&self, records: &'a [AlarmRecord]) -> Vec<&'a AlarmRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

fn within(date: &str, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    let fmt = |d: NaiveDate| d.format(FILTER_DATE_FORMAT).to_string();
    if from.is_some_and(|f| date < fmt(f).as_str()) {
        return false;
    }
    if to.is_some_and(|t| date > fmt(t).as_str()) {
        return false;
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{AlarmId, NewAlarm};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn record(level: AlarmLevel, device: &str, event: &str, recovered: &str) -> AlarmRecord {
        AlarmRecord {
            no: "0001".into(),
            level,
            alarm_no: "ALM-001".into(),
            message: "Vibration levels abnormal".into(),
            device: device.into(),
            event_time: event.into(),
            recovered_time: recovered.into(),
        }
    }

    #[test]
    fn history_matches_expected_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let history = generate_history(50, &mut rng);
        assert_eq!(history.len(), 50);
        assert_eq!(history[0].no, "0001");
        assert_eq!(history[49].no, "0050");
        for r in &history {
            assert!(r.alarm_no.starts_with("ALM-") && r.alarm_no.len() == 7);
            assert!(r.event_time.starts_with("2024/12/"));
            assert!(HISTORIC_DEVICES.contains(&r.device.as_str()));
            assert!(r.recovered_time == NOT_RECOVERED || r.recovered_time.starts_with("2024/12/"));
        }
    }

    #[test]
    fn archived_alarms_lead_the_log() {
        let mut alarm = Alarm::raised(
            AlarmId::from("alarm-1-zzzzzzzzz"),
            NewAlarm::new(AlarmLevel::Critical, "Hot", "MOTOR-01"),
            "2025/02/01 10:00:00",
        );
        alarm.acknowledged = true;
        alarm.acknowledged_time = Some("2025/02/01 10:05:00".into());
        let history = vec![record(AlarmLevel::Info, "PUMP-07", "2024/12/01 00:00:00", "-")];

        let log = combine(&[alarm], &history);
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].alarm_no, "ALM-ZZZZZZZZ");
        assert_eq!(log[0].recovered_time, "2025/02/01 10:05:00");
        assert_eq!(log[1], history[0]);
    }

    #[test]
    fn search_covers_message_device_and_number() {
        let r = record(AlarmLevel::Warning, "PUMP-07", "2024/12/03 01:02:03", "-");
        let mut f = AlarmFilter::default();
        for q in ["vibration", "pump", "alm-001"] {
            f.search = q.into();
            assert!(f.matches(&r), "query {q}");
        }
        f.search = "reactor".into();
        assert!(!f.matches(&r));
    }

    #[test]
    fn level_and_device_filters() {
        let r = record(AlarmLevel::Warning, "PUMP-07", "2024/12/03 01:02:03", "-");
        let f = AlarmFilter {
            level: Some(AlarmLevel::Critical),
            ..AlarmFilter::default()
        };
        assert!(!f.matches(&r));
        let f = AlarmFilter {
            device: Some("PUMP-07".into()),
            level: Some(AlarmLevel::Warning),
            ..AlarmFilter::default()
        };
        assert!(f.matches(&r));
    }

    #[test]
    fn event_range_is_inclusive() {
        let r = record(AlarmLevel::Info, "COMP-02", "2024/12/05 23:59:59", "-");
        let f = AlarmFilter {
            event_from: parse_filter_date("2024/12/05"),
            event_to: parse_filter_date("2024/12/05"),
            ..AlarmFilter::default()
        };
        assert!(f.matches(&r));
        let f = AlarmFilter {
            event_from: parse_filter_date("2024/12/06"),
            ..AlarmFilter::default()
        };
        assert!(!f.matches(&r));
    }

    #[test]
    fn recovered_range_ignores_unrecovered() {
        let open = record(AlarmLevel::Info, "COMP-02", "2024/12/05 00:00:00", "-");
        let closed = record(
            AlarmLevel::Info,
            "COMP-02",
            "2024/12/05 00:00:00",
            "2024/12/02 00:00:00",
        );
        let f = AlarmFilter {
            recovered_from: parse_filter_date("2024/12/04"),
            ..AlarmFilter::default()
        };
        assert!(f.matches(&open));
        assert!(!f.matches(&closed));
    }

    #[test]
    fn filter_activity_and_clear() {
        let mut f = AlarmFilter::default();
        assert!(!f.is_active());
        f.device = Some("MOTOR-01".into());
        assert!(f.is_active());
        f.clear();
        assert_eq!(f, AlarmFilter::default());
    }

    #[test]
    fn unique_values_keep_first_seen_order() {
        let records = vec![
            record(AlarmLevel::Warning, "B", "2024/12/01 00:00:00", "-"),
            record(AlarmLevel::Critical, "A", "2024/12/01 00:00:00", "-"),
            record(AlarmLevel::Warning, "B", "2024/12/01 00:00:00", "-"),
        ];
        assert_eq!(
            unique_levels(&records),
            [AlarmLevel::Warning, AlarmLevel::Critical]
        );
        assert_eq!(unique_devices(&records), ["B", "A"]);
    }

    #[test]
    fn bad_filter_dates_are_rejected() {
        assert!(parse_filter_date("12/05/2024").is_none());
        assert!(parse_filter_date("2024/13/01").is_none());
        assert!(parse_filter_date(" 2024/12/01 ").is_some());
    }
}
