// ── Alarm queue ──
//
// Three disjoint collections, each newest-first:
//
//   pending ──ack──▶ acknowledged (10 most recent) ──overflow──▶ archived
//
// Alarms never move backward. All transitions go through `AlarmAction`
// so the queue can be driven as a pure reducer; the acknowledgement
// timestamp travels inside the action.

use chrono::{DateTime, TimeZone};
use rand::Rng;
use tracing::debug;

use crate::model::{ALARM_TIME_FORMAT, Alarm, AlarmId, NewAlarm};

/// Number of acknowledged alarms kept before the oldest are archived.
pub const ACKNOWLEDGED_WINDOW: usize = 10;

/// A state transition of the alarm queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmAction {
    /// Add a new pending alarm in front of the others.
    Raise(Alarm),
    /// Acknowledge one pending alarm. Unknown ids are ignored.
    Acknowledge { id: AlarmId, at: String },
    /// Acknowledge every pending alarm with one shared timestamp.
    AcknowledgeAll { at: String },
}

impl AlarmAction {
    /// Build a `Raise` for `alarm`, stamping id and event time from `now`.
    pub fn raise<Tz, R>(alarm: NewAlarm, now: &DateTime<Tz>, rng: &mut R) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
        R: Rng + ?Sized,
    {
        let id = AlarmId::generate(now, rng);
        let event_time = now.format(ALARM_TIME_FORMAT).to_string();
        Self::Raise(Alarm::raised(id, alarm, event_time))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmQueue {
    pending: Vec<Alarm>,
    acknowledged: Vec<Alarm>,
    archived: Vec<Alarm>,
}

impl AlarmQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure form of [`apply`](Self::apply).
    pub fn reduce(mut self, action: AlarmAction) -> Self {
        self.apply(action);
        self
    }

    /// Apply a transition in place. Returns `true` if anything changed.
    pub fn apply(&mut self, action: AlarmAction) -> bool {
        match action {
            AlarmAction::Raise(alarm) => {
                debug!(id = %alarm.id, level = %alarm.level, device = %alarm.device, "alarm raised");
                self.pending.insert(0, alarm);
                true
            }
            AlarmAction::Acknowledge { id, at } => self.acknowledge(&id, at),
            AlarmAction::AcknowledgeAll { at } => self.acknowledge_all(&at) > 0,
        }
    }

    fn acknowledge(&mut self, id: &AlarmId, at: String) -> bool {
        let Some(pos) = self.pending.iter().position(|a| &a.id == id) else {
            return false;
        };
        let mut alarm = self.pending.remove(pos);
        alarm.acknowledged = true;
        alarm.acknowledged_time = Some(at);
        debug!(id = %alarm.id, "alarm acknowledged");
        self.acknowledged.insert(0, alarm);
        self.enforce_window();
        true
    }

    fn acknowledge_all(&mut self, at: &str) -> usize {
        let count = self.pending.len();
        if count == 0 {
            return 0;
        }
        let mut block: Vec<Alarm> = self
            .pending
            .drain(..)
            .map(|mut alarm| {
                alarm.acknowledged = true;
                alarm.acknowledged_time = Some(at.to_owned());
                alarm
            })
            .collect();
        block.append(&mut self.acknowledged);
        self.acknowledged = block;
        debug!(count, "all pending alarms acknowledged");
        self.enforce_window();
        count
    }

    fn enforce_window(&mut self) {
        if self.acknowledged.len() > ACKNOWLEDGED_WINDOW {
            let overflow = self.acknowledged.split_off(ACKNOWLEDGED_WINDOW);
            debug!(archived = overflow.len(), "acknowledged window overflowed");
            self.archived.splice(0..0, overflow);
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Unacknowledged alarms, newest first.
    pub fn pending(&self) -> &[Alarm] {
        &self.pending
    }

    /// The most recent acknowledgements, newest first.
    pub fn acknowledged(&self) -> &[Alarm] {
        &self.acknowledged
    }

    /// Alarms pushed out of the acknowledged window, newest first.
    pub fn archived(&self) -> &[Alarm] {
        &self.archived
    }

    /// The alarm the popup shows: the most recently raised pending alarm.
    pub fn current(&self) -> Option<&Alarm> {
        self.pending.first()
    }

    /// Pending alarms besides [`current`](Self::current).
    pub fn remaining_pending(&self) -> usize {
        self.pending.len().saturating_sub(1)
    }

    /// Alarms listed in the footer.
    pub fn footer_alarms(&self) -> &[Alarm] {
        &self.acknowledged
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::AlarmLevel;
    use pretty_assertions::assert_eq;

    fn alarm(id: &str) -> Alarm {
        Alarm::raised(
            AlarmId::from(id),
            NewAlarm::new(AlarmLevel::Warning, format!("message {id}"), "MOTOR-01"),
            "2025/01/01 00:00:00",
        )
    }

    fn ids(alarms: &[Alarm]) -> Vec<&str> {
        alarms.iter().map(|a| a.id.as_str()).collect()
    }

    fn ack(id: &str, at: &str) -> AlarmAction {
        AlarmAction::Acknowledge {
            id: AlarmId::from(id),
            at: at.to_owned(),
        }
    }

    #[test]
    fn raise_prepends_without_dedup() {
        let queue = AlarmQueue::new()
            .reduce(AlarmAction::Raise(alarm("A")))
            .reduce(AlarmAction::Raise(alarm("B")))
            .reduce(AlarmAction::Raise(alarm("A")));
        assert_eq!(ids(queue.pending()), ["A", "B", "A"]);
    }

    #[test]
    fn acknowledge_and_acknowledge_all_ordering() {
        let queue = AlarmQueue::new()
            .reduce(AlarmAction::Raise(alarm("A")))
            .reduce(AlarmAction::Raise(alarm("B")))
            .reduce(AlarmAction::Raise(alarm("C")));
        assert_eq!(ids(queue.pending()), ["C", "B", "A"]);

        let queue = queue.reduce(ack("B", "t1"));
        assert_eq!(ids(queue.pending()), ["C", "A"]);
        assert_eq!(ids(queue.acknowledged()), ["B"]);

        let queue = queue.reduce(AlarmAction::AcknowledgeAll { at: "t2".into() });
        assert!(queue.pending().is_empty());
        assert_eq!(ids(queue.acknowledged()), ["C", "A", "B"]);
        assert_eq!(
            queue.acknowledged()[0].acknowledged_time.as_deref(),
            Some("t2")
        );
        assert_eq!(
            queue.acknowledged()[1].acknowledged_time.as_deref(),
            Some("t2")
        );
        assert_eq!(
            queue.acknowledged()[2].acknowledged_time.as_deref(),
            Some("t1")
        );
        assert!(queue.acknowledged().iter().all(|a| a.acknowledged));
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut queue = AlarmQueue::new().reduce(AlarmAction::Raise(alarm("A")));
        let before = queue.clone();
        assert!(!queue.apply(ack("missing", "t")));
        assert_eq!(queue, before);
    }

    #[test]
    fn acknowledging_twice_is_a_no_op() {
        let queue = AlarmQueue::new()
            .reduce(AlarmAction::Raise(alarm("A")))
            .reduce(ack("A", "t1"));
        let again = queue.clone().reduce(ack("A", "t2"));
        assert_eq!(again, queue);
    }

    #[test]
    fn eleventh_acknowledgement_archives_the_oldest() {
        let mut queue = AlarmQueue::new();
        for i in 0..11 {
            queue.apply(AlarmAction::Raise(alarm(&format!("a{i}"))));
        }
        for i in 0..11 {
            assert!(queue.apply(ack(&format!("a{i}"), "t")));
        }
        assert_eq!(queue.acknowledged().len(), ACKNOWLEDGED_WINDOW);
        assert_eq!(ids(queue.archived()), ["a0"]);
        assert_eq!(queue.acknowledged()[0].id.as_str(), "a10");
        assert!(queue.pending().is_empty());
    }

    #[test]
    fn acknowledge_all_overflow_prepends_to_archive() {
        let mut queue = AlarmQueue::new();
        for i in 0..12 {
            queue.apply(AlarmAction::Raise(alarm(&format!("x{i}"))));
        }
        queue.apply(AlarmAction::AcknowledgeAll { at: "t1".into() });
        // pending was x11..x0, so the two oldest overflow
        assert_eq!(ids(queue.archived()), ["x1", "x0"]);

        for i in 0..3 {
            queue.apply(AlarmAction::Raise(alarm(&format!("y{i}"))));
        }
        queue.apply(AlarmAction::AcknowledgeAll { at: "t2".into() });
        assert_eq!(queue.acknowledged().len(), ACKNOWLEDGED_WINDOW);
        assert_eq!(ids(queue.archived()), ["x4", "x3", "x2", "x1", "x0"]);
    }

    #[test]
    fn acknowledge_all_is_idempotent() {
        let queue = AlarmQueue::new()
            .reduce(AlarmAction::Raise(alarm("A")))
            .reduce(AlarmAction::AcknowledgeAll { at: "t1".into() });
        let mut again = queue.clone();
        assert!(!again.apply(AlarmAction::AcknowledgeAll { at: "t2".into() }));
        assert_eq!(again, queue);
    }

    #[test]
    fn collections_stay_disjoint_and_counts_balance() {
        let mut queue = AlarmQueue::new();
        let mut raised = 0usize;
        let mut acked = 0usize;
        for i in 0..25 {
            queue.apply(AlarmAction::Raise(alarm(&format!("z{i}"))));
            raised += 1;
            if i % 2 == 0 && queue.apply(ack(&format!("z{i}"), "t")) {
                acked += 1;
            }
            assert!(queue.acknowledged().len() <= ACKNOWLEDGED_WINDOW);
            assert_eq!(queue.pending().len(), raised - acked);
        }
        let total = queue.pending().len() + queue.acknowledged().len() + queue.archived().len();
        assert_eq!(total, raised);

        let mut all: Vec<&str> = ids(queue.pending());
        all.extend(ids(queue.acknowledged()));
        all.extend(ids(queue.archived()));
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), raised);
    }

    #[test]
    fn popup_accessors_follow_newest_pending() {
        let queue = AlarmQueue::new();
        assert!(queue.current().is_none());
        assert_eq!(queue.remaining_pending(), 0);

        let queue = queue
            .reduce(AlarmAction::Raise(alarm("A")))
            .reduce(AlarmAction::Raise(alarm("B")))
            .reduce(AlarmAction::Raise(alarm("C")));
        assert_eq!(queue.current().unwrap().id.as_str(), "C");
        assert_eq!(queue.remaining_pending(), 2);
    }

    #[test]
    fn raise_action_stamps_time_and_id() {
        use chrono::Utc;
        use rand::SeedableRng;

        let now = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let action = AlarmAction::raise(
            NewAlarm::new(AlarmLevel::Critical, "Hot", "MOTOR-01"),
            &now,
            &mut rng,
        );
        let AlarmAction::Raise(alarm) = action else {
            panic!("expected raise");
        };
        assert_eq!(alarm.event_time, "2025/03/04 05:06:07");
        assert!(alarm.id.as_str().starts_with("alarm-"));
        assert!(!alarm.acknowledged);
    }
}
