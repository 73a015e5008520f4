// ── Demo alarm templates ──
//
// Canned alarms used by the periodic demo generator and the manual
// test-alarm keys.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{AlarmLevel, NewAlarm};

/// Size of a manually triggered burst.
pub const BURST_SIZE: usize = 5;

/// Templates the periodic generator draws from.
pub const TEMPLATES: &[(AlarmLevel, &str, &str)] = &[
    (AlarmLevel::Critical, "Motor temperature exceeded threshold", "MOTOR-01"),
    (AlarmLevel::Warning, "Vibration levels abnormal", "BEARING-DS"),
    (
        AlarmLevel::Info,
        "System health normal - all parameters within limits",
        "SYSTEM-01",
    ),
    (AlarmLevel::Critical, "High current detected", "MOTOR-03"),
    (AlarmLevel::Warning, "Bearing temperature high", "PUMP-07"),
    (AlarmLevel::Info, "Speed deviation detected", "DRIVE-01"),
    (AlarmLevel::Critical, "Safety interlock triggered", "SAFETY-01"),
    (AlarmLevel::Warning, "Pressure limit exceeded", "COMP-02"),
    (AlarmLevel::Info, "Flow rate abnormal", "PUMP-02"),
    (AlarmLevel::Critical, "Equipment shutdown imminent", "REACTOR-01"),
];

/// Manual test alarms use the first eight templates.
const MANUAL_TEMPLATE_COUNT: usize = 8;

fn to_alarm(&(level, message, device): &(AlarmLevel, &str, &str)) -> NewAlarm {
    NewAlarm::new(level, message, device)
}

/// A random alarm for the periodic generator.
pub fn random_alarm<R: Rng + ?Sized>(rng: &mut R) -> NewAlarm {
    TEMPLATES
        .choose(rng)
        .map_or_else(|| NewAlarm::new(AlarmLevel::Info, "", ""), to_alarm)
}

/// A random alarm for the manual "raise test alarm" key.
pub fn random_test_alarm<R: Rng + ?Sized>(rng: &mut R) -> NewAlarm {
    let manual = TEMPLATES.get(..MANUAL_TEMPLATE_COUNT).unwrap_or(TEMPLATES);
    manual
        .choose(rng)
        .map_or_else(|| NewAlarm::new(AlarmLevel::Info, "", ""), to_alarm)
}

/// [`BURST_SIZE`] random test alarms.
pub fn test_burst<R: Rng + ?Sized>(rng: &mut R) -> Vec<NewAlarm> {
    (0..BURST_SIZE).map(|_| random_test_alarm(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_alarm_comes_from_templates() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let alarm = random_alarm(&mut rng);
            assert!(
                TEMPLATES
                    .iter()
                    .any(|&(l, m, d)| l == alarm.level && m == alarm.message && d == alarm.device)
            );
        }
    }

    #[test]
    fn test_alarms_skip_last_templates() {
        let mut rng = StdRng::seed_from_u64(9);
        for alarm in (0..20).flat_map(|_| test_burst(&mut rng)) {
            assert_ne!(alarm.device, "PUMP-02");
            assert_ne!(alarm.device, "REACTOR-01");
        }
    }

    #[test]
    fn burst_has_five_alarms() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(test_burst(&mut rng).len(), BURST_SIZE);
    }
}
