// ── Synthetic trend data ──
//
// Parameter monitoring charts show jittered readings around nominal
// values over the last few minutes. Values are rounded to two decimals.

use chrono::{DateTime, Duration, TimeZone};
use rand::Rng;

/// Points per series (one per minute).
pub const DEFAULT_POINTS: usize = 10;

/// (series name, nominal value, variance)
type SeriesSpec = (&'static str, f64, f64);

struct ChartSpec {
    title: &'static str,
    unit: &'static str,
    series: &'static [SeriesSpec],
}

const CHARTS: &[ChartSpec] = &[
    ChartSpec {
        title: "Vibration",
        unit: "mm/s",
        series: &[("DS", 4.5, 1.0), ("NDS", 3.8, 1.0)],
    },
    ChartSpec {
        title: "Temperature",
        unit: "°C",
        series: &[("DS", 55.0, 5.0), ("NDS", 52.0, 5.0)],
    },
    ChartSpec {
        title: "Current",
        unit: "A",
        series: &[("Current", 45.0, 10.0)],
    },
    ChartSpec {
        title: "Speed",
        unit: "RPM",
        series: &[("Speed 1", 1480.0, 50.0), ("Speed 2", 1470.0, 50.0)],
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub name: &'static str,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub title: &'static str,
    pub unit: &'static str,
    pub series: Vec<TrendSeries>,
}

impl TrendChart {
    /// Min/max over all series, padded by 5% so lines never touch the
    /// chart border. Empty charts get `[0, 1]`.
    pub fn y_bounds(&self) -> [f64; 2] {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in self.series.iter().flat_map(|s| s.values.iter().copied()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if !lo.is_finite() || !hi.is_finite() {
            return [0.0, 1.0];
        }
        let pad = ((hi - lo) * 0.05).max(0.1);
        [lo - pad, hi + pad]
    }
}

/// One refresh of all monitoring charts.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSnapshot {
    /// `HH:MM` labels, oldest first.
    pub labels: Vec<String>,
    pub charts: Vec<TrendChart>,
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, base: f64, variance: f64) -> f64 {
    let v = base + (rng.gen_range(0.0..1.0) - 0.5) * variance * 2.0;
    (v * 100.0).round() / 100.0
}

/// Generate `points` minutes of data ending at `now`.
pub fn generate<Tz, R>(now: &DateTime<Tz>, points: usize, rng: &mut R) -> TrendSnapshot
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
    R: Rng + ?Sized,
{
    let labels = (0..points)
        .rev()
        .map(|i| {
            let minutes = i64::try_from(i).unwrap_or(i64::MAX);
            let at = now.clone() - Duration::minutes(minutes);
            at.format("%H:%M").to_string()
        })
        .collect();

    let charts = CHARTS
        .iter()
        .map(|spec| TrendChart {
            title: spec.title,
            unit: spec.unit,
            series: spec
                .series
                .iter()
                .map(|&(name, base, variance)| TrendSeries {
                    name,
                    values: (0..points).map(|_| jitter(rng, base, variance)).collect(),
                })
                .collect(),
        })
        .collect();

    TrendSnapshot { labels, charts }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn labels_end_at_now() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let snap = generate(&now, DEFAULT_POINTS, &mut rng);
        assert_eq!(snap.labels.len(), DEFAULT_POINTS);
        assert_eq!(snap.labels.first().unwrap(), "12:21");
        assert_eq!(snap.labels.last().unwrap(), "12:30");
    }

    #[test]
    fn values_stay_within_variance() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(2);
        let snap = generate(&now, 50, &mut rng);
        assert_eq!(snap.charts.len(), 4);
        let speed = snap.charts.iter().find(|c| c.title == "Speed").unwrap();
        assert_eq!(speed.series.len(), 2);
        for v in &speed.series[0].values {
            assert!((1430.0..=1530.0).contains(v), "{v}");
        }
        let vib = &snap.charts[0].series[0].values;
        assert!(vib.iter().all(|v| (3.5..=5.5).contains(v)));
    }

    #[test]
    fn y_bounds_cover_all_values() {
        let chart = TrendChart {
            title: "t",
            unit: "u",
            series: vec![TrendSeries {
                name: "a",
                values: vec![1.0, 3.0],
            }],
        };
        let [lo, hi] = chart.y_bounds();
        assert!(lo < 1.0 && hi > 3.0);

        let empty = TrendChart {
            title: "t",
            unit: "u",
            series: Vec::new(),
        };
        assert_eq!(empty.y_bounds(), [0.0, 1.0]);
    }
}
