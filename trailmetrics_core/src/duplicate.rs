use geo::point;
use log::debug;

use crate::{distance::haversine_distance_metres, trail::TrailRecord};

/// How close two trails have to be, on every measure, to be considered the
/// same trail uploaded twice. All values are in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicateThresholds {
    /// Maximum difference in total distance.
    pub distance_metres: f64,
    /// Maximum difference in elevation gain, and separately in elevation loss.
    pub elevation_metres: f64,
    /// Maximum distance between the two start points.
    pub start_point_metres: f64,
}

impl Default for DuplicateThresholds {
    fn default() -> Self {
        Self {
            distance_metres: 50.0,
            elevation_metres: 50.0,
            start_point_metres: 100.0,
        }
    }
}

/// Returns the first of `existing` that looks like the same trail as
/// `candidate`. A missing start point is compared as if it were at 0,0.
pub fn find_duplicate<'a>(
    candidate: &TrailRecord,
    existing: &'a [TrailRecord],
    thresholds: DuplicateThresholds,
) -> Option<&'a TrailRecord> {
    existing
        .iter()
        .find(|other| is_duplicate(candidate, other, thresholds))
}

/// True if every measure differs by strictly less than its threshold.
pub fn is_duplicate(t1: &TrailRecord, t2: &TrailRecord, thresholds: DuplicateThresholds) -> bool {
    let distance_difference = (t1.distance - t2.distance).abs();
    let gain_difference = (t1.elevation_gain - t2.elevation_gain).abs();
    let loss_difference = (t1.elevation_loss - t2.elevation_loss).abs();
    let start_point_difference = haversine_distance_metres(
        point! { x: t1.start_lon.unwrap_or_default(), y: t1.start_lat.unwrap_or_default() },
        point! { x: t2.start_lon.unwrap_or_default(), y: t2.start_lat.unwrap_or_default() },
    );

    let duplicate = distance_difference < thresholds.distance_metres
        && gain_difference < thresholds.elevation_metres
        && loss_difference < thresholds.elevation_metres
        && start_point_difference < thresholds.start_point_metres;

    if duplicate {
        debug!(
            "{:?} and {:?} look the same: distance differs by {distance_difference:.1}m, \
             gain by {gain_difference:.1}m, loss by {loss_difference:.1}m, \
             start points are {start_point_difference:.1}m apart",
            t1.name, t2.name
        );
    }

    duplicate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsTotals;

    fn record(distance: f64, gain: f64, loss: f64, start: Option<(f64, f64)>) -> TrailRecord {
        TrailRecord {
            name: None,
            filename: None,
            distance,
            elevation_gain: gain,
            elevation_loss: loss,
            duration_seconds: None,
            date: None,
            start_lat: start.map(|s| s.0),
            start_lon: start.map(|s| s.1),
            num_points: 0,
            metrics: MetricsTotals::default(),
        }
    }

    #[test]
    fn identical_trails_are_duplicates() {
        let t = record(12_000.0, 800.0, 780.0, Some((46.5, 7.9)));
        assert!(is_duplicate(&t, &t.clone(), DuplicateThresholds::default()));
    }

    #[test]
    fn each_measure_must_be_within_its_threshold() {
        let thresholds = DuplicateThresholds::default();
        let base = record(12_000.0, 800.0, 780.0, Some((46.5, 7.9)));

        assert!(is_duplicate(&base, &record(12_049.0, 849.0, 731.0, Some((46.5, 7.9))), thresholds));
        assert!(!is_duplicate(&base, &record(12_050.0, 800.0, 780.0, Some((46.5, 7.9))), thresholds));
        assert!(!is_duplicate(&base, &record(12_000.0, 850.0, 780.0, Some((46.5, 7.9))), thresholds));
        assert!(!is_duplicate(&base, &record(12_000.0, 800.0, 830.0, Some((46.5, 7.9))), thresholds));
        // 0.001 degrees of latitude is ~111m.
        assert!(!is_duplicate(&base, &record(12_000.0, 800.0, 780.0, Some((46.501, 7.9))), thresholds));
    }

    #[test]
    fn missing_start_point_is_treated_as_null_island() {
        let thresholds = DuplicateThresholds::default();
        let no_start = record(5_000.0, 100.0, 100.0, None);
        let at_origin = record(5_000.0, 100.0, 100.0, Some((0.0, 0.0)));
        let elsewhere = record(5_000.0, 100.0, 100.0, Some((46.5, 7.9)));

        assert!(is_duplicate(&no_start, &at_origin, thresholds));
        assert!(!is_duplicate(&no_start, &elsewhere, thresholds));
    }

    #[test]
    fn find_duplicate_returns_the_first_match() {
        let existing = vec![
            record(1_000.0, 10.0, 10.0, Some((1.0, 1.0))),
            record(5_010.0, 100.0, 100.0, Some((2.0, 2.0))),
            record(5_020.0, 100.0, 100.0, Some((2.0, 2.0))),
        ];
        let candidate = record(5_000.0, 100.0, 100.0, Some((2.0, 2.0)));

        let found = find_duplicate(&candidate, &existing, DuplicateThresholds::default());
        assert_eq!(found, Some(&existing[1]));

        let lonely = record(9_000.0, 0.0, 0.0, None);
        assert_eq!(find_duplicate(&lonely, &existing, DuplicateThresholds::default()), None);
    }
}
