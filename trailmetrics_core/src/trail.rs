//! Builds the summary record for a trail from a parsed GPX file.

use std::path::PathBuf;

use anyhow::{bail, Result};
use log::debug;
use logging_timer::time;
use serde::{Deserialize, Serialize};

use crate::{
    formatting::{format_km, format_utc_date},
    metrics::{compute_metrics, FilterThresholds, MetricsTotals},
    model::{Gpx, Lat, Lon},
};

/// Everything we know about a trail after measuring it. This is what gets
/// stored, and what duplicate detection compares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailRecord {
    pub name: Option<String>,
    pub filename: Option<PathBuf>,
    /// Total raw distance, in metres.
    pub distance: f64,
    /// Smoothed elevation gain, in metres.
    pub elevation_gain: f64,
    /// Smoothed elevation loss, in metres (a positive number).
    pub elevation_loss: f64,
    /// Time between the first and last timestamped points, if the file has
    /// timestamps.
    pub duration_seconds: Option<i64>,
    /// When the trail was recorded, RFC 3339.
    pub date: Option<String>,
    pub start_lat: Option<Lat>,
    pub start_lon: Option<Lon>,
    pub num_points: usize,
    /// The full set of raw and smoothed totals, plus the distance profile.
    pub metrics: MetricsTotals,
}

impl TrailRecord {
    /// Measures the GPX and builds a record from it. A file with no track
    /// or route points is rejected.
    #[time]
    pub fn from_gpx(gpx: &Gpx, thresholds: FilterThresholds) -> Result<Self> {
        if gpx.is_empty() {
            bail!("Empty file, no track or route points found in {:?}", gpx.filename);
        }

        let metrics = compute_metrics(gpx.samples(), thresholds);
        let num_points = metrics.cumulative_distance.len() + 1;

        let duration_seconds = match (gpx.first_time(), gpx.last_time()) {
            (Some(t1), Some(t2)) => Some((t2 - t1).whole_seconds()),
            _ => None,
        };

        let date = match gpx.first_time().or(gpx.metadata.time) {
            Some(t) => Some(format_utc_date(&t)?),
            None => None,
        };

        let start = gpx.start_point();

        let record = Self {
            name: gpx.trail_name(),
            filename: gpx.filename.clone(),
            distance: metrics.total_distance,
            elevation_gain: metrics.total_elevation_gain_smoothed,
            elevation_loss: metrics.total_elevation_loss_smoothed,
            duration_seconds,
            date,
            start_lat: start.map(|(lat, _)| lat),
            start_lon: start.map(|(_, lon)| lon),
            num_points,
            metrics,
        };

        debug!(
            "Measured {:?}: {} points, {} (smoothed {}), +{:.0}m/-{:.0}m (raw +{:.0}m/-{:.0}m)",
            record.name,
            record.num_points,
            format_km(record.metrics.total_distance),
            format_km(record.metrics.total_distance_smoothed),
            record.metrics.total_elevation_gain_smoothed,
            record.metrics.total_elevation_loss_smoothed,
            record.metrics.total_elevation_gain,
            record.metrics.total_elevation_loss,
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::model::{Track, TrackSegment, Waypoint};

    fn gpx_from(points: Vec<Waypoint>) -> Gpx {
        Gpx {
            tracks: vec![Track {
                name: Some("Loop".into()),
                r#type: None,
                segments: vec![TrackSegment { points }],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn empty_gpx_is_an_error() {
        let err = TrailRecord::from_gpx(&Gpx::default(), FilterThresholds::default()).unwrap_err();
        assert!(err.to_string().starts_with("Empty file"));
    }

    #[test]
    fn single_point_gives_zero_totals() {
        let gpx = gpx_from(vec![Waypoint::with_lat_lon(45.0, 7.0)]);
        let record = TrailRecord::from_gpx(&gpx, FilterThresholds::default()).unwrap();

        assert_eq!(record.num_points, 1);
        assert_eq!(record.distance, 0.0);
        assert_eq!(record.metrics, MetricsTotals::default());
        assert_eq!(record.start_lat, Some(45.0));
        assert_eq!(record.start_lon, Some(7.0));
        assert_eq!(record.duration_seconds, None);
        assert_eq!(record.date, None);
    }

    #[test]
    fn record_uses_raw_distance_and_smoothed_elevation() {
        let mut points = Vec::new();
        for (i, ele) in [100.0, 102.0, 110.0, 104.0, 95.0].into_iter().enumerate() {
            let mut p = Waypoint::with_lat_lon(0.0, i as f64 * 0.001);
            p.ele = Some(ele);
            points.push(p);
        }
        points[0].time = Some(datetime!(2024-06-01 08:00:00 UTC));
        points[4].time = Some(datetime!(2024-06-01 09:30:00 UTC));

        let record = TrailRecord::from_gpx(&gpx_from(points), FilterThresholds::default()).unwrap();

        assert_eq!(record.name.as_deref(), Some("Loop"));
        assert_eq!(record.num_points, 5);
        assert_eq!(record.distance, record.metrics.total_distance);
        assert_eq!(record.elevation_gain, 10.0);
        assert_eq!(record.elevation_loss, 15.0);
        assert_eq!(record.metrics.total_elevation_gain, 10.0);
        assert_eq!(record.metrics.total_elevation_loss, 15.0);
        assert_eq!(record.duration_seconds, Some(5400));
        assert_eq!(record.date.as_deref(), Some("2024-06-01T08:00:00Z"));
    }
}
