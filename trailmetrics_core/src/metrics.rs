//! Streaming trail metrics. Samples are fed in one at a time, in track order,
//! and we keep two sets of totals: 'raw' ones that count every movement the
//! device reported, and 'smoothed' ones that only count movement once it has
//! exceeded a threshold from the last accepted point (a hysteresis filter).
//! Horizontal and vertical movement have separate thresholds because GPS
//! jitter and elevation jitter are unrelated and differ in size.

use geo::Point;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::{distance::haversine_distance_metres, model::Sample};

/// The two hysteresis thresholds, in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterThresholds {
    /// Minimum horizontal distance from the last accepted point before a
    /// movement counts towards the smoothed distance.
    pub xy_metres: f64,
    /// Minimum elevation change from the last accepted elevation before it
    /// counts towards the smoothed gain or loss.
    pub z_metres: f64,
}

impl FilterThresholds {
    pub fn new(xy_metres: f64, z_metres: f64) -> Self {
        Self { xy_metres, z_metres }
    }
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self::new(10.0, 5.0)
    }
}

/// The accumulated results. All values are in metres and never decrease while
/// samples are being added. Losses are stored as positive magnitudes.
///
/// Note that the raw totals are not necessarily greater than the smoothed ones,
/// the two are measured against different reference points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsTotals {
    pub total_distance: f64,
    pub total_distance_smoothed: f64,
    pub total_elevation_gain: f64,
    pub total_elevation_loss: f64,
    pub total_elevation_gain_smoothed: f64,
    pub total_elevation_loss_smoothed: f64,
    /// The running value of `total_distance` after each sample. There is no
    /// entry for the first sample, so this is one shorter than the track.
    pub cumulative_distance: Vec<f64>,
}

/// Reference points for the two filters. These only exist once the first
/// sample has been seen, and are all set by it.
#[derive(Debug, Clone, Copy)]
struct Anchors {
    /// The previous sample, whatever happened to it.
    last_xy: Point,
    last_z: f64,
    /// The last sample that passed the XY gate.
    last_filtered_xy: Point,
    /// The elevation of the last sample that passed both gates.
    last_filtered_z: f64,
}

impl Anchors {
    fn starting_at(xy: Point, z: f64) -> Self {
        Self {
            last_xy: xy,
            last_z: z,
            last_filtered_xy: xy,
            last_filtered_z: z,
        }
    }
}

/// Accumulates `MetricsTotals` over a stream of samples. Construct one per
/// track; instances share nothing, so separate tracks can be measured on
/// separate threads.
#[derive(Debug, Clone)]
pub struct TrackMetrics {
    thresholds: FilterThresholds,
    anchors: Option<Anchors>,
    totals: MetricsTotals,
}

impl TrackMetrics {
    pub fn new(threshold_xy_metres: f64, threshold_z_metres: f64) -> Self {
        Self::with_thresholds(FilterThresholds::new(threshold_xy_metres, threshold_z_metres))
    }

    pub fn with_thresholds(thresholds: FilterThresholds) -> Self {
        Self {
            thresholds,
            anchors: None,
            totals: MetricsTotals::default(),
        }
    }

    /// Processes the next sample in the track.
    pub fn add_sample(&mut self, sample: &Sample) {
        let xy = sample.as_geo_point();
        let elevation = sample.elevation_or_zero();

        let anchors = match self.anchors.as_mut() {
            Some(anchors) => anchors,
            None => {
                self.anchors = Some(Anchors::starting_at(xy, elevation));
                return;
            }
        };

        let totals = &mut self.totals;

        let distance = haversine_distance_metres(anchors.last_xy, xy);
        let smoothed_distance = haversine_distance_metres(anchors.last_filtered_xy, xy);

        totals.total_distance += distance;
        totals.cumulative_distance.push(totals.total_distance);
        anchors.last_xy = xy;

        // Raw elevation is always measured against the previous sample,
        // regardless of what the filters decide below.
        let elevation_diff = elevation - anchors.last_z;
        anchors.last_z = elevation;
        if elevation_diff > 0.0 {
            totals.total_elevation_gain += elevation_diff;
        } else if elevation_diff < 0.0 {
            totals.total_elevation_loss -= elevation_diff;
        }

        if smoothed_distance < self.thresholds.xy_metres {
            trace!("XY gate closed, {smoothed_distance:.2}m from the last accepted point");
            return;
        }

        totals.total_distance_smoothed += smoothed_distance;
        anchors.last_filtered_xy = xy;

        // The filtered Z anchor has not moved yet this step, even though the
        // filtered XY anchor just did.
        let elevation_diff_smoothed = elevation - anchors.last_filtered_z;
        if elevation_diff_smoothed.abs() < self.thresholds.z_metres {
            trace!("Z gate closed, {elevation_diff_smoothed:.2}m from the last accepted elevation");
            return;
        }

        anchors.last_filtered_z = elevation;
        if elevation_diff_smoothed > 0.0 {
            totals.total_elevation_gain_smoothed += elevation_diff_smoothed;
        } else {
            totals.total_elevation_loss_smoothed -= elevation_diff_smoothed;
        }
    }

    /// The totals accumulated so far. These are valid at any point in the
    /// stream, not just at the end.
    pub fn totals(&self) -> &MetricsTotals {
        &self.totals
    }

    pub fn into_totals(self) -> MetricsTotals {
        self.totals
    }
}

impl Extend<Sample> for TrackMetrics {
    fn extend<T: IntoIterator<Item = Sample>>(&mut self, iter: T) {
        for sample in iter {
            self.add_sample(&sample);
        }
    }
}

/// Runs a whole track through a fresh accumulator.
pub fn compute_metrics<I>(samples: I, thresholds: FilterThresholds) -> MetricsTotals
where
    I: IntoIterator<Item = Sample>,
{
    let mut metrics = TrackMetrics::with_thresholds(thresholds);
    metrics.extend(samples);
    metrics.into_totals()
}
