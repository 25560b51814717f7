//! Behavioural tests for the streaming metrics accumulator.

use assert_float_eq::assert_float_absolute_eq;
use geo::point;
use trailmetrics_core::{
    distance::haversine_distance_metres,
    metrics::{compute_metrics, FilterThresholds, MetricsTotals, TrackMetrics},
    model::Sample,
};

fn sample(lat: f64, lon: f64, ele: f64) -> Sample {
    Sample::new(lat, lon, Some(ele))
}

/// A wiggly climb through the Alps, 1 sample roughly every 15m.
fn alpine_track() -> Vec<Sample> {
    (0..400)
        .map(|i| {
            let i = i as f64;
            let lat = 46.0 + i * 0.0001 + (i * 0.7).sin() * 0.00002;
            let lon = 7.5 + i * 0.00012 + (i * 1.3).cos() * 0.00002;
            let ele = 1200.0 + i * 1.5 + (i * 2.1).sin() * 3.0;
            sample(lat, lon, ele)
        })
        .collect()
}

#[test]
fn no_samples_gives_zero_totals() {
    let totals = compute_metrics(Vec::new(), FilterThresholds::default());
    assert_eq!(totals, MetricsTotals::default());
    assert!(totals.cumulative_distance.is_empty());
}

#[test]
fn one_sample_gives_zero_totals() {
    let totals = compute_metrics(vec![sample(46.0, 7.0, 2000.0)], FilterThresholds::default());
    assert_eq!(totals, MetricsTotals::default());
    assert!(totals.cumulative_distance.is_empty());
}

#[test]
fn distance_profile_has_one_entry_per_hop_and_never_decreases() {
    let track = alpine_track();
    let totals = compute_metrics(track.clone(), FilterThresholds::default());

    assert_eq!(totals.cumulative_distance.len(), track.len() - 1);
    assert!(totals
        .cumulative_distance
        .windows(2)
        .all(|w| w[0] <= w[1]));
}

#[test]
fn total_distance_is_the_sum_of_the_hops() {
    let track = alpine_track();
    let totals = compute_metrics(track.clone(), FilterThresholds::default());

    let mut sum = 0.0;
    for pair in track.windows(2) {
        sum += haversine_distance_metres(pair[0].as_geo_point(), pair[1].as_geo_point());
    }

    assert_eq!(totals.total_distance, sum);
    assert_eq!(totals.cumulative_distance.last(), Some(&totals.total_distance));
}

#[test]
fn alternating_elevation_counts_raw_but_not_smoothed() {
    // +5, -5, +5, -5 ... while walking ~111m between samples.
    let track: Vec<Sample> = (0..11)
        .map(|i| sample(0.0, i as f64 * 0.001, if i % 2 == 0 { 100.0 } else { 105.0 }))
        .collect();

    let totals = compute_metrics(track, FilterThresholds::new(10.0, 6.0));

    // 10 hops: 5 rising, 5 falling.
    assert_eq!(totals.total_elevation_gain, 25.0);
    assert_eq!(totals.total_elevation_loss, 25.0);
    assert_eq!(totals.total_elevation_gain_smoothed, 0.0);
    assert_eq!(totals.total_elevation_loss_smoothed, 0.0);
    assert!(totals.total_distance_smoothed > 1000.0);
}

#[test]
fn jitter_inside_the_xy_threshold_is_not_smoothed_distance() {
    // A GPS wandering within a few metres of a bench, with a noisy altimeter.
    let track: Vec<Sample> = (0..50)
        .map(|i| {
            let i = i as f64;
            sample(
                46.0 + (i * 0.9).sin() * 0.00001,
                7.0 + (i * 1.7).cos() * 0.00001,
                500.0 + (i * 0.5).sin() * 20.0,
            )
        })
        .collect();

    let totals = compute_metrics(track, FilterThresholds::new(10.0, 5.0));

    assert!(totals.total_distance > 0.0);
    assert!(totals.total_elevation_gain > 0.0);
    assert_eq!(totals.total_distance_smoothed, 0.0);
    assert_eq!(totals.total_elevation_gain_smoothed, 0.0);
    assert_eq!(totals.total_elevation_loss_smoothed, 0.0);
}

#[test]
fn filtered_anchor_only_moves_when_its_gate_passes() {
    // Each hop is ~55.6m. The first misses the 60m gate, the second makes the
    // distance from the start ~111m, which passes.
    let a = sample(0.0, 0.0, 0.0);
    let b = sample(0.0, 0.0005, 0.0);
    let c = sample(0.0, 0.001, 0.0);

    let mut metrics = TrackMetrics::new(60.0, 1.0);
    metrics.add_sample(&a);
    metrics.add_sample(&b);
    assert_eq!(metrics.totals().total_distance_smoothed, 0.0);

    metrics.add_sample(&c);
    let direct = haversine_distance_metres(a.as_geo_point(), c.as_geo_point());
    assert_eq!(metrics.totals().total_distance_smoothed, direct);
}

#[test]
fn smoothed_distance_is_measured_from_the_first_point_not_summed() {
    // With a 150m gate, 0.001 degrees (~111m) fails, 0.002 (~222m) passes.
    let track = vec![
        sample(0.0, 0.0, 0.0),
        sample(0.0, 0.001, 0.0),
        sample(0.0, 0.002, 0.0),
    ];

    let totals = compute_metrics(track, FilterThresholds::new(150.0, 1.0));

    let direct = haversine_distance_metres(point! { x: 0.0, y: 0.0 }, point! { x: 0.002, y: 0.0 });
    assert_eq!(totals.total_distance_smoothed, direct);
    assert_float_absolute_eq!(totals.total_distance, 2.0 * 111.19492664455873, 1e-6);
}

#[test]
fn gates_are_independent() {
    // Walk far enough on every hop, but climb only 1m per hop against a 3m
    // gate. Smoothed gain arrives in chunks of 3m.
    let track: Vec<Sample> = (0..10)
        .map(|i| sample(0.0, i as f64 * 0.001, 100.0 + i as f64))
        .collect();

    let totals = compute_metrics(track, FilterThresholds::new(10.0, 3.0));

    assert_eq!(totals.total_elevation_gain, 9.0);
    assert_eq!(totals.total_elevation_gain_smoothed, 9.0);

    let track: Vec<Sample> = (0..9)
        .map(|i| sample(0.0, i as f64 * 0.001, 100.0 + i as f64))
        .collect();

    let totals = compute_metrics(track, FilterThresholds::new(10.0, 3.0));

    // The last 2m are still below the gate.
    assert_eq!(totals.total_elevation_gain, 8.0);
    assert_eq!(totals.total_elevation_gain_smoothed, 6.0);
}

#[test]
fn totals_never_decrease() {
    let mut metrics = TrackMetrics::with_thresholds(FilterThresholds::default());
    let mut previous = metrics.totals().clone();

    for s in alpine_track() {
        metrics.add_sample(&s);
        let current = metrics.totals();
        assert!(current.total_distance >= previous.total_distance);
        assert!(current.total_distance_smoothed >= previous.total_distance_smoothed);
        assert!(current.total_elevation_gain >= previous.total_elevation_gain);
        assert!(current.total_elevation_loss >= previous.total_elevation_loss);
        assert!(current.total_elevation_gain_smoothed >= previous.total_elevation_gain_smoothed);
        assert!(current.total_elevation_loss_smoothed >= previous.total_elevation_loss_smoothed);
        previous = current.clone();
    }
}

#[test]
fn identical_runs_are_bit_identical() {
    let thresholds = FilterThresholds::new(7.5, 2.5);
    let first = compute_metrics(alpine_track(), thresholds);
    let second = compute_metrics(alpine_track(), thresholds);

    assert_eq!(first, second);
    assert_eq!(first.total_distance.to_bits(), second.total_distance.to_bits());
    assert_eq!(
        first.total_elevation_gain_smoothed.to_bits(),
        second.total_elevation_gain_smoothed.to_bits()
    );
}

#[test]
fn totals_serialize_with_their_field_names() {
    let totals = compute_metrics(
        vec![sample(0.0, 0.0, 0.0), sample(0.0, 0.001, 10.0)],
        FilterThresholds::default(),
    );
    let json = serde_json::to_value(&totals).unwrap();

    assert_eq!(json["total_elevation_gain"], 10.0);
    assert_eq!(json["total_elevation_gain_smoothed"], 10.0);
    assert_eq!(json["cumulative_distance"].as_array().unwrap().len(), 1);
}
