use time::OffsetDateTime;

use crate::model::{Gpx, Lat, Lon, Sample, Waypoint};

impl Gpx {
    /// Returns the total number of points across all tracks and segments.
    pub fn num_points(&self) -> usize {
        self.tracks
            .iter()
            .map(|track| {
                track
                    .segments
                    .iter()
                    .map(|segment| segment.points.len())
                    .sum::<usize>()
            })
            .sum()
    }

    /// Returns the total number of points across all routes.
    pub fn num_route_points(&self) -> usize {
        self.routes.iter().map(|route| route.points.len()).sum()
    }

    /// Returns true if there is nothing in the file we can measure, i.e. no
    /// track points and no route points.
    pub fn is_empty(&self) -> bool {
        self.num_points() == 0 && self.num_route_points() == 0
    }

    /// Returns the points we measure, in file order. Track points win; a file
    /// that only contains routes (as exported by many route planners) falls
    /// back to the route points.
    pub fn points(&self) -> Box<dyn Iterator<Item = &Waypoint> + '_> {
        if self.num_points() > 0 {
            Box::new(
                self.tracks
                    .iter()
                    .flat_map(|track| track.segments.iter())
                    .flat_map(|segment| segment.points.iter()),
            )
        } else {
            Box::new(self.routes.iter().flat_map(|route| route.points.iter()))
        }
    }

    /// Returns the samples to feed into the metrics accumulator.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.points().map(Sample::from)
    }

    /// The lat-lon of the first measured point.
    pub fn start_point(&self) -> Option<(Lat, Lon)> {
        self.points().next().map(|p| (p.lat, p.lon))
    }

    /// The time of the first point that has one.
    pub fn first_time(&self) -> Option<OffsetDateTime> {
        self.points().find_map(|p| p.time)
    }

    /// The time of the last point that has one.
    pub fn last_time(&self) -> Option<OffsetDateTime> {
        self.points().filter_map(|p| p.time).last()
    }

    /// Works out a name for the trail. We try the metadata, then the
    /// tracks and routes, and finally fall back to the filename.
    pub fn trail_name(&self) -> Option<String> {
        self.metadata
            .name
            .clone()
            .or_else(|| self.tracks.iter().find_map(|t| t.name.clone()))
            .or_else(|| self.routes.iter().find_map(|r| r.name.clone()))
            .or_else(|| {
                self.filename
                    .as_ref()
                    .and_then(|f| f.file_stem())
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
    }
}

impl Waypoint {
    pub fn with_lat_lon(lat: Lat, lon: Lon) -> Self {
        Self {
            lat,
            lon,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::model::{Route, Track, TrackSegment};

    fn track(name: Option<&str>, segments: Vec<Vec<Waypoint>>) -> Track {
        Track {
            name: name.map(String::from),
            r#type: None,
            segments: segments
                .into_iter()
                .map(|points| TrackSegment { points })
                .collect(),
        }
    }

    fn wp(lat: f64, lon: f64) -> Waypoint {
        Waypoint::with_lat_lon(lat, lon)
    }

    #[test]
    fn points_fall_back_to_routes() {
        let gpx = Gpx {
            routes: vec![Route {
                name: Some("planned".into()),
                r#type: None,
                points: vec![wp(5.0, 6.0), wp(7.0, 8.0)],
            }],
            ..Default::default()
        };

        assert!(!gpx.is_empty());
        assert_eq!(gpx.samples().count(), 2);
        assert_eq!(gpx.start_point(), Some((5.0, 6.0)));
        assert_eq!(gpx.trail_name().as_deref(), Some("planned"));
    }

    #[test]
    fn tracks_win_over_routes() {
        let gpx = Gpx {
            tracks: vec![track(None, vec![vec![wp(1.0, 2.0)]])],
            routes: vec![Route {
                points: vec![wp(5.0, 6.0)],
                ..Default::default()
            }],
            ..Default::default()
        };

        assert_eq!(gpx.start_point(), Some((1.0, 2.0)));
    }

    #[test]
    fn trail_name_falls_back_to_file_stem() {
        let gpx = Gpx {
            filename: Some(PathBuf::from("/tmp/Ben Nevis.gpx")),
            ..Default::default()
        };

        assert_eq!(gpx.trail_name().as_deref(), Some("Ben Nevis"));
    }
}
