use std::path::PathBuf;

use geo::{point, Point};
use time::OffsetDateTime;

pub type Lat = f64; // -90..90
pub type Lon = f64; // -180..180

/// Data read from a GPX file. Only the parts of the format that feed the trail
/// metrics are kept; waypoints, links, extensions and the like are skipped by
/// the reader. The XSD is at https://www.topografix.com/GPX/1/1/gpx.xsd
#[derive(Debug, Clone, Default)]
pub struct Gpx {
    /// The filename field is not part of the XSD, but it is convenient to have
    /// it so it can be used as an identifier for the GPX data.
    pub filename: Option<PathBuf>,
    /// The 'version' attribute. This should always be "1.1".
    pub version: String,
    /// The 'creator' attribute.
    pub creator: String,
    /// Metadata about the file.
    pub metadata: Metadata,
    /// A list of routes.
    pub routes: Vec<Route>,
    /// A list of tracks.
    pub tracks: Vec<Track>,
}

/// The subset of the 'metadata' element that we care about.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// The name of the GPX file.
    pub name: Option<String>,
    /// The creation date of the file.
    pub time: Option<OffsetDateTime>,
}

/// A Route is an ordered list of waypoints representing a series of turn points
/// leading to a destination.
#[derive(Debug, Clone, Default)]
pub struct Route {
    /// GPS name of the route.
    pub name: Option<String>,
    /// Type (classification) of the route.
    pub r#type: Option<String>,
    /// The list of points in the route.
    pub points: Vec<Waypoint>,
}

/// A Track is an ordered list of points describing a path.
#[derive(Debug, Clone, Default)]
pub struct Track {
    /// GPS name of the track.
    pub name: Option<String>,
    /// Type (classification) of the track.
    pub r#type: Option<String>,
    /// List of segments in the track. To represent a single GPS track where GPS
    /// reception was lost, or the GPS receiver was turned off, a new Track
    /// Segment is started for each continuous span of track data.
    pub segments: Vec<TrackSegment>,
}

/// A Track Segment holds a list of Track Points which are logically connected
/// in order.
#[derive(Debug, Clone, Default)]
pub struct TrackSegment {
    /// The set of points in the segment.
    pub points: Vec<Waypoint>,
}

/// A point within a track or route ('trkpt' or 'rtept').
#[derive(Debug, Clone, Default)]
pub struct Waypoint {
    /// The latitude of the point. This is always in decimal degrees, and always
    /// in WGS84 datum.
    pub lat: Lat,
    /// The longitude of the point. This is always in decimal degrees, and
    /// always in WGS84 datum.
    pub lon: Lon,
    /// Elevation (in meters) of the point.
    pub ele: Option<f64>,
    /// Timestamp of the point, always UTC in a well-formed file.
    pub time: Option<OffsetDateTime>,
}

/// One track sample as consumed by the metrics accumulator: the coordinates
/// and, if the device recorded one, the elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub lat: Lat,
    pub lon: Lon,
    /// Elevation in metres. Tracks from devices without a barometer or GPS
    /// altitude simply have None here.
    pub ele: Option<f64>,
}

impl Sample {
    pub fn new(lat: Lat, lon: Lon, ele: Option<f64>) -> Self {
        Self { lat, lon, ele }
    }

    /// A missing elevation is counted as 0 metres. This is the one place that
    /// policy lives; nothing downstream sees an Option.
    pub fn elevation_or_zero(&self) -> f64 {
        self.ele.unwrap_or(0.0)
    }

    /// Makes a geo-Point based on the lat-lon coordinates of this sample.
    /// n.b. x=lon, y=lat. If you do it the other way round the
    /// distances are wrong - a lot wrong.
    pub fn as_geo_point(&self) -> Point {
        point! { x: self.lon, y: self.lat }
    }
}

impl From<&Waypoint> for Sample {
    fn from(value: &Waypoint) -> Self {
        Self::new(value.lat, value.lon, value.ele)
    }
}
