use std::path::{Path, PathBuf};

use clap::Parser;
use trailmetrics_core::{duplicate::DuplicateThresholds, metrics::FilterThresholds};

/// Returns the parsed command line options. Uses the 'wild' crate to do glob
/// expansion on Windows, so that Windows and Linux behave identically.
pub fn parse_args() -> Args {
    Args::parse_from(wild::args())
}

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        long,
        default_value = "10.0",
        value_parser = positive_metres,
        help = "Minimum distance, in metres, from the last accepted point before \
                movement counts towards the smoothed distance"
    )]
    pub threshold_xy: f64,

    #[arg(
        long,
        default_value = "5.0",
        value_parser = positive_metres,
        help = "Minimum change in elevation, in metres, from the last accepted \
                elevation before it counts towards the smoothed gain or loss"
    )]
    pub threshold_z: f64,

    #[arg(
        short,
        long,
        default_value = "false",
        help = "Overwrite output files even if they already exist"
    )]
    pub force: bool,

    #[arg(
        long,
        default_value = "false",
        help = "Write every trail, even those that look like a duplicate of an earlier one"
    )]
    pub ignore_duplicates: bool,

    #[arg(
        long,
        default_value = "50.0",
        value_parser = positive_metres,
        help = "Two trails whose distances differ by less than this many metres may be duplicates"
    )]
    pub duplicate_distance: f64,

    #[arg(
        long,
        default_value = "50.0",
        value_parser = positive_metres,
        help = "Two trails whose elevation gains and losses both differ by less than \
                this many metres may be duplicates"
    )]
    pub duplicate_elevation: f64,

    #[arg(
        long,
        default_value = "100.0",
        value_parser = positive_metres,
        help = "Two trails whose start points are closer than this many metres may be duplicates"
    )]
    pub duplicate_start: f64,

    #[arg(
        long,
        default_value = "false",
        help = "Print the trail records to stdout as JSON instead of writing '.metrics.json' files"
    )]
    pub stdout: bool,

    #[arg(
        help = "List of files to process. Any file that does not have a 'gpx' extension will be ignored."
    )]
    pub files: Vec<PathBuf>,
}

impl Args {
    /// Returns the input files, skipping anything that isn't a GPX.
    pub fn files(&self) -> Vec<PathBuf> {
        self.files.iter().filter(|f| is_gpx_file(f)).cloned().collect()
    }

    pub fn filter_thresholds(&self) -> FilterThresholds {
        FilterThresholds::new(self.threshold_xy, self.threshold_z)
    }

    pub fn duplicate_thresholds(&self) -> DuplicateThresholds {
        DuplicateThresholds {
            distance_metres: self.duplicate_distance,
            elevation_metres: self.duplicate_elevation,
            start_point_metres: self.duplicate_start,
        }
    }
}

fn is_gpx_file(p: &Path) -> bool {
    match p.extension() {
        Some(ext) => ext.eq_ignore_ascii_case("gpx"),
        None => false,
    }
}

fn positive_metres(s: &str) -> Result<f64, String> {
    let metres: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if metres.is_finite() && metres > 0.0 {
        Ok(metres)
    } else {
        Err(format!("'{s}' must be a positive number of metres"))
    }
}
