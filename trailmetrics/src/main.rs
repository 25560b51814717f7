use std::{io::Write, path::Path};

use anyhow::{Context, Ok, Result};
use args::parse_args;
use clap::builder::styling::AnsiColor;
use dedup::remove_duplicates;
use env_logger::Builder;
use log::{debug, info, warn};
use logging_timer::time;
use output::{write_records_to_files, write_records_to_stdout};
use rayon::prelude::*;
use trailmetrics_core::{
    formatting::format_km, metrics::FilterThresholds, read::read_gpx_from_file,
    trail::TrailRecord,
};

mod args;
mod dedup;
mod output;

pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

#[time]
fn main() -> Result<()> {
    configure_logging();
    info!("Starting {PROGRAM_NAME}");

    let args = parse_args();
    debug!("{:?}", &args);
    if args.force {
        info!("'--force' specified, all existing output files will be overwritten");
    }

    let input_files = args.files();
    if input_files.is_empty() {
        warn!("No .gpx files specified, exiting");
        return Ok(());
    }

    let thresholds = args.filter_thresholds();
    info!(
        "Filtering out movement below {}m horizontally and {}m vertically",
        thresholds.xy_metres, thresholds.z_metres
    );

    // Every file gets its own accumulator, so there is nothing shared between
    // them and they can all be measured at once.
    let records = input_files
        .par_iter()
        .map(|f| measure_file(f, thresholds))
        .collect::<Result<Vec<_>>>()?;

    let records = if args.ignore_duplicates {
        debug!("'--ignore-duplicates' specified, not checking for duplicates");
        records
    } else {
        remove_duplicates(records, args.duplicate_thresholds())
    };

    for record in &records {
        log_summary(record);
    }

    if args.stdout {
        write_records_to_stdout(&records)?;
    } else {
        write_records_to_files(&records, args.force)?;
    }

    Ok(())
}

fn measure_file(input_file: &Path, thresholds: FilterThresholds) -> Result<TrailRecord> {
    let gpx = read_gpx_from_file(input_file)?;
    TrailRecord::from_gpx(&gpx, thresholds)
        .with_context(|| format!("Could not measure {:?}", input_file))
}

fn log_summary(record: &TrailRecord) {
    info!(
        "{}: {} over {} points, +{:.0}m/-{:.0}m",
        record.name.as_deref().unwrap_or("(unnamed)"),
        format_km(record.distance),
        record.num_points,
        record.elevation_gain,
        record.elevation_loss,
    );
}

fn configure_logging() {
    let mut builder = Builder::from_default_env();

    builder.format(|buf, record| {
        let level_style = buf.default_level_style(record.level());
        let level_style = match record.level() {
            log::Level::Error => level_style.fg_color(Some(AnsiColor::Red.into())),
            log::Level::Warn => level_style.fg_color(Some(AnsiColor::Yellow.into())),
            log::Level::Info => level_style.fg_color(Some(AnsiColor::Green.into())),
            log::Level::Debug => level_style.fg_color(Some(AnsiColor::Blue.into())),
            log::Level::Trace => level_style.fg_color(Some(AnsiColor::Magenta.into())),
        };

        let line_number_style = buf
            .default_level_style(record.level())
            .fg_color(Some(AnsiColor::Cyan.into()));

        match (record.file(), record.line()) {
            (Some(file), Some(line)) => writeln!(
                buf,
                "[{} {level_style}{}{level_style:#} {}/{line_number_style}{}{line_number_style:#}] {}",
                buf.timestamp(),
                record.level(),
                file,
                line,
                record.args()
            ),
            (Some(file), None) => writeln!(
                buf,
                "[{} {level_style}{}{level_style:#} {}] {}",
                buf.timestamp(),
                record.level(),
                file,
                record.args()
            ),
            (None, _) => writeln!(
                buf,
                "[{} {level_style}{}{level_style:#}] {}",
                buf.timestamp(),
                record.level(),
                record.args()
            ),
        }
    });

    builder.init();
}
