use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;
use trailmetrics_core::trail::TrailRecord;

/// Returns the name of the file we write the metrics of `input_file` to,
/// e.g. "walk.gpx" becomes "walk.metrics.json".
pub fn metrics_filename(input_file: &Path) -> PathBuf {
    let mut p = input_file.to_owned();
    p.set_extension("metrics.json");
    p
}

/// Writes each record next to the GPX it came from. Existing files are left
/// alone unless `force` is set.
pub fn write_records_to_files(records: &[TrailRecord], force: bool) -> Result<()> {
    for record in records {
        let input_file = record
            .filename
            .as_ref()
            .context("Trail record has no filename, cannot work out where to write it")?;
        let output_file = metrics_filename(input_file);

        if output_file.exists() && !force {
            info!(
                "Skipping {:?} because the output file already exists",
                &output_file
            );
            continue;
        }

        write_record_to_file(&output_file, record)?;
    }

    Ok(())
}

pub fn write_record_to_file(output_file: &Path, record: &TrailRecord) -> Result<()> {
    info!("Writing file {:?}", output_file);
    let file = File::create(output_file)
        .with_context(|| format!("Could not create {:?}", output_file))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, record)?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

/// Prints all the records as a single JSON array.
pub fn write_records_to_stdout(records: &[TrailRecord]) -> Result<()> {
    let mut w = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut w, records)?;
    writeln!(w)?;
    Ok(())
}
