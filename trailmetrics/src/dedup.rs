use log::{info, warn};
use logging_timer::time;
use trailmetrics_core::{
    duplicate::{find_duplicate, DuplicateThresholds},
    trail::TrailRecord,
};

/// Drops every record that looks like a duplicate of one earlier in the list.
/// The order of the surviving records is preserved.
#[time]
pub fn remove_duplicates(
    records: Vec<TrailRecord>,
    thresholds: DuplicateThresholds,
) -> Vec<TrailRecord> {
    let total = records.len();
    let mut accepted: Vec<TrailRecord> = Vec::with_capacity(total);

    for record in records {
        if let Some(existing) = find_duplicate(&record, &accepted, thresholds) {
            warn!(
                "Skipping {:?} because it looks like a duplicate of {:?}",
                record.filename, existing.filename
            );
            continue;
        }

        accepted.push(record);
    }

    if accepted.len() < total {
        info!(
            "dedup: kept {} of {} trails, use '--ignore-duplicates' to keep them all",
            accepted.len(),
            total
        );
    }

    accepted
}
