//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};

/// Prints a one-line summary of the run.
///
/// Works with both plain and JSON log formats (log::info! handles formatting).
pub fn print_run_summary(
    unique: usize,
    classified: usize,
    skipped: usize,
    foreign: usize,
    elapsed_seconds: f64,
) {
    info!(
        "Looked up {} address{} ({} classified, {} skipped, {} foreign) in {:.1}s",
        unique,
        if unique == 1 { "" } else { "es" },
        classified,
        skipped,
        foreign,
        elapsed_seconds
    );
}

/// Prints error and info counters to the log.
///
/// Categories with a zero count are left out.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Lookup Failures ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}
