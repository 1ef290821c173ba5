//! Console-facing helpers used by the binary and the run loop.
//!
//! This module provides the progress sink that prints one line per lookup and
//! the end-of-run statistics printer.

pub mod progress;
pub mod statistics;

// Re-export public API
pub use progress::ConsoleProgress;
pub use statistics::{print_error_statistics, print_run_summary};
