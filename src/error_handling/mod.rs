//! Error handling and processing statistics.
//!
//! This module provides:
//! - Typed errors for initialization, per-address lookups and fatal run errors
//! - Processing statistics tracking (lookup failures by kind, info metrics)
//!
//! Lookup failures are never fatal. They are counted here and the address is
//! dropped from the results.

mod stats;
mod types;

pub use stats::ProcessingStats;
pub use types::{ErrorType, InfoType, InitializationError, LookupError, TriageError};
