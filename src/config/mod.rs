//! Application configuration and constants.
//!
//! This module provides:
//! - Default values and report literals
//! - Option enums shared by the library and the CLI
//! - The `Config` struct consumed by `run_triage`
//! - The `Opt` command-line parser that produces a `Config`

mod cli;
mod constants;
mod types;

pub use cli::Opt;
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, OutputLayout, StateMatching};
