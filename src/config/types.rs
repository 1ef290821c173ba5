//! Configuration types and CLI option enums.
//!
//! The enums derive `clap::ValueEnum` so the binary can expose them directly
//! as flag values; `Config` itself has no CLI dependency.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    COUNTRY_CODES_FILE, DEFAULT_ASN_ORIGIN_ZONE, DEFAULT_MAX_CONCURRENCY, DEFAULT_RDAP_URL,
    HOME_COUNTRY, LOOKUP_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the connection-state column is matched.
///
/// `Exact` only accepts a fixed list of state words. `Legacy` accepts any
/// token that starts with one of the letters of
/// `LAST_ACKCLOSE_WAITESTABLISHEDLISTENING`, which is what earlier versions
/// of this tool did; it lets through `SYN_SENT`, `TIME_WAIT` and even `STALE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StateMatching {
    /// Match a fixed list of state words
    #[default]
    Exact,
    /// Match any token starting with a letter of the historical state alphabet
    Legacy,
}

/// Layout of the redlist output file.
///
/// `Concatenated` reproduces the historical file format, where entries were
/// written back-to-back with no separator. Files written that way cannot be
/// read line by line, so `Lines` is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputLayout {
    /// One entry per line, each terminated by `\n`
    #[default]
    Lines,
    /// Entries written back-to-back without separators
    Concatenated,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use netstat_redlist::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: PathBuf::from("netstat.txt"),
///     output: PathBuf::from("redlist.txt"),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// `netstat -an` output to scan
    pub input: PathBuf,

    /// Redlist output file
    pub output: PathBuf,

    /// Country name/code side file
    pub country_codes: PathBuf,

    /// Country code treated as domestic
    pub home_country: String,

    /// Per-address lookup timeout in seconds
    pub timeout_seconds: u64,

    /// Maximum concurrent lookups
    pub max_concurrency: usize,

    /// RDAP service base URL
    pub rdap_url: String,

    /// ASN-origin DNS zone consulted when RDAP has no country (`None` disables)
    pub asn_origin_zone: Option<String>,

    /// State column matching mode
    pub state_matching: StateMatching,

    /// Output file layout
    pub output_layout: OutputLayout,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Lookup timeout as a `Duration`.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("netstat.txt"),
            output: PathBuf::from("redlist.txt"),
            country_codes: PathBuf::from(COUNTRY_CODES_FILE),
            home_country: HOME_COUNTRY.to_string(),
            timeout_seconds: LOOKUP_TIMEOUT_SECS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            rdap_url: DEFAULT_RDAP_URL.to_string(),
            asn_origin_zone: Some(DEFAULT_ASN_ORIGIN_ZONE.to_string()),
            state_matching: StateMatching::Exact,
            output_layout: OutputLayout::Lines,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}
