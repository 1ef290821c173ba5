//! Command-line options.

use std::path::PathBuf;

use clap::Parser;

use crate::config::constants::{
    COUNTRY_CODES_FILE, DEFAULT_ASN_ORIGIN_ZONE, DEFAULT_MAX_CONCURRENCY, DEFAULT_RDAP_URL,
    HOME_COUNTRY, LOOKUP_TIMEOUT_SECS,
};
use crate::config::types::{Config, LogFormat, LogLevel, OutputLayout, StateMatching};

const INPUT_NOTE: &str = "\
The input file is the saved output of `netstat -an`, taken on Linux or Windows.
Only TCP/UDP records with an IPv4 remote address and a recognized state are used.";

/// Command-line options for the `netstat_redlist` binary.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// netstat_redlist -i netstat.txt -o redlist.txt
///
/// # Treat Canada as home and wait longer for slow lookups
/// netstat_redlist -i netstat.txt -o redlist.txt --home-country CA --timeout-seconds 10
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "netstat_redlist",
    version,
    about = "Flags foreign-origin IPv4 peers found in netstat output.",
    after_help = INPUT_NOTE
)]
pub struct Opt {
    /// Saved `netstat -an` output
    #[arg(short, long, value_parser)]
    pub input: PathBuf,

    /// Redlist file to write
    #[arg(short, long, value_parser)]
    pub output: PathBuf,

    /// Country name/code file (`name,code` rows)
    #[arg(long, value_parser, default_value = COUNTRY_CODES_FILE)]
    pub country_codes: PathBuf,

    /// Country code treated as domestic
    #[arg(long, default_value = HOME_COUNTRY)]
    pub home_country: String,

    /// Per-address lookup timeout in seconds (at least 1)
    #[arg(
        long,
        default_value_t = LOOKUP_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_seconds: u64,

    /// Maximum concurrent lookups (1 runs them one at a time)
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// RDAP service base URL
    #[arg(long, default_value = DEFAULT_RDAP_URL)]
    pub rdap_url: String,

    /// DNS zone for ASN-origin lookups when RDAP reports no country
    #[arg(long, default_value = DEFAULT_ASN_ORIGIN_ZONE)]
    pub asn_zone: String,

    /// Skip the ASN-origin lookup; networks without an RDAP country are skipped
    #[arg(long)]
    pub no_asn_fallback: bool,

    /// State column matching: exact|legacy
    #[arg(long, value_enum, default_value_t = StateMatching::Exact)]
    pub state_matching: StateMatching,

    /// Output file layout: lines|concatenated
    #[arg(long, value_enum, default_value_t = OutputLayout::Lines)]
    pub output_layout: OutputLayout,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Config {
            input: opt.input,
            output: opt.output,
            country_codes: opt.country_codes,
            home_country: opt.home_country.to_uppercase(),
            timeout_seconds: opt.timeout_seconds,
            max_concurrency: opt.max_concurrency,
            rdap_url: opt.rdap_url,
            asn_origin_zone: (!opt.no_asn_fallback).then_some(opt.asn_zone),
            state_matching: opt.state_matching,
            output_layout: opt.output_layout,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_short_flags_and_defaults() {
        let opt = Opt::try_parse_from(["netstat_redlist", "-i", "in.txt", "-o", "out.txt"])
            .expect("should parse");
        let config = Config::from(opt);
        assert_eq!(config.input, PathBuf::from("in.txt"));
        assert_eq!(config.output, PathBuf::from("out.txt"));
        assert_eq!(config.home_country, "US");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.state_matching, StateMatching::Exact);
        assert_eq!(config.output_layout, OutputLayout::Lines);
    }

    #[test]
    fn test_home_country_is_uppercased() {
        let opt = Opt::try_parse_from([
            "netstat_redlist",
            "--input",
            "in.txt",
            "--output",
            "out.txt",
            "--home-country",
            "ca",
        ])
        .expect("should parse");
        assert_eq!(Config::from(opt).home_country, "CA");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = Opt::try_parse_from([
            "netstat_redlist",
            "-i",
            "in.txt",
            "-o",
            "out.txt",
            "--timeout-seconds",
            "0",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_asn_fallback_flags() {
        let opt = Opt::try_parse_from(["netstat_redlist", "-i", "in.txt", "-o", "out.txt"])
            .expect("should parse");
        assert_eq!(
            Config::from(opt).asn_origin_zone.as_deref(),
            Some("origin.asn.cymru.com")
        );

        let opt = Opt::try_parse_from([
            "netstat_redlist",
            "-i",
            "in.txt",
            "-o",
            "out.txt",
            "--no-asn-fallback",
        ])
        .expect("should parse");
        assert_eq!(Config::from(opt).asn_origin_zone, None);
    }

    #[test]
    fn test_missing_output_is_rejected() {
        let err = Opt::try_parse_from(["netstat_redlist", "-i", "in.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        let err = Opt::try_parse_from([
            "netstat_redlist",
            "-i",
            "in.txt",
            "-o",
            "out.txt",
            "--output-layout",
            "csv",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_help_mentions_netstat_input() {
        let err = Opt::try_parse_from(["netstat_redlist", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
        assert!(err.to_string().contains("netstat -an"));
    }
}
