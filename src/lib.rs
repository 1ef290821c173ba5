//! netstat_redlist library: foreign-peer triage for `netstat -an` listings
//!
//! This library reads a saved connection listing, extracts the remote IPv4
//! address of every connection record, looks up the registered country of each
//! address and produces a "redlist" of peers whose country differs from the
//! configured home country.
//!
//! # Example
//!
//! ```no_run
//! use netstat_redlist::{run_triage, Config, NoProgress};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: std::path::PathBuf::from("netstat.txt"),
//!     output: std::path::PathBuf::from("redlist.txt"),
//!     ..Default::default()
//! };
//!
//! let report = run_triage(config, Arc::new(NoProgress)).await?;
//! println!("{} foreign of {} unique addresses", report.foreign, report.unique_addresses);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
pub mod country;
mod error_handling;
pub mod geo;
pub mod initialization;
pub mod netstat;
pub mod redlist;

// Re-export public API
pub use app::{print_error_statistics, ConsoleProgress};
pub use config::{Config, LogFormat, LogLevel, Opt, OutputLayout, StateMatching};
pub use error_handling::{
    ErrorType, InfoType, InitializationError, LookupError, ProcessingStats, TriageError,
};
pub use geo::{AsnOriginResolver, GeoResolver, NoProgress, ProgressSink, RdapResolver};
pub use redlist::Redlist;
pub use run::{run_triage, run_triage_with, TriageReport};

// Internal run module (contains the main triage logic)
mod run {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Instant;

    use log::info;

    use crate::app::{print_error_statistics, print_run_summary};
    use crate::config::Config;
    use crate::country::CountryCodeTable;
    use crate::error_handling::{InfoType, ProcessingStats, TriageError};
    use crate::geo::{
        AsnOriginResolver, ClassifierSettings, GeoClassifier, GeoResolver, ProgressSink,
        RdapResolver,
    };
    use crate::initialization::{init_client, init_dns_resolver};
    use crate::netstat::{dedup_first_seen, read_addresses};
    use crate::redlist::Redlist;

    /// Results of a triage run.
    #[derive(Debug, Clone)]
    pub struct TriageReport {
        /// Lines in the input listing
        pub lines_read: usize,
        /// Connection records recognized, duplicates included
        pub addresses_extracted: usize,
        /// Distinct remote addresses looked up
        pub unique_addresses: usize,
        /// Addresses with a country
        pub classified: usize,
        /// Addresses whose lookup failed
        pub skipped: usize,
        /// Classified addresses outside the home country
        pub foreign: usize,
        /// Foreign addresses in first-seen order
        pub redlist: Redlist,
        /// Where the redlist was written
        pub output: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a triage against the RDAP service named in `config`.
    ///
    /// Networks whose RDAP object has no country are resolved through the
    /// ASN-origin zone, unless `config.asn_origin_zone` is `None`.
    ///
    /// `progress` receives one event per lookup as it starts and finishes.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input file does not exist or cannot be read
    /// - The HTTP client cannot be built
    /// - The redlist cannot be written
    ///
    /// Individual lookup failures are not errors; the address is skipped.
    pub async fn run_triage(
        config: Config,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<TriageReport, TriageError> {
        // A missing listing is reported before anything else is set up.
        if !config.input.exists() {
            return Err(TriageError::InputNotFound(config.input));
        }

        let client = init_client(config.lookup_timeout())?;
        let mut resolver = RdapResolver::new(client, config.rdap_url.clone());
        if let Some(zone) = &config.asn_origin_zone {
            let dns = init_dns_resolver(config.lookup_timeout());
            let origin = AsnOriginResolver::new(dns, zone);
            resolver = resolver.with_country_fallback(Arc::new(origin));
        }
        run_triage_with(config, Arc::new(resolver), progress).await
    }

    /// Runs a triage with a caller-supplied resolver.
    ///
    /// # Errors
    ///
    /// Same as [`run_triage`], minus client construction.
    pub async fn run_triage_with(
        config: Config,
        resolver: Arc<dyn GeoResolver>,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<TriageReport, TriageError> {
        let start_time = Instant::now();

        let parsed = read_addresses(&config.input, config.state_matching).await?;
        let addresses_extracted = parsed.addresses.len();

        let table = Arc::new(CountryCodeTable::load(&config.country_codes));
        info!("Loaded {} country codes", table.len());

        let stats = Arc::new(ProcessingStats::new());
        let addresses = dedup_first_seen(parsed.addresses);
        let duplicates = addresses_extracted - addresses.len();
        if duplicates > 0 {
            stats.add_info(InfoType::DuplicateAddress, duplicates);
        }

        let settings = ClassifierSettings {
            home_country: config.home_country.clone(),
            lookup_timeout: config.lookup_timeout(),
            max_concurrency: config.max_concurrency,
        };
        let classifier =
            GeoClassifier::new(resolver, table, settings).with_stats(Arc::clone(&stats));
        let outcomes = classifier.classify_all(&addresses, progress).await;

        let classified = outcomes
            .iter()
            .filter(|o| o.classification().is_some())
            .count();
        let redlist = Redlist::from_outcomes(&outcomes);
        redlist
            .write_to(&config.output, config.output_layout)
            .await?;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_error_statistics(&stats);
        print_run_summary(
            addresses.len(),
            classified,
            outcomes.len() - classified,
            redlist.len(),
            elapsed_seconds,
        );

        Ok(TriageReport {
            lines_read: parsed.lines_read,
            addresses_extracted,
            unique_addresses: addresses.len(),
            classified,
            skipped: outcomes.len() - classified,
            foreign: redlist.len(),
            redlist,
            output: config.output,
            elapsed_seconds,
        })
    }
}
