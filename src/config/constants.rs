//! Configuration constants.
//!
//! Defaults for the triage run plus the literal strings that appear in the
//! report and the output artifact.

/// Country code treated as domestic unless overridden with `--home-country`.
pub const HOME_COUNTRY: &str = "US";

/// Per-address lookup timeout in seconds.
pub const LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Maximum number of resolver calls in flight at once.
/// Set to 1 to run lookups strictly one after another.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Side file mapping country names to codes, read from the working directory.
pub const COUNTRY_CODES_FILE: &str = "country_codes.txt";

/// RDAP bootstrap service used by the default resolver.
pub const DEFAULT_RDAP_URL: &str = "https://rdap.org";

/// DNS zone answering `asn | prefix | cc | registry | date` TXT queries,
/// used when an RDAP network object carries no country.
pub const DEFAULT_ASN_ORIGIN_ZONE: &str = "origin.asn.cymru.com";

/// Label used when a resolved country code has no entry in the country table.
pub const NOT_LISTED_LABEL: &str = "<not listed>";

/// Placeholder written to the output artifact when nothing foreign was found.
pub const NO_EXTERNAL_ADDRESSES: &str = "No external addresses found.";

/// Accept header sent with RDAP queries.
pub const RDAP_ACCEPT: &str = "application/rdap+json, application/json";
