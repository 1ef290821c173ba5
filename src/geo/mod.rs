//! Geolocation lookup and classification.
//!
//! This module provides:
//! - `GeoResolver`, the seam to whatever service maps an address to a country
//! - `RdapResolver`, the RDAP-over-HTTPS implementation used by the binary
//! - `AsnOriginResolver`, the DNS ASN-origin lookup RDAP falls back to
//! - `GeoClassifier`, which runs lookups with a timeout and bounded
//!   concurrency and classifies each address against the home country

mod asn;
mod classify;
mod rdap;
mod resolver;
mod types;

pub use asn::{origin_query_name, parse_origin_txt, AsnOriginResolver};
pub use classify::{classify, ClassifierSettings, GeoClassifier};
pub use rdap::RdapResolver;
pub use resolver::GeoResolver;
pub use types::{
    Classification, GeoRecord, LookupEvent, LookupOutcome, NoProgress, ProgressSink,
};
