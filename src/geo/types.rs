//! Geolocation data structures.

use crate::error_handling::LookupError;
use crate::netstat::Ipv4Token;

/// What a resolver reports for one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoRecord {
    /// Registered country code, e.g. `CN`
    pub country_code: String,
    /// Free-text registration description (network or ASN name)
    pub description: String,
}

/// Classification of one address relative to the home country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub address: Ipv4Token,
    pub country_code: String,
    /// Name from the country table, or `<not listed>`
    pub country_name: String,
    pub description: String,
    pub is_foreign: bool,
}

/// Result of classifying one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Classified(Classification),
    Skipped {
        address: Ipv4Token,
        reason: LookupError,
    },
}

impl LookupOutcome {
    pub fn address(&self) -> &Ipv4Token {
        match self {
            LookupOutcome::Classified(c) => &c.address,
            LookupOutcome::Skipped { address, .. } => address,
        }
    }

    pub fn classification(&self) -> Option<&Classification> {
        match self {
            LookupOutcome::Classified(c) => Some(c),
            LookupOutcome::Skipped { .. } => None,
        }
    }
}

/// Progress notification emitted while classifying.
///
/// Events arrive in completion order, which differs from input order when
/// lookups run concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupEvent {
    Started { address: Ipv4Token },
    Classified(Classification),
    Skipped { address: Ipv4Token, reason: LookupError },
}

/// Receives progress notifications from the classifier.
pub trait ProgressSink: Send + Sync {
    fn on_event(&self, event: &LookupEvent);
}

/// Discards all progress notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_event(&self, _event: &LookupEvent) {}
}
