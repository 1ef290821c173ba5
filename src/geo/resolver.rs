//! Resolver abstraction.

use std::time::Duration;

use async_trait::async_trait;

use crate::error_handling::LookupError;
use crate::netstat::Ipv4Token;

use super::types::GeoRecord;

/// Maps an IPv4 address to its registered country.
///
/// Implementations should honour `timeout` where their transport allows it.
/// The classifier also wraps every call in `tokio::time::timeout`.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    async fn lookup(&self, address: &Ipv4Token, timeout: Duration)
        -> Result<GeoRecord, LookupError>;
}
