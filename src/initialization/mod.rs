//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - HTTP client used by the RDAP resolver
//! - DNS resolver used for ASN-origin country lookups
//! - Concurrency semaphore for lookups
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod dns;
mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use dns::init_dns_resolver;
pub use logger::init_logger_with;

/// Initializes a semaphore for controlling concurrency.
///
/// A zero count would block every lookup forever, so it is raised to 1.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_semaphore_permits() {
        let semaphore = init_semaphore(3);
        assert_eq!(semaphore.available_permits(), 3);
    }

    #[test]
    fn test_init_semaphore_zero_is_raised_to_one() {
        let semaphore = init_semaphore(0);
        assert_eq!(semaphore.available_permits(), 1);
    }
}
