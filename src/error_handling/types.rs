//! Error type definitions.
//!
//! This module defines the typed errors used throughout the application and
//! the counter categories tracked by `ProcessingStats`.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Why a single address could not be classified.
///
/// Lookup errors are local to one address: the classifier records them and
/// moves on to the next address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The resolver did not answer within the lookup timeout.
    #[error("lookup timed out after {0}s")]
    Timeout(u64),

    /// The resolver answered with something that could not be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The resolver could not be reached or returned an error status.
    #[error("network error: {0}")]
    Network(String),

    /// The response decoded but lacked a required field.
    #[error("response missing field `{0}`")]
    MissingField(&'static str),

    /// The token is dotted-quad shaped but not a usable IPv4 address.
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),

    /// The lookup task ended without producing a result (panic or cancellation).
    #[error("lookup aborted: {0}")]
    Aborted(String),
}

impl LookupError {
    /// Counter category for this failure.
    pub fn error_type(&self) -> ErrorType {
        match self {
            LookupError::Timeout(_) => ErrorType::LookupTimeout,
            LookupError::MalformedResponse(_) => ErrorType::LookupMalformedResponse,
            LookupError::Network(_) => ErrorType::LookupNetworkError,
            LookupError::MissingField(_) => ErrorType::LookupMissingField,
            LookupError::InvalidAddress(_) => ErrorType::LookupInvalidAddress,
            LookupError::Aborted(_) => ErrorType::LookupAborted,
        }
    }
}

/// Fatal errors that stop a triage run.
#[derive(Error, Debug)]
pub enum TriageError {
    /// The connection listing does not exist. Nothing is looked up.
    #[error("Address file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The connection listing exists but could not be read.
    #[error("Failed to read address file {}: {source}", .path.display())]
    InputRead {
        /// Input path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The redlist could not be written.
    #[error("Failed to write redlist to {}: {source}", .path.display())]
    OutputWrite {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A shared resource could not be set up.
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}

/// Types of errors counted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Resolver failures
    LookupTimeout,
    LookupMalformedResponse,
    LookupNetworkError,
    LookupMissingField,
    LookupInvalidAddress,
    // Task failures
    LookupAborted,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::LookupTimeout => "Lookup timeout",
            ErrorType::LookupMalformedResponse => "Malformed resolver response",
            ErrorType::LookupNetworkError => "Resolver network error",
            ErrorType::LookupMissingField => "Resolver response missing field",
            ErrorType::LookupInvalidAddress => "Invalid IPv4 address",
            ErrorType::LookupAborted => "Lookup task aborted",
        }
    }
}

/// Informational counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// Remote address seen more than once in the listing
    DuplicateAddress,
    /// Country code absent from the country table
    UnlistedCountryCode,
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::DuplicateAddress => "Duplicate remote address",
            InfoType::UnlistedCountryCode => "Country code not in table",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_lookup_error_maps_to_distinct_error_types() {
        let errors = [
            LookupError::Timeout(5),
            LookupError::MalformedResponse("bad json".into()),
            LookupError::Network("connection refused".into()),
            LookupError::MissingField("country"),
            LookupError::InvalidAddress("999.1.1.1".into()),
            LookupError::Aborted("panicked".into()),
        ];
        let mut seen: Vec<ErrorType> = errors.iter().map(LookupError::error_type).collect();
        seen.dedup();
        assert_eq!(seen.len(), errors.len());
    }

    #[test]
    fn test_lookup_error_display() {
        assert_eq!(
            LookupError::Timeout(5).to_string(),
            "lookup timed out after 5s"
        );
        assert_eq!(
            LookupError::MissingField("country").to_string(),
            "response missing field `country`"
        );
    }

    #[test]
    fn test_input_not_found_message() {
        let err = TriageError::InputNotFound(PathBuf::from("missing.txt"));
        assert_eq!(err.to_string(), "Address file does not exist: missing.txt");
    }

    #[test]
    fn test_every_error_type_has_label() {
        for error_type in ErrorType::iter() {
            assert!(!error_type.as_str().is_empty());
        }
        for info_type in InfoType::iter() {
            assert!(!info_type.as_str().is_empty());
        }
    }
}
