//! Connection listing parser.
//!
//! Turns `netstat -an` output from Linux or Windows into the ordered list of
//! remote IPv4 addresses. Lines that are not connection records are skipped
//! without complaint; they are expected noise (headers, UNIX sockets, IPv6).

mod parse;
mod record;

use std::collections::HashSet;
use std::path::Path;

use log::{debug, info};

use crate::config::StateMatching;
use crate::error_handling::TriageError;

pub use parse::{is_state_token, parse_record, STATE_VOCABULARY};
pub use record::{ConnectionRecord, Endpoint, Ipv4Token, Layout, Protocol};

/// Addresses extracted from an input file.
#[derive(Debug, Clone, Default)]
pub struct ParsedInput {
    /// Number of lines in the file
    pub lines_read: usize,
    /// Remote address of every recognized record, in file order, duplicates kept
    pub addresses: Vec<Ipv4Token>,
}

/// Extracts the remote address of every recognized record, in input order.
///
/// Duplicates are preserved; see [`dedup_first_seen`].
pub fn extract_remote_addresses<'a, I>(lines: I, matching: StateMatching) -> Vec<Ipv4Token>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter_map(|line| match parse_record(line, matching) {
            Some(record) => Some(record.remote.address),
            None => {
                if !line.trim().is_empty() {
                    debug!("Skipping non-record line: {}", line.trim_end());
                }
                None
            }
        })
        .collect()
}

/// Drops repeated addresses, keeping the first occurrence of each.
pub fn dedup_first_seen(addresses: Vec<Ipv4Token>) -> Vec<Ipv4Token> {
    let mut seen = HashSet::with_capacity(addresses.len());
    addresses
        .into_iter()
        .filter(|address| seen.insert(address.clone()))
        .collect()
}

/// Reads a connection listing from disk and extracts remote addresses.
///
/// Invalid UTF-8 is replaced rather than rejected, since Windows consoles
/// often save listings in a legacy code page.
///
/// # Errors
///
/// `TriageError::InputNotFound` if `path` does not exist, `TriageError::InputRead`
/// if it cannot be read.
pub async fn read_addresses(
    path: &Path,
    matching: StateMatching,
) -> Result<ParsedInput, TriageError> {
    if !path.exists() {
        return Err(TriageError::InputNotFound(path.to_path_buf()));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| TriageError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
    let text = String::from_utf8_lossy(&bytes);

    let lines_read = text.lines().count();
    let addresses = extract_remote_addresses(text.lines(), matching);
    info!(
        "Extracted {} remote addresses from {} lines of {}",
        addresses.len(),
        lines_read,
        path.display()
    );

    Ok(ParsedInput {
        lines_read,
        addresses,
    })
}
