//! Tokenizing parser for `netstat -an` lines.
//!
//! A line is split on ASCII whitespace and matched against two layouts:
//!
//! ```text
//! Linux:    proto [recv-q [send-q]] local remote state [pid/program]
//! Windows:  proto local remote state [pid]
//! ```
//!
//! Anything that does not fit is rejected with `None`; the parser never errors.

use crate::config::StateMatching;

use super::record::{ConnectionRecord, Endpoint, Layout, Protocol};

/// State words accepted by `StateMatching::Exact`.
pub const STATE_VOCABULARY: &[&str] = &[
    "ESTABLISHED",
    "LISTEN",
    "LISTENING",
    "CLOSE_WAIT",
    "LAST_ACK",
    "CLOSED",
    "CLOSING",
];

/// Letters accepted by `StateMatching::Legacy`.
const LEGACY_STATE_ALPHABET: &str = "LAST_ACKCLOSE_WAITESTABLISHEDLISTENING";

/// Linux prints at most two queue columns.
const MAX_QUEUE_FIELDS: usize = 2;

/// Returns true when `token` is accepted as a connection state.
pub fn is_state_token(token: &str, matching: StateMatching) -> bool {
    match matching {
        StateMatching::Exact => STATE_VOCABULARY.contains(&token),
        StateMatching::Legacy => token
            .chars()
            .next()
            .is_some_and(|c| LEGACY_STATE_ALPHABET.contains(c)),
    }
}

/// Parses one line into a `ConnectionRecord`.
///
/// Returns `None` for headers, blank lines, IPv6 sockets, wildcard peers
/// (`*:*`, `0.0.0.0:*`) and records without a state column.
pub fn parse_record(line: &str, matching: StateMatching) -> Option<ConnectionRecord> {
    let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
    let (first, rest) = tokens.split_first()?;
    let protocol = Protocol::parse(first)?;

    let queue_fields = rest
        .iter()
        .take(MAX_QUEUE_FIELDS)
        .take_while(|t| t.bytes().all(|b| b.is_ascii_digit()))
        .count();
    let layout = if queue_fields == 0 {
        Layout::Windows
    } else {
        Layout::Linux
    };

    let [local, remote, state, ..] = &rest[queue_fields..] else {
        return None;
    };
    if !is_state_token(state, matching) {
        return None;
    }

    Some(ConnectionRecord {
        protocol,
        layout,
        local: Endpoint::parse(local)?,
        remote: Endpoint::parse(remote)?,
        state: state.to_string(),
    })
}
