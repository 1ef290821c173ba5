//! Connection record data structures.

use std::fmt;
use std::net::Ipv4Addr;

/// A dotted-quad address token: four runs of ASCII digits joined by dots.
///
/// Only the shape is checked. `999.0.0.1` is a valid token; it will simply
/// fail to resolve later on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv4Token(String);

impl Ipv4Token {
    /// Returns the token if `s` has dotted-quad shape.
    pub fn parse(s: &str) -> Option<Self> {
        let mut octets = 0;
        for part in s.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            octets += 1;
        }
        (octets == 4).then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric view of the token, `None` when an octet is out of range.
    pub fn to_ipv4(&self) -> Option<Ipv4Addr> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Ipv4Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ipv4Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `address:port` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub address: Ipv4Token,
    pub port: String,
}

impl Endpoint {
    /// Parses `a.b.c.d:port`. Wildcard ports (`*`) and IPv6 are rejected.
    pub fn parse(token: &str) -> Option<Self> {
        let (address, port) = token.rsplit_once(':')?;
        if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            address: Ipv4Token::parse(address)?,
            port: port.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("tcp") {
            Some(Protocol::Tcp)
        } else if token.eq_ignore_ascii_case("udp") {
            Some(Protocol::Udp)
        } else {
            None
        }
    }
}

/// Column layout a record was recognized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `proto recv-q send-q local remote state`
    Linux,
    /// `proto local remote state`
    Windows,
}

/// One recognized line of `netstat -an` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub protocol: Protocol,
    pub layout: Layout,
    pub local: Endpoint,
    pub remote: Endpoint,
    pub state: String,
}
