//! ASN-origin resolver.
//!
//! Looks up the registered country of an address's origin AS through the
//! Team Cymru DNS interface. A query for `9.0.250.142.origin.asn.cymru.com`
//! returns TXT records of the form
//!
//! ```text
//! 15169 | 142.250.0.0/15 | US | arin | 2012-05-24
//! ```
//!
//! where the third column is the country code.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;
use log::debug;

use crate::error_handling::LookupError;
use crate::netstat::Ipv4Token;

use super::resolver::GeoResolver;
use super::types::GeoRecord;

/// Resolver backed by DNS TXT records of an ASN-origin zone.
#[derive(Clone)]
pub struct AsnOriginResolver {
    dns: Arc<TokioAsyncResolver>,
    zone: String,
}

impl AsnOriginResolver {
    pub fn new(dns: Arc<TokioAsyncResolver>, zone: impl Into<String>) -> Self {
        let zone = zone.into().trim_matches('.').to_string();
        Self { dns, zone }
    }
}

/// Fully qualified query name: octets reversed, then the zone.
pub fn origin_query_name(address: Ipv4Addr, zone: &str) -> String {
    let [a, b, c, d] = address.octets();
    format!("{d}.{c}.{b}.{a}.{}.", zone.trim_matches('.'))
}

/// Parses one `asn | prefix | cc | registry | date` record.
pub fn parse_origin_txt(txt: &str) -> Result<GeoRecord, LookupError> {
    let fields: Vec<&str> = txt.split('|').map(str::trim).collect();
    if fields.len() < 3 {
        return Err(LookupError::MalformedResponse(format!(
            "unexpected ASN origin record: {txt}"
        )));
    }

    let country_code = fields[2].to_ascii_uppercase();
    if country_code.is_empty() {
        return Err(LookupError::MissingField("country"));
    }

    // Multi-origin prefixes list several ASNs separated by spaces
    let description = fields[0]
        .split_whitespace()
        .next()
        .map(|asn| format!("AS{asn}"))
        .unwrap_or_default();

    Ok(GeoRecord {
        country_code,
        description,
    })
}

fn dns_error(e: ResolveError, timeout: Duration) -> LookupError {
    match e.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => LookupError::MissingField("country"),
        ResolveErrorKind::Timeout => LookupError::Timeout(timeout.as_secs()),
        _ => LookupError::Network(e.to_string()),
    }
}

#[async_trait]
impl GeoResolver for AsnOriginResolver {
    async fn lookup(
        &self,
        address: &Ipv4Token,
        timeout: Duration,
    ) -> Result<GeoRecord, LookupError> {
        let ip = address
            .to_ipv4()
            .ok_or_else(|| LookupError::InvalidAddress(address.to_string()))?;
        let name = origin_query_name(ip, &self.zone);
        debug!("ASN origin query: {}", name);

        let lookup = self
            .dns
            .txt_lookup(name.as_str())
            .await
            .map_err(|e| dns_error(e, timeout))?;

        let records: Vec<String> = lookup
            .iter()
            .map(|txt| {
                txt.iter()
                    .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                    .collect::<Vec<String>>()
                    .join("")
            })
            .collect();

        let mut last_error = LookupError::MissingField("country");
        for record in &records {
            match parse_origin_txt(record) {
                Ok(geo) => return Ok(geo),
                Err(e) => last_error = e,
            }
        }
        Err(last_error)
    }
}
