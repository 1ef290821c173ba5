//! RDAP-backed resolver.
//!
//! Queries `{base}/ip/{address}` and reads the registered country from the
//! returned IP network object. The default base, `https://rdap.org`, redirects
//! to the regional registry that owns the block; `reqwest` follows the
//! redirect.
//!
//! The `country` member is optional and ARIN normally leaves it out. When it
//! is missing the resolver asks its country fallback (see
//! [`RdapResolver::with_country_fallback`]) and keeps the RDAP description.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use crate::config::RDAP_ACCEPT;
use crate::error_handling::LookupError;
use crate::netstat::Ipv4Token;

use super::resolver::GeoResolver;
use super::types::GeoRecord;

/// Subset of an RDAP IP network object (RFC 9083 section 5.4).
#[derive(Debug, Deserialize)]
struct RdapNetwork {
    #[serde(default)]
    handle: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    remarks: Vec<RdapRemark>,
}

#[derive(Debug, Deserialize)]
struct RdapRemark {
    #[serde(default)]
    description: Vec<String>,
}

/// Resolver that queries an RDAP service over HTTP.
#[derive(Clone)]
pub struct RdapResolver {
    client: Arc<reqwest::Client>,
    base_url: String,
    country_fallback: Option<Arc<dyn GeoResolver>>,
}

impl RdapResolver {
    pub fn new(client: Arc<reqwest::Client>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            country_fallback: None,
        }
    }

    /// Supplies the country code for networks whose RDAP object has none.
    pub fn with_country_fallback(mut self, fallback: Arc<dyn GeoResolver>) -> Self {
        self.country_fallback = Some(fallback);
        self
    }

    fn query_url(&self, address: &Ipv4Token) -> String {
        format!("{}/ip/{}", self.base_url, address)
    }
}

fn transport_error(e: reqwest::Error, timeout: Duration) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout(timeout.as_secs())
    } else {
        LookupError::Network(e.to_string())
    }
}

/// Country code (if present) and description of a network object.
fn split_network(network: RdapNetwork) -> (Option<String>, String) {
    let country_code = network
        .country
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty());

    let description = network
        .name
        .filter(|n| !n.trim().is_empty())
        .or_else(|| {
            network
                .remarks
                .into_iter()
                .flat_map(|r| r.description)
                .find(|d| !d.trim().is_empty())
        })
        .or(network.handle)
        .unwrap_or_default();

    (country_code, description)
}

#[async_trait]
impl GeoResolver for RdapResolver {
    async fn lookup(
        &self,
        address: &Ipv4Token,
        timeout: Duration,
    ) -> Result<GeoRecord, LookupError> {
        if address.to_ipv4().is_none() {
            return Err(LookupError::InvalidAddress(address.to_string()));
        }

        let url = self.query_url(address);
        debug!("RDAP query: {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, RDAP_ACCEPT)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Network(format!(
                "RDAP server returned HTTP {} for {}",
                status.as_u16(),
                address
            )));
        }

        let network: RdapNetwork = response.json().await.map_err(|e| {
            if e.is_decode() {
                LookupError::MalformedResponse(e.to_string())
            } else {
                transport_error(e, timeout)
            }
        })?;

        let (country_code, description) = split_network(network);
        if let Some(country_code) = country_code {
            return Ok(GeoRecord {
                country_code,
                description,
            });
        }

        let Some(fallback) = &self.country_fallback else {
            return Err(LookupError::MissingField("country"));
        };
        debug!("RDAP object for {} has no country, asking fallback", address);
        let origin = fallback.lookup(address, timeout).await?;
        Ok(GeoRecord {
            country_code: origin.country_code,
            description: if description.is_empty() {
                origin.description
            } else {
                description
            },
        })
    }
}
