// # HTTP IP Resolver
//
// This crate provides the HTTP-based IP resolver for the DDNS agent.
//
// ## Architecture
//
// Fetches the current public address from an "echo my IP" service such as
// `https://ipinfo.io/ip`, `https://api.ipify.org` or `https://icanhazip.com`.
// The whole response body is the address; there is no JSON or other
// structure to parse, and bodies longer than a few hundred bytes are refused.
// One call is one request: no caching, no retries, no background polling
// (the scheduler owns timing).

use ddns_core::config::SyncConfig;
use ddns_core::traits::{IpResolver, ResolvedAddress};
use ddns_core::{Error, Result};

use std::time::Duration;

/// Largest response body accepted; an IP literal is far shorter
const MAX_BODY_BYTES: usize = 256;

/// User agent sent to echo services
const USER_AGENT: &str = concat!("ddns-sync/", env!("CARGO_PKG_VERSION"));

/// HTTP echo-service IP resolver
#[derive(Debug, Clone)]
pub struct HttpIpResolver {
    /// URL to fetch the address from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpResolver {
    /// Create a new HTTP IP resolver
    ///
    /// # Parameters
    ///
    /// - `url`: Echo service URL (e.g., "https://ipinfo.io/ip")
    /// - `timeout`: Per-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::config(format!("could not build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Create a resolver for the configured IP-info endpoint
    pub fn from_config(config: &SyncConfig) -> Result<Self> {
        Self::new(config.ip_info_url.clone(), config.http_timeout)
    }

    fn oversized(&self) -> Error {
        Error::resolution(format!(
            "'{}' answered with more than {} bytes, which is not an IP address",
            self.url, MAX_BODY_BYTES
        ))
    }
}

#[async_trait::async_trait]
impl IpResolver for HttpIpResolver {
    async fn resolve(&self) -> Result<ResolvedAddress> {
        tracing::debug!(url = %self.url, "requesting current IP");

        let mut response = self.client.get(&self.url).send().await.map_err(|e| {
            Error::resolution(format!(
                "error when requesting the current ip from '{}': {}",
                self.url, e
            ))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::resolution(format!(
                "'{}' answered with HTTP {}",
                self.url, status
            )));
        }

        if response
            .content_length()
            .is_some_and(|length| length > MAX_BODY_BYTES as u64)
        {
            return Err(self.oversized());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            Error::resolution(format!(
                "error reading the body of the ip response from '{}': {}",
                self.url, e
            ))
        })? {
            body.extend_from_slice(&chunk);
            if body.len() > MAX_BODY_BYTES {
                return Err(self.oversized());
            }
        }

        ResolvedAddress::parse(&String::from_utf8_lossy(&body))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
