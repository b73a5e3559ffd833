// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare DNS provider for the DDNS agent.
//
// ## Behaviour
//
// - One trait call maps to the API requests for that operation only
//   (listings follow pagination until the last page)
// - Errors are returned to the caller; there is no retry, backoff or caching
// - HTTP status codes map to specific errors (401/403, 429, 5xx)
// - Updates use `PATCH` with only `content`, so TTL and proxy settings stay
//
// ## Security Requirements
//
// - API token NEVER appears in logs or `Debug` output
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?type=...&name=...`
// - Patch DNS Record: PATCH `/zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use ddns_core::config::{ApiToken, SyncConfig};
use ddns_core::traits::{DnsProvider, DnsRecord, RecordType, Zone};
use ddns_core::{Error, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Page size requested from list endpoints
const PER_PAGE: u32 = 50;

/// Upper bound on pages followed for a single listing
const MAX_PAGES: u32 = 100;

const PROVIDER: &str = "cloudflare";

/// Cloudflare v4 response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiError>,
    result: Option<T>,
    #[serde(default)]
    result_info: Option<ResultInfo>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: u64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResultInfo {
    #[serde(default)]
    total_pages: u32,
}

fn describe_errors(errors: &[ApiError]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(|e| format!("[{}] {}", e.code, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Cloudflare DNS provider
///
/// Stateless apart from the HTTP client; safe to share between
/// overlapping cycles.
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: ApiToken,

    /// API base URL, without trailing slash
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Listings with more pages than this are refused
    max_pages: u32,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:Read and DNS:Edit permissions
    /// - `timeout`: Per-request timeout
    pub fn new(api_token: ApiToken, timeout: Duration) -> Result<Self> {
        if api_token.expose().is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("could not create cloudflare api client: {}", e)))?;

        Ok(Self {
            api_token,
            base_url: CLOUDFLARE_API_BASE.to_string(),
            client,
            max_pages: MAX_PAGES,
        })
    }

    /// Point the provider at a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create a provider from the agent configuration
    pub fn from_config(config: &SyncConfig) -> Result<Self> {
        Ok(Self::new(config.api_token.clone(), config.http_timeout)?
            .with_base_url(config.api_base_url.clone()))
    }

    /// Fetch every page of a list endpoint, preserving the API's order
    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        filters: &[(&str, &str)],
        what: &str,
    ) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            tracing::debug!(url = %url, page, "GET {}", what);

            let response = self
                .client
                .get(&url)
                .bearer_auth(self.api_token.expose())
                .query(filters)
                .query(&[("page", page), ("per_page", PER_PAGE)])
                .send()
                .await
                .map_err(|e| Error::http(format!("{} request failed: {}", what, e)))?;

            let body: ApiResponse<Vec<T>> = read_response(response, what).await?;
            items.extend(body.result.unwrap_or_default());

            let Some(info) = body.result_info else { break };

            // a truncated listing would silently change which match is last
            if info.total_pages > self.max_pages {
                return Err(Error::provider(
                    PROVIDER,
                    format!(
                        "{}: {} pages of results, more than the {} this client follows",
                        what, info.total_pages, self.max_pages
                    ),
                ));
            }

            if page >= info.total_pages {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

/// Check status and envelope, returning the decoded body
async fn read_response<T: DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<ApiResponse<T>> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        // Cloudflare error bodies are usually the same envelope
        let details = serde_json::from_str::<ApiResponse<serde_json::Value>>(&error_text)
            .map(|body| describe_errors(&body.errors))
            .unwrap_or(error_text);

        return Err(match status.as_u16() {
            401 | 403 => Error::auth(format!(
                "{}: invalid API token or insufficient permissions. Status: {} - {}",
                what, status, details
            )),
            429 => Error::rate_limited(format!(
                "{}: rate limit exceeded. Status: {}",
                what, status
            )),
            500..=599 => Error::provider(
                PROVIDER,
                format!("{}: Cloudflare server error (transient): {} - {}", what, status, details),
            ),
            _ => Error::provider(
                PROVIDER,
                format!("{} failed: {} - {}", what, status, details),
            ),
        });
    }

    let body: ApiResponse<T> = response
        .json()
        .await
        .map_err(|e| Error::provider(PROVIDER, format!("failed to parse {} response: {}", what, e)))?;

    if !body.success {
        return Err(Error::provider(
            PROVIDER,
            format!("{} failed: {}", what, describe_errors(&body.errors)),
        ));
    }

    Ok(body)
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn list_zones(&self, name: &str) -> Result<Vec<Zone>> {
        self.get_all("/zones", &[("name", name)], "list zones").await
    }

    async fn list_records(
        &self,
        zone_id: &str,
        record_type: RecordType,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        let path = format!("/zones/{}/dns_records", zone_id);
        self.get_all(
            &path,
            &[("type", record_type.as_str()), ("name", name)],
            "list dns records",
        )
        .await
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        content: &str,
    ) -> Result<DnsRecord> {
        let url = format!("{}/zones/{}/dns_records/{}", self.base_url, zone_id, record_id);
        tracing::debug!(url = %url, content, "PATCH dns record");

        let response = self
            .client
            .patch(&url)
            .bearer_auth(self.api_token.expose())
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await
            .map_err(|e| Error::http(format!("update dns record request failed: {}", e)))?;

        let body: ApiResponse<DnsRecord> = read_response(response, "update dns record").await?;
        let record = body.result.ok_or_else(|| {
            Error::provider(PROVIDER, "update dns record: response has no result")
        })?;

        tracing::info!(record = %record.name, content = %record.content, "DNS record updated");
        Ok(record)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
