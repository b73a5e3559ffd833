// # DNS Provider Trait
//
// Defines the interface the reconciler uses to read and write provider state.
//
// ## Implementations
//
// - Cloudflare: `ddns-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::DnsProvider;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let zones = provider.list_zones("example.com").await?;
//     let records = provider
//         .list_records(&zones[0].id, RecordType::A, "home.example.com")
//         .await?;
//     provider
//         .update_record(&zones[0].id, &records[0].id, "203.0.113.7")
//         .await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A provider-managed zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-specific zone identifier
    pub id: String,
    /// Zone apex name (e.g. "example.com")
    pub name: String,
}

/// DNS record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// IPv6 address record
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The provider's current view of a DNS record
///
/// Fetched fresh every cycle and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Provider-specific record identifier
    pub id: String,
    /// Record type as reported by the provider (e.g. "A")
    #[serde(rename = "type")]
    pub record_type: String,
    /// Fully qualified record name
    pub name: String,
    /// Record content; an IP literal for address records
    pub content: String,
}

/// Trait for DNS provider implementations
///
/// Implementations are thin API clients: one method call maps to the
/// provider calls needed for that single operation (listing may page).
/// They never retry, cache, spawn tasks or decide whether an update is
/// needed; all of that belongs to the reconciler and scheduler.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks,
/// since overlapping cycles may call them concurrently.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List zones whose name matches `name`
    ///
    /// The returned order is the provider's order; the reconciler's match
    /// policy depends on it.
    async fn list_zones(&self, name: &str) -> Result<Vec<Zone>, crate::Error>;

    /// List records of `record_type` named `name` inside `zone_id`
    async fn list_records(
        &self,
        zone_id: &str,
        record_type: RecordType,
        name: &str,
    ) -> Result<Vec<DnsRecord>, crate::Error>;

    /// Set the content of record `record_id` to `content`
    ///
    /// Only the content changes; other record settings are left as they are.
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        content: &str,
    ) -> Result<DnsRecord, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
