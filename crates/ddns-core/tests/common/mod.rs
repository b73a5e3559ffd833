//! Test doubles and common utilities for contract tests
//!
//! The doubles count every call so tests can assert on provider traffic,
//! which is what the read-mostly and idempotency guarantees are about.

#![allow(dead_code)]

use ddns_core::config::{ApiToken, PolicyConfig, SyncConfig};
use ddns_core::error::{Error, Result};
use ddns_core::traits::{DnsProvider, DnsRecord, IpResolver, RecordType, ResolvedAddress, Zone};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// An IP resolver that answers with a fixed response body
///
/// The body goes through the same parsing as a real echo service response,
/// so an HTML body produces a resolution error.
pub struct StaticResolver {
    body: Mutex<String>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl StaticResolver {
    pub fn new(body: &str) -> Self {
        Self {
            body: Mutex::new(body.to_string()),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sleep this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Change what subsequent calls return
    pub fn set_body(&self, body: &str) {
        *self.body.lock().unwrap() = body.to_string();
    }

    /// Number of times resolve() was entered
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpResolver for StaticResolver {
    async fn resolve(&self) -> Result<ResolvedAddress> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let body = self.body.lock().unwrap().clone();
        ResolvedAddress::parse(&body)
    }

    fn endpoint(&self) -> &str {
        "static://test"
    }
}

/// An IP resolver that answers normally except for one call, which panics
pub struct PanickingResolver {
    panic_on_call: usize,
    calls: AtomicUsize,
}

impl PanickingResolver {
    /// `panic_on_call` is 1-based
    pub fn new(panic_on_call: usize) -> Self {
        Self {
            panic_on_call,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl IpResolver for PanickingResolver {
    async fn resolve(&self) -> Result<ResolvedAddress> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.panic_on_call {
            panic!("resolver blew up on call {}", call);
        }
        ResolvedAddress::parse("203.0.113.7")
    }

    fn endpoint(&self) -> &str {
        "panic://test"
    }
}

/// One recorded update_record() call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCall {
    pub zone_id: String,
    pub record_id: String,
    pub content: String,
}

/// An in-memory DNS provider that tracks calls
///
/// Zones and records are returned in insertion order. Updates are applied,
/// so a second reconciliation sees the new content.
#[derive(Default)]
pub struct MockDnsProvider {
    zones: Vec<Zone>,
    records: Mutex<HashMap<String, Vec<DnsRecord>>>,
    fail_zone_listing: bool,
    fail_updates: bool,
    list_zones_calls: AtomicUsize,
    list_records_calls: AtomicUsize,
    record_queries: Mutex<Vec<(String, RecordType, String)>>,
    updates: Mutex<Vec<UpdateCall>>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, id: &str, name: &str) -> Self {
        self.zones.push(Zone {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_record(self, zone_id: &str, id: &str, name: &str, content: &str) -> Self {
        self.with_typed_record(zone_id, id, "A", name, content)
    }

    pub fn with_typed_record(
        self,
        zone_id: &str,
        id: &str,
        record_type: &str,
        name: &str,
        content: &str,
    ) -> Self {
        self.records
            .lock()
            .unwrap()
            .entry(zone_id.to_string())
            .or_default()
            .push(DnsRecord {
                id: id.to_string(),
                record_type: record_type.to_string(),
                name: name.to_string(),
                content: content.to_string(),
            });
        self
    }

    pub fn failing_zone_listing(mut self) -> Self {
        self.fail_zone_listing = true;
        self
    }

    pub fn failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    pub fn list_zones_calls(&self) -> usize {
        self.list_zones_calls.load(Ordering::SeqCst)
    }

    pub fn list_records_calls(&self) -> usize {
        self.list_records_calls.load(Ordering::SeqCst)
    }

    /// Total provider calls of any kind
    pub fn total_calls(&self) -> usize {
        self.list_zones_calls() + self.list_records_calls() + self.update_calls().len()
    }

    /// (zone id, type, name) of every list_records() call
    pub fn record_queries(&self) -> Vec<(String, RecordType, String)> {
        self.record_queries.lock().unwrap().clone()
    }

    pub fn update_calls(&self) -> Vec<UpdateCall> {
        self.updates.lock().unwrap().clone()
    }

    pub fn content_of(&self, zone_id: &str, record_id: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .get(zone_id)?
            .iter()
            .find(|record| record.id == record_id)
            .map(|record| record.content.clone())
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn list_zones(&self, name: &str) -> Result<Vec<Zone>> {
        self.list_zones_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_zone_listing {
            return Err(Error::provider("mock", "zone listing unavailable"));
        }

        Ok(self
            .zones
            .iter()
            .filter(|zone| zone.name == name)
            .cloned()
            .collect())
    }

    async fn list_records(
        &self,
        zone_id: &str,
        record_type: RecordType,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        self.list_records_calls.fetch_add(1, Ordering::SeqCst);
        self.record_queries
            .lock()
            .unwrap()
            .push((zone_id.to_string(), record_type, name.to_string()));

        Ok(self
            .records
            .lock()
            .unwrap()
            .get(zone_id)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.record_type == record_type.as_str() && r.name == name)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        content: &str,
    ) -> Result<DnsRecord> {
        self.updates.lock().unwrap().push(UpdateCall {
            zone_id: zone_id.to_string(),
            record_id: record_id.to_string(),
            content: content.to_string(),
        });

        if self.fail_updates {
            return Err(Error::provider("mock", "update rejected"));
        }

        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(zone_id)
            .and_then(|records| records.iter_mut().find(|r| r.id == record_id))
            .ok_or_else(|| Error::provider("mock", format!("no record {}", record_id)))?;

        record.content = content.to_string();
        Ok(record.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A provider whose calls never complete
pub struct HangingProvider {
    pub calls: AtomicUsize,
}

impl HangingProvider {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for HangingProvider {
    async fn list_zones(&self, _name: &str) -> Result<Vec<Zone>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }

    async fn list_records(
        &self,
        _zone_id: &str,
        _record_type: RecordType,
        _name: &str,
    ) -> Result<Vec<DnsRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }

    async fn update_record(
        &self,
        _zone_id: &str,
        _record_id: &str,
        _content: &str,
    ) -> Result<DnsRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }

    fn provider_name(&self) -> &'static str {
        "hanging"
    }
}

/// The usual fixture: one zone holding one A record with `content`
pub fn single_record_provider(content: &str) -> Arc<MockDnsProvider> {
    Arc::new(
        MockDnsProvider::new()
            .with_zone("zone-1", "example.com")
            .with_record("zone-1", "rec-1", "home.example.com", content),
    )
}

/// Helper to create a valid SyncConfig for testing
pub fn test_config(interval: Duration, policies: PolicyConfig) -> SyncConfig {
    SyncConfig {
        api_token: ApiToken::new("test-token"),
        zone_name: "example.com".to_string(),
        record_name: "home.example.com".to_string(),
        ip_info_url: "https://ip.example.net/".to_string(),
        update_interval: interval,
        api_base_url: "https://api.example.net/client/v4".to_string(),
        http_timeout: Duration::from_secs(5),
        policies,
        log_level: "info".to_string(),
    }
}
