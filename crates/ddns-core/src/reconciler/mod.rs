//! Reconciliation of one A record against the current address
//!
//! The reconciler is read-mostly. A cycle in which nothing changed costs two
//! provider reads and no writes:
//!
//! ```text
//! list_zones(zone_name) ──► pick one zone
//!                                 │
//!                                 ▼
//! list_records(zone, A, record_name) ──► pick one record
//!                                              │
//!                     content == address? ─────┤
//!                         │ yes                │ no
//!                         ▼                    ▼
//!                    Unchanged        update_record(zone, record, address)
//! ```
//!
//! ## Picking among several matches
//!
//! Providers can return more than one zone or record for a name. With
//! [`MatchPolicy::Last`] the last element of the provider's ordering is used,
//! for both zones and records. [`MatchPolicy::Strict`] refuses to guess and
//! fails the cycle with [`Error::AmbiguousMatch`].

use crate::config::MatchPolicy;
use crate::error::{Error, Result};
use crate::shutdown::ShutdownSignal;
use crate::traits::{DnsProvider, RecordType, ResolvedAddress};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The zone and record this agent manages
///
/// Set once from configuration and shared read-only by every cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationTarget {
    zone_name: String,
    record_name: String,
}

impl ReconciliationTarget {
    pub fn new(zone_name: impl Into<String>, record_name: impl Into<String>) -> Self {
        Self {
            zone_name: zone_name.into(),
            record_name: record_name.into(),
        }
    }

    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    pub fn record_name(&self) -> &str {
        &self.record_name
    }
}

/// Successful result of a reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The record content was replaced
    Updated {
        /// Identifier of the record that was written
        record_id: String,
        /// Content before the update
        previous: String,
        /// Address written to the record
        current: ResolvedAddress,
    },
    /// The record already held the address; nothing was written
    Unchanged {
        /// The address found in the record
        current: ResolvedAddress,
    },
}

impl CycleOutcome {
    pub fn is_update(&self) -> bool {
        matches!(self, CycleOutcome::Updated { .. })
    }
}

/// Compares provider state with the resolved address and writes on drift
///
/// Holds no per-cycle state, so one instance serves overlapping cycles.
pub struct Reconciler {
    provider: Arc<dyn DnsProvider>,
    match_policy: MatchPolicy,
}

impl Reconciler {
    pub fn new(provider: Arc<dyn DnsProvider>, match_policy: MatchPolicy) -> Self {
        Self {
            provider,
            match_policy,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Bring the target record in line with `address`
    ///
    /// Every provider call runs under `shutdown`; a shutdown request turns
    /// the pending call into [`Error::Cancelled`].
    pub async fn reconcile(
        &self,
        target: &ReconciliationTarget,
        address: &ResolvedAddress,
        shutdown: &ShutdownSignal,
    ) -> Result<CycleOutcome> {
        let zones = shutdown
            .guard(self.provider.list_zones(target.zone_name()))
            .await?;
        debug!(zone = target.zone_name(), count = zones.len(), "zones listed");

        let zone = select_match(zones, self.match_policy, "zone", target.zone_name())
            .map_err(|e| match e {
                NoMatch::Empty => Error::zone_not_found(target.zone_name()),
                NoMatch::Ambiguous(err) => err,
            })?;

        let records = shutdown
            .guard(
                self.provider
                    .list_records(&zone.id, RecordType::A, target.record_name()),
            )
            .await?;
        debug!(record = target.record_name(), count = records.len(), "records listed");

        let record = select_match(records, self.match_policy, "record", target.record_name())
            .map_err(|e| match e {
                NoMatch::Empty => Error::record_not_found(RecordType::A.as_str(), target.record_name()),
                NoMatch::Ambiguous(err) => err,
            })?;

        let desired = address.canonical();
        if record.content == desired {
            info!(
                record = target.record_name(),
                content = %record.content,
                "record already up to date"
            );
            return Ok(CycleOutcome::Unchanged { current: *address });
        }

        if address.ip().is_ipv6() {
            warn!(
                record = target.record_name(),
                address = %address,
                "writing an IPv6 address into an A record; the provider is likely to reject it"
            );
        }

        info!(
            record = target.record_name(),
            zone = target.zone_name(),
            from = %record.content,
            to = %desired,
            "updating record"
        );

        shutdown
            .guard(self.provider.update_record(&zone.id, &record.id, &desired))
            .await?;

        Ok(CycleOutcome::Updated {
            record_id: record.id,
            previous: record.content,
            current: *address,
        })
    }
}

enum NoMatch {
    Empty,
    Ambiguous(Error),
}

/// Pick one element of a provider listing according to `policy`
fn select_match<T>(
    mut items: Vec<T>,
    policy: MatchPolicy,
    what: &'static str,
    name: &str,
) -> std::result::Result<T, NoMatch> {
    match (policy, items.len()) {
        (_, 0) => Err(NoMatch::Empty),
        (MatchPolicy::Strict, count) if count > 1 => {
            Err(NoMatch::Ambiguous(Error::ambiguous(what, name, count)))
        }
        (MatchPolicy::Last, count) => {
            if count > 1 {
                warn!("{} {}s match '{}', using the last one", count, what, name);
            }
            items.pop().ok_or(NoMatch::Empty)
        }
        (MatchPolicy::Strict, _) => items.pop().ok_or(NoMatch::Empty),
    }
}
