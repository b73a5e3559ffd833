//! Core traits for the DDNS system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpResolver`]: Discover the current public address
//! - [`DnsProvider`]: Read and update DNS records via provider APIs

pub mod ip_resolver;
pub mod dns_provider;

pub use ip_resolver::{IpResolver, ResolvedAddress};
pub use dns_provider::{DnsProvider, DnsRecord, RecordType, Zone};
