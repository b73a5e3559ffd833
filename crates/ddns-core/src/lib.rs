// # ddns-core
//
// Core library for the single-record DDNS synchronization agent.
//
// ## Architecture Overview
//
// - **IpResolver**: Trait for discovering the current public address
// - **DnsProvider**: Trait for listing zones/records and updating a record
// - **Reconciler**: Compares the provider's record with the resolved address
//   and writes only on drift
// - **Scheduler**: Dispatches one resolve-then-reconcile cycle per interval
//   and decides what a failed cycle means for the process
// - **ShutdownSignal**: Process-wide cancellation threaded into every call
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from implementations
// 2. **Read-Mostly**: An unchanged address costs reads only, never writes
// 3. **No Shared Mutable State**: Cycles share only the immutable target,
//    the stateless services, and the shutdown signal
// 4. **Errors as Values**: Nothing below the scheduler decides to stop the process
// 5. **Library-First**: All core functionality can be used as a library

pub mod traits;
pub mod reconciler;
pub mod scheduler;
pub mod shutdown;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{DnsProvider, DnsRecord, IpResolver, RecordType, ResolvedAddress, Zone};
pub use reconciler::{CycleOutcome, ReconciliationTarget, Reconciler};
pub use scheduler::{Scheduler, SchedulerEvent};
pub use shutdown::{ShutdownSignal, ShutdownTrigger};
pub use config::{ConfigNotice, FailurePolicy, MatchPolicy, OverlapPolicy, PolicyConfig, SyncConfig};
pub use error::{Error, ErrorKind, Result};
