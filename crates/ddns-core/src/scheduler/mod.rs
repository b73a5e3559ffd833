//! Fixed-interval cycle scheduler
//!
//! The Scheduler is responsible for:
//! - Dispatching one cycle (resolve, then reconcile) per interval
//! - Tracking in-flight cycles as tasks
//! - Applying the overlap and failure policies
//! - Draining cycles on shutdown
//!
//! ## Timing
//!
//! ```text
//! t=0         t=interval    t=2*interval
//!  │ dispatch   │ dispatch    │ dispatch
//!  ├─cycle 1────┼──────┐      │
//!  │            ├─cycle 2─────┼──┐
//!  │            │             ├─cycle 3
//! ```
//!
//! Dispatch times do not depend on when cycles finish. Under
//! [`OverlapPolicy::Allow`] a slow cycle simply runs alongside the next one;
//! under [`OverlapPolicy::Skip`] a tick that finds a cycle in flight is
//! dropped.
//!
//! ## Failures
//!
//! A failed cycle never affects another cycle. With [`FailurePolicy::Continue`]
//! it is logged and the next tick is the retry. With [`FailurePolicy::Exit`]
//! the scheduler aborts the remaining cycles and returns the error.

use crate::config::{FailurePolicy, OverlapPolicy, SyncConfig};
use crate::error::{Error, ErrorKind, Result};
use crate::reconciler::{CycleOutcome, ReconciliationTarget, Reconciler};
use crate::shutdown::ShutdownSignal;
use crate::traits::{DnsProvider, IpResolver};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{self, JoinError, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{Instrument, debug, error, info, info_span, warn};

/// Capacity of the scheduler event channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Events emitted by the Scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// Scheduler started
    Started { interval: Duration },

    /// A cycle was launched
    CycleDispatched { cycle: u64 },

    /// A tick was dropped because cycles were still running
    CycleSkipped { in_flight: usize },

    /// A cycle finished successfully
    CycleSucceeded { cycle: u64, outcome: CycleOutcome },

    /// A cycle failed
    CycleFailed {
        cycle: u64,
        kind: ErrorKind,
        error: String,
    },

    /// A cycle was interrupted by shutdown
    CycleCancelled { cycle: u64 },

    /// Scheduler stopped
    Stopped { reason: String },
}

/// Everything one cycle needs; cheap to clone into a task
#[derive(Clone)]
struct CycleContext {
    resolver: Arc<dyn IpResolver>,
    reconciler: Arc<Reconciler>,
    target: Arc<ReconciliationTarget>,
}

impl CycleContext {
    async fn execute(&self, shutdown: &ShutdownSignal) -> Result<CycleOutcome> {
        info!("update started");

        let address = shutdown.guard(self.resolver.resolve()).await?;
        debug!(address = %address, endpoint = self.resolver.endpoint(), "current address resolved");

        let outcome = self
            .reconciler
            .reconcile(&self.target, &address, shutdown)
            .await?;

        info!("update finished");
        Ok(outcome)
    }
}

/// Drives reconciliation cycles on a fixed interval until shutdown
///
/// ## Lifecycle
///
/// 1. Create with [`Scheduler::new()`]
/// 2. Run with [`Scheduler::run()`]
/// 3. Trigger the [`ShutdownSignal`] to stop; `run` returns once every
///    in-flight cycle has finished or been cancelled
pub struct Scheduler {
    cycle: CycleContext,

    /// Period between dispatches
    interval: Duration,

    /// Behaviour when a tick finds cycles in flight
    overlap: OverlapPolicy,

    /// Behaviour when a cycle fails
    on_cycle_error: FailurePolicy,

    /// Event sender for external monitoring
    event_tx: mpsc::Sender<SchedulerEvent>,
}

impl Scheduler {
    /// Create a new scheduler
    ///
    /// # Parameters
    ///
    /// - `resolver`: IP resolver implementation
    /// - `provider`: DNS provider implementation
    /// - `config`: Agent configuration (target, interval, policies)
    ///
    /// # Returns
    ///
    /// A tuple of (scheduler, event_receiver) where event_receiver yields
    /// scheduler events. Dropping the receiver is fine.
    pub fn new(
        resolver: Arc<dyn IpResolver>,
        provider: Arc<dyn DnsProvider>,
        config: &SyncConfig,
    ) -> Result<(Self, mpsc::Receiver<SchedulerEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let scheduler = Self {
            cycle: CycleContext {
                resolver,
                reconciler: Arc::new(Reconciler::new(provider, config.policies.matching)),
                target: Arc::new(config.target()),
            },
            interval: config.update_interval,
            overlap: config.policies.overlap,
            on_cycle_error: config.policies.on_cycle_error,
            event_tx: tx,
        };

        Ok((scheduler, rx))
    }

    /// The record this scheduler keeps in sync
    pub fn target(&self) -> &ReconciliationTarget {
        &self.cycle.target
    }

    /// Run a single cycle inline, without scheduling
    pub async fn run_once(&self, shutdown: &ShutdownSignal) -> Result<CycleOutcome> {
        self.cycle.execute(shutdown).await
    }

    /// Run until `shutdown` fires
    ///
    /// The first cycle is dispatched immediately.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Shutdown was requested and all cycles have ended
    /// - `Err(Error)`: A cycle failed under [`FailurePolicy::Exit`]
    pub async fn run(&self, shutdown: ShutdownSignal) -> Result<()> {
        info!(
            record = self.cycle.target.record_name(),
            zone = self.cycle.target.zone_name(),
            provider = self.cycle.reconciler.provider_name(),
            interval = ?self.interval,
            overlap = ?self.overlap,
            on_cycle_error = ?self.on_cycle_error,
            "scheduler started"
        );
        self.emit_event(SchedulerEvent::Started {
            interval: self.interval,
        });

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut cycles: JoinSet<Result<CycleOutcome>> = JoinSet::new();
        let mut cycle_ids: HashMap<task::Id, u64> = HashMap::new();
        let mut dispatched: u64 = 0;

        let result = loop {
            tokio::select! {
                biased;

                _ = shutdown.triggered() => {
                    info!("Shutdown signal received");
                    break Ok(());
                }

                Some(joined) = cycles.join_next_with_id(), if !cycles.is_empty() => {
                    let (id, finished) = take_cycle(&mut cycle_ids, joined);
                    if let Some(err) = self.record_completion(id, finished) {
                        if self.on_cycle_error == FailurePolicy::Exit {
                            break Err(err);
                        }
                    }
                }

                _ = ticker.tick() => {
                    if self.overlap == OverlapPolicy::Skip && !cycles.is_empty() {
                        warn!(in_flight = cycles.len(), "previous cycle still running, skipping this dispatch");
                        self.emit_event(SchedulerEvent::CycleSkipped { in_flight: cycles.len() });
                        continue;
                    }

                    dispatched += 1;
                    let id = dispatched;
                    let cycle = self.cycle.clone();
                    let signal = shutdown.clone();

                    self.emit_event(SchedulerEvent::CycleDispatched { cycle: id });
                    let handle = cycles.spawn(
                        async move { cycle.execute(&signal).await }
                            .instrument(info_span!("cycle", id)),
                    );
                    cycle_ids.insert(handle.id(), id);
                }
            }
        };

        let reason = match &result {
            Ok(()) => {
                // in-flight cycles observe the same signal and unwind promptly
                while let Some(joined) = cycles.join_next_with_id().await {
                    let (id, finished) = take_cycle(&mut cycle_ids, joined);
                    self.record_completion(id, finished);
                }
                "Shutdown signal".to_string()
            }
            Err(err) => {
                cycles.abort_all();
                while cycles.join_next().await.is_some() {}
                format!("Cycle failed: {}", err)
            }
        };

        info!(cycles = dispatched, "scheduler stopped");
        self.emit_event(SchedulerEvent::Stopped { reason });

        result
    }

    /// Log and report a finished cycle; returns the error if it failed
    fn record_completion(
        &self,
        id: u64,
        finished: std::result::Result<Result<CycleOutcome>, JoinError>,
    ) -> Option<Error> {
        match finished {
            Ok(Ok(outcome)) => {
                match &outcome {
                    CycleOutcome::Updated { previous, current, .. } => {
                        info!(cycle = id, from = %previous, to = %current, "record updated");
                    }
                    CycleOutcome::Unchanged { current } => {
                        debug!(cycle = id, address = %current, "record unchanged");
                    }
                }
                self.emit_event(SchedulerEvent::CycleSucceeded { cycle: id, outcome });
                None
            }
            Ok(Err(err)) if err.is_cancelled() => {
                debug!(cycle = id, "cycle cancelled by shutdown");
                self.emit_event(SchedulerEvent::CycleCancelled { cycle: id });
                None
            }
            Ok(Err(err)) => {
                error!(
                    cycle = id,
                    kind = %err.kind(),
                    record = self.cycle.target.record_name(),
                    "cycle failed: {}",
                    err
                );
                self.emit_event(SchedulerEvent::CycleFailed {
                    cycle: id,
                    kind: err.kind(),
                    error: err.to_string(),
                });
                Some(err)
            }
            Err(join_err) if join_err.is_cancelled() => None,
            Err(join_err) => {
                error!(cycle = id, "cycle task panicked: {}", join_err);
                let err = Error::Other(format!("cycle {} panicked: {}", id, join_err));
                self.emit_event(SchedulerEvent::CycleFailed {
                    cycle: id,
                    kind: err.kind(),
                    error: err.to_string(),
                });
                Some(err)
            }
        }
    }

    /// Emit a scheduler event
    fn emit_event(&self, event: SchedulerEvent) {
        if let Err(mpsc::error::TrySendError::Full(_)) = self.event_tx.try_send(event) {
            warn!("Event channel full, dropping scheduler event");
        }
    }
}

/// Map a joined task back to the cycle number it was dispatched as
fn take_cycle<T>(
    cycle_ids: &mut HashMap<task::Id, u64>,
    joined: std::result::Result<(task::Id, T), JoinError>,
) -> (u64, std::result::Result<T, JoinError>) {
    match joined {
        Ok((task_id, output)) => (cycle_ids.remove(&task_id).unwrap_or_default(), Ok(output)),
        Err(err) => (cycle_ids.remove(&err.id()).unwrap_or_default(), Err(err)),
    }
}
