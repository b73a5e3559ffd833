//! Process-wide cancellation
//!
//! A [`ShutdownTrigger`] is held by whoever decides the process should stop
//! (the daemon's signal handler, or a test). Every cycle gets a cloned
//! [`ShutdownSignal`] and runs its network calls through
//! [`ShutdownSignal::guard`], so a shutdown request abandons in-flight calls
//! instead of waiting for them to time out.

use crate::error::{Error, Result};
use std::future::Future;
use tokio::sync::watch;

/// Sending half: requests shutdown
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

/// Receiving half: observed by the scheduler and every cycle
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

/// Create a connected trigger/signal pair
pub fn channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, ShutdownSignal { rx })
}

impl ShutdownTrigger {
    /// Request shutdown; idempotent
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Another signal connected to this trigger
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl ShutdownSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Whether shutdown has been requested
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once shutdown is requested
    ///
    /// If the trigger is dropped without firing, this never resolves.
    pub async fn triggered(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|stop| *stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Run `operation` unless shutdown is requested first
    ///
    /// Returns [`Error::Cancelled`] if shutdown wins; the operation future is
    /// dropped at its current suspension point.
    pub async fn guard<F, T>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_triggered() {
            return Err(Error::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.triggered() => Err(Error::Cancelled),
            result = operation => result,
        }
    }
}
