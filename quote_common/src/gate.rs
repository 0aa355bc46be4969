//! One-shot startup readiness signal.
//!
//! The gate defers the first run of the background fetch until the foreground
//! startup sequence has finished. It is created once at process start, shared
//! via `Arc` between the bootstrap code and the task body, resolved exactly
//! once, and never reset.
//!
//! Mechanism: a `crossbeam_channel` sender is held behind a mutex and dropped
//! on resolution. Nothing is ever sent; waiters block in `recv` and are all
//! released at once when the channel disconnects. A waiter arriving after
//! resolution observes the disconnect immediately.
//!
//! There is no timeout on `wait`: an unresolved gate blocks its waiters until
//! the process ends. The hosting environment is expected to bound the lifetime
//! of a stuck background run.

use std::sync::Mutex;

use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;

/// Single-resolution readiness signal shared between startup and the fetch task.
pub struct StartupGate {
    /// Held until resolution; dropping it releases every waiter.
    resolver: Mutex<Option<Sender<()>>>,
    /// Cloneable wait side; `recv` returns once the sender is gone.
    waiter: Receiver<()>,
}

impl StartupGate {
    /// Create an unresolved gate.
    pub fn new() -> Self {
        let (tx, rx) = bounded::<()>(0);
        Self {
            resolver: Mutex::new(Some(tx)),
            waiter: rx,
        }
    }

    /// Mark startup as complete, releasing all current and future waiters.
    ///
    /// Resolving an already-resolved gate is a no-op, so repeated startup
    /// notifications are safe.
    pub fn resolve(&self) {
        let mut slot = self
            .resolver
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.take().is_some() {
            debug!("Startup gate resolved");
        } else {
            debug!("Startup gate already resolved; ignoring");
        }
    }

    /// Block until the gate is resolved. Returns immediately if it already was.
    pub fn wait(&self) {
        // The disconnect error is the release signal here.
        let _ = self.waiter.recv();
    }

    /// Whether `resolve` has been called.
    pub fn is_resolved(&self) -> bool {
        self.resolver
            .lock()
            .map(|slot| slot.is_none())
            .unwrap_or(true)
    }
}

impl Default for StartupGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn resolve_is_idempotent() {
        let gate = StartupGate::new();
        assert!(!gate.is_resolved());
        gate.resolve();
        gate.resolve();
        assert!(gate.is_resolved());
    }

    #[test]
    fn waiter_after_resolution_proceeds_immediately() {
        let gate = StartupGate::new();
        gate.resolve();
        gate.wait();
    }

    #[test]
    fn waiter_before_resolution_blocks_then_proceeds() {
        let gate = Arc::new(StartupGate::new());
        let (done_tx, done_rx) = bounded::<()>(1);

        let waiter_gate = Arc::clone(&gate);
        let handle = thread::spawn(move || {
            waiter_gate.wait();
            let _ = done_tx.send(());
        });

        // The waiter must still be parked before resolution.
        assert!(done_rx.recv_timeout(Duration::from_millis(50)).is_err());

        gate.resolve();
        assert!(done_rx.recv_timeout(Duration::from_secs(1)).is_ok());
        handle.join().unwrap();
    }

    #[test]
    fn resolution_releases_multiple_waiters() {
        let gate = Arc::new(StartupGate::new());
        let (done_tx, done_rx) = bounded::<()>(2);

        let mut handles = Vec::new();
        for _ in 0..2 {
            let gate = Arc::clone(&gate);
            let done_tx = done_tx.clone();
            handles.push(thread::spawn(move || {
                gate.wait();
                let _ = done_tx.send(());
            }));
        }

        gate.resolve();
        for _ in 0..2 {
            assert!(done_rx.recv_timeout(Duration::from_secs(1)).is_ok());
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
