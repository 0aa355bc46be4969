//! Named background tasks with periodic, idempotent registration.
//!
//! The scheduler mirrors a platform task manager at the small scale this
//! process needs: a task is first *defined* (a name bound to a body), then
//! *registered* (a worker thread invoking the body on a periodic tick). Those
//! are the only two states; each invocation is independent and stateless.
//!
//! Registration is idempotent: registering an already-registered name is a
//! logged no-op, so a restart-time `define` + `register` sequence is always
//! safe. The configured interval is a lower bound between invocations, not a
//! promise of exact periodicity.
//!
//! Shutdown uses a disconnect broadcast: every worker multiplexes its tick
//! against a shared shutdown receiver with crossbeam `select!`, and dropping
//! the held sender stops all workers at once.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, bounded, select, tick};
use log::{debug, info};
use quote_common::{FetchError, Result};

/// Lifecycle state of a named task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// The name is bound to a body but no worker is running.
    Defined,
    /// A worker thread periodically invokes the body.
    Registered,
}

/// A task body. Invoked repeatedly from the worker thread; must not panic.
type TaskBody = Arc<dyn Fn() + Send + Sync + 'static>;

struct TaskEntry {
    state: TaskState,
    body: TaskBody,
}

/// In-process registry of named periodic tasks.
pub struct TaskScheduler {
    tasks: Mutex<HashMap<String, TaskEntry>>,
    shutdown_tx: Mutex<Option<Sender<()>>>,
    shutdown_rx: Receiver<()>,
}

impl TaskScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(0);
        Self {
            tasks: Mutex::new(HashMap::new()),
            shutdown_tx: Mutex::new(Some(shutdown_tx)),
            shutdown_rx,
        }
    }

    /// Bind `name` to `body`, entering the `Defined` state.
    ///
    /// Redefining an existing name replaces its body; if a worker is already
    /// running it keeps the body it was registered with.
    pub fn define_task(&self, name: &str, body: impl Fn() + Send + Sync + 'static) -> Result<()> {
        let mut tasks = self.tasks.lock()?;
        debug!("Task '{}' defined", name);
        tasks.insert(
            name.to_string(),
            TaskEntry {
                state: TaskState::Defined,
                body: Arc::new(body),
            },
        );
        Ok(())
    }

    /// Whether `name` currently has a running worker.
    pub fn is_registered(&self, name: &str) -> Result<bool> {
        let tasks = self.tasks.lock()?;
        Ok(tasks
            .get(name)
            .is_some_and(|entry| entry.state == TaskState::Registered))
    }

    /// Start a worker invoking `name`'s body no more often than `interval`.
    ///
    /// Returns `Ok(true)` if a worker was started, `Ok(false)` if the task was
    /// already registered, and an error if `name` was never defined.
    pub fn register_task(&self, name: &str, interval: Duration) -> Result<bool> {
        let mut tasks = self.tasks.lock()?;
        let entry = tasks
            .get_mut(name)
            .ok_or_else(|| FetchError::TaskNotDefined(name.to_string()))?;

        if entry.state == TaskState::Registered {
            info!("Task '{}' is already registered; skipping", name);
            return Ok(false);
        }
        entry.state = TaskState::Registered;

        let body = Arc::clone(&entry.body);
        let shutdown_rx = self.shutdown_rx.clone();
        let task_name = name.to_string();
        thread::spawn(move || {
            info!(
                "Task '{}' registered with a minimum interval of {:?}",
                task_name, interval
            );
            let ticks = tick(interval);
            loop {
                select! {
                    recv(shutdown_rx) -> _ => break,
                    recv(ticks) -> msg => match msg {
                        Ok(_) => body(),
                        Err(_) => break,
                    },
                }
            }
            info!("Task '{}' worker stopping...", task_name);
        });
        Ok(true)
    }

    /// Stop all worker threads. Further registrations outlive this call only
    /// until their first tick, so call it last.
    pub fn shutdown(&self) {
        let mut slot = self
            .shutdown_tx
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.take().is_some() {
            info!("Scheduler shutdown requested");
        }
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}
