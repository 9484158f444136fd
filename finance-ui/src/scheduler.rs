//! Deferred, cancellable tasks.
//!
//! A scheduled task is a tokio task that sleeps for its delay and then posts
//! its [`TaskId`] on a channel owned by the event loop. The loop asks the
//! scheduler whether the id is still live before acting on it, so cancelling
//! a task also covers the case where its id was already queued.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl fmt::Display for TaskId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

pub struct Scheduler {
    fired: mpsc::UnboundedSender<TaskId>,
    live: HashMap<TaskId, JoinHandle<()>>,
    next_id: u64,
}

impl Scheduler {
    /// Creates a scheduler and the receiver its tasks report to.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TaskId>) {
        let (fired, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            fired,
            live: HashMap::new(),
            next_id: 1,
        };
        (scheduler, rx)
    }

    /// Posts a new task id after `delay`.
    ///
    /// Spawns onto the current tokio runtime, so it must be called from
    /// inside one.
    pub fn schedule(
        &mut self,
        delay: Duration,
    ) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let fired = self.fired.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver only goes away on shutdown.
            let _ = fired.send(id);
        });
        self.live.insert(id, handle);

        debug!(%id, delay_ms = delay.as_millis() as u64, "scheduled task");
        id
    }

    /// Cancels a task. Returns `false` if it already fired or was cancelled.
    pub fn cancel(
        &mut self,
        id: TaskId,
    ) -> bool {
        match self.live.remove(&id) {
            Some(handle) => {
                handle.abort();
                debug!(%id, "cancelled task");
                true
            }
            None => false,
        }
    }

    /// Marks a fired task as done. Returns `false` for cancelled tasks, whose
    /// firing must be ignored.
    pub fn complete(
        &mut self,
        id: TaskId,
    ) -> bool {
        let live = self.live.remove(&id).is_some();
        if !live {
            trace!(%id, "ignoring cancelled task");
        }
        live
    }

    pub fn is_pending(
        &self,
        id: TaskId,
    ) -> bool {
        self.live.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.live.len()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for (_, handle) in self.live.drain() {
            handle.abort();
        }
    }
}
