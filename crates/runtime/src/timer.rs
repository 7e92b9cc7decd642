//! Resettable one-shot "deadline reached" signal.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::task_group::{TaskGroup, TaskResult};

/// A passive flag that becomes `true` exactly once after its timeout
/// elapses, unless reset first. Never raises; purely polled by the owner.
///
/// A `reset` logically cancels the in-flight countdown rather than merely
/// overlapping with it: an earlier `arm`'s sleep is still driven to
/// completion by the task group (cooperative cancellation has no
/// synchronous "kill" primitive here), but a generation counter makes it a
/// no-op once superseded, so it can never flip `ready` back to true for a
/// deadline the owner already reset past.
pub struct Timer {
    ready: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
    timeout: Duration,
}

impl Timer {
    /// Construct a timer with timeout `T`, arming it immediately under
    /// `group`.
    pub fn new(timeout: Duration, group: &TaskGroup) -> Self {
        let timer = Self {
            ready: Arc::new(AtomicBool::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
            timeout,
        };
        timer.arm(group);
        timer
    }

    /// `true` iff the timeout has elapsed since construction or the last
    /// `reset`.
    pub fn ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Clear `ready` and re-arm the countdown under `group`.
    pub fn reset(&self, group: &TaskGroup) {
        self.ready.store(false, Ordering::SeqCst);
        self.arm(group);
    }

    fn arm(&self, group: &TaskGroup) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let ready = self.ready.clone();
        let generation_cell = self.generation.clone();
        let timeout = self.timeout;
        group.spawn(async move {
            tokio::time::sleep(timeout).await;
            if generation_cell.load(Ordering::SeqCst) == generation {
                ready.store(true, Ordering::SeqCst);
            }
            TaskResult::Ok(())
        });
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
