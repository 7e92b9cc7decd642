//! The per-healer ingest → dedup buffer → check → fix → retry state machine.
//!
//! Mirrors the original `Healer._receive`/`Healer._work`/`Healer._process_buffer`
//! split: two long-lived cooperating tasks (`receive`, `work`) plus one
//! transient check task per deduplicated work item, all spawned under the
//! shared [`TaskGroup`].

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use healer_core::{DedupKey, Healer, Verdict, WorkItem};
use healer_runtime::{BoundedQueue, TaskGroup, TaskResult, Timer, UnboundedQueue};
use parking_lot::Mutex;
use tracing::{debug, error, info};

/// Polling cadence for the buffer drain classification, per spec.md §4.E.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Owns one registered healer's queues, dedup buffer, and retry counters.
///
/// `input_queue` is unbounded (never backpressures the dispatcher);
/// `buffer_queue` is bounded to the healer's `buffer_size` and is the only
/// intentional backpressure path, per spec.md §4.E.
pub struct HealerPipeline {
    healer: Arc<dyn Healer>,
    input_queue: UnboundedQueue<WorkItem>,
    buffer_queue: Arc<BoundedQueue<WorkItem>>,
    retry_counts: Arc<Mutex<HashMap<DedupKey, u32>>>,
    started: AtomicBool,
}

impl HealerPipeline {
    pub fn new(healer: Arc<dyn Healer>) -> Arc<Self> {
        let buffer_size = healer.descriptor().buffer_size;
        Arc::new(Self {
            healer,
            input_queue: UnboundedQueue::new(),
            buffer_queue: Arc::new(BoundedQueue::new(buffer_size)),
            retry_counts: Arc::new(Mutex::new(HashMap::new())),
            started: AtomicBool::new(false),
        })
    }

    /// Queue `item` for this healer. Never blocks — backpressure, if any,
    /// happens later when `receive` pushes it into the bounded buffer.
    pub fn enqueue(&self, item: WorkItem) {
        self.input_queue.put(item);
    }

    /// Spawn the `receive` and `work` tasks under `group`. A second call is
    /// a no-op, matching the source's `started` latch.
    pub fn start(self: &Arc<Self>, group: &Arc<TaskGroup>) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        info!(resource_type = %self.healer.descriptor().resource_type, "healer started");

        let receiver = self.clone();
        let receiver_group = group.clone();
        group.spawn(async move {
            receiver.receive_loop(&receiver_group).await;
            TaskResult::Ok(())
        });

        let worker = self.clone();
        let worker_group = group.clone();
        group.spawn(async move {
            worker.work_loop(&worker_group).await;
            TaskResult::Ok(())
        });
    }

    /// Pulls from `input_queue` and pushes into `buffer_queue`, blocking when
    /// the buffer is full. Exits when either the task group is cancelled or
    /// the input queue is closed.
    async fn receive_loop(&self, group: &Arc<TaskGroup>) {
        let token = group.cancellation_token();
        loop {
            let item = tokio::select! {
                _ = token.cancelled() => break,
                maybe_item = self.input_queue.get() => match maybe_item {
                    Some(item) => item,
                    None => break,
                },
            };
            tokio::select! {
                _ = token.cancelled() => break,
                () = self.buffer_queue.put(item) => {}
            }
        }
    }

    /// Polls the buffer every ~100ms and classifies per spec.md §4.E:
    /// empty -> reset timer and wait; not full and timer not ready -> wait
    /// and accumulate; otherwise drain and process.
    async fn work_loop(&self, group: &Arc<TaskGroup>) {
        let token = group.cancellation_token();
        let timer = Timer::new(self.healer.descriptor().buffer_timeout, group);
        let mut tick = tokio::time::interval(POLL_INTERVAL);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = tick.tick() => {}
            }

            if self.buffer_queue.empty() {
                timer.reset(group);
                continue;
            }
            if !self.buffer_queue.full() && !timer.ready() {
                continue;
            }

            timer.reset(group);
            self.drain_and_dispatch(group);
        }
    }

    /// Drains `buffer_queue`, collapsing items that share a dedup key, and
    /// spawns one delayed check task per surviving item.
    fn drain_and_dispatch(&self, group: &Arc<TaskGroup>) {
        let mut seen = HashSet::new();
        let mut to_process = Vec::new();
        while let Some(item) = self.buffer_queue.try_get() {
            if seen.insert(item.dedup_key()) {
                to_process.push(item);
            }
        }

        for item in to_process {
            self.schedule_check(item, group);
        }
    }

    fn schedule_check(&self, item: WorkItem, group: &Arc<TaskGroup>) {
        let healer = self.healer.clone();
        let buffer_queue = self.buffer_queue.clone();
        let retry_counts = self.retry_counts.clone();
        let max_check_retries = self.healer.descriptor().max_check_retries;
        let delay = self.healer.descriptor().check_delay;
        let spawn_group = group.clone();

        group.spawn_after(delay, async move {
            run_check(healer, buffer_queue, retry_counts, max_check_retries, item, spawn_group)
                .await;
            TaskResult::Ok(())
        });
    }
}

/// Invoke `healer.check`, isolating panics via a child task, and dispatch on
/// the verdict. A raised error or panic is logged and treated as `Ok` for
/// this item per spec.md §4.E's failure semantics — no fix, no retry.
async fn run_check(
    healer: Arc<dyn Healer>,
    buffer_queue: Arc<BoundedQueue<WorkItem>>,
    retry_counts: Arc<Mutex<HashMap<DedupKey, u32>>>,
    max_check_retries: u32,
    item: WorkItem,
    group: Arc<TaskGroup>,
) {
    let key = item.dedup_key();
    let operation = item.operation;
    let reference = item.reference.clone();
    let checking_healer = healer.clone();

    let outcome =
        tokio::spawn(async move { checking_healer.check(operation, &reference).await }).await;

    let verdict = match outcome {
        Ok(Ok(verdict)) => verdict,
        Ok(Err(fault)) => {
            error!(resource = %item.reference, error = %fault, "healer check failed, treating as ok");
            retry_counts.lock().remove(&key);
            return;
        }
        Err(join_error) => {
            error!(resource = %item.reference, error = %join_error, "healer check panicked, treating as ok");
            retry_counts.lock().remove(&key);
            return;
        }
    };

    match verdict {
        Verdict::Ok => {
            debug!(resource = %item.reference, "check ok");
            retry_counts.lock().remove(&key);
        }
        Verdict::NotOk(args) => {
            info!(resource = %item.reference, "check not ok, fixing");
            retry_counts.lock().remove(&key);
            let fixing_healer = healer.clone();
            let outcome = tokio::spawn(async move { fixing_healer.fix(&args).await }).await;
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(fault)) => error!(resource = %item.reference, error = %fault, "healer fix failed"),
                Err(join_error) => {
                    error!(resource = %item.reference, error = %join_error, "healer fix panicked")
                }
            }
        }
        Verdict::Retry => {
            retry(key, item, max_check_retries, retry_counts, buffer_queue, group).await;
        }
    }
}

/// Linear backoff retry policy: the k-th retry is delayed by k seconds.
/// Once `max_check_retries` is exceeded the counter is dropped and the item
/// is abandoned.
async fn retry(
    key: DedupKey,
    item: WorkItem,
    max_check_retries: u32,
    retry_counts: Arc<Mutex<HashMap<DedupKey, u32>>>,
    buffer_queue: Arc<BoundedQueue<WorkItem>>,
    group: Arc<TaskGroup>,
) {
    let attempt = {
        let mut counts = retry_counts.lock();
        let count = counts.entry(key.clone()).or_insert(0);
        *count += 1;
        *count
    };

    if attempt <= max_check_retries {
        debug!(resource = %item.reference, attempt, "scheduling retry");
        group.spawn_after(Duration::from_secs(u64::from(attempt)), async move {
            buffer_queue.put(item).await;
            TaskResult::Ok(())
        });
    } else {
        retry_counts.lock().remove(&key);
        info!(resource = %item.reference, "max_check_retries reached, abandoning item");
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
