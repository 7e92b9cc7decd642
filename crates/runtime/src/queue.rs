//! Producer/consumer channels with the blocking-put / non-blocking-get
//! surface the pipeline needs.

use tokio::sync::{mpsc, Mutex};

/// FIFO with capacity N. `put` never drops — it backpressures the caller
/// when the queue is full, which is the pipeline's only path back to the
/// dispatcher. `try_get` never blocks.
pub struct BoundedQueue<T> {
    tx: mpsc::Sender<T>,
    rx: Mutex<mpsc::Receiver<T>>,
    capacity: usize,
}

impl<T: Send + 'static> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        Self { tx, rx: Mutex::new(rx), capacity }
    }

    /// Blocks until there is room, then enqueues. Never drops `item`.
    pub async fn put(&self, item: T) {
        // The receiver lives as long as `self`, so this can only fail if the
        // queue itself is being dropped concurrently — nothing meaningful to
        // do with the returned item in that case.
        let _ = self.tx.send(item).await;
    }

    /// Dequeue without blocking. Returns `None` if empty.
    pub fn try_get(&self) -> Option<T> {
        self.rx.try_lock().ok()?.try_recv().ok()
    }

    /// Dequeue, blocking until an item is available.
    pub async fn get(&self) -> Option<T> {
        self.rx.lock().await.recv().await
    }

    pub fn len(&self) -> usize {
        self.capacity - self.tx.capacity()
    }

    pub fn empty(&self) -> bool {
        self.len() == 0
    }

    pub fn full(&self) -> bool {
        self.tx.capacity() == 0
    }
}

/// Unbounded FIFO used for healer input queues, where the spec requires no
/// backpressure: every decoded event must be accepted immediately so the
/// dispatcher never blocks on a slow healer.
pub struct UnboundedQueue<T> {
    tx: mpsc::UnboundedSender<T>,
    rx: Mutex<mpsc::UnboundedReceiver<T>>,
}

impl<T: Send + 'static> UnboundedQueue<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx: Mutex::new(rx) }
    }

    pub fn put(&self, item: T) {
        let _ = self.tx.send(item);
    }

    /// Dequeue, blocking until an item is available.
    pub async fn get(&self) -> Option<T> {
        self.rx.lock().await.recv().await
    }
}

impl<T: Send + 'static> Default for UnboundedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
