//! Scoped lifetime for all concurrent tasks with collective cancel.
//!
//! A single process-wide [`TaskGroup`] instance is owned by the daemon root
//! and handed by reference to every pipeline and the bus connector — never a
//! module-level global, so teardown stays testable.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Result type every task spawned under a [`TaskGroup`] must return.
pub type TaskResult = Result<(), TaskError>;

/// A fatal error raised by a task running under a [`TaskGroup`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    Fatal(String),
}

impl TaskError {
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal(message.into())
    }
}

/// Scoped acquisition of a set of concurrent tasks with a collective
/// cancellation signal and a single "first fatal error" channel.
pub struct TaskGroup {
    token: CancellationToken,
    error_tx: mpsc::UnboundedSender<TaskError>,
    error_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<TaskError>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Default for TaskGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskGroup {
    pub fn new() -> Self {
        let (error_tx, error_rx) = mpsc::unbounded_channel();
        Self {
            token: CancellationToken::new(),
            error_tx,
            error_rx: tokio::sync::Mutex::new(error_rx),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// A token every long-running loop spawned under this group should
    /// `select!` against at its suspension points to cooperate with
    /// `cancel_all`.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Spawn a task. If it returns `Err`, the error is delivered to whoever
    /// is awaiting [`Self::wait_until_any_error`].
    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = TaskResult> + Send + 'static,
    {
        let error_tx = self.error_tx.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = fut.await {
                let _ = error_tx.send(e);
            }
        });
        self.handles.lock().push(handle);
    }

    /// Spawn a task after `delay`, unless `cancel_all` fires first.
    pub fn spawn_after<F>(&self, delay: Duration, fut: F)
    where
        F: Future<Output = TaskResult> + Send + 'static,
    {
        let token = self.token.clone();
        let error_tx = self.error_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    if let Err(e) = fut.await {
                        let _ = error_tx.send(e);
                    }
                }
            }
        });
        self.handles.lock().push(handle);
    }

    /// Ask every spawned task to stop: fires the cancellation token (for
    /// tasks cooperatively `select!`-ing on it) and aborts any still-running
    /// handle as a backstop.
    pub fn cancel_all(&self) {
        self.token.cancel();
        let handles = std::mem::take(&mut *self.handles.lock());
        for handle in handles {
            handle.abort();
        }
    }

    /// Await the first fatal error raised by any spawned task, then cancel
    /// every sibling task. Never returns if no task ever errors and the
    /// group is not otherwise dropped.
    pub async fn wait_until_any_error(&self) -> TaskError {
        let received = {
            let mut rx = self.error_rx.lock().await;
            rx.recv().await
        };
        let error = received.unwrap_or_else(|| TaskError::fatal("task group closed"));
        self.cancel_all();
        error
    }
}

#[cfg(test)]
#[path = "task_group_tests.rs"]
mod tests;
