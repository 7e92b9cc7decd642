//! The boundary between the bus connector (G) and the dispatcher (F).
//!
//! A [`MessageHandler`] receives the raw decoded JSON body of a bus message.
//! It never sees the acknowledgement: per spec.md §4.F, acknowledgement
//! happens after the handler enqueues work to healer input queues, not
//! after those healers finish processing — so the session itself acks
//! once `handle` returns, regardless of what the handler did with the body.

use async_trait::async_trait;

#[async_trait]
pub trait MessageHandler: Send + Sync + 'static {
    async fn handle(&self, body: serde_json::Value);
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Records every body handed to it, for assertions.
    #[derive(Clone, Default)]
    pub struct RecordingHandler {
        bodies: Arc<Mutex<Vec<serde_json::Value>>>,
    }

    impl RecordingHandler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn bodies(&self) -> Vec<serde_json::Value> {
            self.bodies.lock().clone()
        }
    }

    #[async_trait]
    impl MessageHandler for RecordingHandler {
        async fn handle(&self, body: serde_json::Value) {
            self.bodies.lock().push(body);
        }
    }
}
