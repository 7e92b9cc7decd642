//! The coordination-service seam a floating-ip healer needs to confirm a
//! znode was created after a FIP CREATE — generalized from the original's
//! direct `kazoo.KazooClient` usage so the healer is testable without a
//! live ZooKeeper ensemble and swappable for any real implementation.

use async_trait::async_trait;
use healer_core::HealerError;

#[async_trait]
pub trait CoordinatorStore: Send + Sync + 'static {
    /// Whether `path` currently exists in the coordination service.
    async fn exists(&self, path: &str) -> Result<bool, HealerError>;

    /// Create `path` with `data`, including any missing intermediate path
    /// segments (mirrors `kazoo`'s `makepath=True`).
    async fn create(&self, path: &str, data: &str) -> Result<(), HealerError>;
}

/// An in-process [`CoordinatorStore`] backed by a set of created paths.
/// Ships as the demo's default store — a real deployment swaps in an
/// implementation backed by its actual coordination service.
#[derive(Default)]
pub struct InMemoryCoordinatorStore {
    paths: parking_lot::Mutex<std::collections::HashMap<String, String>>,
}

#[async_trait]
impl CoordinatorStore for InMemoryCoordinatorStore {
    async fn exists(&self, path: &str) -> Result<bool, HealerError> {
        Ok(self.paths.lock().contains_key(path))
    }

    async fn create(&self, path: &str, data: &str) -> Result<(), HealerError> {
        self.paths.lock().insert(path.to_string(), data.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
