#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! A worked example healer: confirms a coordination-service znode exists
//! for every floating IP after a CREATE, standing in for the original
//! `FIPHealer`/ZooKeeper check. A demonstration consumer of the plugin
//! contract, not part of the routing core.

pub mod coordinator;
pub mod healer;
pub mod subnet;

pub use coordinator::{CoordinatorStore, InMemoryCoordinatorStore};
pub use healer::FipHealer;
pub use subnet::Subnet;

use std::sync::Arc;

use healer_core::Healer;

/// The compiled-in instance `healer-daemon` registers. Backed by an
/// in-memory coordinator store — swap in a real [`CoordinatorStore`]
/// implementation for an actual coordination-service deployment.
pub fn healer() -> Arc<dyn Healer> {
    Arc::new(FipHealer::new(Arc::new(InMemoryCoordinatorStore::default())))
}
