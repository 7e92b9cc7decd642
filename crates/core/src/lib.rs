// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! healer-core: data model and plugin contract for the live-remediation
//! daemon's event-routing and per-healer pipeline subsystem.

pub mod config;
pub mod descriptor;
pub mod dispatch;
pub mod event;
pub mod operation;
pub mod plugin;
pub mod resource;
pub mod verdict;

pub use config::HealerConfig;
pub use descriptor::HealerDescriptor;
pub use dispatch::{DispatchTable, DispatchTableBuilder};
pub use event::{DecodeError, Event};
pub use operation::Operation;
pub use plugin::{Healer, HealerError};
pub use resource::{DedupKey, ResourceRef, WorkItem};
pub use verdict::Verdict;

#[cfg(any(test, feature = "test-support"))]
pub use plugin::fake::{CheckCall, FakeHealer};
