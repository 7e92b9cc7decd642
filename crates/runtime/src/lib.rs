#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! healer-runtime: the systems primitives the healer pipeline is built
//! from — task group, timer, bounded/unbounded queues. No domain knowledge.

pub mod queue;
pub mod task_group;
pub mod timer;

pub use queue::{BoundedQueue, UnboundedQueue};
pub use task_group::{TaskError, TaskGroup, TaskResult};
pub use timer::Timer;
