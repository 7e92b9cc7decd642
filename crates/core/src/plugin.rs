//! The plugin contract healer authors implement.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::HealerConfig;
use crate::descriptor::HealerDescriptor;
use crate::operation::Operation;
use crate::resource::ResourceRef;
use crate::verdict::Verdict;

/// Error a healer's `check`/`fix` may raise.
///
/// Per the spec's failure semantics, a `HealerError` (or a panic caught by
/// the pipeline) is logged at error level and treated as an `Ok` verdict for
/// the current item: domain-level retries are the healer's own
/// responsibility, and a surprise error must never wedge the pipeline.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HealerError(pub String);

impl HealerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A plugin that inspects a resource after a control-plane event and
/// optionally repairs downstream state.
///
/// The core guarantees: exactly one `start()`-equivalent invocation per
/// process (enforced by the owning [`crate::timer::Timer`]-adjacent pipeline's
/// `started` latch, not by this trait), `check`/`fix` are always invoked from
/// a task spawned under the shared task group, and `reference` is either a
/// populated snapshot or a lazily-resolvable handle.
#[async_trait]
pub trait Healer: Send + Sync + 'static {
    /// Static tunables for this healer: resource type, subscribed
    /// operations, buffer/retry knobs, optional config file name.
    fn descriptor(&self) -> &HealerDescriptor;

    /// Inspect `reference` after `operation` and report a verdict.
    async fn check(&self, operation: Operation, reference: &ResourceRef) -> Result<Verdict, HealerError>;

    /// Repair drift. Invoked exactly once per `NotOk` verdict; its return
    /// value, besides the error, is ignored by the pipeline.
    async fn fix(&self, args: &[serde_json::Value]) -> Result<(), HealerError>;

    /// Called once, before the first `check`/`fix`, with the parsed contents
    /// of `descriptor().config_file` if one was declared. Default: no-op.
    fn configure(&self, _config: Option<&HealerConfig>) {}
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded `check` invocation.
    #[derive(Debug, Clone, PartialEq)]
    pub struct CheckCall {
        pub operation: Operation,
        pub reference: ResourceRef,
    }

    struct FakeHealerState {
        checks: Vec<CheckCall>,
        fixes: Vec<Vec<serde_json::Value>>,
        verdicts: std::collections::VecDeque<Result<Verdict, HealerError>>,
        default_verdict: Verdict,
    }

    /// In-process [`Healer`] double. Returns verdicts from a scripted queue,
    /// falling back to a default verdict once the queue is exhausted, and
    /// records every `check`/`fix` call for assertions.
    #[derive(Clone)]
    pub struct FakeHealer {
        descriptor: HealerDescriptor,
        state: Arc<Mutex<FakeHealerState>>,
    }

    impl FakeHealer {
        pub fn new(descriptor: HealerDescriptor) -> Self {
            Self {
                descriptor,
                state: Arc::new(Mutex::new(FakeHealerState {
                    checks: Vec::new(),
                    fixes: Vec::new(),
                    verdicts: std::collections::VecDeque::new(),
                    default_verdict: Verdict::Ok,
                })),
            }
        }

        /// Queue verdicts to be returned in order, one per `check` call.
        pub fn push_verdict(&self, verdict: Result<Verdict, HealerError>) {
            self.state.lock().verdicts.push_back(verdict);
        }

        /// Verdict returned once the scripted queue is exhausted (default: `Ok`).
        pub fn set_default_verdict(&self, verdict: Verdict) {
            self.state.lock().default_verdict = verdict;
        }

        pub fn checks(&self) -> Vec<CheckCall> {
            self.state.lock().checks.clone()
        }

        pub fn fixes(&self) -> Vec<Vec<serde_json::Value>> {
            self.state.lock().fixes.clone()
        }
    }

    #[async_trait]
    impl Healer for FakeHealer {
        fn descriptor(&self) -> &HealerDescriptor {
            &self.descriptor
        }

        async fn check(
            &self,
            operation: Operation,
            reference: &ResourceRef,
        ) -> Result<Verdict, HealerError> {
            let mut state = self.state.lock();
            state.checks.push(CheckCall { operation, reference: reference.clone() });
            state.verdicts.pop_front().unwrap_or_else(|| Ok(state.default_verdict.clone()))
        }

        async fn fix(&self, args: &[serde_json::Value]) -> Result<(), HealerError> {
            self.state.lock().fixes.push(args.to_vec());
            Ok(())
        }
    }
}
