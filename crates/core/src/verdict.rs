//! The tagged result a healer's `check` returns.

/// Result of a healer's `check(op, ref)` call.
///
/// Modeled as a tagged variant rather than the original's heterogeneous
/// truthy-tuple convention (`(True,)` / `(False, *fix_args)` / `(None,)`):
/// the fix argument shape varies per healer, so it travels inside `NotOk`
/// instead of being inferred positionally.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The resource is consistent; no action needed.
    Ok,
    /// The resource is inconsistent; `fix` should be invoked with these
    /// arguments exactly once.
    NotOk(Vec<serde_json::Value>),
    /// Inconclusive; re-enqueue the item after linear backoff.
    Retry,
}
