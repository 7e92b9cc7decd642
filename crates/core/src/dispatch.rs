//! The immutable `(resource_type, operation) -> healers` dispatch table.

use std::collections::HashMap;
use std::sync::Arc;

use crate::operation::Operation;
use crate::plugin::Healer;

/// Two-level mapping from resource type and operation to the ordered list of
/// subscribed healers. Built once by `healer-registry::HealerRegistry::build`
/// and never mutated afterward — safe to share across every task via `Arc`
/// without a lock.
#[derive(Default)]
pub struct DispatchTable {
    table: HashMap<String, HashMap<Operation, Vec<Arc<dyn Healer>>>>,
}

impl DispatchTable {
    pub fn builder() -> DispatchTableBuilder {
        DispatchTableBuilder::default()
    }

    /// Healers subscribed to `resource_type` for `operation`, in
    /// registration (fan-out) order. Empty when nothing subscribes.
    pub fn lookup(&self, resource_type: &str, operation: Operation) -> &[Arc<dyn Healer>] {
        self.table
            .get(resource_type)
            .and_then(|by_op| by_op.get(&operation))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn healer_count(&self) -> usize {
        self.table
            .values()
            .flat_map(|by_op| by_op.values())
            .flat_map(|v| v.iter())
            .count()
    }

    /// Every `(resource_type, operation, healers)` entry, for callers that
    /// need to wire up one ingestion pipeline per distinct registered
    /// healer (`healer-daemon`'s startup wiring).
    pub fn entries(&self) -> impl Iterator<Item = (&str, Operation, &[Arc<dyn Healer>])> {
        self.table.iter().flat_map(|(resource_type, by_op)| {
            by_op
                .iter()
                .map(move |(op, healers)| (resource_type.as_str(), *op, healers.as_slice()))
        })
    }
}

/// Accumulates `(resource_type, operation) -> healer` registrations in
/// insertion order before freezing into a [`DispatchTable`].
#[derive(Default)]
pub struct DispatchTableBuilder {
    table: HashMap<String, HashMap<Operation, Vec<Arc<dyn Healer>>>>,
}

impl DispatchTableBuilder {
    /// Register `healer` under every `(resource_type, op)` pair from its
    /// descriptor. Insertion order defines fan-out order for that pair.
    pub fn register(&mut self, healer: Arc<dyn Healer>) {
        let descriptor = healer.descriptor();
        let resource_type = descriptor.resource_type.clone();
        let operations: Vec<Operation> = descriptor.operations.iter().copied().collect();
        let by_op = self.table.entry(resource_type).or_default();
        for op in operations {
            by_op.entry(op).or_default().push(healer.clone());
        }
    }

    pub fn build(self) -> DispatchTable {
        DispatchTable { table: self.table }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
