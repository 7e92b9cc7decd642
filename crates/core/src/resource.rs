//! Resource references and the dedup key used by the healer buffer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::operation::Operation;

/// Minimal handle a healer receives for the object it must check.
///
/// Either a populated snapshot (already fetched attributes) or a lazy handle
/// (type + uuid) a healer may resolve later via an external resource client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResourceRef {
    Snapshot {
        resource_type: String,
        attributes: IndexMap<String, serde_json::Value>,
    },
    Handle {
        resource_type: String,
        uuid: String,
    },
}

impl ResourceRef {
    pub fn resource_type(&self) -> &str {
        match self {
            Self::Snapshot { resource_type, .. } | Self::Handle { resource_type, .. } => {
                resource_type
            }
        }
    }

    /// The uuid, if this ref carries one directly or as an attribute named
    /// `uuid` in its snapshot.
    pub fn uuid(&self) -> Option<&str> {
        match self {
            Self::Handle { uuid, .. } => Some(uuid),
            Self::Snapshot { attributes, .. } => {
                attributes.get("uuid").and_then(|v| v.as_str())
            }
        }
    }

    /// Dedup identity fragment: uuid if present, otherwise a canonical
    /// digest of the snapshot's attributes. Two distinct `ResourceRef`
    /// values sharing a uuid always collapse to the same identity.
    fn identity(&self) -> String {
        if let Some(uuid) = self.uuid() {
            return uuid.to_string();
        }
        match self {
            Self::Snapshot { attributes, .. } => canonical_digest(attributes),
            Self::Handle { uuid, .. } => uuid.clone(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.uuid() {
            Some(uuid) => write!(f, "{}:{}", self.resource_type(), uuid),
            None => write!(f, "{}:{}", self.resource_type(), self.identity()),
        }
    }
}

/// Stable, order-independent digest of a snapshot's attributes, used only
/// when no uuid is available anywhere on the resource.
fn canonical_digest(attributes: &IndexMap<String, serde_json::Value>) -> String {
    let mut entries: Vec<(&String, &serde_json::Value)> = attributes.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    let sorted: serde_json::Map<String, serde_json::Value> = entries
        .into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    serde_json::Value::Object(sorted).to_string()
}

/// `(operation, resource reference)` pair flowing through a healer's queues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub operation: Operation,
    pub reference: ResourceRef,
}

impl WorkItem {
    pub fn new(operation: Operation, reference: ResourceRef) -> Self {
        Self { operation, reference }
    }

    /// The dedup key mandated by the spec: `(operation, resource_type,
    /// identity)`, never raw snapshot equality.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            operation: self.operation,
            resource_type: self.reference.resource_type().to_string(),
            identity: self.reference.identity(),
        }
    }
}

/// Equality key used to collapse duplicate work items within one buffer
/// window, and to index `retry_counts`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub operation: Operation,
    pub resource_type: String,
    pub identity: String,
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "resource_proptests.rs"]
mod proptests;
