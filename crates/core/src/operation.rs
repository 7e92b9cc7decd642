//! Control-plane mutation kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of control-plane change an event carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Parse the wire representation used by the bus ("CREATE"/"UPDATE"/"DELETE").
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CREATE" => Some(Self::Create),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    /// The wire representation used by the bus.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    /// All three legal operations, in the order healers are most commonly
    /// subscribed to them.
    pub const ALL: [Operation; 3] = [Operation::Create, Operation::Update, Operation::Delete];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
