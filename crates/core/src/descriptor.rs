//! Healer tunables, registered once at startup and immutable thereafter.

use std::collections::HashSet;
use std::time::Duration;

use crate::operation::Operation;

/// Per-healer configuration, set by the healer author and validated by the
/// registry at registration time.
#[derive(Debug, Clone)]
pub struct HealerDescriptor {
    pub resource_type: String,
    pub operations: HashSet<Operation>,
    pub buffer_size: usize,
    pub buffer_timeout: Duration,
    pub check_delay: Duration,
    pub max_check_retries: u32,
    /// File name searched under `/etc/contrail-healer/<name>` then
    /// `~/.config/contrail-healer/<name>`. `None` means the healer takes no
    /// configuration file.
    pub config_file: Option<String>,
}

impl HealerDescriptor {
    /// A descriptor with the spec's documented defaults, for a given
    /// resource type and subscription set.
    pub fn new(resource_type: impl Into<String>, operations: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            resource_type: resource_type.into(),
            operations: operations.into_iter().collect(),
            buffer_size: 10,
            buffer_timeout: Duration::from_secs(5),
            check_delay: Duration::from_secs(0),
            max_check_retries: 3,
            config_file: None,
        }
    }

    pub fn with_buffer_size(mut self, n: usize) -> Self {
        self.buffer_size = n;
        self
    }

    pub fn with_buffer_timeout(mut self, d: Duration) -> Self {
        self.buffer_timeout = d;
        self
    }

    pub fn with_check_delay(mut self, d: Duration) -> Self {
        self.check_delay = d;
        self
    }

    pub fn with_max_check_retries(mut self, n: u32) -> Self {
        self.max_check_retries = n;
        self
    }

    pub fn with_config_file(mut self, name: impl Into<String>) -> Self {
        self.config_file = Some(name.into());
        self
    }

    /// Validate the contract the registry requires: non-empty resource type,
    /// non-empty operation subset.
    pub fn is_valid(&self) -> bool {
        !self.resource_type.is_empty() && !self.operations.is_empty()
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
