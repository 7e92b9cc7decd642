//! Explicit healer registration and dispatch table construction.
//!
//! The original source discovers healers through a `stevedore`-style
//! setuptools entry point (`contrail_api_cli.healer`). Per spec.md §1 the
//! plugin *discovery* mechanism is an explicit non-goal of the core, so
//! healers here are registered explicitly by the daemon's `main` — one
//! `register` call per compiled-in healer — before `build()` freezes the
//! dispatch table.

use std::sync::Arc;

use healer_core::{DispatchTable, DispatchTableBuilder, Healer};
use tracing::info;

use crate::config_loader;
use crate::error::ConfigurationError;

/// Accumulates healer registrations, validating each against the plugin
/// contract, before freezing into a [`DispatchTable`].
#[derive(Default)]
pub struct HealerRegistry {
    builder: DispatchTableBuilder,
    count: usize,
}

impl HealerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register `healer`. Loads and hands over its config file
    /// (if declared) before returning. Fatal on any contract violation —
    /// the daemon cannot safely start with a malformed healer.
    pub fn register(&mut self, healer: Arc<dyn Healer>) -> Result<(), ConfigurationError> {
        let descriptor = healer.descriptor().clone();

        if descriptor.resource_type.is_empty() {
            return Err(ConfigurationError::EmptyResourceType {
                resource_type: descriptor.resource_type,
            });
        }
        if descriptor.operations.is_empty() {
            return Err(ConfigurationError::EmptyOperations {
                resource_type: descriptor.resource_type,
            });
        }

        if let Some(config_file) = descriptor.config_file.as_deref() {
            let config = config_loader::load(&descriptor.resource_type, config_file)?;
            healer.configure(Some(&config));
        } else {
            healer.configure(None);
        }

        info!(resource_type = %descriptor.resource_type, "registered healer");
        self.builder.register(healer);
        self.count += 1;
        Ok(())
    }

    /// Number of healers registered so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Freeze the accumulated registrations into a read-only dispatch table.
    pub fn build(self) -> DispatchTable {
        self.builder.build()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
