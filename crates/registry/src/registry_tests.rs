use std::sync::Arc;

use healer_core::{FakeHealer, HealerDescriptor, Operation};

use super::*;

#[test]
fn register_rejects_empty_resource_type() {
    let mut registry = HealerRegistry::new();
    let healer = Arc::new(FakeHealer::new(HealerDescriptor::new("", [Operation::Create])));
    let err = registry.register(healer).unwrap_err();
    assert!(matches!(err, ConfigurationError::EmptyResourceType { .. }));
    assert_eq!(registry.len(), 0);
}

#[test]
fn register_rejects_empty_operations() {
    let mut registry = HealerRegistry::new();
    let healer = Arc::new(FakeHealer::new(HealerDescriptor::new("floating-ip", [])));
    let err = registry.register(healer).unwrap_err();
    assert!(matches!(err, ConfigurationError::EmptyOperations { .. }));
}

#[test]
fn register_succeeds_and_builds_dispatch_table() {
    let mut registry = HealerRegistry::new();
    let healer = Arc::new(FakeHealer::new(HealerDescriptor::new(
        "floating-ip",
        [Operation::Create],
    )));
    registry.register(healer).expect("registers");
    assert_eq!(registry.len(), 1);

    let table = registry.build();
    assert_eq!(table.lookup("floating-ip", Operation::Create).len(), 1);
}

#[test]
fn register_fails_fatally_when_declared_config_file_is_missing() {
    // No HOME/etc roots are seeded, so a declared config_file that doesn't
    // exist anywhere must surface as a fatal ConfigurationError rather than
    // silently registering with no configuration.
    let mut registry = HealerRegistry::new();
    let healer = Arc::new(FakeHealer::new(
        HealerDescriptor::new("floating-ip", [Operation::Create])
            .with_config_file("definitely-missing-healer.conf"),
    ));
    let err = registry.register(healer).unwrap_err();
    assert!(matches!(err, ConfigurationError::MissingConfigFile { .. }));
    assert_eq!(registry.len(), 0);
}
