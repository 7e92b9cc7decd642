use super::*;
use crate::descriptor::HealerDescriptor;
use crate::plugin::fake::FakeHealer;

fn healer(resource_type: &str, ops: impl IntoIterator<Item = Operation>) -> Arc<dyn Healer> {
    Arc::new(FakeHealer::new(HealerDescriptor::new(resource_type, ops)))
}

#[test]
fn lookup_returns_empty_slice_for_unknown_pair() {
    let table = DispatchTable::builder().build();
    assert!(table.lookup("floating-ip", Operation::Create).is_empty());
}

#[test]
fn lookup_returns_subscribed_healer() {
    let mut builder = DispatchTable::builder();
    builder.register(healer("floating-ip", [Operation::Create]));
    let table = builder.build();
    assert_eq!(table.lookup("floating-ip", Operation::Create).len(), 1);
    assert!(table.lookup("floating-ip", Operation::Delete).is_empty());
}

#[test]
fn fan_out_preserves_insertion_order() {
    let mut builder = DispatchTable::builder();
    let first = healer("virtual-ip", [Operation::Update]);
    let second = healer("virtual-ip", [Operation::Update]);
    builder.register(first.clone());
    builder.register(second.clone());
    let table = builder.build();
    let subscribers = table.lookup("virtual-ip", Operation::Update);
    assert_eq!(subscribers.len(), 2);
    assert!(Arc::ptr_eq(&subscribers[0], &first));
    assert!(Arc::ptr_eq(&subscribers[1], &second));
}

#[test]
fn healer_count_sums_across_resource_types_and_operations() {
    let mut builder = DispatchTable::builder();
    builder.register(healer("floating-ip", [Operation::Create, Operation::Delete]));
    builder.register(healer("virtual-ip", [Operation::Update]));
    let table = builder.build();
    assert_eq!(table.healer_count(), 3);
}
