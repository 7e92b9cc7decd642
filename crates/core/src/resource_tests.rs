use super::*;
use crate::operation::Operation;
use indexmap::IndexMap;

fn snapshot(resource_type: &str, attrs: &[(&str, &str)]) -> ResourceRef {
    let mut attributes = IndexMap::new();
    for (k, v) in attrs {
        attributes.insert(k.to_string(), serde_json::Value::String(v.to_string()));
    }
    ResourceRef::Snapshot { resource_type: resource_type.to_string(), attributes }
}

fn handle(resource_type: &str, uuid: &str) -> ResourceRef {
    ResourceRef::Handle { resource_type: resource_type.to_string(), uuid: uuid.to_string() }
}

#[test]
fn handle_and_snapshot_with_same_uuid_collapse_to_same_identity() {
    let a = handle("virtual-ip", "abc-123");
    let b = snapshot("virtual-ip", &[("uuid", "abc-123"), ("name", "vip-1")]);
    let key_a = WorkItem::new(Operation::Update, a).dedup_key();
    let key_b = WorkItem::new(Operation::Update, b).dedup_key();
    assert_eq!(key_a, key_b);
}

#[test]
fn different_uuids_do_not_collapse() {
    let a = handle("virtual-ip", "abc-123");
    let b = handle("virtual-ip", "def-456");
    assert_ne!(
        WorkItem::new(Operation::Update, a).dedup_key(),
        WorkItem::new(Operation::Update, b).dedup_key()
    );
}

#[test]
fn different_operations_on_same_resource_do_not_collapse() {
    let a = handle("virtual-ip", "abc-123");
    let b = handle("virtual-ip", "abc-123");
    assert_ne!(
        WorkItem::new(Operation::Create, a).dedup_key(),
        WorkItem::new(Operation::Update, b).dedup_key()
    );
}

#[test]
fn snapshots_without_uuid_dedup_by_canonical_attribute_order() {
    let a = snapshot("floating-ip", &[("a", "1"), ("b", "2")]);
    let b = snapshot("floating-ip", &[("b", "2"), ("a", "1")]);
    assert_eq!(
        WorkItem::new(Operation::Create, a).dedup_key(),
        WorkItem::new(Operation::Create, b).dedup_key()
    );
}

#[test]
fn snapshots_with_different_attributes_and_no_uuid_do_not_collapse() {
    let a = snapshot("floating-ip", &[("a", "1")]);
    let b = snapshot("floating-ip", &[("a", "2")]);
    assert_ne!(
        WorkItem::new(Operation::Create, a).dedup_key(),
        WorkItem::new(Operation::Create, b).dedup_key()
    );
}
