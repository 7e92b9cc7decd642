//! Property-based coverage of the dedup key invariant mandated by spec.md
//! §9 ("dedup equality should reduce to `(operation, type, uuid-if-present)`,
//! never raw snapshot equality") and exercised as scenario coverage in
//! spec.md §8.

use proptest::prelude::*;

use super::*;
use crate::operation::Operation;

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![Just(Operation::Create), Just(Operation::Update), Just(Operation::Delete)]
}

fn arb_resource_type() -> impl Strategy<Value = String> {
    "[a-z][a-z-]{1,15}"
}

fn arb_uuid() -> impl Strategy<Value = String> {
    "[0-9a-f]{8}-[0-9a-f]{4}"
}

proptest! {
    /// Two references sharing a uuid always collapse to the same dedup key
    /// under the same operation, regardless of whether one is a lazy
    /// `Handle` and the other a populated `Snapshot` carrying the uuid as
    /// an attribute.
    #[test]
    fn same_uuid_collapses_across_handle_and_snapshot(
        op in arb_operation(),
        resource_type in arb_resource_type(),
        uuid in arb_uuid(),
        extra_attr in "[a-z]{1,10}",
    ) {
        let handle = ResourceRef::Handle { resource_type: resource_type.clone(), uuid: uuid.clone() };

        let mut attributes = IndexMap::new();
        attributes.insert("uuid".to_string(), serde_json::Value::String(uuid.clone()));
        attributes.insert("name".to_string(), serde_json::Value::String(extra_attr));
        let snapshot = ResourceRef::Snapshot { resource_type: resource_type.clone(), attributes };

        let key_handle = WorkItem::new(op, handle).dedup_key();
        let key_snapshot = WorkItem::new(op, snapshot).dedup_key();

        prop_assert_eq!(key_handle, key_snapshot);
    }

    /// Distinct uuids under the same resource type and operation never
    /// collapse.
    #[test]
    fn distinct_uuids_never_collapse(
        op in arb_operation(),
        resource_type in arb_resource_type(),
        uuid_a in arb_uuid(),
        uuid_b in arb_uuid(),
    ) {
        prop_assume!(uuid_a != uuid_b);

        let a = ResourceRef::Handle { resource_type: resource_type.clone(), uuid: uuid_a };
        let b = ResourceRef::Handle { resource_type, uuid: uuid_b };

        prop_assert_ne!(
            WorkItem::new(op, a).dedup_key(),
            WorkItem::new(op, b).dedup_key()
        );
    }

    /// Dedup key computation is deterministic: the same reference always
    /// yields the same key, independent of attribute insertion order for
    /// snapshots without a uuid (the canonical digest sorts keys).
    #[test]
    fn dedup_key_is_order_independent_for_uuid_less_snapshots(
        op in arb_operation(),
        resource_type in arb_resource_type(),
        a_val in "[a-z]{1,8}",
        b_val in "[a-z]{1,8}",
    ) {
        let mut forward = IndexMap::new();
        forward.insert("a".to_string(), serde_json::Value::String(a_val.clone()));
        forward.insert("b".to_string(), serde_json::Value::String(b_val.clone()));

        let mut reversed = IndexMap::new();
        reversed.insert("b".to_string(), serde_json::Value::String(b_val));
        reversed.insert("a".to_string(), serde_json::Value::String(a_val));

        let forward_ref = ResourceRef::Snapshot { resource_type: resource_type.clone(), attributes: forward };
        let reversed_ref = ResourceRef::Snapshot { resource_type, attributes: reversed };

        prop_assert_eq!(
            WorkItem::new(op, forward_ref).dedup_key(),
            WorkItem::new(op, reversed_ref).dedup_key()
        );
    }

    /// Different operations on an otherwise identical reference never
    /// collapse — dedup is scoped per `(operation, ref)`, not per `ref` alone.
    #[test]
    fn distinct_operations_never_collapse(
        resource_type in arb_resource_type(),
        uuid in arb_uuid(),
    ) {
        let a = ResourceRef::Handle { resource_type: resource_type.clone(), uuid: uuid.clone() };
        let b = ResourceRef::Handle { resource_type, uuid };

        prop_assert_ne!(
            WorkItem::new(Operation::Create, a).dedup_key(),
            WorkItem::new(Operation::Update, b).dedup_key()
        );
    }
}
