use super::*;
use serde_json::json;

#[test]
fn decodes_snapshot_event() {
    let body = json!({
        "type": "floating-ip",
        "oper": "CREATE",
        "obj_dict": {"floating_ip_address": "10.0.0.1"},
    });
    let event = Event::decode(&body).expect("decodes");
    assert_eq!(event.resource_type, "floating-ip");
    assert_eq!(event.operation, Operation::Create);
    assert!(matches!(event.reference, ResourceRef::Snapshot { .. }));
}

#[test]
fn decodes_handle_event() {
    let body = json!({"type": "virtual-ip", "oper": "DELETE", "uuid": "abc-123"});
    let event = Event::decode(&body).expect("decodes");
    assert_eq!(event.reference, ResourceRef::Handle {
        resource_type: "virtual-ip".to_string(),
        uuid: "abc-123".to_string(),
    });
}

#[test]
fn rejects_missing_type() {
    let body = json!({"oper": "CREATE", "uuid": "abc"});
    assert_eq!(Event::decode(&body), Err(DecodeError::MissingField("type")));
}

#[test]
fn rejects_unknown_operation() {
    let body = json!({"type": "x", "oper": "RENAME", "uuid": "abc"});
    assert_eq!(
        Event::decode(&body),
        Err(DecodeError::UnknownOperation("RENAME".to_string()))
    );
}

#[test]
fn rejects_event_with_neither_snapshot_nor_uuid() {
    let body = json!({"type": "x", "oper": "UPDATE"});
    assert_eq!(Event::decode(&body), Err(DecodeError::NoReference));
}

#[test]
fn rejects_non_object_body() {
    let body = json!("not an object");
    assert_eq!(Event::decode(&body), Err(DecodeError::NotAnObject));
}

#[test]
fn obj_dict_takes_precedence_over_uuid_when_both_present() {
    let body = json!({
        "type": "x", "oper": "UPDATE", "uuid": "abc", "obj_dict": {"uuid": "abc"},
    });
    let event = Event::decode(&body).expect("decodes");
    assert!(matches!(event.reference, ResourceRef::Snapshot { .. }));
}
