use super::*;

#[test]
fn parses_known_wire_strings() {
    assert_eq!(Operation::parse("CREATE"), Some(Operation::Create));
    assert_eq!(Operation::parse("UPDATE"), Some(Operation::Update));
    assert_eq!(Operation::parse("DELETE"), Some(Operation::Delete));
}

#[test]
fn rejects_unknown_strings() {
    assert_eq!(Operation::parse("create"), None);
    assert_eq!(Operation::parse("RENAME"), None);
    assert_eq!(Operation::parse(""), None);
}

#[test]
fn round_trips_through_wire_str() {
    for op in Operation::ALL {
        assert_eq!(Operation::parse(op.as_wire_str()), Some(op));
    }
}

#[test]
fn display_matches_wire_str() {
    assert_eq!(Operation::Create.to_string(), "CREATE");
}
