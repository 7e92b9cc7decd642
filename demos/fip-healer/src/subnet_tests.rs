use super::*;

#[test]
fn parses_valid_cidr() {
    let subnet = Subnet::parse("10.0.0.0/24").unwrap();
    assert_eq!(subnet.to_string(), "10.0.0.0/24");
}

#[test]
fn rejects_missing_slash() {
    assert_eq!(Subnet::parse("10.0.0.0").unwrap_err(), SubnetParseError::BadFormat("10.0.0.0".into()));
}

#[test]
fn rejects_prefix_out_of_range() {
    assert!(matches!(Subnet::parse("10.0.0.0/99"), Err(SubnetParseError::BadPrefixLen(99))));
}

#[test]
fn contains_checks_network_membership() {
    let subnet = Subnet::parse("10.0.0.0/24").unwrap();
    assert!(subnet.contains("10.0.0.42".parse().unwrap()));
    assert!(!subnet.contains("10.0.1.1".parse().unwrap()));
}

#[test]
fn zero_length_prefix_matches_everything() {
    let subnet = Subnet::parse("0.0.0.0/0").unwrap();
    assert!(subnet.contains("192.168.1.1".parse().unwrap()));
}
