use indexmap::IndexMap;

use healer_core::ResourceRef;

use super::*;
use crate::coordinator::InMemoryCoordinatorStore;

fn configured_healer() -> FipHealer<InMemoryCoordinatorStore> {
    let healer = FipHealer::new(Arc::new(InMemoryCoordinatorStore::default()));
    let mut sections = IndexMap::new();
    let mut default = IndexMap::new();
    default.insert("vn_fqname".to_string(), "default-domain:default-project:public".to_string());
    default.insert("vn_uuid".to_string(), "vn-uuid-1".to_string());
    default.insert("subnets".to_string(), "10.0.0.0/24, 10.0.1.0/24".to_string());
    sections.insert("default".to_string(), default);
    healer.configure(Some(&HealerConfig::new(sections)));
    healer
}

fn fip_snapshot(address: &str) -> ResourceRef {
    let mut attributes = IndexMap::new();
    attributes.insert("floating_ip_address".to_string(), serde_json::json!(address));
    ResourceRef::Snapshot { resource_type: "floating-ip".to_string(), attributes }
}

#[tokio::test]
async fn not_ok_when_znode_missing_then_fix_creates_it() {
    let healer = configured_healer();

    let verdict = healer.check(Operation::Create, &fip_snapshot("10.0.0.42")).await.unwrap();
    let args = match verdict {
        Verdict::NotOk(args) => args,
        other => panic!("expected NotOk, got {other:?}"),
    };
    assert_eq!(args[1], serde_json::json!("vn-uuid-1"));

    healer.fix(&args).await.unwrap();

    let verdict = healer.check(Operation::Create, &fip_snapshot("10.0.0.42")).await.unwrap();
    assert_eq!(verdict, Verdict::Ok);
}

#[tokio::test]
async fn handle_without_snapshot_returns_retry() {
    let healer = configured_healer();
    let handle = ResourceRef::Handle { resource_type: "floating-ip".to_string(), uuid: "x".to_string() };
    assert_eq!(healer.check(Operation::Create, &handle).await.unwrap(), Verdict::Retry);
}

#[tokio::test]
async fn snapshot_missing_address_is_an_error() {
    let healer = configured_healer();
    let snapshot =
        ResourceRef::Snapshot { resource_type: "floating-ip".to_string(), attributes: IndexMap::new() };
    assert!(healer.check(Operation::Create, &snapshot).await.is_err());
}

#[tokio::test]
async fn ip_outside_every_configured_subnet_is_an_error() {
    let healer = configured_healer();
    assert!(healer.check(Operation::Create, &fip_snapshot("192.168.1.1")).await.is_err());
}

#[tokio::test]
async fn unconfigured_healer_errors_on_every_check() {
    let healer = FipHealer::new(Arc::new(InMemoryCoordinatorStore::default()));
    healer.configure(None);
    assert!(healer.check(Operation::Create, &fip_snapshot("10.0.0.1")).await.is_err());
}

#[tokio::test]
async fn unparseable_subnet_entries_are_skipped_not_fatal() {
    let healer = FipHealer::new(Arc::new(InMemoryCoordinatorStore::default()));
    let mut sections = IndexMap::new();
    let mut default = IndexMap::new();
    default.insert("vn_fqname".to_string(), "vn".to_string());
    default.insert("vn_uuid".to_string(), "uuid".to_string());
    default.insert("subnets".to_string(), "not-a-cidr, 10.0.0.0/24".to_string());
    sections.insert("default".to_string(), default);
    healer.configure(Some(&HealerConfig::new(sections)));

    let verdict = healer.check(Operation::Create, &fip_snapshot("10.0.0.5")).await.unwrap();
    assert!(matches!(verdict, Verdict::NotOk(_)));
}
