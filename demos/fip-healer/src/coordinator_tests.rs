use super::*;

#[tokio::test]
async fn create_then_exists_round_trips() {
    let store = InMemoryCoordinatorStore::default();
    assert!(!store.exists("/api-server/subnets/vn:10.0.0.0/24/167772161").await.unwrap());

    store.create("/api-server/subnets/vn:10.0.0.0/24/167772161", "vn-uuid").await.unwrap();
    assert!(store.exists("/api-server/subnets/vn:10.0.0.0/24/167772161").await.unwrap());
}
