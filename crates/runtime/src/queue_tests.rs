use super::*;

#[tokio::test]
async fn empty_and_full_reflect_occupancy() {
    let q: BoundedQueue<i32> = BoundedQueue::new(2);
    assert!(q.empty());
    assert!(!q.full());

    q.put(1).await;
    assert!(!q.empty());
    assert!(!q.full());

    q.put(2).await;
    assert!(q.full());
}

#[tokio::test]
async fn try_get_drains_in_fifo_order_and_returns_none_when_empty() {
    let q: BoundedQueue<i32> = BoundedQueue::new(4);
    q.put(1).await;
    q.put(2).await;
    assert_eq!(q.try_get(), Some(1));
    assert_eq!(q.try_get(), Some(2));
    assert_eq!(q.try_get(), None);
}

#[tokio::test]
async fn put_backpressures_when_full() {
    let q = std::sync::Arc::new(BoundedQueue::new(1));
    q.put("a").await;
    assert!(q.full());

    let q2 = q.clone();
    let blocked = tokio::spawn(async move {
        q2.put("b").await;
    });

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert!(!blocked.is_finished());

    assert_eq!(q.try_get(), Some("a"));
    blocked.await.expect("task completes once space frees up");
    assert_eq!(q.try_get(), Some("b"));
}

#[tokio::test]
async fn unbounded_queue_get_blocks_until_item_arrives() {
    let q = std::sync::Arc::new(UnboundedQueue::new());
    let q2 = q.clone();
    let handle = tokio::spawn(async move { q2.get().await });

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    q.put(42);
    let got = handle.await.expect("task completes");
    assert_eq!(got, Some(42));
}
