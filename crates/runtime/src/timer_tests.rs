use super::*;

#[tokio::test(start_paused = true)]
async fn becomes_ready_after_timeout() {
    let group = TaskGroup::new();
    let timer = Timer::new(Duration::from_millis(100), &group);
    assert!(!timer.ready());
    tokio::time::advance(Duration::from_millis(150)).await;
    assert!(timer.ready());
}

#[tokio::test(start_paused = true)]
async fn reset_clears_ready_and_restarts_countdown() {
    let group = TaskGroup::new();
    let timer = Timer::new(Duration::from_millis(100), &group);
    tokio::time::advance(Duration::from_millis(150)).await;
    assert!(timer.ready());

    timer.reset(&group);
    assert!(!timer.ready());
    tokio::time::advance(Duration::from_millis(50)).await;
    assert!(!timer.ready());
    tokio::time::advance(Duration::from_millis(60)).await;
    assert!(timer.ready());
}

#[tokio::test(start_paused = true)]
async fn reset_before_original_deadline_does_not_resurrect_stale_ready() {
    let group = TaskGroup::new();
    let timer = Timer::new(Duration::from_millis(100), &group);

    tokio::time::advance(Duration::from_millis(50)).await;
    timer.reset(&group);

    // The original arm's sleep fires at the 100ms mark (50ms after reset),
    // but its generation is stale and must not flip ready back to true.
    tokio::time::advance(Duration::from_millis(60)).await;
    assert!(!timer.ready());

    tokio::time::advance(Duration::from_millis(60)).await;
    assert!(timer.ready());
}
