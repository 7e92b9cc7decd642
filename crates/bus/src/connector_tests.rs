use std::sync::Arc;

use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::handler::fake::RecordingHandler;
use crate::transport::fake::{ConnectOutcome, FakeTransport};

#[tokio::test]
async fn first_connect_failure_is_fatal() {
    let transport = FakeTransport::new();
    transport.push(ConnectOutcome::Fail);
    let connector = BusConnector::new(transport, "user:pass@host:5672", "opencontrail");

    let handler: Arc<dyn MessageHandler> = Arc::new(RecordingHandler::new());
    let err = connector.run(handler, CancellationToken::new()).await.unwrap_err();
    assert!(err.to_string().contains("fake transport"));
}

#[tokio::test]
async fn delivers_messages_to_the_handler() {
    let transport = FakeTransport::new();
    transport.push(ConnectOutcome::Succeed {
        messages: vec![json!({"type": "floating-ip", "oper": "CREATE"})],
        disconnect_after: false,
    });
    let connector = BusConnector::new(transport, "user:pass@host:5672", "opencontrail");

    let handler = Arc::new(RecordingHandler::new());
    let token = CancellationToken::new();
    let run_token = token.clone();
    let handler_for_assert = handler.clone();
    let handler_dyn: Arc<dyn MessageHandler> = handler;

    let run = tokio::spawn(async move { connector.run(handler_dyn, run_token).await });

    // Give the fake session a moment to deliver its scripted message before
    // requesting shutdown.
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    token.cancel();
    run.await.expect("run task completes").expect("graceful shutdown");

    assert_eq!(handler_for_assert.bodies().len(), 1);
}

#[tokio::test]
async fn reconnects_after_mid_run_disconnect_without_propagating_an_error() {
    let transport = FakeTransport::new();
    transport.push(ConnectOutcome::Succeed {
        messages: vec![json!({"type": "virtual-ip", "oper": "UPDATE"})],
        disconnect_after: true,
    });
    transport.push(ConnectOutcome::Succeed {
        messages: vec![json!({"type": "virtual-ip", "oper": "DELETE"})],
        disconnect_after: false,
    });
    let connector =
        BusConnector::new(transport, "user:pass@host:5672", "opencontrail")
            .with_reconnect_pause(std::time::Duration::from_millis(5));

    let handler = Arc::new(RecordingHandler::new());
    let token = CancellationToken::new();
    let run_token = token.clone();
    let handler_for_assert = handler.clone();
    let handler_dyn: Arc<dyn MessageHandler> = handler;

    let run = tokio::spawn(async move { connector.run(handler_dyn, run_token).await });

    tokio::time::sleep(std::time::Duration::from_millis(60)).await;
    token.cancel();
    run.await.expect("run task completes").expect("graceful shutdown");

    let bodies = handler_for_assert.bodies();
    assert_eq!(bodies.len(), 2, "both pre- and post-reconnect messages must arrive");
}

#[tokio::test]
async fn cancellation_before_any_message_shuts_down_gracefully() {
    let transport = FakeTransport::new();
    transport.push(ConnectOutcome::Succeed { messages: vec![], disconnect_after: false });
    let connector = BusConnector::new(transport, "user:pass@host:5672", "opencontrail");

    let handler: Arc<dyn MessageHandler> = Arc::new(RecordingHandler::new());
    let token = CancellationToken::new();
    token.cancel();

    connector.run(handler, token).await.expect("graceful shutdown");
}
