//! Abstraction over the AMQP broker, so the reconnect state machine in
//! [`crate::connector::BusConnector`] is testable without a live broker —
//! mirrors the corpus's adapter-trait-plus-fake pattern used for other
//! external collaborators (agent runtimes, session backends).

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{BusUnavailable, ConnectionLost};
use crate::handler::MessageHandler;

/// Opens a session against the bus. A failure here is always
/// [`BusUnavailable`] — callers decide whether that's fatal (boot) or a
/// retryable reconnect attempt (mid-run).
#[async_trait]
pub trait BusTransport: Send + Sync + 'static {
    async fn connect(&self, url: &str, vhost: &str) -> Result<Box<dyn BusSession>, BusUnavailable>;
}

/// A live, declared-and-consuming session. `run` drives message delivery
/// and the heartbeat watchdog until either the session is cancelled
/// (returns `Ok`) or an I/O error occurs (returns [`ConnectionLost`]).
#[async_trait]
pub trait BusSession: Send {
    async fn run(
        &mut self,
        handler: Arc<dyn MessageHandler>,
        token: CancellationToken,
    ) -> Result<(), ConnectionLost>;
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// One scripted `connect` outcome.
    pub enum ConnectOutcome {
        Fail,
        /// Deliver `messages` in order, then either disconnect
        /// (`disconnect_after: true`, yielding [`ConnectionLost`]) or hold
        /// the session open until cancelled.
        Succeed { messages: Vec<serde_json::Value>, disconnect_after: bool },
    }

    /// [`BusTransport`] double driven by a scripted queue of connect
    /// outcomes, consumed in order by successive `connect` calls.
    #[derive(Default)]
    pub struct FakeTransport {
        outcomes: Mutex<VecDeque<ConnectOutcome>>,
        connect_attempts: Mutex<u32>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(&self, outcome: ConnectOutcome) {
            self.outcomes.lock().push_back(outcome);
        }

        pub fn connect_attempts(&self) -> u32 {
            *self.connect_attempts.lock()
        }
    }

    #[async_trait]
    impl BusTransport for FakeTransport {
        async fn connect(
            &self,
            _url: &str,
            _vhost: &str,
        ) -> Result<Box<dyn BusSession>, BusUnavailable> {
            *self.connect_attempts.lock() += 1;
            match self.outcomes.lock().pop_front() {
                Some(ConnectOutcome::Succeed { messages, disconnect_after }) => {
                    Ok(Box::new(FakeSession {
                        messages: messages.into_iter().collect(),
                        disconnect_after,
                    }))
                }
                Some(ConnectOutcome::Fail) | None => {
                    Err(BusUnavailable("fake transport: no more scripted connects".into()))
                }
            }
        }
    }

    struct FakeSession {
        messages: VecDeque<serde_json::Value>,
        disconnect_after: bool,
    }

    #[async_trait]
    impl BusSession for FakeSession {
        async fn run(
            &mut self,
            handler: Arc<dyn MessageHandler>,
            token: CancellationToken,
        ) -> Result<(), ConnectionLost> {
            while let Some(body) = self.messages.pop_front() {
                if token.is_cancelled() {
                    return Ok(());
                }
                handler.handle(body).await;
            }
            if self.disconnect_after {
                return Err(ConnectionLost("fake transport: scripted disconnect".into()));
            }
            token.cancelled().await;
            Ok(())
        }
    }
}
