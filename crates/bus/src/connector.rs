//! The bus connector's `Disconnected -> Connecting -> Consuming -> Draining
//! -> Disconnected` state machine (component G).
//!
//! The first connect attempt is fatal on failure ([`BusUnavailable`]) — the
//! daemon cannot usefully start without a bus. Every subsequent connection
//! loss is recovered: the session is dropped and reconnection is retried
//! after a pause, indefinitely, until the caller's [`CancellationToken`]
//! fires (a user-initiated shutdown), which is the sole permanent exit.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::BusUnavailable;
use crate::handler::MessageHandler;
use crate::transport::BusTransport;

const DEFAULT_RECONNECT_PAUSE: Duration = Duration::from_secs(2);

pub struct BusConnector<T: BusTransport> {
    transport: T,
    url: String,
    vhost: String,
    reconnect_pause: Duration,
}

impl<T: BusTransport> BusConnector<T> {
    pub fn new(transport: T, url: impl Into<String>, vhost: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
            vhost: vhost.into(),
            reconnect_pause: DEFAULT_RECONNECT_PAUSE,
        }
    }

    pub fn with_reconnect_pause(mut self, pause: Duration) -> Self {
        self.reconnect_pause = pause;
        self
    }

    /// Connect and consume until `token` is cancelled. Returns `Err` only
    /// for the first connect attempt failing — every later failure is
    /// handled internally by reconnecting.
    pub async fn run(
        &self,
        handler: Arc<dyn MessageHandler>,
        token: CancellationToken,
    ) -> Result<(), BusUnavailable> {
        let mut session = self.transport.connect(&self.url, &self.vhost).await?;
        info!("connected to bus");

        loop {
            if token.is_cancelled() {
                return Ok(());
            }

            match session.run(handler.clone(), token.clone()).await {
                Ok(()) => return Ok(()),
                Err(lost) => {
                    warn!(reason = %lost, "bus connection lost, reconnecting");
                    match self.reconnect(&token).await {
                        Some(s) => {
                            session = s;
                            info!("reconnected to bus");
                        }
                        None => return Ok(()),
                    }
                }
            }
        }
    }

    /// Retries `connect` with a pause between attempts until it succeeds
    /// or `token` is cancelled (in which case `None` is returned).
    async fn reconnect(&self, token: &CancellationToken) -> Option<Box<dyn crate::transport::BusSession>> {
        loop {
            tokio::select! {
                _ = token.cancelled() => return None,
                () = tokio::time::sleep(self.reconnect_pause) => {}
            }
            if token.is_cancelled() {
                return None;
            }
            match self.transport.connect(&self.url, &self.vhost).await {
                Ok(session) => return Some(session),
                Err(e) => warn!(error = %e, "reconnect attempt failed"),
            }
        }
    }
}

#[cfg(test)]
#[path = "connector_tests.rs"]
mod tests;
