#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! healer-bus: the AMQP 0-9-1 bus connector (component G) — reconnect state
//! machine, heartbeat watchdog, and the `BusTransport` seam that keeps the
//! reconnect logic testable without a live broker.

pub mod connector;
pub mod error;
pub mod handler;
pub mod lapin_transport;
pub mod transport;

pub use connector::BusConnector;
pub use error::{BusUnavailable, ConnectionLost};
pub use handler::MessageHandler;
pub use lapin_transport::{LapinTransport, HEALER_QUEUE, VNC_EXCHANGE};
pub use transport::{BusSession, BusTransport};

#[cfg(any(test, feature = "test-support"))]
pub use handler::fake::RecordingHandler;
#[cfg(any(test, feature = "test-support"))]
pub use transport::fake::{ConnectOutcome, FakeTransport};
