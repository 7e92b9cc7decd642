//! Bus connection failures.

use thiserror::Error;

/// Cannot reach the bus at boot. Fatal — the daemon exits non-zero.
#[derive(Debug, Clone, Error)]
#[error("failed to connect to the bus: {0}")]
pub struct BusUnavailable(pub String);

/// I/O error on the drain or heartbeat task mid-run. Recovered by the
/// connector: the session is torn down and reconnection is attempted after
/// a pause. Never propagated past [`crate::connector::BusConnector::run`].
#[derive(Debug, Clone, Error)]
#[error("connection lost: {0}")]
pub struct ConnectionLost(pub String);
