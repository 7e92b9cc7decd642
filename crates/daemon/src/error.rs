//! The daemon's top-level error, downcasting spec.md §7's table to exit
//! codes (`sysexits.h` convention: `EX_CONFIG` = 78, `EX_UNAVAILABLE` = 69).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("no bus url: pass --rabbit-url or set CONTRAIL_HEALER_RABBIT_URL")]
    MissingRabbitUrl,

    #[error("no bus vhost: pass --rabbit-vhost or set CONTRAIL_HEALER_RABBIT_VHOST")]
    MissingRabbitVhost,

    #[error(transparent)]
    Configuration(#[from] healer_registry::ConfigurationError),

    #[error(transparent)]
    BusUnavailable(#[from] healer_bus::BusUnavailable),
}

impl DaemonError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingRabbitUrl | Self::MissingRabbitVhost | Self::Configuration(_) => 78,
            Self::BusUnavailable(_) => 69,
        }
    }
}
