//! Process wiring: registers compiled-in healers, builds the dispatch and
//! pipeline tables, and drives the bus connector until shutdown.
//!
//! One process-wide [`TaskGroup`] is owned here and handed by reference to
//! every pipeline and the bus connector, per spec.md §9's explicit design
//! note — never a module-level global.

use std::sync::Arc;

use healer_bus::{BusConnector, LapinTransport};
use healer_registry::HealerRegistry;
use healer_runtime::TaskGroup;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::dispatcher::{Dispatcher, PipelineTable};
use crate::error::DaemonError;

/// Env var fallback for `--rabbit-url`, per spec.md §6.
pub const RABBIT_URL_ENV: &str = "CONTRAIL_HEALER_RABBIT_URL";
/// Env var fallback for `--rabbit-vhost`, per spec.md §6.
pub const RABBIT_VHOST_ENV: &str = "CONTRAIL_HEALER_RABBIT_VHOST";

pub fn resolve_rabbit_url(flag: Option<String>) -> Result<String, DaemonError> {
    flag.or_else(|| std::env::var(RABBIT_URL_ENV).ok()).ok_or(DaemonError::MissingRabbitUrl)
}

pub fn resolve_rabbit_vhost(flag: Option<String>) -> Result<String, DaemonError> {
    flag.or_else(|| std::env::var(RABBIT_VHOST_ENV).ok()).ok_or(DaemonError::MissingRabbitVhost)
}

/// Register every compiled-in healer. The sole extension point until a
/// dynamic loader is built — per spec.md §1, plugin discovery is explicitly
/// out of scope; this is static, explicit registration instead.
fn register_healers(registry: &mut HealerRegistry) -> Result<(), DaemonError> {
    registry.register(fip_healer::healer())?;
    Ok(())
}

/// Run the daemon until Ctrl-C or a pipeline task fails fatally.
pub async fn run(rabbit_url: String, rabbit_vhost: String) -> Result<(), DaemonError> {
    let mut registry = HealerRegistry::new();
    register_healers(&mut registry)?;
    let dispatch = registry.build();
    info!(healers = dispatch.healer_count(), "healers registered");

    let group = Arc::new(TaskGroup::new());
    let pipelines = PipelineTable::build(&dispatch, &group);
    let dispatcher: Arc<dyn healer_bus::MessageHandler> = Arc::new(Dispatcher::new(pipelines));

    let connector = BusConnector::new(LapinTransport, rabbit_url, rabbit_vhost);
    let shutdown = CancellationToken::new();

    let connector_task = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move { connector.run(dispatcher, shutdown).await })
    };

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let outcome = tokio::select! {
        joined = &mut connector_task => joined.unwrap_or_else(|_| Ok(())),
        _ = &mut ctrl_c => {
            info!("shutdown requested");
            shutdown.cancel();
            (&mut connector_task).await.unwrap_or_else(|_| Ok(()))
        }
        task_error = group.wait_until_any_error() => {
            error!(error = %task_error, "pipeline task failed fatally, shutting down");
            shutdown.cancel();
            (&mut connector_task).await.unwrap_or_else(|_| Ok(()))
        }
    };

    group.cancel_all();
    outcome.map_err(DaemonError::from)
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
