//! The dispatcher (component F): decode → look up dispatch table → build
//! `ResourceRef` → enqueue per healer → ack. Acknowledgement happens in the
//! bus session after `handle` returns, never after processing completes.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use healer_bus::MessageHandler;
use healer_core::{DecodeError, DispatchTable, Event, Operation, WorkItem};
use healer_pipeline::HealerPipeline;
use healer_runtime::TaskGroup;
use tracing::{debug, warn};

/// `(resource_type, operation) -> pipelines` routing table. Built once from
/// the registry's [`DispatchTable`] by fronting every distinct registered
/// healer with a started [`HealerPipeline`] — the dispatcher routes to
/// pipelines, never directly to healers, since ingestion (dedup, delay,
/// retry) belongs to the pipeline, not the dispatch step.
pub struct PipelineTable {
    table: HashMap<String, HashMap<Operation, Vec<Arc<HealerPipeline>>>>,
}

impl PipelineTable {
    pub fn build(dispatch: &DispatchTable, group: &Arc<TaskGroup>) -> Self {
        let mut started: HashMap<usize, Arc<HealerPipeline>> = HashMap::new();
        let mut table: HashMap<String, HashMap<Operation, Vec<Arc<HealerPipeline>>>> =
            HashMap::new();

        for (resource_type, operation, healers) in dispatch.entries() {
            for healer in healers {
                let identity = Arc::as_ptr(healer) as *const () as usize;
                let pipeline = started
                    .entry(identity)
                    .or_insert_with(|| {
                        let pipeline = HealerPipeline::new(healer.clone());
                        pipeline.start(group);
                        pipeline
                    })
                    .clone();
                table
                    .entry(resource_type.to_string())
                    .or_default()
                    .entry(operation)
                    .or_default()
                    .push(pipeline);
            }
        }

        Self { table }
    }

    pub fn lookup(&self, resource_type: &str, operation: Operation) -> &[Arc<HealerPipeline>] {
        self.table
            .get(resource_type)
            .and_then(|by_op| by_op.get(&operation))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Decodes bus messages and fans each one out to every pipeline subscribed
/// to its `(resource_type, operation)` pair.
pub struct Dispatcher {
    pipelines: PipelineTable,
}

impl Dispatcher {
    pub fn new(pipelines: PipelineTable) -> Self {
        Self { pipelines }
    }
}

#[async_trait]
impl MessageHandler for Dispatcher {
    async fn handle(&self, body: serde_json::Value) {
        let event = match Event::decode(&body) {
            Ok(event) => event,
            Err(DecodeError::NoReference) => {
                debug!("event has neither snapshot nor uuid, dropping");
                return;
            }
            Err(error) => {
                warn!(%error, "failed to decode bus message");
                return;
            }
        };

        let pipelines = self.pipelines.lookup(&event.resource_type, event.operation);
        if pipelines.is_empty() {
            debug!(
                resource_type = %event.resource_type,
                operation = %event.operation,
                "no healer subscribed, dropping"
            );
            return;
        }

        let item = WorkItem::new(event.operation, event.reference);
        for pipeline in pipelines {
            pipeline.enqueue(item.clone());
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
