//! The floating-ip healer: confirms a coordination-service znode exists for
//! every floating IP's subnet after a CREATE, creating it if missing.
//! Direct analogue of the original's `FIPHealer.check`/`fix`.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use healer_core::{
    Healer, HealerConfig, HealerDescriptor, HealerError, Operation, ResourceRef, Verdict,
};
use parking_lot::Mutex;
use tracing::warn;

use crate::coordinator::CoordinatorStore;
use crate::subnet::Subnet;

/// Config file name searched under `/etc/contrail-healer/` then
/// `~/.config/contrail-healer/`, matching the original's `config_file`.
pub const CONFIG_FILE: &str = "fip-healer.conf";

#[derive(Debug, Clone, Default)]
struct VirtualNetwork {
    fq_name: String,
    uuid: String,
    subnets: Vec<Subnet>,
}

/// Makes sure a coordination-service znode has been created after a
/// floating-ip CREATE, generic over the [`CoordinatorStore`] backing it.
pub struct FipHealer<S: CoordinatorStore> {
    descriptor: HealerDescriptor,
    store: Arc<S>,
    vn: Mutex<VirtualNetwork>,
}

impl<S: CoordinatorStore> FipHealer<S> {
    pub fn new(store: Arc<S>) -> Self {
        let descriptor = HealerDescriptor::new("floating-ip", [Operation::Create])
            .with_config_file(CONFIG_FILE)
            .with_check_delay(Duration::from_secs(2));
        Self { descriptor, store, vn: Mutex::new(VirtualNetwork::default()) }
    }

    fn zk_node_for(&self, vn_fq_name: &str, subnet: Subnet, ip: Ipv4Addr) -> String {
        format!("/api-server/subnets/{vn_fq_name}:{subnet}/{}", u32::from(ip))
    }
}

#[async_trait]
impl<S: CoordinatorStore> Healer for FipHealer<S> {
    fn descriptor(&self) -> &HealerDescriptor {
        &self.descriptor
    }

    async fn check(&self, _operation: Operation, reference: &ResourceRef) -> Result<Verdict, HealerError> {
        let attributes = match reference {
            ResourceRef::Snapshot { attributes, .. } => attributes,
            // No snapshot was carried on the bus message (lazy handle);
            // the resource client needed to refetch it is out of scope
            // here, so ask the pipeline to retry once more context arrives.
            ResourceRef::Handle { .. } => return Ok(Verdict::Retry),
        };

        let ip_str = attributes
            .get("floating_ip_address")
            .and_then(|v| v.as_str())
            .ok_or_else(|| HealerError::new("floating-ip snapshot missing floating_ip_address"))?;
        let ip: Ipv4Addr = ip_str
            .parse()
            .map_err(|_| HealerError::new(format!("invalid floating_ip_address {ip_str:?}")))?;

        let vn = self.vn.lock().clone();
        let subnet = vn.subnets.iter().find(|subnet| subnet.contains(ip)).copied();
        let subnet = match subnet {
            Some(subnet) => subnet,
            None => {
                warn!(%ip, "no configured subnet covers this floating ip");
                return Err(HealerError::new(format!("no subnet found for floating ip {ip}")));
            }
        };

        let zk_node = self.zk_node_for(&vn.fq_name, subnet, ip);
        if self.store.exists(&zk_node).await? {
            Ok(Verdict::Ok)
        } else {
            Ok(Verdict::NotOk(vec![serde_json::json!(zk_node), serde_json::json!(vn.uuid)]))
        }
    }

    async fn fix(&self, args: &[serde_json::Value]) -> Result<(), HealerError> {
        let zk_node = args
            .first()
            .and_then(|v| v.as_str())
            .ok_or_else(|| HealerError::new("fix missing zk_node argument"))?;
        let data = args
            .get(1)
            .and_then(|v| v.as_str())
            .ok_or_else(|| HealerError::new("fix missing vn uuid argument"))?;
        self.store.create(zk_node, data).await
    }

    fn configure(&self, config: Option<&HealerConfig>) {
        let Some(config) = config else {
            warn!("fip-healer configured with no config file; check will always error");
            return;
        };

        let fq_name = config.get("default", "vn_fqname").unwrap_or_default().to_string();
        let uuid = config.get("default", "vn_uuid").unwrap_or_default().to_string();
        let subnets = config
            .get("default", "subnets")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .filter_map(|s| match Subnet::parse(s) {
                        Ok(subnet) => Some(subnet),
                        Err(error) => {
                            warn!(%error, subnet = %s, "skipping unparseable subnet");
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        *self.vn.lock() = VirtualNetwork { fq_name, uuid, subnets };
    }
}

#[cfg(test)]
#[path = "healer_tests.rs"]
mod tests;
