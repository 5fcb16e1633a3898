//! Node utilization used by the cluster autoscaler to rank scale-down candidates.
//!
//! Utilization of a node is the maximum over tracked resources (cpu, memory and optionally an
//! accelerator) of requested / allocatable. Pods being deleted never count, daemonset and
//! mirror pods count unless the corresponding skip flag is set. Every call works on its own
//! borrowed snapshot and keeps no state, so nodes may be scored in parallel.

pub mod accelerator;
pub mod aggregator;
pub mod classifier;
pub mod error;
pub mod requests;

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::config::UtilizationConfig;
use crate::core::snapshot::{ClusterSnapshot, NodeSnapshot};

use accelerator::{accelerator_state, AcceleratorState, GpuConfig};
use aggregator::{resource_utilization, validated_allocatable, ClassifiedPods, ResourceKind};
use error::UtilizationResult;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct UtilizationInfo {
    pub cpu_util: f64,
    pub mem_util: f64,
    pub gpu_util: f64,
    /// Resource which defined `utilization`, empty when nothing was computed.
    pub resource_name: String,
    /// Maximum of the computed per resource utilizations.
    pub utilization: f64,
}

/// Calculates utilization of the node in `snapshot`.
///
/// A node advertising accelerators which are not allocatable yet gets zero utilization and no
/// error, so it stays eligible for scale down. Otherwise any missing or negative cpu or memory
/// allocatable is an error.
pub fn calculate(
    snapshot: &NodeSnapshot,
    skip_daemon_set_pods: bool,
    skip_mirror_pods: bool,
    gpu_config: Option<&GpuConfig>,
    now: f64,
) -> UtilizationResult<UtilizationInfo> {
    let node = &snapshot.node;

    let mut kinds = vec![ResourceKind::Cpu, ResourceKind::Memory];
    match accelerator_state(node, gpu_config) {
        AcceleratorState::NotReady => {
            debug!(
                "Node {:?} has unready accelerator, reporting zero utilization",
                node.metadata.name
            );
            return Ok(UtilizationInfo {
                resource_name: gpu_config
                    .map(|config| config.resource_name.clone())
                    .unwrap_or_default(),
                ..Default::default()
            });
        }
        AcceleratorState::Ready(_) => {
            if let Some(config) = gpu_config {
                kinds.push(ResourceKind::Accelerator(config.resource_name.clone()));
            }
        }
        AcceleratorState::Absent => {}
    }

    for kind in kinds.iter() {
        validated_allocatable(node, kind.resource_name())?;
    }

    let pods = ClassifiedPods::new(&snapshot.pods, skip_daemon_set_pods, skip_mirror_pods, now);

    let mut info = UtilizationInfo::default();
    for kind in kinds.iter() {
        let util = resource_utilization(node, &pods, kind.resource_name())?;
        match kind {
            ResourceKind::Cpu => info.cpu_util = util,
            ResourceKind::Memory => info.mem_util = util,
            ResourceKind::Accelerator(_) => info.gpu_util = util,
        }
        // First kind wins ties, so cpu is reported for an idle node.
        if info.resource_name.is_empty() || util > info.utilization {
            info.utilization = util;
            info.resource_name = kind.resource_name().to_string();
        }
    }

    debug!(
        "Node {:?} utilization {} ({})",
        node.metadata.name, info.utilization, info.resource_name
    );
    Ok(info)
}

/// Holds calculation settings loaded from configuration.
pub struct UtilizationCalculator {
    config: UtilizationConfig,
}

impl UtilizationCalculator {
    pub fn new(config: UtilizationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UtilizationConfig {
        &self.config
    }

    pub fn calculate(
        &self,
        snapshot: &NodeSnapshot,
        now: f64,
    ) -> UtilizationResult<UtilizationInfo> {
        calculate(
            snapshot,
            self.config.skip_daemon_set_pods,
            self.config.skip_mirror_pods,
            self.config.gpu.as_ref(),
            now,
        )
    }

    /// Results for every node in the cluster keyed by node name. Nodes fail independently.
    pub fn calculate_cluster(
        &self,
        cluster: &ClusterSnapshot,
    ) -> BTreeMap<String, UtilizationResult<UtilizationInfo>> {
        cluster
            .nodes
            .iter()
            .map(|snapshot| {
                (
                    snapshot.node_name().to_string(),
                    self.calculate(snapshot, cluster.timestamp),
                )
            })
            .collect()
    }
}
