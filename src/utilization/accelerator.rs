//! Accelerator (GPU) handling on top of cpu and memory accounting.

use serde::{Deserialize, Serialize};

use crate::core::common::RESOURCE_NVIDIA_GPU;
use crate::core::node::Node;

/// How accelerators are exposed by nodes of some cloud provider.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GpuConfig {
    /// Node label key which marks nodes with accelerators attached.
    pub label: String,
    /// Accelerator type, usually the value of `label`.
    #[serde(default)]
    pub gpu_type: String,
    #[serde(default = "gpu_resource_name_default")]
    pub resource_name: String,
}

fn gpu_resource_name_default() -> String {
    RESOURCE_NVIDIA_GPU.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceleratorState {
    /// Accelerator is not tracked for the node.
    Absent,
    /// Node advertises accelerators but none are allocatable yet, e.g. the device plugin has not
    /// registered them.
    NotReady,
    /// Allocatable accelerator amount, always positive.
    Ready(i64),
}

pub fn accelerator_state(node: &Node, gpu_config: Option<&GpuConfig>) -> AcceleratorState {
    let Some(gpu_config) = gpu_config else {
        return AcceleratorState::Absent;
    };

    let has_label = node.metadata.labels.contains_key(&gpu_config.label);
    match node.allocatable(&gpu_config.resource_name) {
        Some(allocatable) if allocatable > 0 => AcceleratorState::Ready(allocatable),
        Some(_) => AcceleratorState::NotReady,
        None if has_label => AcceleratorState::NotReady,
        None => AcceleratorState::Absent,
    }
}

/// Node has accelerators if it carries `gpu_label` or has a positive allocatable amount of
/// `resource_name`.
pub fn node_has_gpu(gpu_label: &str, resource_name: &str, node: &Node) -> bool {
    node.metadata.labels.contains_key(gpu_label)
        || node.allocatable(resource_name).is_some_and(|value| value > 0)
}

/// Builds config for a node the way providers labelling accelerator nodes with `gpu_label` do.
/// Returns None for nodes without accelerators.
pub fn gpu_config_for_node(
    gpu_label: &str,
    resource_name: &str,
    node: &Node,
) -> Option<GpuConfig> {
    if !node_has_gpu(gpu_label, resource_name, node) {
        return None;
    }
    Some(GpuConfig {
        label: gpu_label.to_string(),
        gpu_type: node
            .metadata
            .labels
            .get(gpu_label)
            .cloned()
            .unwrap_or_default(),
        resource_name: resource_name.to_string(),
    })
}
