use crate::core::common::{OwnerReference, RESOURCE_NVIDIA_GPU};
use crate::core::node::Node;
use crate::core::pod::{Container, ContainerRestartPolicy, Pod};
use crate::utilization::accelerator::{gpu_config_for_node, GpuConfig};
use crate::utilization::classifier::CONFIG_MIRROR_ANNOTATION_KEY;

pub const TEST_GPU_LABEL: &'static str = "cloud.google.com/gke-accelerator";
pub const TEST_GPU_TYPE: &'static str = "nvidia-tesla-k80";

pub fn build_test_pod(name: &str, cpu: i64, ram: i64) -> Pod {
    Pod::new(name.to_string(), cpu, ram)
}

pub fn build_test_node(name: &str, cpu: i64, ram: i64) -> Node {
    Node::new(name.to_string(), cpu, ram)
}

pub fn init_container(cpu: i64, ram: i64) -> Container {
    Container::new("init".to_string(), cpu, ram)
}

pub fn sidecar_container(cpu: i64, ram: i64) -> Container {
    let mut container = Container::new("sidecar".to_string(), cpu, ram);
    container.restart_policy = Some(ContainerRestartPolicy::Always);
    container
}

pub fn owner_references(name: &str, kind: &str, api_version: &str) -> Vec<OwnerReference> {
    vec![OwnerReference {
        api_version: api_version.to_string(),
        kind: kind.to_string(),
        name: name.to_string(),
    }]
}

pub fn set_mirror_annotation(pod: &mut Pod) {
    pod.metadata
        .annotations
        .insert(CONFIG_MIRROR_ANNOTATION_KEY.to_string(), "".to_string());
}

pub fn add_gpu_label_to_node(node: &mut Node) {
    node.metadata
        .labels
        .insert(TEST_GPU_LABEL.to_string(), TEST_GPU_TYPE.to_string());
}

pub fn add_gpus_to_node(node: &mut Node, gpus: i64) {
    node.status
        .allocatable
        .insert(RESOURCE_NVIDIA_GPU.to_string(), gpus);
    node.status
        .capacity
        .insert(RESOURCE_NVIDIA_GPU.to_string(), gpus);
    add_gpu_label_to_node(node);
}

pub fn request_gpu_for_pod(pod: &mut Pod, gpus: i64) {
    pod.spec.containers[0]
        .resources
        .requests
        .insert(RESOURCE_NVIDIA_GPU.to_string(), gpus);
}

/// Gpu config as a provider labelling accelerator nodes with `TEST_GPU_LABEL` reports it.
pub fn test_gpu_config_for_node(node: &Node) -> Option<GpuConfig> {
    gpu_config_for_node(TEST_GPU_LABEL, RESOURCE_NVIDIA_GPU, node)
}
