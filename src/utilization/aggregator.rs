//! Per resource utilization: sum of effective requests divided by allocatable.

use log::debug;

use crate::core::common::{RESOURCE_CPU, RESOURCE_MEMORY};
use crate::core::node::Node;
use crate::core::pod::Pod;
use crate::utilization::classifier::{classify, PodClass};
use crate::utilization::error::{UtilizationError, UtilizationResult};
use crate::utilization::requests::effective_request;

/// Resource kinds tracked for a single calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    Cpu,
    Memory,
    /// Accelerator resource name taken from the provider gpu config.
    Accelerator(String),
}

impl ResourceKind {
    pub fn resource_name(&self) -> &str {
        match self {
            ResourceKind::Cpu => RESOURCE_CPU,
            ResourceKind::Memory => RESOURCE_MEMORY,
            ResourceKind::Accelerator(name) => name,
        }
    }
}

/// Pods of a node paired with their classification, computed once per calculation.
pub struct ClassifiedPods<'a> {
    pods: Vec<(&'a Pod, PodClass)>,
}

impl<'a> ClassifiedPods<'a> {
    pub fn new(
        pods: &'a [Pod],
        skip_daemon_set_pods: bool,
        skip_mirror_pods: bool,
        now: f64,
    ) -> Self {
        Self {
            pods: pods
                .iter()
                .map(|pod| (pod, classify(pod, skip_daemon_set_pods, skip_mirror_pods, now)))
                .collect(),
        }
    }

    pub fn included(&self) -> impl Iterator<Item = &'a Pod> + '_ {
        self.pods
            .iter()
            .filter(|(_, class)| class.is_included())
            .map(|(pod, _)| *pod)
    }

    /// Pods excluded from the sum whose requests are nevertheless reserved on the node.
    pub fn holding_capacity(&self) -> impl Iterator<Item = &'a Pod> + '_ {
        self.pods
            .iter()
            .filter(|(_, class)| class.holds_capacity())
            .map(|(pod, _)| *pod)
    }
}

fn invalid_capacity(node: &Node, resource_name: &str, reason: String) -> UtilizationError {
    UtilizationError::InvalidCapacity {
        node: node.metadata.name.clone(),
        resource: resource_name.to_string(),
        reason,
    }
}

/// Validated allocatable quantity of `resource_name`. Checked before any pod is looked at, so a
/// broken node is reported even when nothing requests the resource.
pub fn validated_allocatable(node: &Node, resource_name: &str) -> UtilizationResult<i64> {
    match node.allocatable(resource_name) {
        None => Err(invalid_capacity(
            node,
            resource_name,
            "allocatable is not set".to_string(),
        )),
        Some(allocatable) if allocatable < 0 => Err(invalid_capacity(
            node,
            resource_name,
            format!("allocatable is negative ({})", allocatable),
        )),
        Some(allocatable) => Ok(allocatable),
    }
}

/// Fraction of the node's `resource_name` requested by included pods.
///
/// Requests of skipped daemonset and mirror pods are taken out of allocatable, as these pods
/// stay on the node whatever happens to the rest. Zero demand is 0 utilization even for
/// zero capacity.
pub fn resource_utilization(
    node: &Node,
    pods: &ClassifiedPods,
    resource_name: &str,
) -> UtilizationResult<f64> {
    let allocatable = validated_allocatable(node, resource_name)?;

    let requested = pods
        .included()
        .map(|pod| effective_request(pod, resource_name))
        .fold(0i64, i64::saturating_add);
    let held = pods
        .holding_capacity()
        .map(|pod| effective_request(pod, resource_name))
        .fold(0i64, i64::saturating_add);

    if requested == 0 {
        return Ok(0.0);
    }

    // Both operands are non-negative, so this cannot overflow.
    let available = allocatable - held;
    if available <= 0 {
        return Err(invalid_capacity(
            node,
            resource_name,
            format!(
                "allocatable {} is taken by skipped daemonset or mirror pods ({}), {} requested",
                allocatable, held, requested
            ),
        ));
    }

    let utilization = requested as f64 / available as f64;
    debug!(
        "Node {:?} {}: requested {} of {} available, utilization {}",
        node.metadata.name, resource_name, requested, available, utilization
    );
    Ok(utilization)
}

/// Utilization of a single resource computed straight from a node and its pods.
pub fn calculate_utilization_of_resource(
    node: &Node,
    pods: &[Pod],
    resource_name: &str,
    skip_daemon_set_pods: bool,
    skip_mirror_pods: bool,
    now: f64,
) -> UtilizationResult<f64> {
    let classified = ClassifiedPods::new(pods, skip_daemon_set_pods, skip_mirror_pods, now);
    resource_utilization(node, &classified, resource_name)
}
