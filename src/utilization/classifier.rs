//! Decides whether a pod's requests count towards node utilization.

use log::trace;

use crate::core::pod::Pod;

/// Annotation set by users on pods which are managed like daemonset pods by custom controllers.
pub const DAEMON_SET_POD_ANNOTATION_KEY: &'static str =
    "cluster-autoscaler.kubernetes.io/daemonset-pod";
/// Annotation kubelet puts on mirror pods of static manifests.
pub const CONFIG_MIRROR_ANNOTATION_KEY: &'static str = "kubernetes.io/config.mirror";

const DAEMON_SET_KIND: &'static str = "DaemonSet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodClass {
    Included,
    /// Pod has deletion timestamp set.
    Terminated,
    /// Daemonset pod skipped due to `skip_daemon_set_pods`.
    DaemonSet,
    /// Mirror pod skipped due to `skip_mirror_pods`.
    Mirror,
}

impl PodClass {
    pub fn is_included(&self) -> bool {
        *self == PodClass::Included
    }

    /// Skipped daemonset and mirror pods still occupy node capacity which is not available
    /// to any other pod.
    pub fn holds_capacity(&self) -> bool {
        matches!(self, PodClass::DaemonSet | PodClass::Mirror)
    }
}

/// Owner reference of kind DaemonSet or the daemonset annotation set to "true" are each enough.
pub fn is_daemon_set_pod(pod: &Pod) -> bool {
    if pod
        .metadata
        .owner_references
        .iter()
        .any(|owner| owner.kind == DAEMON_SET_KIND)
    {
        return true;
    }
    pod.metadata
        .annotations
        .get(DAEMON_SET_POD_ANNOTATION_KEY)
        .is_some_and(|value| value == "true")
}

pub fn is_mirror_pod(pod: &Pod) -> bool {
    pod.metadata
        .annotations
        .contains_key(CONFIG_MIRROR_ANNOTATION_KEY)
}

/// Rules are checked in order and the first match wins. Terminated pods are excluded no
/// matter which flags are set.
pub fn classify(
    pod: &Pod,
    skip_daemon_set_pods: bool,
    skip_mirror_pods: bool,
    now: f64,
) -> PodClass {
    if let Some(deletion_timestamp) = pod.metadata.deletion_timestamp {
        trace!(
            "Pod {:?} is terminating for {:.1}s, excluding it",
            pod.metadata.name,
            now - deletion_timestamp
        );
        return PodClass::Terminated;
    }
    if skip_daemon_set_pods && is_daemon_set_pod(pod) {
        return PodClass::DaemonSet;
    }
    if skip_mirror_pods && is_mirror_pod(pod) {
        return PodClass::Mirror;
    }
    PodClass::Included
}
