//! Read-only views of cluster state handed to the utilization calculator.

use serde::{Deserialize, Serialize};

use crate::core::node::Node;
use crate::core::pod::Pod;

/// A node together with the pods bound to it, in binding order.
#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Clone)]
pub struct NodeSnapshot {
    pub node: Node,
    #[serde(default)]
    pub pods: Vec<Pod>,
}

impl NodeSnapshot {
    pub fn new(node: Node, pods: Vec<Pod>) -> Self {
        Self { node, pods }
    }

    pub fn node_name(&self) -> &str {
        &self.node.metadata.name
    }
}

/// State of the whole cluster captured at `timestamp` (seconds).
#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Clone)]
pub struct ClusterSnapshot {
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub nodes: Vec<NodeSnapshot>,
}
