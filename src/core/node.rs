//! Type definitions for node metadata and state as seen by the utilization calculator

use serde::{Deserialize, Serialize};

use crate::core::common::{ObjectMeta, ResourceList, RESOURCE_CPU, RESOURCE_MEMORY};

#[derive(Default, Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NodeStatus {
    // Part of capacity the scheduler may hand out to pods.
    #[serde(default)]
    pub allocatable: ResourceList,
    // Total amount of resources
    #[serde(default)]
    pub capacity: ResourceList,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Node {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub status: NodeStatus,
}

impl Node {
    /// Node with `cpu` millicores and `ram` bytes both as capacity and allocatable.
    /// Negative values are kept as is to model broken node objects.
    pub fn new(name: String, cpu: i64, ram: i64) -> Self {
        let resources = ResourceList::from([
            (RESOURCE_CPU.to_string(), cpu),
            (RESOURCE_MEMORY.to_string(), ram),
        ]);
        Self {
            metadata: ObjectMeta {
                name,
                ..Default::default()
            },
            status: NodeStatus {
                allocatable: resources.clone(),
                capacity: resources,
            },
        }
    }

    pub fn allocatable(&self, resource_name: &str) -> Option<i64> {
        self.status.allocatable.get(resource_name).copied()
    }
}
