//! Types shared by pod and node definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cpu in millicores.
pub const RESOURCE_CPU: &'static str = "cpu";
/// Memory in bytes.
pub const RESOURCE_MEMORY: &'static str = "memory";
/// Nvidia accelerators in whole units.
pub const RESOURCE_NVIDIA_GPU: &'static str = "nvidia.com/gpu";

/// Map of resource names to quantities. Quantities are signed so that malformed objects
/// (negative allocatable) can be represented and rejected instead of silently wrapping.
pub type ResourceList = BTreeMap<String, i64>;

#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Clone)]
pub struct OwnerReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Clone)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub owner_references: Vec<OwnerReference>,
    #[serde(default)]
    pub creation_timestamp: f64,
    /// Set once deletion of the object was requested, in seconds.
    #[serde(default)]
    pub deletion_timestamp: Option<f64>,
}
