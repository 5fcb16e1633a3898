//! Type definition for Pod primitive in k8s cluster

use serde::{Deserialize, Serialize};

use crate::core::common::{ObjectMeta, ResourceList, RESOURCE_CPU, RESOURCE_MEMORY};

#[derive(Default, Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ResourceRequirements {
    #[serde(default)]
    pub requests: ResourceList,
    #[serde(default)]
    pub limits: ResourceList,
}

/// Only meaningful for init containers. `Always` turns an init container into a sidecar which
/// keeps running next to the main containers.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum ContainerRestartPolicy {
    Always,
}

#[derive(Default, Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Container {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub resources: ResourceRequirements,
    #[serde(default)]
    pub restart_policy: Option<ContainerRestartPolicy>,
}

impl Container {
    /// Container requesting `cpu` millicores and `ram` bytes. Negative value leaves the
    /// resource out of requests.
    pub fn new(name: String, cpu: i64, ram: i64) -> Self {
        let mut requests = ResourceList::new();
        if cpu >= 0 {
            requests.insert(RESOURCE_CPU.to_string(), cpu);
        }
        if ram >= 0 {
            requests.insert(RESOURCE_MEMORY.to_string(), ram);
        }
        Self {
            name,
            resources: ResourceRequirements {
                requests,
                limits: Default::default(),
            },
            restart_policy: None,
        }
    }

    pub fn request(&self, resource_name: &str) -> i64 {
        self.resources
            .requests
            .get(resource_name)
            .copied()
            .unwrap_or(0)
            .max(0)
    }

    pub fn is_restartable(&self) -> bool {
        self.restart_policy == Some(ContainerRestartPolicy::Always)
    }
}

#[derive(Default, Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PodSpec {
    #[serde(default)]
    pub init_containers: Vec<Container>,
    #[serde(default)]
    pub containers: Vec<Container>,
    /// Resources consumed by the pod sandbox on top of its containers.
    #[serde(default)]
    pub overhead: Option<ResourceList>,
}

#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Clone)]
pub struct Pod {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: PodSpec,
}

impl Pod {
    /// Pod with a single main container, see `Container::new` for the meaning of negative values.
    pub fn new(name: String, cpu: i64, ram: i64) -> Self {
        Self {
            metadata: ObjectMeta {
                name: name.clone(),
                ..Default::default()
            },
            spec: PodSpec {
                containers: vec![Container::new(name, cpu, ram)],
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::core::common::RESOURCE_CPU;
    use crate::core::pod::PodSpec;

    #[test]
    fn test_pod_spec_from_yaml() {
        let spec: PodSpec = serde_yaml::from_str(
            &r#"
        containers:
        - name: app
          resources:
            requests:
              cpu: 100
        overhead:
          cpu: 10
        termination_grace_period_seconds: 30
        "#,
        )
        .unwrap();

        assert_eq!(1, spec.containers.len());
        assert_eq!(100, spec.containers[0].request(RESOURCE_CPU));
        assert_eq!(
            Some(BTreeMap::from([(RESOURCE_CPU.to_string(), 10)])),
            spec.overhead
        );

        let serialized = serde_yaml::to_string(&spec).unwrap();
        assert!(!serialized.contains("termination_grace_period_seconds"));
    }
}
