//! Effective pod requests with sidecar (restartable init container) semantics.
//!
//! Init containers run one by one before main containers. Restartable ones keep running for
//! the rest of the pod lifetime, so every later container runs next to all of them. The node
//! must fit the highest footprint at any moment:
//!
//! ```text
//! effective = max(
//!     sidecars + sum(main containers),
//!     max over init containers of the footprint while it runs,
//! )
//! ```

use std::collections::BTreeSet;

use crate::core::common::ResourceList;
use crate::core::pod::Pod;

/// Effective request of `pod` for `resource_name`. Never less than the sum of its main
/// containers' requests.
pub fn effective_request(pod: &Pod, resource_name: &str) -> i64 {
    let init_containers = pod.spec.init_containers.iter();
    let (running_sidecars, peak) =
        init_containers.fold((0i64, 0i64), |(running_sidecars, peak), container| {
            let request = container.request(resource_name);
            if container.is_restartable() {
                let running_sidecars = running_sidecars.saturating_add(request);
                (running_sidecars, peak.max(running_sidecars))
            } else {
                // Regular init container exits before the next one starts.
                (running_sidecars, peak.max(running_sidecars.saturating_add(request)))
            }
        });

    let main_total = pod
        .spec
        .containers
        .iter()
        .map(|container| container.request(resource_name))
        .fold(running_sidecars, i64::saturating_add);

    main_total
        .max(peak)
        .saturating_add(overhead(pod, resource_name))
}

/// Effective requests for every resource mentioned by any container of the pod or its overhead.
pub fn effective_requests(pod: &Pod) -> ResourceList {
    let mut resource_names: BTreeSet<&str> = Default::default();
    for container in pod.spec.init_containers.iter().chain(pod.spec.containers.iter()) {
        resource_names.extend(container.resources.requests.keys().map(String::as_str));
    }
    if let Some(overhead) = &pod.spec.overhead {
        resource_names.extend(overhead.keys().map(String::as_str));
    }

    resource_names
        .into_iter()
        .map(|name| (name.to_string(), effective_request(pod, name)))
        .collect()
}

fn overhead(pod: &Pod, resource_name: &str) -> i64 {
    pod.spec
        .overhead
        .as_ref()
        .and_then(|overhead| overhead.get(resource_name))
        .copied()
        .unwrap_or(0)
        .max(0)
}
