use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use kubernetriks_utilization::core::common::{RESOURCE_CPU, RESOURCE_MEMORY};
use kubernetriks_utilization::core::pod::Pod;
use kubernetriks_utilization::core::snapshot::NodeSnapshot;
use kubernetriks_utilization::test_util::helpers::{
    build_test_node, build_test_pod, init_container, owner_references, set_mirror_annotation,
    sidecar_container,
};
use kubernetriks_utilization::utilization::calculate;
use kubernetriks_utilization::utilization::requests::effective_request;

const NOW: f64 = 1000.0;

fn random_pod(rng: &mut StdRng, idx: usize) -> Pod {
    let mut pod = build_test_pod(
        &format!("pod_{}", idx),
        rng.gen_range(0..500),
        rng.gen_range(0..1000000),
    );
    for _ in 0..rng.gen_range(0..4) {
        let cpu = rng.gen_range(0..2000);
        let ram = rng.gen_range(0..4000000);
        if rng.gen_bool(0.5) {
            pod.spec.init_containers.push(sidecar_container(cpu, ram));
        } else {
            pod.spec.init_containers.push(init_container(cpu, ram));
        }
    }
    match rng.gen_range(0..6) {
        0 => pod.metadata.owner_references = owner_references("ds", "DaemonSet", "apps/v1"),
        1 => set_mirror_annotation(&mut pod),
        2 => pod.metadata.deletion_timestamp = Some(NOW - rng.gen_range(0.0..100.0)),
        _ => {}
    }
    pod
}

fn random_pods(rng: &mut StdRng, count: usize) -> Vec<Pod> {
    (0..count).map(|idx| random_pod(rng, idx)).collect()
}

// Large enough to never run out because of skipped pods.
fn large_node() -> kubernetriks_utilization::core::node::Node {
    build_test_node("node", 100_000_000, 1_000_000_000_000)
}

#[test]
fn test_determinism_and_pod_order_independence() {
    let mut rng = StdRng::seed_from_u64(123);
    for _ in 0..50 {
        let mut pods = random_pods(&mut rng, 20);
        let flags = (rng.gen_bool(0.5), rng.gen_bool(0.5));

        let snapshot = NodeSnapshot::new(large_node(), pods.clone());
        let first = calculate(&snapshot, flags.0, flags.1, None, NOW).unwrap();
        let second = calculate(&snapshot, flags.0, flags.1, None, NOW).unwrap();
        assert_eq!(first, second);

        pods.shuffle(&mut rng);
        let shuffled = calculate(
            &NodeSnapshot::new(large_node(), pods),
            flags.0,
            flags.1,
            None,
            NOW,
        )
        .unwrap();
        assert_eq!(first, shuffled);
    }
}

#[test]
fn test_adding_pods_never_decreases_utilization() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let flags = (rng.gen_bool(0.5), rng.gen_bool(0.5));
        let mut pods: Vec<Pod> = vec![];
        let mut previous = calculate(
            &NodeSnapshot::new(large_node(), pods.clone()),
            flags.0,
            flags.1,
            None,
            NOW,
        )
        .unwrap();

        for idx in 0..20 {
            pods.push(random_pod(&mut rng, idx));
            let current = calculate(
                &NodeSnapshot::new(large_node(), pods.clone()),
                flags.0,
                flags.1,
                None,
                NOW,
            )
            .unwrap();
            assert!(current.cpu_util >= previous.cpu_util);
            assert!(current.mem_util >= previous.mem_util);
            assert!(current.utilization >= previous.utilization);
            assert!(current.utilization >= 0.0);
            previous = current;
        }
    }
}

#[test]
fn test_terminated_pods_never_count() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let pods = random_pods(&mut rng, 10);
        let alive: Vec<Pod> = pods
            .iter()
            .filter(|pod| pod.metadata.deletion_timestamp.is_none())
            .cloned()
            .collect();

        for (skip_ds, skip_mirror) in [(false, false), (true, false), (false, true), (true, true)] {
            let with_terminated = calculate(
                &NodeSnapshot::new(large_node(), pods.clone()),
                skip_ds,
                skip_mirror,
                None,
                NOW,
            )
            .unwrap();
            let without_terminated = calculate(
                &NodeSnapshot::new(large_node(), alive.clone()),
                skip_ds,
                skip_mirror,
                None,
                NOW,
            )
            .unwrap();
            assert_eq!(without_terminated, with_terminated);
        }
    }
}

#[test]
fn test_effective_request_covers_main_containers() {
    let mut rng = StdRng::seed_from_u64(1);
    for idx in 0..200 {
        let pod = random_pod(&mut rng, idx);
        for resource_name in [RESOURCE_CPU, RESOURCE_MEMORY] {
            let main_total: i64 = pod
                .spec
                .containers
                .iter()
                .map(|container| container.request(resource_name))
                .sum();
            assert!(effective_request(&pod, resource_name) >= main_total);
        }
    }
}

#[test]
fn test_large_init_container_defines_request() {
    let mut pod = build_test_pod("p", 100, 200000);
    pod.spec
        .containers
        .push(build_test_pod("q", 50, 1000).spec.containers[0].clone());
    pod.spec.init_containers = vec![init_container(10000, 50000000)];

    assert_eq!(10000, effective_request(&pod, RESOURCE_CPU));
    assert_eq!(50000000, effective_request(&pod, RESOURCE_MEMORY));
}
