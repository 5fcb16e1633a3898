//! Collects per node utilization results of one cluster snapshot into a report.

use std::collections::BTreeMap;

use average::{concatenate, Estimate, Max, Mean, Min, Variance};

use crate::utilization::error::UtilizationResult;
use crate::utilization::UtilizationInfo;

concatenate!(
    Estimator,
    [Min, min],
    [Max, max],
    [Mean, mean],
    [Variance, population_variance]
);

#[derive(Default)]
pub struct EstimatorWrapper {
    estimator: Estimator,
    count: u64,
}

impl EstimatorWrapper {
    pub fn new() -> Self {
        Self {
            estimator: Estimator::new(),
            count: 0,
        }
    }

    pub fn add(&mut self, value: f64) {
        self.estimator.add(value);
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn min(&self) -> f64 {
        self.estimator.min()
    }

    pub fn max(&self) -> f64 {
        self.estimator.max()
    }

    pub fn mean(&self) -> f64 {
        self.estimator.mean()
    }

    pub fn population_variance(&self) -> f64 {
        self.estimator.population_variance()
    }
}

pub struct NodeReport {
    pub node_name: String,
    /// Error message for nodes which could not be scored.
    pub result: Result<UtilizationInfo, String>,
}

#[derive(Default)]
pub struct UtilizationReport {
    pub timestamp: f64,
    pub nodes: Vec<NodeReport>,
    /// Number of nodes with invalid capacity.
    pub unscoreable_nodes: u64,

    pub utilization_stats: EstimatorWrapper,
    pub cpu_util_stats: EstimatorWrapper,
    pub mem_util_stats: EstimatorWrapper,
}

impl UtilizationReport {
    pub fn new(
        timestamp: f64,
        results: BTreeMap<String, UtilizationResult<UtilizationInfo>>,
    ) -> Self {
        let mut report = Self {
            timestamp,
            ..Default::default()
        };

        for (node_name, result) in results.into_iter() {
            match result {
                Ok(info) => {
                    report.utilization_stats.add(info.utilization);
                    report.cpu_util_stats.add(info.cpu_util);
                    report.mem_util_stats.add(info.mem_util);
                    report.nodes.push(NodeReport {
                        node_name,
                        result: Ok(info),
                    });
                }
                Err(err) => {
                    report.unscoreable_nodes += 1;
                    report.nodes.push(NodeReport {
                        node_name,
                        result: Err(err.to_string()),
                    });
                }
            }
        }

        report
    }

    /// Scored nodes from the least utilized one, ties broken by lower cpu utilization.
    pub fn ranked(&self) -> Vec<(&str, &UtilizationInfo)> {
        let mut ranked: Vec<(&str, &UtilizationInfo)> = self
            .nodes
            .iter()
            .filter_map(|node| {
                node.result
                    .as_ref()
                    .ok()
                    .map(|info| (node.node_name.as_str(), info))
            })
            .collect();
        ranked.sort_by(|(_, lhs), (_, rhs)| {
            lhs.utilization
                .total_cmp(&rhs.utilization)
                .then(lhs.cpu_util.total_cmp(&rhs.cpu_util))
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::report::collector::UtilizationReport;
    use crate::utilization::error::UtilizationError;
    use crate::utilization::UtilizationInfo;

    fn info(utilization: f64, cpu_util: f64) -> UtilizationInfo {
        UtilizationInfo {
            cpu_util,
            utilization,
            ..Default::default()
        }
    }

    #[test]
    fn test_report_ranks_and_counts() {
        let results = BTreeMap::from([
            ("a".to_string(), Ok(info(0.5, 0.5))),
            ("b".to_string(), Ok(info(0.2, 0.1))),
            ("c".to_string(), Ok(info(0.2, 0.05))),
            (
                "d".to_string(),
                Err(UtilizationError::InvalidCapacity {
                    node: "d".to_string(),
                    resource: "memory".to_string(),
                    reason: "allocatable is negative (-1)".to_string(),
                }),
            ),
        ]);

        let report = UtilizationReport::new(10.0, results);

        assert_eq!(1, report.unscoreable_nodes);
        assert_eq!(3, report.utilization_stats.count());
        assert_eq!(0.5, report.utilization_stats.max());
        assert_eq!(0.2, report.utilization_stats.min());

        let ranked: Vec<&str> = report.ranked().into_iter().map(|(name, _)| name).collect();
        assert_eq!(vec!["c", "b", "a"], ranked);
    }
}
