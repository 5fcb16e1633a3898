//! Config fields definitions for utilization calculation

use serde::Deserialize;

use crate::report::printer::ReportPrinterConfig;
use crate::utilization::accelerator::GpuConfig;

#[derive(Debug, Deserialize, PartialEq)]
pub struct UtilizationConfig {
    /// Leave daemonset pods out of the requested sum.
    #[serde(default = "skip_daemon_set_pods_default")]
    pub skip_daemon_set_pods: bool,
    /// Leave static (mirror) pods out of the requested sum.
    #[serde(default = "skip_mirror_pods_default")]
    pub skip_mirror_pods: bool,
    /// If not set accelerators are not tracked.
    pub gpu: Option<GpuConfig>,
    /// If not set report is printed to stdout as a table.
    pub report: Option<ReportPrinterConfig>,
}

impl Default for UtilizationConfig {
    fn default() -> Self {
        Self {
            skip_daemon_set_pods: skip_daemon_set_pods_default(),
            skip_mirror_pods: skip_mirror_pods_default(),
            gpu: None,
            report: None,
        }
    }
}

fn skip_daemon_set_pods_default() -> bool {
    true
}

fn skip_mirror_pods_default() -> bool {
    true
}
