use std::fs::File;
use std::io::Write;

use anyhow::Context;
use prettytable::{row, Table};
use serde::{Deserialize, Serialize};

use crate::report::collector::{EstimatorWrapper, UtilizationReport};
use crate::utilization::UtilizationInfo;

#[derive(Debug, Default, Deserialize, PartialEq)]
pub enum OutputFormat {
    #[default]
    PrettyTable,
    JSON,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct ReportPrinterConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Stdout if not set.
    pub output_file: Option<std::path::PathBuf>,
}

pub fn print_report(
    report: &UtilizationReport,
    config: &ReportPrinterConfig,
) -> anyhow::Result<()> {
    let mut output: Box<dyn Write> = match &config.output_file {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("could not create {:?}", path))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    match config.format {
        OutputFormat::PrettyTable => print_report_as_pretty_table(report, &mut output),
        OutputFormat::JSON => print_report_as_json(report, &mut output),
    }
}

pub fn print_report_as_pretty_table(
    report: &UtilizationReport,
    output: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut nodes_table = Table::new();
    nodes_table.add_row(row!["Node", "Utilization", "Resource", "Cpu", "Memory", "Gpu"]);
    for (node_name, info) in report.ranked() {
        nodes_table.add_row(row![
            node_name,
            info.utilization,
            info.resource_name,
            info.cpu_util,
            info.mem_util,
            info.gpu_util
        ]);
    }
    for node in report.nodes.iter() {
        if let Err(err) = &node.result {
            nodes_table.add_row(row![node.node_name, "-", err, "-", "-", "-"]);
        }
    }

    let mut stats_table = Table::new();
    stats_table.add_row(row!["Metric", "Min", "Max", "Mean", "Variance"]);
    if report.utilization_stats.count() > 0 {
        for (name, stats) in [
            ("Utilization", &report.utilization_stats),
            ("Cpu utilization", &report.cpu_util_stats),
            ("Memory utilization", &report.mem_util_stats),
        ] {
            stats_table.add_row(row![
                name,
                stats.min(),
                stats.max(),
                stats.mean(),
                stats.population_variance()
            ]);
        }
    }

    output.write_all(nodes_table.to_string().as_bytes())?;
    output.write_all(stats_table.to_string().as_bytes())?;
    writeln!(output, "Unscoreable nodes: {}", report.unscoreable_nodes)?;
    Ok(())
}

#[derive(Serialize)]
struct ReportJSON<'a> {
    timestamp: f64,
    nodes: Vec<NodeJSON<'a>>,
    unscoreable_nodes: u64,
    stats: Option<Stats>,
}

#[derive(Serialize)]
struct NodeJSON<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    utilization: Option<&'a UtilizationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct Stats {
    utilization: StatsEntry,
    cpu_util: StatsEntry,
    mem_util: StatsEntry,
}

#[derive(Serialize)]
struct StatsEntry {
    min: f64,
    max: f64,
    mean: f64,
    variance: f64,
}

impl From<&EstimatorWrapper> for StatsEntry {
    fn from(stats: &EstimatorWrapper) -> Self {
        Self {
            min: stats.min(),
            max: stats.max(),
            mean: stats.mean(),
            variance: stats.population_variance(),
        }
    }
}

pub fn print_report_as_json(
    report: &UtilizationReport,
    output: &mut dyn Write,
) -> anyhow::Result<()> {
    let nodes = report
        .nodes
        .iter()
        .map(|node| NodeJSON {
            name: &node.node_name,
            utilization: node.result.as_ref().ok(),
            error: node.result.as_ref().err().map(String::as_str),
        })
        .collect();

    let stats = (report.utilization_stats.count() > 0).then(|| Stats {
        utilization: (&report.utilization_stats).into(),
        cpu_util: (&report.cpu_util_stats).into(),
        mem_util: (&report.mem_util_stats).into(),
    });

    let report_json = ReportJSON {
        timestamp: report.timestamp,
        nodes,
        unscoreable_nodes: report.unscoreable_nodes,
        stats,
    };

    let serialized_json = serde_json::to_string_pretty(&report_json)?;
    output.write_all(serialized_json.as_bytes())?;
    Ok(())
}
