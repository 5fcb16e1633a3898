use std::env;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use kubernetriks_utilization::config::UtilizationConfig;
use kubernetriks_utilization::core::snapshot::ClusterSnapshot;
use kubernetriks_utilization::report::collector::UtilizationReport;
use kubernetriks_utilization::report::printer::{print_report, ReportPrinterConfig};
use kubernetriks_utilization::utilization::UtilizationCalculator;

#[derive(Parser)]
struct Args {
    #[clap(short, long)]
    config_file: Option<std::path::PathBuf>,
    #[clap(short, long)]
    snapshot_file: std::path::PathBuf,
}

fn main() -> anyhow::Result<()> {
    // log level INFO by default
    let mut env_logger_builder = env_logger::builder();
    if env::var("RUST_LOG").is_err() {
        env_logger_builder.filter_level(log::LevelFilter::Info);
    }
    env_logger_builder.init();

    let args = Args::parse();

    let config = match &args.config_file {
        Some(path) => {
            info!("Path to config file: {:?}", path);
            let config_yaml = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config file {:?}", path))?;
            serde_yaml::from_str::<UtilizationConfig>(&config_yaml)
                .with_context(|| format!("could not parse config file {:?}", path))?
        }
        None => UtilizationConfig::default(),
    };

    info!("Path to snapshot file: {:?}", args.snapshot_file);
    let snapshot_yaml = std::fs::read_to_string(&args.snapshot_file)
        .with_context(|| format!("could not read snapshot file {:?}", args.snapshot_file))?;
    let snapshot = serde_yaml::from_str::<ClusterSnapshot>(&snapshot_yaml)
        .with_context(|| format!("could not parse snapshot file {:?}", args.snapshot_file))?;
    info!(
        "Loaded {} nodes captured at {}",
        snapshot.nodes.len(),
        snapshot.timestamp
    );

    let calculator = UtilizationCalculator::new(config);
    let results = calculator.calculate_cluster(&snapshot);
    for (node_name, result) in results.iter() {
        if let Err(err) = result {
            warn!("Skipping node {:?}: {}", node_name, err);
        }
    }

    let report = UtilizationReport::new(snapshot.timestamp, results);
    let default_printer_config = ReportPrinterConfig::default();
    print_report(
        &report,
        calculator
            .config()
            .report
            .as_ref()
            .unwrap_or(&default_printer_config),
    )
}
