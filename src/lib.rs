pub mod config;
pub mod core;
pub mod report;
pub mod test_util;
pub mod utilization;
