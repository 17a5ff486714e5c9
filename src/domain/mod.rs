pub mod chart;
pub mod workload;
