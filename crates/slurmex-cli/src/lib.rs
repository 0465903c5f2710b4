//! CLI argument parsing for slurmex.

use clap::Parser;
use slurmex_metrics::{Collector, NodesPerPartitionCollector, PartitionsCollector};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "slurmex")]
#[command(about = "Export SLURM partition node and CPU state as Prometheus gauges")]
pub struct Args {
    /// Address to serve /metrics on
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub listen_address: SocketAddr,

    /// Disable the node-state-per-partition gauges
    #[arg(long)]
    pub no_nodes_per_partition: bool,

    /// Disable the partition CPU and pending-job gauges
    #[arg(long)]
    pub no_partitions: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Collectors enabled by the flags, in exposition order.
    pub fn collectors(&self) -> Vec<Box<dyn Collector>> {
        let mut collectors: Vec<Box<dyn Collector>> = Vec::new();
        if !self.no_nodes_per_partition {
            collectors.push(Box::new(NodesPerPartitionCollector));
        }
        if !self.no_partitions {
            collectors.push(Box::new(PartitionsCollector));
        }
        collectors
    }
}
