//! Collectors for the SLURM metric families.

pub mod nodes;
pub mod partitions;

pub use nodes::NodesPerPartitionCollector;
pub use partitions::PartitionsCollector;

/// Label naming the partition.
pub const PARTITION_LABEL: &str = "partition";

/// Label naming the required feature of pending jobs.
pub const FEATURES_LABEL: &str = "features";
