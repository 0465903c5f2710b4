//! SLURM integration for slurmex.
//!
//! Turn `sinfo` and `squeue` output into per-partition node-state counts
//! and CPU/pending-job figures. Every function here is a pure function of
//! the raw text; nothing is cached between calls.

pub mod nodes;
pub mod partitions;
pub mod types;

pub use nodes::{NODES_PER_PARTITION_CMD, parse_nodes_per_partition, query_nodes_per_partition};
pub use partitions::{PARTITION_CPUS_CMD, PENDING_JOBS_CMD, parse_partitions, query_partitions};
pub use types::{NodeCounts, NodesPerPartition, PartitionResources, Partitions, StateCategory};
