//! Node state counts per partition via `sinfo`.

use crate::types::{NodesPerPartition, StateCategory};
use slurmex_parsers::{CommandError, CommandSpec, OutputProvider, parse_lenient, split_record};

/// sinfo output format:
/// %D - Number of nodes
/// %T - State (extended)
/// %P - Partition (default partition carries a trailing `*`)
pub const NODES_PER_PARTITION_CMD: CommandSpec = CommandSpec::new("sinfo", &["-h", "-o %D,%T,%P"]);

/// Marker `sinfo` appends to the default partition's name.
const DEFAULT_PARTITION_MARKER: char = '*';

/// Aggregate `%D,%T,%P` lines into node counts per partition.
///
/// sinfo can list the same (count, state, partition) combination more than
/// once, so identical raw lines are collapsed before anything is counted.
pub fn parse_nodes_per_partition(text: &str) -> NodesPerPartition {
    let mut lines: Vec<&str> = text.lines().collect();
    lines.sort_unstable();
    lines.dedup();

    let mut partitions = NodesPerPartition::new();

    for line in lines {
        let Some(fields) = split_record(line) else {
            continue;
        };

        let count = parse_lenient(fields[0]);
        let state = fields.get(1).copied().unwrap_or_default();
        let partition = fields.get(2).copied().unwrap_or_default();
        let partition = partition
            .strip_suffix(DEFAULT_PARTITION_MARKER)
            .unwrap_or(partition);

        let counts = partitions.entry(partition.to_string()).or_default();
        match StateCategory::classify(state) {
            Some(category) => counts.add(category, count),
            None => tracing::debug!(state, partition, "unclassified node state"),
        }
    }

    partitions
}

/// Query node counts per partition with sinfo.
pub async fn query_nodes_per_partition(
    provider: &dyn OutputProvider,
) -> Result<NodesPerPartition, CommandError> {
    let output = provider.output(&NODES_PER_PARTITION_CMD).await?;
    Ok(parse_nodes_per_partition(&output))
}
