//! Node state counts per partition.
//!
//! Every known partition reports all ten families, zeros included.

use super::PARTITION_LABEL;
use crate::collector::{CollectError, Collector};
use crate::descriptor::{MetricDesc, Observation};
use async_trait::async_trait;
use slurmex_parsers::OutputProvider;
use slurmex_slurm::{NodesPerPartition, StateCategory, query_nodes_per_partition};

const LABELS: &[&str] = &[PARTITION_LABEL];

const fn gauge(name: &'static str, help: &'static str) -> MetricDesc {
    MetricDesc {
        name,
        help,
        labels: LABELS,
    }
}

const DESCRIPTORS: &[MetricDesc] = &[
    gauge("slurm_nodes_alloc_per_partition", "Allocated nodes per partition"),
    gauge("slurm_nodes_comp_per_partition", "Completing nodes per partition"),
    gauge("slurm_nodes_down_per_partition", "Down nodes per partition"),
    gauge("slurm_nodes_drain_per_partition", "Drain nodes per partition"),
    gauge("slurm_nodes_err_per_partition", "Error nodes per partition"),
    gauge("slurm_nodes_fail_per_partition", "Fail nodes per partition"),
    gauge("slurm_nodes_idle_per_partition", "Idle nodes per partition"),
    gauge("slurm_nodes_maint_per_partition", "Maint nodes per partition"),
    gauge("slurm_nodes_mix_per_partition", "Mix nodes per partition"),
    gauge("slurm_nodes_resv_per_partition", "Reserved nodes per partition"),
];

fn metric_name(category: StateCategory) -> &'static str {
    match category {
        StateCategory::Allocated => "slurm_nodes_alloc_per_partition",
        StateCategory::Completing => "slurm_nodes_comp_per_partition",
        StateCategory::Down => "slurm_nodes_down_per_partition",
        StateCategory::Draining => "slurm_nodes_drain_per_partition",
        StateCategory::Error => "slurm_nodes_err_per_partition",
        StateCategory::Failing => "slurm_nodes_fail_per_partition",
        StateCategory::Idle => "slurm_nodes_idle_per_partition",
        StateCategory::Maintenance => "slurm_nodes_maint_per_partition",
        StateCategory::Mixed => "slurm_nodes_mix_per_partition",
        StateCategory::Reserved => "slurm_nodes_resv_per_partition",
    }
}

/// One observation per (partition, state category).
pub fn node_observations(partitions: &NodesPerPartition) -> Vec<Observation> {
    partitions
        .iter()
        .flat_map(|(partition, counts)| {
            counts.iter().map(move |(category, count)| {
                Observation::new(metric_name(category), vec![partition.clone()], count)
            })
        })
        .collect()
}

/// Reports `sinfo` node states per partition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodesPerPartitionCollector;

#[async_trait]
impl Collector for NodesPerPartitionCollector {
    fn name(&self) -> &'static str {
        "nodes_per_partition"
    }

    fn descriptors(&self) -> &'static [MetricDesc] {
        DESCRIPTORS
    }

    async fn collect(
        &self,
        provider: &dyn OutputProvider,
    ) -> Result<Vec<Observation>, CollectError> {
        let partitions = query_nodes_per_partition(provider)
            .await
            .map_err(|source| CollectError::Command {
                collector: self.name(),
                source,
            })?;
        Ok(node_observations(&partitions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slurmex_parsers::FixedOutputProvider;
    use slurmex_slurm::{NODES_PER_PARTITION_CMD, parse_nodes_per_partition};

    #[test]
    fn test_every_category_has_a_descriptor() {
        for category in StateCategory::ALL {
            let name = metric_name(category);
            assert!(DESCRIPTORS.iter().any(|d| d.name == name), "{name}");
        }
        assert_eq!(DESCRIPTORS.len(), StateCategory::ALL.len());
    }

    #[test]
    fn test_zero_counts_are_reported() {
        let partitions = parse_nodes_per_partition("3,idle,debug");
        let observations = node_observations(&partitions);
        assert_eq!(observations.len(), 10);

        let idle = observations
            .iter()
            .find(|o| o.name == "slurm_nodes_idle_per_partition")
            .unwrap();
        assert_eq!(idle.value, 3.0);
        assert_eq!(idle.label_values, vec!["debug".to_string()]);

        assert_eq!(observations.iter().filter(|o| o.value == 0.0).count(), 9);
    }

    #[test]
    fn test_unclassified_only_partition_reports_zeros() {
        let partitions = parse_nodes_per_partition("2,unknown_state,scratch");
        let observations = node_observations(&partitions);
        assert_eq!(observations.len(), 10);
        assert!(observations.iter().all(|o| o.value == 0.0));
    }

    #[tokio::test]
    async fn test_collect() {
        let provider = FixedOutputProvider::new()
            .with_output(NODES_PER_PARTITION_CMD, "1,mixed,a*\n2,down,b\n");
        let observations = NodesPerPartitionCollector.collect(&provider).await.unwrap();
        assert_eq!(observations.len(), 20);
    }

    #[tokio::test]
    async fn test_collect_failure() {
        let result = NodesPerPartitionCollector
            .collect(&FixedOutputProvider::new())
            .await;
        assert!(matches!(
            result,
            Err(CollectError::Command {
                collector: "nodes_per_partition",
                ..
            })
        ));
    }
}
