//! Partition CPUs and pending jobs.
//!
//! Unlike the node families, zero values are left out here.

use super::{FEATURES_LABEL, PARTITION_LABEL};
use crate::collector::{CollectError, Collector};
use crate::descriptor::{MetricDesc, Observation};
use async_trait::async_trait;
use slurmex_parsers::OutputProvider;
use slurmex_slurm::{Partitions, query_partitions};

const CPUS_ALLOCATED: &str = "slurm_partition_cpus_allocated";
const CPUS_IDLE: &str = "slurm_partition_cpus_idle";
const CPUS_OTHER: &str = "slurm_partition_cpus_other";
const JOBS_PENDING: &str = "slurm_partition_jobs_pending";
const CPUS_TOTAL: &str = "slurm_partition_cpus_total";
const CPUS_PENDING_RESOURCES: &str = "slurm_partition_cpus_pending_resources";

const DESCRIPTORS: &[MetricDesc] = &[
    MetricDesc {
        name: CPUS_ALLOCATED,
        help: "Allocated CPUs for partition",
        labels: &[PARTITION_LABEL],
    },
    MetricDesc {
        name: CPUS_IDLE,
        help: "Idle CPUs for partition",
        labels: &[PARTITION_LABEL],
    },
    MetricDesc {
        name: CPUS_OTHER,
        help: "Other CPUs for partition",
        labels: &[PARTITION_LABEL],
    },
    MetricDesc {
        name: JOBS_PENDING,
        help: "Pending jobs for partition",
        labels: &[PARTITION_LABEL],
    },
    MetricDesc {
        name: CPUS_TOTAL,
        help: "Total CPUs for partition",
        labels: &[PARTITION_LABEL],
    },
    MetricDesc {
        name: CPUS_PENDING_RESOURCES,
        help: "Pending CPUs waiting for resources",
        labels: &[PARTITION_LABEL, FEATURES_LABEL],
    },
];

/// Observations for every non-zero partition figure.
pub fn partition_observations(partitions: &Partitions) -> Vec<Observation> {
    let mut observations = Vec::new();

    for (partition, resources) in partitions {
        let gauges = [
            (CPUS_ALLOCATED, resources.allocated_cpus),
            (CPUS_IDLE, resources.idle_cpus),
            (CPUS_OTHER, resources.other_cpus),
            (JOBS_PENDING, resources.pending_jobs),
            (CPUS_TOTAL, resources.total_cpus),
        ];
        for (name, value) in gauges {
            if value > 0.0 {
                observations.push(Observation::new(name, vec![partition.clone()], value));
            }
        }

        for (feature, &cpus) in &resources.pending_by_feature {
            if cpus > 0.0 {
                observations.push(Observation::new(
                    CPUS_PENDING_RESOURCES,
                    vec![partition.clone(), feature.clone()],
                    cpus,
                ));
            }
        }
    }

    observations
}

/// Reports partition CPU usage and the pending queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartitionsCollector;

#[async_trait]
impl Collector for PartitionsCollector {
    fn name(&self) -> &'static str {
        "partitions"
    }

    fn descriptors(&self) -> &'static [MetricDesc] {
        DESCRIPTORS
    }

    async fn collect(
        &self,
        provider: &dyn OutputProvider,
    ) -> Result<Vec<Observation>, CollectError> {
        let partitions = query_partitions(provider)
            .await
            .map_err(|source| CollectError::Command {
                collector: self.name(),
                source,
            })?;
        Ok(partition_observations(&partitions))
    }
}
