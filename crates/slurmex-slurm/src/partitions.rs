//! Partition CPU allocation and pending-job correlation.
//!
//! Two datasets are joined by partition name: the `sinfo` CPU snapshot
//! decides which partitions exist, and the `squeue` pending queue adds job
//! counts and the CPUs blocked on resources, per required feature.

use crate::types::{PartitionResources, Partitions};
use slurmex_parsers::{
    CommandError, CommandSpec, OutputProvider, parse_lenient, record_lines, split_record,
};

/// sinfo output format:
/// %R - Partition name
/// %C - CPUs as allocated/idle/other/total
pub const PARTITION_CPUS_CMD: CommandSpec = CommandSpec::new("sinfo", &["-h", "-o%R,%C"]);

/// squeue output format, pending jobs of all users and partitions:
/// %P - Partition
/// %C - Requested CPUs
/// %r - Pending reason
/// %f - Required features, parenthesized and comma-separated
pub const PENDING_JOBS_CMD: CommandSpec = CommandSpec::new(
    "squeue",
    &["-a", "-r", "-h", "-o%P,%C,%r,%f", "--states=PENDING"],
);

/// Pending reason for jobs waiting on free resources.
const REASON_RESOURCES: &str = "Resources";

/// Separator inside the `%C` CPU state field.
const CPU_STATE_DELIMITER: char = '/';

/// One parsed line of the pending-job dataset.
#[derive(Debug, Clone, PartialEq)]
struct PendingJob<'a> {
    partition: &'a str,
    requested_cpus: f64,
    reason: &'a str,
    features: Vec<&'a str>,
}

/// Parse an `allocated/idle/other/total` CPU field.
///
/// Missing components read as zero and extra components are ignored.
fn parse_cpu_states(field: &str) -> [f64; 4] {
    let components: Vec<&str> = field.split(CPU_STATE_DELIMITER).collect();
    if components.len() != 4 {
        tracing::debug!(field, "expected 4 CPU state components, got {}", components.len());
    }

    let mut cpus = [0.0; 4];
    for (slot, component) in cpus.iter_mut().zip(&components) {
        *slot = parse_lenient(component);
    }
    cpus
}

/// Parse a `%P,%C,%r,%f` line.
///
/// The feature list arrives split by the field delimiter, so the tail
/// fields are reassembled by dropping one `(` from the first token and one
/// `)` from the last.
fn parse_pending_line(line: &str) -> Option<PendingJob<'_>> {
    let fields = split_record(line)?;

    let mut features: Vec<&str> = fields.get(3..).map(|tail| tail.to_vec()).unwrap_or_default();
    if let Some(first) = features.first_mut() {
        *first = (*first).strip_prefix('(').unwrap_or(*first);
    }
    if let Some(last) = features.last_mut() {
        *last = (*last).strip_suffix(')').unwrap_or(*last);
    }

    Some(PendingJob {
        partition: fields[0],
        requested_cpus: fields.get(1).map_or(0.0, |s| parse_lenient(s)),
        reason: fields.get(2).copied().unwrap_or_default(),
        features,
    })
}

/// Correlate the CPU snapshot with the pending-job queue.
///
/// CPU figures are assigned, not summed: each partition appears once in the
/// snapshot. Every pending job on a known partition counts once; jobs
/// pending on `Resources` additionally credit their full requested CPUs to
/// each feature they name. Pending jobs on partitions missing from the
/// snapshot are dropped.
pub fn parse_partitions(cpus_text: &str, pending_text: &str) -> Partitions {
    let mut partitions = Partitions::new();

    for line in record_lines(cpus_text) {
        let Some(fields) = split_record(line) else {
            continue;
        };
        let [allocated, idle, other, total] =
            parse_cpu_states(fields.get(1).copied().unwrap_or_default());

        let entry = partitions.entry(fields[0].to_string()).or_default();
        entry.allocated_cpus = allocated;
        entry.idle_cpus = idle;
        entry.other_cpus = other;
        entry.total_cpus = total;
    }

    for line in record_lines(pending_text) {
        let Some(job) = parse_pending_line(line) else {
            continue;
        };
        let Some(entry) = partitions.get_mut(job.partition) else {
            tracing::debug!(partition = job.partition, "pending job on unknown partition");
            continue;
        };

        entry.pending_jobs += 1.0;
        if job.reason == REASON_RESOURCES {
            credit_features(entry, &job);
        }
    }

    partitions
}

fn credit_features(entry: &mut PartitionResources, job: &PendingJob<'_>) {
    for feature in &job.features {
        *entry
            .pending_by_feature
            .entry((*feature).to_string())
            .or_default() += job.requested_cpus;
    }
}

/// Query partition CPUs with sinfo and pending jobs with squeue.
///
/// Either command failing fails the whole query.
pub async fn query_partitions(provider: &dyn OutputProvider) -> Result<Partitions, CommandError> {
    let cpus = provider.output(&PARTITION_CPUS_CMD).await?;
    let pending = provider.output(&PENDING_JOBS_CMD).await?;
    Ok(parse_partitions(&cpus, &pending))
}
