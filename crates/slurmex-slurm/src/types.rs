//! Per-partition aggregate types.

use std::collections::BTreeMap;

/// Node state taxonomy reported per partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCategory {
    Allocated,
    Completing,
    Down,
    Draining,
    Error,
    Failing,
    Idle,
    Maintenance,
    Mixed,
    Reserved,
}

/// Prefix rules in priority order. The first matching prefix wins.
const STATE_PREFIXES: &[(&str, StateCategory)] = &[
    ("alloc", StateCategory::Allocated),
    ("comp", StateCategory::Completing),
    ("down", StateCategory::Down),
    ("drain", StateCategory::Draining),
    ("fail", StateCategory::Failing),
    ("err", StateCategory::Error),
    ("idle", StateCategory::Idle),
    ("maint", StateCategory::Maintenance),
    ("mix", StateCategory::Mixed),
    ("res", StateCategory::Reserved),
];

impl StateCategory {
    pub const ALL: [StateCategory; 10] = [
        StateCategory::Allocated,
        StateCategory::Completing,
        StateCategory::Down,
        StateCategory::Draining,
        StateCategory::Error,
        StateCategory::Failing,
        StateCategory::Idle,
        StateCategory::Maintenance,
        StateCategory::Mixed,
        StateCategory::Reserved,
    ];

    /// Classify a raw `sinfo` state string (e.g. `"drained*"`, `"mixed-"`).
    ///
    /// Matching is a case-sensitive prefix test. States that match no rule
    /// return None and are counted nowhere.
    pub fn classify(state: &str) -> Option<Self> {
        STATE_PREFIXES
            .iter()
            .find(|(prefix, _)| state.starts_with(prefix))
            .map(|&(_, category)| category)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Node counts for one partition, one slot per [`StateCategory`].
///
/// All categories start at zero together, so a partition that exists
/// always reports a full vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeCounts {
    counts: [f64; 10],
}

impl NodeCounts {
    pub fn get(&self, category: StateCategory) -> f64 {
        self.counts[category.index()]
    }

    pub fn add(&mut self, category: StateCategory, count: f64) {
        self.counts[category.index()] += count;
    }

    /// Iterate `(category, count)` pairs in [`StateCategory::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (StateCategory, f64)> + '_ {
        StateCategory::ALL.iter().map(|&c| (c, self.get(c)))
    }
}

/// Node counts keyed by partition name.
pub type NodesPerPartition = BTreeMap<String, NodeCounts>;

/// CPU and pending-job figures for one partition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionResources {
    /// Allocated CPUs
    pub allocated_cpus: f64,

    /// Idle CPUs
    pub idle_cpus: f64,

    /// CPUs neither allocated nor idle (down, drained, ...)
    pub other_cpus: f64,

    /// Total CPUs
    pub total_cpus: f64,

    /// Number of pending jobs targeting this partition
    pub pending_jobs: f64,

    /// Requested CPUs of jobs pending on `Resources`, keyed by feature
    pub pending_by_feature: BTreeMap<String, f64>,
}

/// Partition resources keyed by partition name.
pub type Partitions = BTreeMap<String, PartitionResources>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sinfo_states() {
        assert_eq!(StateCategory::classify("allocated"), Some(StateCategory::Allocated));
        assert_eq!(StateCategory::classify("allocated+"), Some(StateCategory::Allocated));
        assert_eq!(StateCategory::classify("completing"), Some(StateCategory::Completing));
        assert_eq!(StateCategory::classify("down*"), Some(StateCategory::Down));
        assert_eq!(StateCategory::classify("drained"), Some(StateCategory::Draining));
        assert_eq!(StateCategory::classify("draining"), Some(StateCategory::Draining));
        assert_eq!(StateCategory::classify("error"), Some(StateCategory::Error));
        assert_eq!(StateCategory::classify("fail"), Some(StateCategory::Failing));
        assert_eq!(StateCategory::classify("failing"), Some(StateCategory::Failing));
        assert_eq!(StateCategory::classify("idle~"), Some(StateCategory::Idle));
        assert_eq!(StateCategory::classify("maint"), Some(StateCategory::Maintenance));
        assert_eq!(StateCategory::classify("mixed"), Some(StateCategory::Mixed));
        assert_eq!(StateCategory::classify("reserved"), Some(StateCategory::Reserved));
        assert_eq!(StateCategory::classify("resv"), Some(StateCategory::Reserved));
    }

    #[test]
    fn test_classify_unknown_and_case() {
        assert_eq!(StateCategory::classify("unknown_state"), None);
        assert_eq!(StateCategory::classify(""), None);
        assert_eq!(StateCategory::classify("IDLE"), None);
        assert_eq!(StateCategory::classify("planned"), None);
    }

    #[test]
    fn test_prefix_table_covers_every_category() {
        for category in StateCategory::ALL {
            assert!(STATE_PREFIXES.iter().any(|&(_, c)| c == category));
        }
    }

    #[test]
    fn test_node_counts() {
        let mut counts = NodeCounts::default();
        counts.add(StateCategory::Idle, 3.0);
        counts.add(StateCategory::Idle, 2.0);
        counts.add(StateCategory::Down, 1.0);
        assert_eq!(counts.get(StateCategory::Idle), 5.0);
        assert_eq!(counts.get(StateCategory::Mixed), 0.0);
        assert_eq!(counts.iter().map(|(_, v)| v).sum::<f64>(), 6.0);
        assert_eq!(counts.iter().count(), 10);
    }
}
