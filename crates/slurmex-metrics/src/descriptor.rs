//! Metric declarations and observations.

/// Static declaration of a gauge family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDesc {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
}

/// One gauge value for one label combination.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Name of the [`MetricDesc`] this value belongs to
    pub name: &'static str,

    /// Label values, in the order of the descriptor's labels
    pub label_values: Vec<String>,

    pub value: f64,
}

impl Observation {
    pub fn new(name: &'static str, label_values: Vec<String>, value: f64) -> Self {
        Self {
            name,
            label_values,
            value,
        }
    }
}
