//! Publishing declarations and observations.

use crate::descriptor::{MetricDesc, Observation};
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Observation for undeclared metric {0}")]
    UnknownMetric(String),
    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("Exposition is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Sink for one scrape's metric families and values.
pub trait Emitter {
    fn emit(
        &mut self,
        descriptors: &[MetricDesc],
        observations: &[Observation],
    ) -> Result<(), EmitError>;
}

/// Emits into a scrape-local Prometheus registry.
///
/// Create one per scrape: gauges set here are never reset.
pub struct PrometheusEmitter {
    registry: Registry,
    gauges: HashMap<&'static str, GaugeVec>,
}

impl Default for PrometheusEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl PrometheusEmitter {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            gauges: HashMap::new(),
        }
    }

    fn declare(&mut self, desc: &MetricDesc) -> Result<(), EmitError> {
        if self.gauges.contains_key(desc.name) {
            return Ok(());
        }
        let gauge = GaugeVec::new(Opts::new(desc.name, desc.help), desc.labels)?;
        self.registry.register(Box::new(gauge.clone()))?;
        self.gauges.insert(desc.name, gauge);
        Ok(())
    }

    /// Encode everything emitted so far in the text exposition format.
    pub fn encode(&self) -> Result<String, EmitError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Content type of [`encode`](Self::encode)'s output.
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }
}

impl Emitter for PrometheusEmitter {
    fn emit(
        &mut self,
        descriptors: &[MetricDesc],
        observations: &[Observation],
    ) -> Result<(), EmitError> {
        for desc in descriptors {
            self.declare(desc)?;
        }

        for observation in observations {
            let gauge = self
                .gauges
                .get(observation.name)
                .ok_or_else(|| EmitError::UnknownMetric(observation.name.to_string()))?;
            let labels: Vec<&str> = observation.label_values.iter().map(String::as_str).collect();
            gauge.get_metric_with_label_values(&labels)?.set(observation.value);
        }
        Ok(())
    }
}
