//! The collector seam and the scrape cycle.

use crate::descriptor::{MetricDesc, Observation};
use crate::emitter::{EmitError, Emitter};
use async_trait::async_trait;
use slurmex_parsers::{CommandError, OutputProvider};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("{collector} collector failed: {source}")]
    Command {
        collector: &'static str,
        #[source]
        source: CommandError,
    },
}

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Produces observations for a fixed set of metric families.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Metric families this collector reports, independent of current data.
    fn descriptors(&self) -> &'static [MetricDesc];

    /// Query the scheduler and build this scrape's observations.
    async fn collect(
        &self,
        provider: &dyn OutputProvider,
    ) -> Result<Vec<Observation>, CollectError>;
}

/// Run every collector, then hand all descriptors and observations to the
/// emitter.
///
/// Any collector failing aborts the scrape before the emitter sees anything.
pub async fn scrape<E: Emitter>(
    collectors: &[Box<dyn Collector>],
    provider: &dyn OutputProvider,
    emitter: &mut E,
) -> Result<(), ScrapeError> {
    let mut gathered = Vec::with_capacity(collectors.len());
    for collector in collectors {
        let observations = collector.collect(provider).await?;
        tracing::debug!(
            collector = collector.name(),
            observations = observations.len(),
            "collected"
        );
        gathered.push((collector.descriptors(), observations));
    }

    for (descriptors, observations) in &gathered {
        emitter.emit(descriptors, observations)?;
    }
    Ok(())
}
