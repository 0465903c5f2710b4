//! Metric emission for slurmex.
//!
//! Collectors turn scheduler output into a flat list of [`Observation`]s
//! against a static set of [`MetricDesc`]s. An [`Emitter`] publishes both.
//! A scrape gathers every collector before emitting anything, so a failed
//! command never yields a partial exposition.

pub mod collector;
pub mod collectors;
pub mod descriptor;
pub mod emitter;

pub use collector::{CollectError, Collector, ScrapeError, scrape};
pub use collectors::{NodesPerPartitionCollector, PartitionsCollector};
pub use descriptor::{MetricDesc, Observation};
pub use emitter::{EmitError, Emitter, PrometheusEmitter};
