//! Shared parsing utilities for scheduler command output.
//!
//! This crate provides the line/field splitting and lenient number parsing
//! used by every slurmex aggregator, along with the output-provider seam
//! that turns a command specification into captured stdout.

pub mod command;
pub mod fields;

pub use command::{
    CommandError, CommandSpec, FixedOutputProvider, OutputProvider, SystemOutputProvider,
    run_command,
};
pub use fields::{FIELD_DELIMITER, parse_lenient, record_lines, split_record};
