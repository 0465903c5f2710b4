//! Command execution utilities for scheduler queries.
//!
//! An [`OutputProvider`] turns a fixed [`CommandSpec`] into the command's
//! captured stdout. Failing to obtain the text is always an error; callers
//! never substitute empty output.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tokio::process::Command;

/// Error type for command execution.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to execute {command}: {error}")]
    Execution { command: String, error: String },
    #[error("Command {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}

/// A program and its fixed argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandSpec {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl CommandSpec {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Source of raw scheduler output.
#[async_trait]
pub trait OutputProvider: Send + Sync {
    /// Run `spec` and return its full stdout.
    async fn output(&self, spec: &CommandSpec) -> Result<String, CommandError>;
}

/// Execute a command and return stdout as a string.
///
/// Non-zero exit status is reported as [`CommandError::Failed`] with the
/// captured stderr.
pub async fn run_command(cmd: &mut Command, name: &str) -> Result<String, CommandError> {
    let output = cmd.output().await.map_err(|e| CommandError::Execution {
        command: name.to_string(),
        error: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CommandError::Failed {
            command: name.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Runs commands on the local host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOutputProvider;

#[async_trait]
impl OutputProvider for SystemOutputProvider {
    async fn output(&self, spec: &CommandSpec) -> Result<String, CommandError> {
        let mut cmd = Command::new(spec.program);
        cmd.args(spec.args);
        let name = spec.to_string();
        tracing::debug!(command = %name, "running scheduler command");

        run_command(&mut cmd, &name).await.inspect_err(|e| {
            tracing::warn!(command = %name, "scheduler command failed: {}", e);
        })
    }
}

/// Replays captured output keyed by command.
///
/// Commands without a registered output fail with
/// [`CommandError::Execution`], as a missing binary would.
#[derive(Debug, Clone, Default)]
pub struct FixedOutputProvider {
    outputs: HashMap<CommandSpec, String>,
}

impl FixedOutputProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the output returned for `spec`.
    pub fn with_output(mut self, spec: CommandSpec, output: impl Into<String>) -> Self {
        self.outputs.insert(spec, output.into());
        self
    }
}

#[async_trait]
impl OutputProvider for FixedOutputProvider {
    async fn output(&self, spec: &CommandSpec) -> Result<String, CommandError> {
        self.outputs
            .get(spec)
            .cloned()
            .ok_or_else(|| CommandError::Execution {
                command: spec.to_string(),
                error: "no output registered".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ECHO: CommandSpec = CommandSpec::new("echo", &["hello"]);

    #[tokio::test]
    async fn test_run_command_success() {
        let mut cmd = Command::new("echo");
        cmd.arg("hello");
        let result = run_command(&mut cmd, "echo").await.unwrap();
        assert_eq!(result.trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_command_not_found() {
        let mut cmd = Command::new("nonexistent_command_12345");
        let result = run_command(&mut cmd, "nonexistent").await;
        assert!(matches!(result, Err(CommandError::Execution { .. })));
    }

    #[tokio::test]
    async fn test_run_command_nonzero_exit() {
        let mut cmd = Command::new("false");
        let result = run_command(&mut cmd, "false").await;
        assert!(matches!(result, Err(CommandError::Failed { .. })));
    }

    #[tokio::test]
    async fn test_system_provider_runs_spec() {
        let out = SystemOutputProvider.output(&ECHO).await.unwrap();
        assert_eq!(out, "hello\n");
    }

    #[tokio::test]
    async fn test_fixed_provider() {
        let provider = FixedOutputProvider::new().with_output(ECHO, "canned");
        assert_eq!(provider.output(&ECHO).await.unwrap(), "canned");

        let other = CommandSpec::new("sinfo", &["-h"]);
        assert!(matches!(
            provider.output(&other).await,
            Err(CommandError::Execution { .. })
        ));
    }

    #[test]
    fn test_command_spec_display() {
        let spec = CommandSpec::new("squeue", &["-a", "-h", "-o%P,%C"]);
        assert_eq!(spec.to_string(), "squeue -a -h -o%P,%C");
    }
}
