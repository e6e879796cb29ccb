use async_trait::async_trait;
use std::fmt;
use std::process::Stdio;
use tracing::debug;

use crate::utils::{LauncherError, Result};

/// An external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Seam between provisioning and the operating system
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion with inherited stdio; a non-zero exit is an error
    async fn run(&self, command: &CommandSpec) -> Result<()>;

    /// Start in the background with stdio silenced and never wait for it
    fn spawn_detached(&self, command: &CommandSpec) -> Result<()>;

    /// Check if an executable is on PATH
    fn is_available(&self, program: &str) -> bool;
}

/// Runs commands on the host
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> Result<()> {
        debug!("running `{}`", command);

        let status = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| LauncherError::SpawnFailed {
                command: command.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(LauncherError::CommandFailed {
                command: command.to_string(),
                status: status.to_string(),
            });
        }

        Ok(())
    }

    fn spawn_detached(&self, command: &CommandSpec) -> Result<()> {
        debug!("spawning `{}` in the background", command);

        // std child handles do not kill or reap on drop, so the service outlives this handle
        let child = std::process::Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LauncherError::SpawnFailed {
                command: command.to_string(),
                source,
            })?;

        debug!("`{}` started with pid {}", command, child.id());
        Ok(())
    }

    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        let spec = CommandSpec::new("docker", ["exec", "ollama", "ollama", "pull", "llama3"]);
        assert_eq!(spec.to_string(), "docker exec ollama ollama pull llama3");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let spec = CommandSpec::new("definitely-not-a-real-program-4821", Vec::<String>::new());
        let err = SystemRunner.run(&spec).await.unwrap_err();
        assert!(matches!(err, LauncherError::SpawnFailed { .. }));
        assert!(!SystemRunner.is_available("definitely-not-a-real-program-4821"));
    }
}
