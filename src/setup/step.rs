use tracing::warn;

use super::runner::{CommandRunner, CommandSpec};
use crate::ollama::print_install_guide;
use crate::utils::{FatalError, LauncherError, Result};

/// How a failing step affects the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Print a warning and keep going
    Tolerated,
    /// Stop the whole process
    Fatal,
}

/// What a step does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run to completion
    Run(CommandSpec),
    /// Start in the background
    Spawn(CommandSpec),
    /// The executable must already be on PATH
    Require(String),
    /// Look for the executable and print the install guide when it is missing
    Detect(String),
}

/// One provisioning action with its failure policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: String,
    pub action: Action,
    pub severity: Severity,
    /// Shown to the user when the step fails
    pub failure: String,
}

impl Step {
    pub fn new(
        label: impl Into<String>,
        action: Action,
        severity: Severity,
        failure: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            action,
            severity,
            failure: failure.into(),
        }
    }
}

/// Result of running one step, already classified by its severity
#[derive(Debug)]
pub enum StepOutcome {
    Done,
    Recovered { hint: String, error: LauncherError },
    Fatal(FatalError),
}

impl StepOutcome {
    pub fn classify(step: &Step, result: Result<()>) -> Self {
        match (result, step.severity) {
            (Ok(()), _) => StepOutcome::Done,
            (Err(error), Severity::Tolerated) => StepOutcome::Recovered {
                hint: step.failure.clone(),
                error,
            },
            (Err(error), Severity::Fatal) => {
                StepOutcome::Fatal(FatalError::new(step.failure.clone(), error))
            }
        }
    }
}

/// Execute a single step and classify the result
pub async fn execute(runner: &dyn CommandRunner, step: &Step) -> StepOutcome {
    let result = match &step.action {
        Action::Run(command) => runner.run(command).await,
        Action::Spawn(command) => runner.spawn_detached(command),
        Action::Require(program) => {
            if runner.is_available(program) {
                Ok(())
            } else {
                Err(LauncherError::MissingExecutable(program.clone()))
            }
        }
        Action::Detect(program) => {
            if runner.is_available(program) {
                Ok(())
            } else {
                print_install_guide();
                Err(LauncherError::MissingExecutable(program.clone()))
            }
        }
    };

    if let Err(e) = &result {
        warn!("step '{}' failed: {}", step.label, e);
    }

    StepOutcome::classify(step, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::runner::MockCommandRunner;

    fn failing_step(severity: Severity) -> Step {
        Step::new(
            "Stopping the existing container...",
            Action::Run(CommandSpec::new("docker", ["stop", "ollama"])),
            severity,
            "No existing container to stop.",
        )
    }

    fn command_failed() -> LauncherError {
        LauncherError::CommandFailed {
            command: "docker stop ollama".into(),
            status: "exit status: 1".into(),
        }
    }

    #[tokio::test]
    async fn test_tolerated_failure_is_recovered() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_| Err(command_failed()));

        let outcome = execute(&runner, &failing_step(Severity::Tolerated)).await;
        match outcome {
            StepOutcome::Recovered { hint, .. } => {
                assert_eq!(hint, "No existing container to stop.")
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fatal_failure_is_fatal() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_| Err(command_failed()));

        let outcome = execute(&runner, &failing_step(Severity::Fatal)).await;
        assert!(matches!(outcome, StepOutcome::Fatal(_)));
    }

    #[tokio::test]
    async fn test_success_is_done() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_| Ok(()));

        let outcome = execute(&runner, &failing_step(Severity::Fatal)).await;
        assert!(matches!(outcome, StepOutcome::Done));
    }

    #[tokio::test]
    async fn test_require_checks_path() {
        let mut runner = MockCommandRunner::new();
        runner.expect_is_available().times(1).returning(|_| false);

        let step = Step::new(
            "Checking for docker...",
            Action::Require("docker".into()),
            Severity::Fatal,
            "Docker is not installed.",
        );
        match execute(&runner, &step).await {
            StepOutcome::Fatal(fatal) => {
                assert!(matches!(fatal.error, LauncherError::MissingExecutable(_)))
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    fn detect_step() -> Step {
        Step::new(
            "Checking for ollama...",
            Action::Detect("ollama".into()),
            Severity::Tolerated,
            "Ollama is not installed.",
        )
    }

    #[tokio::test]
    async fn test_detect_present_runs_nothing() {
        let mut runner = MockCommandRunner::new();
        runner.expect_is_available().times(1).returning(|_| true);
        runner.expect_run().never();
        runner.expect_spawn_detached().never();

        assert!(matches!(
            execute(&runner, &detect_step()).await,
            StepOutcome::Done
        ));
    }

    #[tokio::test]
    async fn test_detect_missing_is_recovered_without_installing() {
        let mut runner = MockCommandRunner::new();
        runner.expect_is_available().times(1).returning(|_| false);
        runner.expect_run().never();
        runner.expect_spawn_detached().never();

        match execute(&runner, &detect_step()).await {
            StepOutcome::Recovered { hint, error } => {
                assert_eq!(hint, "Ollama is not installed.");
                assert!(matches!(error, LauncherError::MissingExecutable(_)));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
