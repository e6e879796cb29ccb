/// Environment provisioning - Gateway
mod local;
mod remote;
mod runner;
mod step;

pub use runner::{CommandRunner, CommandSpec, SystemRunner};
pub use step::{execute, Action, Severity, Step, StepOutcome};

#[cfg(test)]
pub use runner::MockCommandRunner;

use crate::app::{Config, Mode};

/// Ordered provisioning steps for the configured mode
pub fn plan(config: &Config) -> Vec<Step> {
    match config.mode() {
        Mode::Local => local::plan(config),
        Mode::Remote => remote::plan(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{RuntimeConfig, Settings};
    use pretty_assertions::assert_eq;

    fn config(mode: Mode, model: &str) -> Config {
        Config::new(
            Settings {
                mode,
                model: model.to_string(),
            },
            RuntimeConfig::default(),
        )
    }

    fn commands(steps: &[Step]) -> Vec<String> {
        steps
            .iter()
            .map(|step| match &step.action {
                Action::Run(c) => c.to_string(),
                Action::Spawn(c) => format!("spawn {}", c),
                Action::Require(p) => format!("require {}", p),
                Action::Detect(p) => format!("detect {}", p),
            })
            .collect()
    }

    #[test]
    fn test_remote_plan_order() {
        let steps = plan(&config(Mode::Remote, "deepseek-r1:1.5b"));
        assert_eq!(
            commands(&steps),
            vec![
                "require docker",
                "docker stop ollama",
                "docker rm ollama",
                "docker run -d -v ollama:/root/.ollama -p 11434:11434 --name ollama ollama/ollama",
                "docker exec ollama ollama pull deepseek-r1:1.5b",
            ]
        );
        let severities: Vec<Severity> = steps.iter().map(|s| s.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Fatal,
                Severity::Tolerated,
                Severity::Tolerated,
                Severity::Fatal,
                Severity::Fatal,
            ]
        );
    }

    #[test]
    fn test_local_plan_order() {
        let steps = plan(&config(Mode::Local, "mymodel"));
        assert_eq!(
            commands(&steps),
            vec!["detect ollama", "spawn ollama serve", "ollama pull mymodel"]
        );
        let severities: Vec<Severity> = steps.iter().map(|s| s.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Tolerated, Severity::Fatal, Severity::Tolerated]
        );
    }

    #[test]
    fn test_pull_failure_names_model() {
        let steps = plan(&config(Mode::Remote, "no-such-model"));
        let pull = steps.last().unwrap();
        assert!(pull.failure.contains("no-such-model"));
    }
}
