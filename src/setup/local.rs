use super::runner::CommandSpec;
use super::step::{Action, Severity, Step};
use crate::app::Config;
use crate::constants::OLLAMA_BINARY;

/// Native install: look for `ollama`, start the server, pull the model
pub fn plan(config: &Config) -> Vec<Step> {
    vec![
        Step::new(
            "Checking for ollama...",
            Action::Detect(OLLAMA_BINARY.to_string()),
            Severity::Tolerated,
            "Ollama is not installed.",
        ),
        Step::new(
            "Running ollama...",
            Action::Spawn(CommandSpec::new(OLLAMA_BINARY, ["serve"])),
            Severity::Fatal,
            "Failed to run ollama.",
        ),
        Step::new(
            "Pulling the model...",
            Action::Run(CommandSpec::new(OLLAMA_BINARY, ["pull", config.model()])),
            Severity::Tolerated,
            "Could not pull the provided model.",
        ),
    ]
}
