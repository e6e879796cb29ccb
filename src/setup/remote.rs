use super::runner::CommandSpec;
use super::step::{Action, Severity, Step};
use crate::app::Config;
use crate::constants::OLLAMA_BINARY;

/// Container install: replace any previous container, start a fresh one, pull the model into it
pub fn plan(config: &Config) -> Vec<Step> {
    let rt = &config.runtime;
    let engine = rt.container_engine.as_str();
    let name = rt.container_name.as_str();

    vec![
        Step::new(
            format!("Checking for {}...", engine),
            Action::Require(engine.to_string()),
            Severity::Fatal,
            format!("Could not find {}. Install it and try again.", engine),
        ),
        Step::new(
            "Stopping the existing container...",
            Action::Run(CommandSpec::new(engine, ["stop", name])),
            Severity::Tolerated,
            "No existing container to stop.",
        ),
        Step::new(
            "Removing the existing container...",
            Action::Run(CommandSpec::new(engine, ["rm", name])),
            Severity::Tolerated,
            "No existing container to remove.",
        ),
        Step::new(
            "Starting a new container...",
            Action::Run(CommandSpec::new(
                engine,
                [
                    "run",
                    "-d",
                    "-v",
                    rt.container_volume.as_str(),
                    "-p",
                    rt.port_mapping().as_str(),
                    "--name",
                    name,
                    rt.container_image.as_str(),
                ],
            )),
            Severity::Fatal,
            "Failed to start the container. Ensure Docker is running.",
        ),
        Step::new(
            format!("Pulling the model {}...", config.model()),
            Action::Run(CommandSpec::new(
                engine,
                ["exec", name, OLLAMA_BINARY, "pull", config.model()],
            )),
            Severity::Fatal,
            format!(
                "Failed to pull the model: {}. Make sure you have the correct model name.",
                config.model()
            ),
        ),
    ]
}
