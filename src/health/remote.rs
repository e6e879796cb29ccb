use colored::Colorize;
use futures::StreamExt;
use std::time::Instant;
use tracing::info;

use super::HealthReport;
use crate::app::Config;
use crate::ollama::{GenerateReply, GenerateRequest, ModelInfo, OllamaApi};
use crate::setup::{CommandRunner, CommandSpec};
use crate::utils::{output, FatalError, LauncherError};

const NOT_RUNNING: &str = "Container is not running.";
const UNREACHABLE: &str = "Failed to connect to ollama.";
const NO_MODELS: &str = "No models found. Try to pull manually.";
const MODEL_BROKEN: &str =
    "Your model is not functioning or missing. Try to remove it and pull manually.";

/// Container logs, then version, tags and a blank generation, in that order
pub async fn check(
    config: &Config,
    runner: &dyn CommandRunner,
    api: &dyn OllamaApi,
) -> Result<HealthReport, FatalError> {
    let rt = &config.runtime;

    output::step("Checking if the container is running...");
    runner
        .run(&CommandSpec::new(
            rt.container_engine.as_str(),
            ["logs", rt.container_name.as_str()],
        ))
        .await
        .map_err(|e| FatalError::new(NOT_RUNNING, e))?;
    output::success("Container started successfully!");
    output::step("Connecting to the container...");

    tokio::time::sleep(rt.startup_delay()).await;

    let version = api
        .version()
        .await
        .map_err(|e| FatalError::new(UNREACHABLE, e))?;
    info!("ollama version {}", version.version);
    output::success("Connected to ollama successfully!\n");

    println!(" Checking available models...");
    let models = api.tags().await.map_err(|e| FatalError::new(NO_MODELS, e))?;
    print_models(&models);

    println!("{}", " Running a test prompt with your model...\n".cyan());
    let start = Instant::now();
    test_generate(config, api)
        .await
        .map_err(|e| FatalError::new(MODEL_BROKEN, e))?;
    output::timing("Test prompt completed", start.elapsed().as_secs_f64());

    Ok(HealthReport { connected: true })
}

fn print_models(models: &[ModelInfo]) {
    println!(" Available models:");
    for model in models {
        println!("Name: {}", model.name.magenta());
        println!("Model: {}", model.model.magenta());
        println!("Size: {}\n", format!("{} bytes", model.size).magenta());
    }
}

/// Blank prompt, body drained so the timing covers the whole generation
async fn test_generate(config: &Config, api: &dyn OllamaApi) -> Result<(), LauncherError> {
    match api.generate(&GenerateRequest::new(config.model(), " ")).await? {
        GenerateReply::Stream(mut fragments) => {
            while let Some(fragment) = fragments.next().await {
                fragment?;
            }
            Ok(())
        }
        GenerateReply::Failed { status, body } => Err(LauncherError::HttpStatus { status, body }),
    }
}
