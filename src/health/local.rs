use std::time::Instant;
use tracing::debug;

use super::HealthReport;
use crate::app::Config;
use crate::ollama::{ChatRequest, OllamaApi};
use crate::utils::{output, FatalError};

/// One blank chat turn against the native server
pub async fn check(config: &Config, api: &dyn OllamaApi) -> Result<HealthReport, FatalError> {
    println!(" Running a test prompt with your model...");

    let start = Instant::now();
    let response = api
        .chat(&ChatRequest::user(config.model(), " "))
        .await
        .map_err(|e| FatalError::new("Test prompt failed.", e))?;
    debug!("test reply: {:?}", response.message.content);

    output::timing("Test prompt completed", start.elapsed().as_secs_f64());
    Ok(HealthReport { connected: false })
}
