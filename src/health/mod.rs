/// Post-provisioning connectivity checks - Gateway
mod local;
mod remote;

use crate::app::{Config, Mode};
use crate::ollama::OllamaApi;
use crate::setup::CommandRunner;
use crate::utils::FatalError;

/// What the checks established
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthReport {
    /// Set once the container API answered every check
    pub connected: bool,
}

/// Run the checks for the configured mode; any failure ends the run
pub async fn check(
    config: &Config,
    runner: &dyn CommandRunner,
    api: &dyn OllamaApi,
) -> Result<HealthReport, FatalError> {
    match config.mode() {
        Mode::Local => local::check(config, api).await,
        Mode::Remote => remote::check(config, runner, api).await,
    }
}
