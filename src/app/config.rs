use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    CONTAINER_STARTUP_WAIT_SECS, DEFAULT_CONTAINER_ENGINE, DEFAULT_CONTAINER_IMAGE,
    DEFAULT_CONTAINER_NAME, DEFAULT_CONTAINER_VOLUME, DEFAULT_CONTEXT_SIZE, DEFAULT_MODEL,
    DEFAULT_OLLAMA_PORT, DEFAULT_OLLAMA_URL, ENV_PREFIX, HTTP_CONNECT_TIMEOUT_SECS,
    HTTP_REQUEST_TIMEOUT_SECS,
};
use crate::utils::{LauncherError, Result};

/// Where the Ollama runtime lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Native `ollama` install on this machine
    Local,
    /// `ollama/ollama` container reached over HTTP
    Remote,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Local => write!(f, "local"),
            Mode::Remote => write!(f, "remote"),
        }
    }
}

/// Settings resolved from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mode: Mode,
    pub model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Remote,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Runtime knobs, overridable through `OLLAMA_LAUNCHER_*` environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Base URL of the Ollama HTTP API
    pub base_url: String,
    /// `num_ctx` sent with remote generation requests
    pub context_size: u32,
    /// Container engine executable
    pub container_engine: String,
    /// Name given to the Ollama container
    pub container_name: String,
    /// Image the container is started from
    pub container_image: String,
    /// Named volume mount for downloaded models
    pub container_volume: String,
    /// Host port published to the container's API port
    pub port: u16,
    /// Delay between container start and the first API call
    pub startup_delay_secs: u64,
    /// Upper bound for a whole HTTP request, streaming included
    pub request_timeout_secs: u64,
    /// Upper bound for establishing a connection
    pub connect_timeout_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            context_size: DEFAULT_CONTEXT_SIZE,
            container_engine: DEFAULT_CONTAINER_ENGINE.to_string(),
            container_name: DEFAULT_CONTAINER_NAME.to_string(),
            container_image: DEFAULT_CONTAINER_IMAGE.to_string(),
            container_volume: DEFAULT_CONTAINER_VOLUME.to_string(),
            port: DEFAULT_OLLAMA_PORT,
            startup_delay_secs: CONTAINER_STARTUP_WAIT_SECS,
            request_timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: HTTP_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl RuntimeConfig {
    /// Defaults layered under environment overrides
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(RuntimeConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// `host:container` port mapping for `docker run -p`
    pub fn port_mapping(&self) -> String {
        format!("{}:{}", self.port, DEFAULT_OLLAMA_PORT)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Load runtime configuration from defaults and the environment
pub fn load_runtime_config() -> Result<RuntimeConfig> {
    RuntimeConfig::figment()
        .extract()
        .map_err(|e| LauncherError::ConfigError(e.to_string()))
}

/// Immutable configuration shared by every phase of a run
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub runtime: RuntimeConfig,
}

impl Config {
    pub fn new(settings: Settings, runtime: RuntimeConfig) -> Self {
        Self { settings, runtime }
    }

    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let runtime = RuntimeConfig::default();
        assert_eq!(runtime.base_url, "http://localhost:11434");
        assert_eq!(runtime.context_size, 8192);
        assert_eq!(runtime.port_mapping(), "11434:11434");
        assert_eq!(runtime.startup_delay(), Duration::from_secs(3));

        let settings = Settings::default();
        assert_eq!(settings.mode, Mode::Remote);
        assert_eq!(settings.model, "deepseek-r1:1.5b");
    }

    #[test]
    fn test_env_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OLLAMA_LAUNCHER_CONTEXT_SIZE", "4096");
            jail.set_env("OLLAMA_LAUNCHER_BASE_URL", "http://10.0.0.2:11434");
            jail.set_env("OLLAMA_LAUNCHER_PORT", "8080");

            let runtime: RuntimeConfig = RuntimeConfig::figment().extract()?;
            assert_eq!(runtime.context_size, 4096);
            assert_eq!(runtime.base_url, "http://10.0.0.2:11434");
            assert_eq!(runtime.port_mapping(), "8080:11434");
            assert_eq!(runtime.container_name, "ollama");
            Ok(())
        });
    }

    #[test]
    fn test_config_accessors() {
        let config = Config::new(
            Settings {
                mode: Mode::Local,
                model: "mymodel".into(),
            },
            RuntimeConfig::default(),
        );
        assert_eq!(config.mode(), Mode::Local);
        assert_eq!(config.model(), "mymodel");
        assert_eq!(config.mode().to_string(), "local");
    }
}
