/// Constants module to avoid magic numbers in the codebase

// Model Defaults
pub const DEFAULT_MODEL: &str = "deepseek-r1:1.5b";
pub const DEFAULT_CONTEXT_SIZE: u32 = 8192;

// Network Configuration
pub const DEFAULT_OLLAMA_PORT: u16 = 11434;
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

// Container Configuration
pub const DEFAULT_CONTAINER_ENGINE: &str = "docker";
pub const DEFAULT_CONTAINER_NAME: &str = "ollama";
pub const DEFAULT_CONTAINER_IMAGE: &str = "ollama/ollama";
pub const DEFAULT_CONTAINER_VOLUME: &str = "ollama:/root/.ollama";

// Native install
pub const OLLAMA_BINARY: &str = "ollama";

// Timeouts
pub const CONTAINER_STARTUP_WAIT_SECS: u64 = 3;
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 600; // 10 minutes for large model requests

// Reasoning markers emitted by thinking models
pub const THINK_OPEN: &str = "<think>";
pub const THINK_CLOSE: &str = "</think>";

// Environment prefix for runtime overrides
pub const ENV_PREFIX: &str = "OLLAMA_LAUNCHER_";

// Exit codes
pub const EXIT_FATAL: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_INTERRUPTED: i32 = 130;
