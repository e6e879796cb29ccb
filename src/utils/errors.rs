use thiserror::Error;

/// Main error type for the launcher
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Too many arguments.")]
    TooManyArguments,

    #[error("Unrecognized flag: {0}")]
    UnrecognizedFlag(String),

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("`{command}` exited with {status}")]
    CommandFailed { command: String, status: String },

    #[error("Failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Executable not found: {0}")]
    MissingExecutable(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request failed with status code {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LauncherError {
    /// True for argument problems that should be reported with the usage text
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::TooManyArguments | Self::UnrecognizedFlag(_))
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;

/// A failure that ends the run, paired with the message shown to the user
#[derive(Error, Debug)]
#[error("{hint}")]
pub struct FatalError {
    pub hint: String,
    #[source]
    pub error: LauncherError,
}

impl FatalError {
    pub fn new(hint: impl Into<String>, error: LauncherError) -> Self {
        Self {
            hint: hint.into(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_classification() {
        assert!(LauncherError::TooManyArguments.is_usage());
        assert!(LauncherError::UnrecognizedFlag("-x".into()).is_usage());
        assert!(!LauncherError::MissingExecutable("docker".into()).is_usage());
    }

    #[test]
    fn test_fatal_keeps_hint_and_source() {
        use std::error::Error as _;

        let fatal = FatalError::new(
            "Failed to connect to ollama.",
            LauncherError::MissingExecutable("docker".into()),
        );
        assert_eq!(fatal.to_string(), "Failed to connect to ollama.");
        assert_eq!(
            fatal.source().map(|e| e.to_string()),
            Some("Executable not found: docker".to_string())
        );
    }

    #[test]
    fn test_status_message() {
        let err = LauncherError::HttpStatus {
            status: 404,
            body: "model not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status code 404: model not found"
        );
    }
}
