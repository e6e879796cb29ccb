pub mod app;
pub mod cli;
pub mod constants;
pub mod health;
pub mod ollama;
pub mod runtime;
pub mod setup;
pub mod utils;

pub use app::{Config, Mode, RuntimeConfig, Settings};
pub use runtime::{Launcher, Termination};
pub use utils::{FatalError, LauncherError};
