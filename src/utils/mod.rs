// Gateway module for utils - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod console;
mod errors;
mod logger;

// Public re-exports - the ONLY way to access utils functionality
pub mod output {
    pub use super::console::{error, step, success, timing, warning};
}
pub use errors::{FatalError, LauncherError, Result};
pub use logger::init_logger;
