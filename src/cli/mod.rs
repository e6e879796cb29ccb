/// CLI argument parsing - Gateway
mod args;

pub use args::{resolve, usage, Cli};
