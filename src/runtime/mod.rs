/// Runtime orchestrator module - Gateway
mod orchestrator;
mod repl;

pub use orchestrator::{Launcher, Termination};
pub use repl::{local_turn, remote_turn, run as run_loop, LoopExit};
