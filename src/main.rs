use anyhow::Result;
use colored::Colorize;
use std::ffi::OsString;

use ollama_launcher::{
    app::{load_runtime_config, Config},
    cli::{resolve, usage},
    constants::EXIT_USAGE,
    runtime::{Launcher, Termination},
    utils::{init_logger, output, LauncherError},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logger();

    // Resolve mode and model before anything touches the system
    let args: Vec<OsString> = std::env::args_os().collect();
    let program = args
        .first()
        .map(|a| a.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let settings = match resolve(args) {
        Ok(settings) => settings,
        Err(LauncherError::Cli(e)) => e.exit(),
        Err(e) if e.is_usage() => {
            eprintln!("{}", usage(&program));
            output::error(&e);
            std::process::exit(EXIT_USAGE);
        }
        Err(e) => return Err(e.into()),
    };

    let runtime = load_runtime_config()?;
    let launcher = Launcher::new(Config::new(settings, runtime))?;

    let termination = launcher.run().await;
    match &termination {
        Termination::Finished => {}
        Termination::Interrupted => output::error("\n\tExiting..."),
        Termination::Failed(fatal) => {
            output::error(&fatal.hint);
            eprintln!("   {}", fatal.error.to_string().dimmed());
        }
    }

    std::process::exit(termination.exit_code())
}
