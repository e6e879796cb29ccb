use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, info};

use super::repl::{self, LoopExit};
use crate::app::{Config, Mode};
use crate::constants::{EXIT_FATAL, EXIT_INTERRUPTED};
use crate::health::{self, HealthReport};
use crate::ollama::{OllamaApi, OllamaClient};
use crate::setup::{self, CommandRunner, StepOutcome, SystemRunner};
use crate::utils::{output, FatalError, Result};

/// How a run ended
#[derive(Debug)]
pub enum Termination {
    /// Input closed, or there was nothing to chat with
    Finished,
    /// The user pressed Ctrl+C
    Interrupted,
    /// A fatal step or request
    Failed(FatalError),
}

impl Termination {
    pub fn exit_code(&self) -> i32 {
        match self {
            Termination::Finished => 0,
            Termination::Interrupted => EXIT_INTERRUPTED,
            Termination::Failed(_) => EXIT_FATAL,
        }
    }
}

impl From<LoopExit> for Termination {
    fn from(exit: LoopExit) -> Self {
        match exit {
            LoopExit::EndOfInput => Termination::Finished,
            LoopExit::Interrupted => Termination::Interrupted,
        }
    }
}

/// Main runtime orchestrator: setup, health check, interactive loop
pub struct Launcher {
    config: Config,
    runner: Box<dyn CommandRunner>,
    api: Box<dyn OllamaApi>,
}

impl Launcher {
    /// Launcher wired to the host and the configured Ollama URL
    pub fn new(config: Config) -> Result<Self> {
        let api = OllamaClient::new(&config.runtime)?;
        Ok(Self::with_backends(config, Box::new(SystemRunner), Box::new(api)))
    }

    pub fn with_backends(
        config: Config,
        runner: Box<dyn CommandRunner>,
        api: Box<dyn OllamaApi>,
    ) -> Self {
        Self {
            config,
            runner,
            api,
        }
    }

    /// Run against the terminal
    pub async fn run(&self) -> Termination {
        let mut input = BufReader::new(tokio::io::stdin()).lines();
        let mut out = std::io::stdout();
        self.run_with(&mut input, &mut out).await
    }

    /// Run with explicit input and output
    pub async fn run_with<R, W>(&self, input: &mut Lines<R>, out: &mut W) -> Termination
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        info!(
            "starting in {} mode with model {}",
            self.config.mode(),
            self.config.model()
        );

        let report = match self.prepare().await {
            Ok(report) => report,
            Err(fatal) => return Termination::Failed(fatal),
        };

        output::success("All tests passed successfully.");
        println!("{}", format!(" Using model:\t{}", self.config.model()).yellow());

        let active = match self.config.mode() {
            Mode::Remote => report.connected,
            Mode::Local => true,
        };
        if !active {
            debug!("not connected, skipping the interactive loop");
            return Termination::Finished;
        }

        match repl::run(&self.config, self.api.as_ref(), input, out).await {
            Ok(exit) => exit.into(),
            Err(fatal) => Termination::Failed(fatal),
        }
    }

    /// Provisioning followed by the health check
    pub async fn prepare(&self) -> std::result::Result<HealthReport, FatalError> {
        self.provision().await?;
        println!("{}", " Running tests...".cyan());
        health::check(&self.config, self.runner.as_ref(), self.api.as_ref()).await
    }

    /// Run every step; tolerated failures warn, the first fatal one stops the run
    pub async fn provision(&self) -> std::result::Result<(), FatalError> {
        for step in setup::plan(&self.config) {
            output::step(&step.label);
            match setup::execute(self.runner.as_ref(), &step).await {
                StepOutcome::Done => {}
                StepOutcome::Recovered { hint, error } => {
                    debug!("tolerated: {}", error);
                    output::warning(hint);
                }
                StepOutcome::Fatal(fatal) => return Err(fatal),
            }
        }
        Ok(())
    }
}
