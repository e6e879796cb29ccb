use colored::Colorize;
use futures::StreamExt;
use std::io::Write;
use tokio::io::{AsyncBufRead, Lines};
use tracing::{debug, warn};

use crate::app::{Config, Mode};
use crate::ollama::{
    strip_reasoning, ChatRequest, GenerateReply, GenerateRequest, OllamaApi, ReasoningFilter,
};
use crate::utils::{output, FatalError, LauncherError};

const REQUEST_FAILED: &str = "Request failed.";

/// How an interactive loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Input was closed
    EndOfInput,
    /// Ctrl+C
    Interrupted,
}

/// Read prompts until input closes or the user interrupts
///
/// Remote turns report request errors and keep going; a failed local turn ends the run.
pub async fn run<R, W>(
    config: &Config,
    api: &dyn OllamaApi,
    input: &mut Lines<R>,
    out: &mut W,
) -> Result<LoopExit, FatalError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        write_prompt(out).map_err(|e| FatalError::new("Failed to write output.", e.into()))?;

        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => return Ok(LoopExit::Interrupted),
            line = input.next_line() => line,
        };
        let prompt = match line {
            Ok(Some(prompt)) => prompt,
            Ok(None) => return Ok(LoopExit::EndOfInput),
            Err(e) => return Err(FatalError::new("Failed to read input.", e.into())),
        };

        let turn = async {
            match config.mode() {
                Mode::Remote => {
                    if let Err(e) = remote_turn(config, api, &prompt, out).await {
                        warn!("remote turn failed: {}", e);
                        output::error(format!("Error: {}", e));
                    }
                    Ok(())
                }
                Mode::Local => local_turn(config, api, &prompt, out)
                    .await
                    .map_err(|e| FatalError::new(REQUEST_FAILED, e)),
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => return Ok(LoopExit::Interrupted),
            result = turn => result?,
        }
    }
}

fn write_prompt<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\n Press Ctrl+C to exit at any time.")?;
    write!(out, "\n{}", "Input your prompt: ".yellow())?;
    out.flush()
}

/// One streamed generation; the visible text is written as it arrives
pub async fn remote_turn<W: Write>(
    config: &Config,
    api: &dyn OllamaApi,
    prompt: &str,
    out: &mut W,
) -> Result<(), LauncherError> {
    writeln!(out, "🧠 Thinking...")?;
    out.flush()?;

    let request =
        GenerateRequest::new(config.model(), prompt).with_context_size(config.runtime.context_size);

    let mut fragments = match api.generate(&request).await? {
        GenerateReply::Stream(fragments) => fragments,
        GenerateReply::Failed { status, body } => {
            writeln!(out, "🛑 Done!")?;
            writeln!(out, "\nRequest failed with status code {}", status)?;
            writeln!(out, "Response: {}", body)?;
            return Ok(());
        }
    };

    let mut filter = ReasoningFilter::new();
    let mut announced = false;
    while let Some(fragment) = fragments.next().await {
        let visible = filter.push(&fragment?);
        write_visible(out, &visible, &mut announced)?;
    }
    let rest = filter.finish();
    write_visible(out, &rest, &mut announced)?;

    if !announced {
        debug!("response had no visible text");
        writeln!(out, "🛑 Done!")?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

// "Done!" goes out right before the first visible text, once the reasoning is over
fn write_visible<W: Write>(
    out: &mut W,
    visible: &str,
    announced: &mut bool,
) -> std::io::Result<()> {
    if visible.is_empty() {
        return Ok(());
    }
    if !*announced {
        writeln!(out, "🛑 Done!")?;
        *announced = true;
    }
    write!(out, "{}", visible)?;
    out.flush()
}

/// One blocking chat turn; the reasoning block is stripped from the full reply
pub async fn local_turn<W: Write>(
    config: &Config,
    api: &dyn OllamaApi,
    prompt: &str,
    out: &mut W,
) -> Result<(), LauncherError> {
    writeln!(out, "🧠 Thinking...")?;
    out.flush()?;

    let response = api.chat(&ChatRequest::user(config.model(), prompt)).await?;

    writeln!(out, "🛑 Done! \n")?;
    writeln!(out, "{}", strip_reasoning(&response.message.content))?;
    out.flush()?;
    Ok(())
}
