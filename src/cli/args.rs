use clap::Parser;
use std::ffi::OsString;
use std::path::Path;

use crate::app::{Mode, Settings};
use crate::constants::DEFAULT_MODEL;
use crate::utils::{LauncherError, Result};

/// Flags accepted on top of the positional model name
const RECOGNIZED_FLAGS: &[&str] = &["--local", "-l", "--help", "-h", "--version", "-V"];

/// At most a model name and the local flag
const MAX_ARGS: usize = 2;

#[derive(Parser, Debug)]
#[command(name = "ollama-launcher")]
#[command(version)]
#[command(about = "Start an Ollama runtime and chat with a model from the terminal", long_about = None)]
#[command(args_override_self = true)]
pub struct Cli {
    /// The name of the model to use (default: deepseek-r1:1.5b)
    pub model: Option<String>,

    #[arg(hide = true)]
    pub extra: Option<String>,

    /// Use the local version of ollama instead of the Docker container
    #[arg(short, long)]
    pub local: bool,
}

impl Cli {
    pub fn into_settings(self) -> Settings {
        Settings {
            mode: if self.local { Mode::Local } else { Mode::Remote },
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

/// Resolve the process argument list (program name first) into settings
pub fn resolve<I, T>(args: I) -> Result<Settings>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let tokens = args.iter().skip(1);

    if tokens.len() > MAX_ARGS {
        return Err(LauncherError::TooManyArguments);
    }

    for token in tokens {
        let token = token.to_string_lossy();
        if token.starts_with('-') && !RECOGNIZED_FLAGS.contains(&token.as_ref()) {
            return Err(LauncherError::UnrecognizedFlag(token.into_owned()));
        }
    }

    let cli = Cli::try_parse_from(args)?;
    Ok(cli.into_settings())
}

/// Usage text shown next to argument errors
pub fn usage(program: &str) -> String {
    let name = Path::new(program)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string());

    format!(
        "\nUsage:   {name} model --local\n\
         \t {name} model -l\n\
         \t {name}\n\n  \
         model: The name of the model to use (default: {DEFAULT_MODEL})\n  \
         --local: Use the local version of ollama (default: False)\n  \
         -l: Use the local version of ollama (default: False)\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_arguments_defaults_to_remote() {
        let settings = resolve(["ollama-launcher"]).unwrap();
        assert_eq!(settings.mode, Mode::Remote);
        assert_eq!(settings.model, "deepseek-r1:1.5b");
    }

    #[test]
    fn test_model_and_local_flag() {
        let settings = resolve(["ollama-launcher", "mymodel", "--local"]).unwrap();
        assert_eq!(settings.mode, Mode::Local);
        assert_eq!(settings.model, "mymodel");
    }

    #[test]
    fn test_local_flag_in_any_position() {
        for args in [
            vec!["prog", "-l", "mymodel"],
            vec!["prog", "mymodel", "-l"],
            vec!["prog", "--local", "mymodel"],
        ] {
            let settings = resolve(args.clone()).unwrap();
            assert_eq!(settings.mode, Mode::Local, "args: {:?}", args);
            assert_eq!(settings.model, "mymodel", "args: {:?}", args);
        }

        let settings = resolve(["prog", "-l"]).unwrap();
        assert_eq!(settings.mode, Mode::Local);
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_repeated_local_flag() {
        for args in [vec!["prog", "--local", "-l"], vec!["prog", "-l", "-l"]] {
            let settings = resolve(args.clone()).unwrap();
            assert_eq!(settings.mode, Mode::Local, "args: {:?}", args);
            assert_eq!(settings.model, DEFAULT_MODEL, "args: {:?}", args);
        }
    }

    #[test]
    fn test_too_many_arguments() {
        for args in [
            vec!["prog", "a", "b", "c"],
            vec!["prog", "a", "b", "--local"],
            vec!["prog", "--local", "-l", "a"],
        ] {
            let err = resolve(args).unwrap_err();
            assert!(matches!(err, LauncherError::TooManyArguments));
        }
    }

    #[test]
    fn test_unrecognized_flag() {
        let err = resolve(["prog", "mymodel", "--remote"]).unwrap_err();
        match err {
            LauncherError::UnrecognizedFlag(flag) => assert_eq!(flag, "--remote"),
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(
            resolve(["prog", "-x"]).unwrap_err(),
            LauncherError::UnrecognizedFlag(_)
        ));
    }

    #[test]
    fn test_second_positional_is_ignored() {
        let settings = resolve(["prog", "first", "second"]).unwrap();
        assert_eq!(settings.mode, Mode::Remote);
        assert_eq!(settings.model, "first");
    }

    #[test]
    fn test_help_is_left_to_clap() {
        let err = resolve(["prog", "--help"]).unwrap_err();
        match err {
            LauncherError::Cli(e) => assert_eq!(e.kind(), clap::error::ErrorKind::DisplayHelp),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_usage_uses_program_basename() {
        let text = usage("/usr/local/bin/ollama-launcher");
        assert!(text.contains("Usage:   ollama-launcher model --local"));
        assert!(text.contains("default: deepseek-r1:1.5b"));
    }
}
