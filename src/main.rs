//! Purpose: `dyndoc` CLI entry point.
//! Role: Binary crate root; parses args, loads a JSON document, runs one command.
//! Invariants: Command results go to stdout; errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: All document access goes through `api::DynamicDocument`.
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

use dyndoc::api::{
    DynamicDocument, Error, ErrorKind, RenderOptions, WrapPolicy, document_from_str,
    to_exit_code,
};

mod command_dispatch;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Run `dyndoc --help` for usage."));
            }
        },
    };

    let options = RenderOptions {
        escape_strings: cli.escape,
    };
    let document = load_document(cli.input.as_deref(), cli.wrap.into())?;
    command_dispatch::dispatch_command(cli.command, &document, &options)
}

#[derive(Parser)]
#[command(
    name = "dyndoc",
    version,
    about = "Read, write, and re-render untyped JSON documents by member name",
    long_about = None,
    after_help = r#"EXAMPLES
  $ echo '{"a":"x","b":1}' | dyndoc render
  $ dyndoc --input doc.json get outer inner
  $ dyndoc --input doc.json set flag true
  $ dyndoc --input doc.json --wrap every-element get items"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        help = "JSON document to load (default: stdin)",
        value_hint = ValueHint::FilePath
    )]
    input: Option<PathBuf>,
    #[arg(long, help = "JSON-escape keys and strings when rendering")]
    escape: bool,
    #[arg(
        long,
        value_enum,
        default_value = "first-element",
        help = "Which list elements are wrapped as documents on read"
    )]
    wrap: WrapMode,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Render the whole document as single-line text")]
    Render,
    #[command(about = "Resolve a member path and print the wrapped result as JSON")]
    Get {
        #[arg(required = true, help = "Member names, outermost first")]
        keys: Vec<String>,
    },
    #[command(about = "Store a JSON value under a top-level key and render the result")]
    Set {
        key: String,
        #[arg(help = "Value as JSON text, e.g. '\"text\"', '3', '{\"k\":1}'")]
        value: String,
    },
    #[command(about = "List top-level keys in insertion order")]
    Keys,
    #[command(about = "Print one JSON line per top-level entry (raw values)")]
    Entries,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum WrapMode {
    FirstElement,
    EveryElement,
}

impl From<WrapMode> for WrapPolicy {
    fn from(mode: WrapMode) -> Self {
        match mode {
            WrapMode::FirstElement => WrapPolicy::FirstElement,
            WrapMode::EveryElement => WrapPolicy::EveryElement,
        }
    }
}

fn load_document(input: Option<&Path>, policy: WrapPolicy) -> Result<DynamicDocument, Error> {
    let text = match input {
        Some(path) => fs::read_to_string(path).map_err(|err| {
            let kind = if err.kind() == io::ErrorKind::NotFound {
                ErrorKind::NotFound
            } else {
                ErrorKind::Io
            };
            Error::new(kind)
                .with_message("failed to read input")
                .with_path(path)
                .with_source(err)
        })?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            text
        }
    };
    tracing::debug!(bytes = text.len(), ?policy, "loading document");
    let document = document_from_str(&text).map_err(|err| match input {
        Some(path) => err.with_path(path),
        None => err,
    })?;
    Ok(DynamicDocument::with_policy(document.backing(), policy))
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches("error: ").to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

fn emit_error(err: &Error) {
    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert(
        "message".to_string(),
        json!(err.message().unwrap_or("unexpected failure")),
    );
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::{Cli, Error, ErrorKind, WrapMode, WrapPolicy, error_json};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn error_json_carries_kind_message_and_hint() {
        let err = Error::new(ErrorKind::Usage)
            .with_message("bad input")
            .with_hint("try again");
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], "Usage");
        assert_eq!(value["error"]["message"], "bad input");
        assert_eq!(value["error"]["hint"], "try again");
        assert!(value["error"].get("path").is_none());
    }

    #[test]
    fn wrap_mode_maps_to_policy() {
        assert_eq!(
            WrapPolicy::from(WrapMode::FirstElement),
            WrapPolicy::FirstElement
        );
        assert_eq!(
            WrapPolicy::from(WrapMode::EveryElement),
            WrapPolicy::EveryElement
        );
    }
}
