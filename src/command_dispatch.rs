//! Purpose: Hold top-level CLI command dispatch for `dyndoc`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: `render` and `set` print compatibility-mode text unless `--escape` is given.
//! Invariants: `get`, `entries` print strict JSON envelopes, one per line.

use serde::Serialize;

use dyndoc::api::{Member, Node, serialize_with};
use dyndoc::json::parse::hint_for_error;

use super::*;

#[derive(Serialize)]
struct GetReport<'a> {
    path: &'a [String],
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    elements: Option<Vec<&'static str>>,
    value: Value,
}

#[derive(Serialize)]
struct EntryLine<'a> {
    key: &'a str,
    value: &'a Node,
}

pub(super) fn dispatch_command(
    command: Command,
    document: &DynamicDocument,
    options: &RenderOptions,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Render => {
            tracing::debug!(entries = document.len(), "rendering document");
            println!("{}", serialize_with(document, options));
            Ok(RunOutcome::ok())
        }
        Command::Get { keys } => {
            tracing::debug!(depth = keys.len(), "resolving member path");
            let member = resolve_path(document, &keys)?;
            emit_line(&GetReport {
                path: &keys,
                kind: member.kind(),
                elements: member
                    .as_sequence()
                    .map(|items| items.iter().map(Member::kind).collect()),
                value: member.to_json_value(),
            })?;
            Ok(RunOutcome::ok())
        }
        Command::Set { key, value } => {
            let node = dyndoc::api::from_str(&value).map_err(|err| {
                Error::new(ErrorKind::Parse)
                    .with_message(format!("value for `{key}` is not valid JSON"))
                    .with_hint(hint_for_error(&err, "set value"))
                    .with_source(err)
            })?;
            tracing::debug!(key = %key, kind = node.kind(), "setting member");
            document.set(&key, node);
            println!("{}", serialize_with(document, options));
            Ok(RunOutcome::ok())
        }
        Command::Keys => {
            for key in document.keys() {
                println!("{key}");
            }
            Ok(RunOutcome::ok())
        }
        Command::Entries => {
            for (key, value) in document {
                emit_line(&EntryLine {
                    key: &key,
                    value: &value,
                })?;
            }
            Ok(RunOutcome::ok())
        }
    }
}

// Every step but the last must land on a document; the last may be anything.
fn resolve_path(document: &DynamicDocument, keys: &[String]) -> Result<Member, Error> {
    let Some((last, parents)) = keys.split_last() else {
        return Err(Error::new(ErrorKind::Usage).with_message("member path is empty"));
    };
    let mut current = document.clone();
    for (depth, key) in parents.iter().enumerate() {
        current = match current.get(key) {
            Member::Document(next) => next,
            other => {
                let walked = keys[..=depth].join(".");
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(format!("`{walked}` is {}, not a document", other.kind()))
                    .with_hint("Only object members can be walked into."));
            }
        };
    }
    Ok(current.get(last))
}

fn emit_line(value: &impl Serialize) -> Result<(), Error> {
    let line = serde_json::to_string(value).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("json encode failed")
            .with_source(err)
    })?;
    println!("{line}");
    Ok(())
}
