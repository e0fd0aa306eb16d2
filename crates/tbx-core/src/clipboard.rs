//! Clipboard glue — copies output text via the first working platform tool.
//!
//! No clipboard crate: like most terminal tooling we shell out to whatever
//! the platform provides (`pbcopy` on macOS, `wl-copy` on Wayland, `xclip` /
//! `xsel` on X11). Tools are tried in order; a tool that is missing or exits
//! non-zero is skipped and the next one is tried.

use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Candidate clipboard writers, in preference order.
const TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("no clipboard tool available — install xclip, xsel, or wl-copy")]
    NoToolAvailable,
    #[error("clipboard copy failed: {0}")]
    Failed(String),
}

enum ToolFailure {
    /// The binary does not exist on this machine; not worth reporting.
    Missing,
    /// The tool exists but the copy failed.
    Failed(String),
}

/// Copy `text` to the system clipboard.
///
/// Returns the name of the tool that accepted the text.
pub fn copy_text(text: &str) -> Result<&'static str, CopyError> {
    let mut last_error: Option<String> = None;

    for (name, args) in TOOLS {
        match pipe_into(name, args, text) {
            Ok(()) => {
                tracing::debug!(tool = name, bytes = text.len(), "clipboard copy");
                return Ok(name);
            }
            Err(ToolFailure::Missing) => continue,
            Err(ToolFailure::Failed(err)) => {
                tracing::debug!(tool = name, error = %err, "clipboard tool failed");
                last_error = Some(err);
            }
        }
    }

    match last_error {
        Some(err) => Err(CopyError::Failed(err)),
        None => Err(CopyError::NoToolAvailable),
    }
}

fn pipe_into(name: &str, args: &[&str], text: &str) -> Result<(), ToolFailure> {
    let mut child = Command::new(name)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ToolFailure::Missing,
            _ => ToolFailure::Failed(format!("{name}: {e}")),
        })?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| ToolFailure::Failed(format!("{name}: {e}")))?;
    }
    // Close stdin so the tool sees EOF before we wait on it.
    drop(child.stdin.take());

    let status = child
        .wait()
        .map_err(|e| ToolFailure::Failed(format!("{name}: {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(ToolFailure::Failed(format!("{name} exited with {status}")))
    }
}
