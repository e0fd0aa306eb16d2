//! Command parsing and execution for the vim-style command bar.
//!
//! # Supported commands
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `tool <name>` | Switch tool (`extract`, `encrypt`) |
//! | `run` | Run the active tool's primary action |
//! | `copy` | Copy the active tool's output to the clipboard |
//! | `export` | Export the extracted logs to a file |
//! | `clear` | Reset the active tool |

use crate::app::{AppState, ToolKind};
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    Tool(ToolKind),
    Run,
    Copy,
    Export,
    Clear,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "run" => Ok(Command::Run),
            "copy" => Ok(Command::Copy),
            "export" => Ok(Command::Export),
            "clear" => Ok(Command::Clear),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "tool" => match ToolKind::from_name(rest) {
                Some(tool) => Ok(Command::Tool(tool)),
                None => Err("usage: tool <extract|encrypt>".to_string()),
            },
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = match name.to_ascii_lowercase().as_str() {
                "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Theme::load_gruvbox_dark(),
                _ => Theme::load_default(),
            };
        }
        Command::Tool(tool) => {
            s.select_tool(tool);
        }
        Command::Run => {
            s.run_active_tool();
        }
        Command::Copy => {
            s.copy_output();
        }
        Command::Export => {
            s.export_output();
        }
        Command::Clear => {
            s.clear_active_tool();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
