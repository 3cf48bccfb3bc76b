//! Line-oriented terminal view.
//!
//! Turns input lines into intents and renders the list. Parsing never
//! touches the store; malformed lines are reported and dropped.

use crate::types::{TodoAction, TodoId, TodoList};
use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;

/// Help text listing the accepted commands
pub const HELP: &str = "\
commands:
  add <text>     add a todo (text may be empty)
  delete <id>    delete the todo with that id (alias: rm)
  list           show the list again
  help           show this help
  quit           exit (alias: exit)";

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add a todo with this text
    Add(String),
    /// Delete the todo with this id
    Delete(TodoId),
    /// Re-render the list
    List,
    /// Print the help text
    Help,
    /// Leave the input loop
    Quit,
}

/// Reasons an input line is not a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line was blank
    #[error("empty input")]
    Empty,

    /// The first word is not a known command
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    /// `delete` without an id
    #[error("'delete' needs an id")]
    MissingId,

    /// `delete` with something that is not an id
    #[error("'{0}' is not a valid id")]
    InvalidId(String),
}

impl Command {
    /// The intent this command dispatches, if it changes the list
    #[must_use]
    pub fn into_action(self) -> Option<TodoAction> {
        match self {
            Self::Add(content) => Some(TodoAction::Create { content }),
            Self::Delete(id) => Some(TodoAction::Delete { id }),
            Self::List | Self::Help | Self::Quit => None,
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        if line.trim().is_empty() {
            return Err(CommandError::Empty);
        }

        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim_start()));

        match verb.to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add(rest.to_string())),
            "delete" | "rm" => {
                let raw = rest.trim();
                if raw.is_empty() {
                    return Err(CommandError::MissingId);
                }
                raw.parse()
                    .map(Self::Delete)
                    .map_err(|_| CommandError::InvalidId(raw.to_string()))
            },
            "list" | "ls" => Ok(Self::List),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Render the list, one `"{id} - {content}"` line per item
#[must_use]
pub fn render(items: &TodoList) -> String {
    if items.is_empty() {
        return "(no todos)\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{} - {}", item.id, item.content);
    }
    out
}
