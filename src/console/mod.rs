//! # Operator Console
//!
//! Persist and inspect commands for the reminder store, fed from the
//! process's controlling terminal rather than from chat.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0
//! - **Toggleable**: false

use std::path::PathBuf;

use anyhow::Result;

use crate::features::reminders::Reminds;

/// One parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Snapshot the store to the given file, or the canonical one.
    Save(Option<PathBuf>),
    /// Replace the store from the given file, or the canonical one.
    Load(Option<PathBuf>),
    /// Dump the store grouped by channel and nick.
    List,
    /// Shut the bot down (the caller runs the exit save).
    Quit,
}

impl ConsoleCommand {
    /// Parse a console input line. Unknown input yields `None` so the
    /// caller can print usage instead of guessing.
    pub fn parse(input: &str) -> Option<ConsoleCommand> {
        let mut parts = input.split_whitespace();
        let command = match parts.next()? {
            "save" => ConsoleCommand::Save(parts.next().map(PathBuf::from)),
            "load" => ConsoleCommand::Load(parts.next().map(PathBuf::from)),
            "list" => ConsoleCommand::List,
            "quit" | ":q" => ConsoleCommand::Quit,
            _ => return None,
        };
        Some(command)
    }

    /// Run the command against the store, returning printable output.
    pub fn run(&self, reminds: &Reminds) -> Result<String> {
        match self {
            ConsoleCommand::Save(path) => {
                let path = path.as_deref().unwrap_or_else(|| reminds.canonical_path());
                reminds.save(path)?;
                Ok(format!("saved {} reminders to {}", reminds.len(), path.display()))
            }
            ConsoleCommand::Load(path) => {
                let path = path.as_deref().unwrap_or_else(|| reminds.canonical_path());
                reminds.load(path)?;
                Ok(format!(
                    "loaded {} reminders from {}",
                    reminds.len(),
                    path.display()
                ))
            }
            ConsoleCommand::List => {
                let dump = reminds.render();
                if dump.is_empty() {
                    Ok("no reminders queued".to_string())
                } else {
                    Ok(dump)
                }
            }
            ConsoleCommand::Quit => Ok("bye".to_string()),
        }
    }
}
