//! Request models for the command driver
//!
//! Parses one text line into a [`Command`].

use std::str::FromStr;

use crate::error::{CacheError, Result};

/// A single driver command.
///
/// # Syntax
/// - `add <key> <value...>`: value is the rest of the line
/// - `get <key>` / `peek <key>` / `remove <key>`
/// - `oldest`: evict the least recently used entry
/// - `len` / `stats`
///
/// `set`, `del` and `remove_oldest` are accepted as aliases of `add`,
/// `remove` and `oldest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { key: String, value: String },
    Get { key: String },
    Peek { key: String },
    Remove { key: String },
    RemoveOldest,
    Len,
    Stats,
}

impl Command {
    /// Parses a command line. The verb is case-insensitive.
    pub fn parse(line: &str) -> Result<Self> {
        let (verb, rest) = split_word(line);
        match verb.to_ascii_lowercase().as_str() {
            "add" | "set" => {
                let (key, value) = split_word(rest);
                if key.is_empty() {
                    return Err(missing("add", "key"));
                }
                if value.is_empty() {
                    return Err(missing("add", "value"));
                }
                Ok(Command::Add {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
            "get" => single_key("get", rest).map(|key| Command::Get { key }),
            "peek" => single_key("peek", rest).map(|key| Command::Peek { key }),
            "remove" | "del" => single_key("remove", rest).map(|key| Command::Remove { key }),
            "oldest" | "remove_oldest" => no_args("oldest", rest, Command::RemoveOldest),
            "len" => no_args("len", rest, Command::Len),
            "stats" => no_args("stats", rest, Command::Stats),
            "" => Err(CacheError::InvalidCommand("empty command".to_string())),
            other => Err(CacheError::InvalidCommand(format!("unknown verb '{}'", other))),
        }
    }
}

impl FromStr for Command {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        Command::parse(s)
    }
}

/// Splits off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

fn single_key(command: &'static str, rest: &str) -> Result<String> {
    let (key, extra) = split_word(rest);
    if key.is_empty() {
        return Err(missing(command, "key"));
    }
    if !extra.is_empty() {
        return Err(CacheError::InvalidCommand(format!(
            "'{}' takes one key, got extra input '{}'",
            command, extra
        )));
    }
    Ok(key.to_string())
}

fn no_args(command: &'static str, rest: &str, parsed: Command) -> Result<Command> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(CacheError::InvalidCommand(format!(
            "'{}' takes no arguments",
            command
        )))
    }
}

fn missing(command: &'static str, argument: &'static str) -> CacheError {
    CacheError::MissingArgument { command, argument }
}
