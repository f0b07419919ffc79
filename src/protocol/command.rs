//! Command Text Parser
//!
//! Commands arrive as the `command` field of a form-encoded POST body.
//! The grammar is a fixed five-byte verb prefix followed by parameters:
//!
//! ```text
//! $get <key>
//! $set <key>=<value>
//! ```
//!
//! Only the first `=` of a SET separates key from value, so values may be
//! empty or contain further `=` characters. Anything that does not start
//! with one of the two prefixes (or has nothing after it) is rejected.
//!
//! A SET must also name an entry the backing file can hold as a single
//! `key=value` line: the key is non-empty, does not start with `[`, and
//! neither side carries line breaks or surrounding whitespace.

use thiserror::Error;

/// Length of the verb prefix, including the trailing space.
pub const PREFIX_LENGTH: usize = 5;

/// Prefix of a read command.
pub const GET_PREFIX: &str = "$get ";

/// Prefix of a write command.
pub const SET_PREFIX: &str = "$set ";

/// Errors that can occur while parsing a command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Missing, short or unrecognized verb prefix
    #[error("Failed to parse command: {0}")]
    UnknownCommand(String),

    /// SET parameters without a `=` separator
    #[error("Failed to parse SET params: {0}")]
    MissingAssignment(String),

    /// SET key that would not read back as the same key
    #[error("Failed to parse SET params: unsupported key {0:?}")]
    UnsupportedKey(String),

    /// SET value that would not read back as the same value
    #[error("Failed to parse SET params: unsupported value {0:?}")]
    UnsupportedValue(String),
}

/// A parsed command, alive for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `$get <key>`
    Get { key: String },
    /// `$set <key>=<value>`
    Set { key: String, value: String },
}

/// Parses the raw command text.
///
/// # Example
///
/// ```
/// use getset::protocol::{parse_command, Command};
///
/// let cmd = parse_command("$set url=http://x/?a=b").unwrap();
/// assert_eq!(
///     cmd,
///     Command::Set { key: "url".into(), value: "http://x/?a=b".into() }
/// );
/// ```
pub fn parse_command(text: &str) -> Result<Command, ParseError> {
    if text.len() <= PREFIX_LENGTH {
        return Err(ParseError::UnknownCommand(text.to_string()));
    }

    // `get` returns None when byte 5 is not a char boundary.
    let (verb, params) = match (text.get(..PREFIX_LENGTH), text.get(PREFIX_LENGTH..)) {
        (Some(verb), Some(params)) => (verb, params),
        _ => return Err(ParseError::UnknownCommand(text.to_string())),
    };

    match verb {
        GET_PREFIX => Ok(Command::Get {
            key: params.to_string(),
        }),
        SET_PREFIX => parse_set_params(params),
        _ => Err(ParseError::UnknownCommand(text.to_string())),
    }
}

/// Splits `key=value` on the first `=`.
fn parse_set_params(params: &str) -> Result<Command, ParseError> {
    let (key, value) = params
        .split_once('=')
        .ok_or_else(|| ParseError::MissingAssignment(params.to_string()))?;

    check_entry(key, value)?;
    Ok(Command::Set {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Checks that `key=value` survives being written as one line and read back.
pub fn check_entry(key: &str, value: &str) -> Result<(), ParseError> {
    if key.is_empty() || key.starts_with('[') || !is_single_trimmed_line(key) {
        return Err(ParseError::UnsupportedKey(key.to_string()));
    }
    if !is_single_trimmed_line(value) {
        return Err(ParseError::UnsupportedValue(value.to_string()));
    }
    Ok(())
}

fn is_single_trimmed_line(text: &str) -> bool {
    text.trim() == text && !text.contains(['\r', '\n'])
}
