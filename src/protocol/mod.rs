//! Command Protocol
//!
//! This module implements the tiny text protocol carried in the `command`
//! field of `POST /command`.
//!
//! ## Modules
//!
//! - `command`: parses `$get <key>` / `$set <key>=<value>` into a [`Command`]
//! - `reply`: the [`Reply`] produced by a successful command and its text body
//!
//! ## Example
//!
//! ```
//! use getset::protocol::{parse_command, Command, ParseError};
//!
//! assert_eq!(parse_command("$get name").unwrap(), Command::Get { key: "name".into() });
//! assert!(matches!(parse_command("$bogus"), Err(ParseError::UnknownCommand(_))));
//! ```

pub mod command;
pub mod reply;

// Re-export commonly used types for convenience
pub use command::{check_entry, parse_command, Command, ParseError};
pub use reply::Reply;
