//! Command Module
//!
//! This module implements the command processing layer of GetSet.
//! It receives the decoded form of `POST /command`, executes the command
//! against the store and returns a [`Reply`] or a [`CommandError`].
//!
//! ## Architecture
//!
//! ```text
//! POST /command  (command=...)
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  parse_command  │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CommandService  │  (this module)
//! │                 │
//! │  - Dispatch     │
//! │  - Lock         │
//! │  - Execute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ConfigStore +   │  (storage module)
//! │ Stats           │
//! └─────────────────┘
//! ```
//!
//! [`Reply`]: crate::protocol::Reply

pub mod error;
pub mod service;

pub use error::CommandError;
pub use service::{CommandService, COMMAND_FIELD};
