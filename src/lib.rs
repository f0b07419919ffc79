//! # GetSet - A Key/Value Command Server over HTTP
//!
//! GetSet keeps a flat table of string keys and values in an INI file next
//! to its executable and exposes it through a single text command channel:
//! `POST /command` with a form field `command=$get <key>` or
//! `command=$set <key>=<value>`. Every read and write of a key is counted
//! in memory and reported back with the value.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              GetSet                                     │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ axum Router │───>│  Command    │───>│  Command    │                  │
//! │  │ (http)      │    │  Parser     │    │  Service    │                  │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘                  │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                     ┌──────────────────────────────────────────────┐   │
//! │                     │            Mutex<Tables>                     │   │
//! │                     │   ┌─────────────────┐  ┌─────────────────┐   │   │
//! │                     │   │  ConfigStore    │  │     Stats       │   │   │
//! │                     │   │  (config.txt)   │  │ (reads/writes)  │   │   │
//! │                     │   └─────────────────┘  └─────────────────┘   │   │
//! │                     └──────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use getset::commands::CommandService;
//! use getset::config::Paths;
//! use getset::http::build_router;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let paths = Paths::from_exe()?;
//!     let service = Arc::new(CommandService::initialize(&paths)?);
//!     let app = build_router(service, &paths.www_dir);
//!
//!     let listener = TcpListener::bind("127.0.0.1:8081").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Command Protocol
//!
//! - `$get <key>` - returns `<key>=<value> (reads=<r>, writes=<w>)`
//! - `$set <key>=<value>` - stores and persists the value, returns the same
//!   line wrapped in a highlighted `SET` marker
//!
//! Anything else is answered with a `400 Bad Request` HTML page.
//!
//! ## Module Overview
//!
//! - [`protocol`]: command parser and reply formatting
//! - [`storage`]: INI-backed store and per-key statistics
//! - [`commands`]: the command service holding both tables under one lock
//! - [`http`]: axum routes and HTML pages
//! - [`config`]: command-line arguments and path resolution

pub mod commands;
pub mod config;
pub mod http;
pub mod protocol;
pub mod storage;

// Re-export commonly used types for convenience
pub use commands::{CommandError, CommandService};
pub use config::{Paths, ServerArgs};
pub use http::build_router;
pub use protocol::{parse_command, Command, ParseError, Reply};
pub use storage::{ConfigStore, StatEntry, Stats, StoreError};

/// The default port GetSet listens on
pub const DEFAULT_PORT: u16 = 8081;

/// The default host GetSet binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of GetSet
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
