//! HTTP Module
//!
//! This module exposes the command service over HTTP using axum.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 axum::serve (main.rs)                       │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │ one task per connection
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Router                                 │
//! │                                                             │
//! │  GET  /          ──> landing page                           │
//! │  GET  /command   ──> 400 "Use POST method"                  │
//! │  POST /command   ──> CommandService::handle_post            │
//! │  GET  /*         ──> ServeDir(www)                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Successful commands answer `text/plain`; every error is an HTML page.

pub mod pages;
pub mod router;

pub use pages::{build_html, error_page, escape_html, home_page};
pub use router::build_router;
