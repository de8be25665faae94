//! Shellchat is a line-oriented terminal chat client for OpenAI-compatible
//! completion APIs that mediates between the conversation and the local
//! machine in both directions.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the mediation logic: directive parsing and resolution
//!   (`>command` and `@file` prefixes that pull local context into a
//!   message), fenced code-block extraction from responses, the per-block
//!   execution confirmation state machine, the shell executor, and the
//!   chat session loop that ties them together.
//! - [`api`] defines the chat/model wire payloads and the HTTP client used
//!   to talk to the completion service.
//! - [`cli`] handles argument parsing and startup orchestration: loading
//!   configuration, bootstrapping the API key, and picking a model.
//! - [`utils`] holds small shared helpers (URL construction, browser
//!   launching).
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`) and
//! routes through [`cli::run`].

pub mod api;
pub mod cli;
pub mod core;
pub mod utils;
