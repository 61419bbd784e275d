//! Notes with question answering over them.
//!
//! notemind stores free-text notes in a single SQLite table and exposes them
//! over a small HTTP API. Questions are answered by a hosted
//! OpenAI-compatible model that only sees a bounded context built from the
//! notes themselves.
//!
//! # Architecture
//!
//! - **Storage**: SQLite via rusqlite, one `notes(id, content, ...)` table
//! - **Context**: substring match of the question against each note, falling
//!   back to every note, rendered as `Note #<id>: <content>` and capped in length
//! - **Model**: `/chat/completions` and `/audio/transcriptions` over reqwest
//! - **Transport**: axum HTTP API plus a command-line front end
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite database initialization, schema, and migrations
//! - [`notes`] — Note records and the storage handle
//! - [`assistant`] — Context assembly, question answering, and summarization
//! - [`llm`] — Completion and transcription provider
//! - [`api`] — HTTP routes, request/response schemas, and error mapping
//! - [`server`] — HTTP server startup

pub mod api;
pub mod assistant;
pub mod config;
pub mod db;
pub mod llm;
pub mod notes;
pub mod server;
