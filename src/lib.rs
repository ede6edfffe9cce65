//! Command-line client for Raggadon, a project-scoped memory service for AI
//! coding agents.
//!
//! The service itself (embeddings, storage, similarity search) runs elsewhere
//! and is reached over HTTP. This crate covers the client side:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `rag save <content>` | Store a memory for the current project |
//! | `rag search <query>` | Show the most similar memories |
//! | `rag status` | Server health, current mode, project statistics |
//! | `rag start` | Launch the server script in the background |
//! | `rag mode [active\|silent\|ask\|show]` | Show or change the auto-save mode |
//! | `rag init` | Copy the CLAUDE.md template into the project |
//! | `rag auto <content>` | Save the key snippets found in a text |
//!
//! The project is the name of the current directory.
//!
//! # Modules
//!
//! - [`client`] — Typed HTTP client with per-operation timeouts and error classification
//! - [`mode`] — The persisted auto-save mode and its legacy migration
//! - [`timestamp`] — German display format for server timestamps
//! - [`autosave`] — Heuristics that pick snippets worth saving
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`cli`] — Subcommand implementations

pub mod autosave;
pub mod cli;
pub mod client;
pub mod config;
pub mod mode;
pub mod timestamp;
