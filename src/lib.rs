//! `filestream` — a thin invoker for an external filestream transfer client.
//!
//! # Overview
//!
//! Backup and restore tooling moves bytes to and from remote storage by
//! running a separate client binary.  This crate builds that binary's command
//! line, wires its stdin/stdout to a file, a pipe or an in-memory string, and
//! turns its exit code into a typed result.  The transfer protocol, retries
//! and authentication all live in the client; nothing here touches the
//! network.
//!
//! # Module layout
//!
//! | Module        | Responsibility                                      |
//! |---------------|-----------------------------------------------------|
//! | [`backend`]   | Backend → action / buffer-flag table                |
//! | [`runner`]    | Pure argument-list construction                     |
//! | [`process`]   | Spawn with redirected stdio, block-wait, guard      |
//! | [`client`]    | [`FileStreamClient`], the public transfer API       |
//! | [`context`]   | [`SessionContext`] collaborator trait               |
//! | [`config`]    | `filestream.toml` types and layered loader          |
//! | [`error`]     | [`Error`] and [`Result`]                            |

pub mod backend;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod process;
pub mod runner;

pub use backend::{Action, Backend, Direction};
pub use client::{FileStreamClient, UploadOptions};
pub use context::{SessionContext, StaticContext};
pub use error::{Error, Result};
