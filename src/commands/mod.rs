//! Subcommand handlers.
//!
//! | File          | Invocation                                     | Description                  |
//! |---------------|------------------------------------------------|------------------------------|
//! | `init.rs`     | `filestream init`                              | Scaffold a `filestream.toml` |
//! | `transfer.rs` | `upload`, `download`, `put`, `cat`, `push`     | One client invocation each   |

pub mod init;
pub mod transfer;
