//! Command-line interface definition.
//!
//! All argument parsing lives here so the rest of the codebase can stay
//! agnostic to `clap`.  The `Cli` struct is parsed once in `main` and then
//! passed (by reference) into the command handlers.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI arguments, shared across every subcommand.
#[derive(Parser, Debug)]
#[command(
    name    = "filestream",
    about   = "Upload and download through an external filestream client",
    version,
    help_template = "\
{before-help}{name} {version}
{about}

{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Cli {
    /// Path to the configuration file.
    ///
    /// Defaults to `filestream.toml` in the current working directory.  Values
    /// found there override the global `~/.config/filestream/config.toml`.
    #[arg(short, long, default_value = "filestream.toml")]
    pub config: PathBuf,

    /// Override `[storage].backend` (OSS, SFTP or S3).
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Override `[storage].sink`.
    #[arg(long, global = true)]
    pub sink: Option<String>,

    /// Print the parsed configuration and exit without running anything.
    #[arg(long)]
    pub print_config: bool,

    /// Log each client invocation to stderr.  Repeat for debug output.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Subcommand>,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
pub enum Subcommand {
    /// Scaffold a `filestream.toml` in the current directory.
    ///
    /// Exits with an error if the file already exists.
    Init,

    /// Upload a local file to a remote path.
    Upload {
        /// Remote path (`--meta.filename`).
        remote: String,
        /// Local file to read.
        local: PathBuf,
    },

    /// Download a remote path into a local file, creating or truncating it.
    Download {
        /// Remote path (`--meta.filename`).
        remote: String,
        /// Local file to write.
        local: PathBuf,
    },

    /// Upload a literal string (plus a trailing newline) to a remote path.
    Put {
        /// Remote path (`--meta.filename`).
        remote: String,
        /// Content to store.
        content: String,
    },

    /// Download a remote path to stdout.
    Cat {
        /// Remote path (`--meta.filename`).
        remote: String,
    },

    /// Upload stdin to a remote path.
    Push {
        /// Remote path (`--meta.filename`).
        remote: String,
        /// Expected byte size of stdin, forwarded as the buffer hint.
        #[arg(long)]
        size: Option<u64>,
    },
}
