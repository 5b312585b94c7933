//! `filestream` — command-line front end for the filestream client invoker.
//!
//! # Usage
//!
//! ```text
//! filestream init                          # scaffold filestream.toml
//! filestream upload <remote> <local>       # file → remote
//! filestream download <remote> <local>     # remote → file
//! filestream put <remote> <content>        # literal string → remote
//! filestream cat <remote>                  # remote → stdout
//! filestream push <remote> [--size N]      # stdin → remote
//! filestream --print-config                # show the merged config
//! ```
//!
//! `--backend`, `--sink` and `-v` apply to every subcommand.
//!
//! # Module layout
//!
//! | Module                   | Responsibility                              |
//! |--------------------------|---------------------------------------------|
//! | [`cli`]                  | Argument types parsed by clap               |
//! | [`ui`]                   | Spinner and outcome lines                   |
//! | [`commands::init`]       | `filestream init` subcommand                |
//! | [`commands::transfer`]   | Transfer subcommands                        |

mod cli;
mod commands;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Subcommand};
use filestream::config::{Config, PartialConfig, parse_partial};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // ── filestream init ───────────────────────────────────────────────────────
    if cli.command == Some(Subcommand::Init) {
        return commands::init::run(&cli.config);
    }

    let cfg = load_merged_config(&cli)?;

    if cli.print_config {
        println!("{cfg:#?}");
        return Ok(());
    }

    let client = || cfg.build_client().context("invalid [storage] configuration");

    match &cli.command {
        None => anyhow::bail!("no subcommand given; run 'filestream --help' for usage"),
        Some(Subcommand::Init) => commands::init::run(&cli.config),
        Some(Subcommand::Upload { remote, local }) => {
            commands::transfer::upload(&client()?, remote, local)
        },
        Some(Subcommand::Download { remote, local }) => {
            commands::transfer::download(&client()?, remote, local)
        },
        Some(Subcommand::Put { remote, content }) => {
            commands::transfer::put(&client()?, remote, content)
        },
        Some(Subcommand::Cat { remote }) => commands::transfer::cat(&client()?, remote),
        Some(Subcommand::Push { remote, size }) => {
            commands::transfer::push(&client()?, remote, *size)
        },
    }
}

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` selects `info` (invocations) and
/// `-vv` selects `debug` (spawn/exit details).
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "filestream=warn",
        1 => "filestream=info",
        _ => "filestream=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load configuration from two sources, merge them, then apply CLI overrides.
///
/// 1. `~/.config/filestream/config.toml` — global defaults (client path, host info)
/// 2. `--config` (default: `./filestream.toml`) — per-directory overrides
/// 3. `--backend` / `--sink`
///
/// Local values win on a per-field basis.  Either file may be absent.  A
/// global file that cannot be read or parsed is skipped with a warning; a
/// broken local file is an error.
fn load_merged_config(cli: &Cli) -> Result<Config> {
    let global_path = dirs_next::config_dir().map(|d| d.join("filestream").join("config.toml"));

    let global: PartialConfig = global_path
        .as_deref()
        .and_then(|p| match parse_partial(p) {
            Ok(partial) => partial,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable global config");
                None
            },
        })
        .unwrap_or_default();

    let local: PartialConfig = if let Some(p) = parse_partial(&cli.config)? {
        p
    } else {
        eprintln!(
            "Warning: config file '{}' not found, using defaults.\n\
             Run 'filestream init' to generate a starter config.",
            cli.config.display()
        );
        PartialConfig::default()
    };

    let mut merged = global.merge(local);
    if let Some(backend) = &cli.backend {
        merged.storage.backend = Some(backend.clone());
    }
    if let Some(sink) = &cli.sink {
        merged.storage.sink = Some(sink.clone());
    }
    Ok(merged.resolve())
}
