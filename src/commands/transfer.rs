//! Transfer subcommands — one client invocation each.
//!
//! | Command    | Library call                                  | UI            |
//! |------------|-----------------------------------------------|---------------|
//! | `upload`   | [`FileStreamClient::upload_from_file`]        | spinner       |
//! | `download` | [`FileStreamClient::download_to_file`]        | spinner       |
//! | `put`      | [`FileStreamClient::upload_from_string`]      | spinner       |
//! | `cat`      | [`FileStreamClient::download_to_stream`]      | none (stdout) |
//! | `push`     | [`FileStreamClient::upload_from_stream`]      | none (stdin)  |

use std::{path::Path, process::Stdio};

use anyhow::{Context, Result, bail};
use filestream::{FileStreamClient, UploadOptions};

use crate::ui::{StageOutcome, run_stage};

/// `filestream upload <remote> <local>`
pub fn upload(client: &FileStreamClient, remote: &str, local: &Path) -> Result<()> {
    let label = format!("Upload {} → {remote}", local.display());
    finish(run_stage(&label, || {
        client
            .upload_from_file(remote, local, None)
            .with_context(|| format!("uploading {} to {remote}", local.display()))
    }))
}

/// `filestream download <remote> <local>`
pub fn download(client: &FileStreamClient, remote: &str, local: &Path) -> Result<()> {
    let label = format!("Download {remote} → {}", local.display());
    finish(run_stage(&label, || {
        client
            .download_to_file(remote, local, None)
            .with_context(|| format!("downloading {remote} to {}", local.display()))
    }))
}

/// `filestream put <remote> <content>`
pub fn put(client: &FileStreamClient, remote: &str, content: &str) -> Result<()> {
    let label = format!("Put {remote}");
    finish(run_stage(&label, || {
        client
            .upload_from_string(remote, content, None)
            .with_context(|| format!("writing inline content to {remote}"))
    }))
}

/// `filestream cat <remote>` — the client writes straight to our stdout.
pub fn cat(client: &FileStreamClient, remote: &str) -> Result<()> {
    client
        .download_to_stream(remote, Stdio::inherit(), None)
        .with_context(|| format!("downloading {remote} to stdout"))
}

/// `filestream push <remote> [--size N]` — the client reads our stdin.
pub fn push(client: &FileStreamClient, remote: &str, size: Option<u64>) -> Result<()> {
    let options = UploadOptions {
        size_hint: size,
        ..UploadOptions::default()
    };
    client
        .upload_from_stream(remote, Stdio::inherit(), options)
        .with_context(|| format!("uploading stdin to {remote}"))
}

/// Print `outcome` and convert a failure into an error for `main`.
fn finish(outcome: StageOutcome) -> Result<()> {
    outcome.print();
    if outcome.failed() {
        bail!("{} failed", outcome.label);
    }
    Ok(())
}
