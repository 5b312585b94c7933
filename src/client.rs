//! The transfer invoker.
//!
//! [`FileStreamClient`] turns "put these bytes at that remote path" into an
//! invocation of the external filestream client and reports whether it
//! worked.  It holds no OS resources between calls: each method spawns its
//! own child, waits for it, and returns.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use filestream::{Backend, FileStreamClient, StaticContext};
//!
//! let ctx = StaticContext::new("/usr/local/bin/filestream-client", "/etc/host_info.json");
//! let client = FileStreamClient::new(&ctx, Backend::ObjectStore, "default");
//! client.upload_from_file("backup/keyring", Path::new("/var/lib/mysql/keyring"), None)?;
//! client.upload_from_string("backup/keyring_path", "/var/lib/mysql/keyring", None)?;
//! # Ok::<(), filestream::Error>(())
//! ```

use std::{
    fs::File,
    path::Path,
    process::{ChildStdout, Stdio},
    time::{Duration, Instant},
};

use tracing::info;

use crate::{
    backend::{Backend, Direction},
    context::SessionContext,
    error::{Error, Result},
    process::{self, Redirects},
    runner::{self, Target},
};

/// Program used to emit inline-string content.  `printf '%s\n'` writes the
/// argument verbatim, unlike `echo`, which may interpret leading dashes or
/// backslashes.
const PRODUCER: [&str; 2] = ["printf", "%s\n"];

// ─── Upload options ───────────────────────────────────────────────────────────

/// Per-call knobs for [`FileStreamClient::upload_from_stream`].
#[derive(Debug, Default)]
pub struct UploadOptions {
    /// Byte size of the stream, forwarded as the backend's buffer flag.
    pub size_hint: Option<u64>,
    /// Request the fixed inline-string buffer size.
    pub inline_string: bool,
    /// Where the client's stderr goes.  `None` inherits ours.
    pub stderr: Option<Stdio>,
}

impl UploadOptions {
    pub fn with_size_hint(size: u64) -> Self {
        Self {
            size_hint: Some(size),
            ..Self::default()
        }
    }
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Invoker bound to one client binary, host-info file, sink and backend.
#[derive(Debug, Clone)]
pub struct FileStreamClient {
    target: Target,
    deadline: Option<Duration>,
}

impl FileStreamClient {
    /// Bind to `ctx` with an already-resolved backend.
    pub fn new(ctx: &impl SessionContext, backend: Backend, sink: impl Into<String>) -> Self {
        Self {
            target: Target {
                client: ctx.client_path().to_path_buf(),
                host_info: ctx.host_info_path().to_path_buf(),
                sink: sink.into(),
                backend,
            },
            deadline: None,
        }
    }

    /// Bind to `ctx`, resolving the backend from its external name.
    ///
    /// Fails with [`Error::UnsupportedBackend`] here, before any transfer is
    /// attempted, when `storage` is not `OSS`, `SFTP` or `S3`.
    pub fn from_storage_name(
        ctx: &impl SessionContext,
        storage: &str,
        sink: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(ctx, storage.parse()?, sink))
    }

    /// Kill the client and fail with [`Error::TimedOut`] if it runs longer
    /// than `after`.
    #[must_use]
    pub const fn with_deadline(mut self, after: Duration) -> Self {
        self.deadline = Some(after);
        self
    }

    pub const fn backend(&self) -> Backend {
        self.target.backend
    }

    pub fn sink(&self) -> &str {
        &self.target.sink
    }

    pub const fn target(&self) -> &Target {
        &self.target
    }

    // ── Streams ───────────────────────────────────────────────────────────────

    /// Upload whatever `input` yields to `remote`.
    ///
    /// `input` becomes the client's stdin: a [`File`], a [`ChildStdout`], or
    /// [`Stdio::inherit`] to pass our own stdin through.
    pub fn upload_from_stream(
        &self,
        remote: &str,
        input: impl Into<Stdio>,
        options: UploadOptions,
    ) -> Result<()> {
        let args = runner::upload_args(
            &self.target,
            remote,
            options.size_hint,
            options.inline_string,
        );
        info!(command = ?args, "upload command");
        let redirects = Redirects {
            stdin: input.into(),
            stdout: Stdio::inherit(),
            stderr: options.stderr.unwrap_or_else(Stdio::inherit),
        };
        process::run(Direction::Upload, &args, redirects, self.deadline)
    }

    /// Download `remote` into `output`, which becomes the client's stdout.
    pub fn download_to_stream(
        &self,
        remote: &str,
        output: impl Into<Stdio>,
        stderr: Option<Stdio>,
    ) -> Result<()> {
        let args = runner::download_args(&self.target, remote);
        info!(command = ?args, "download command");
        let redirects = Redirects {
            stdin: Stdio::null(),
            stdout: output.into(),
            stderr: stderr.unwrap_or_else(Stdio::inherit),
        };
        process::run(Direction::Download, &args, redirects, self.deadline)
    }

    // ── Files ─────────────────────────────────────────────────────────────────

    /// Upload the local file at `local` to `remote`, passing its size as the
    /// buffer hint.  `stderr` receives the client's stderr; `None` inherits
    /// ours.
    pub fn upload_from_file(
        &self,
        remote: &str,
        local: &Path,
        stderr: Option<Stdio>,
    ) -> Result<()> {
        let file = File::open(local).map_err(|e| Error::io(local, e))?;
        let size = file.metadata().map_err(|e| Error::io(local, e))?.len();
        let options = UploadOptions {
            stderr,
            ..UploadOptions::with_size_hint(size)
        };
        self.upload_from_stream(remote, file, options)
    }

    /// Download `remote` into the local file at `local`, creating or
    /// truncating it.
    ///
    /// The file is opened before the client is spawned.  On failure a
    /// partially written file may remain.
    pub fn download_to_file(
        &self,
        remote: &str,
        local: &Path,
        stderr: Option<Stdio>,
    ) -> Result<()> {
        let file = File::create(local).map_err(|e| Error::io(local, e))?;
        self.download_to_stream(remote, file, stderr)
    }

    // ── Inline strings ────────────────────────────────────────────────────────

    /// Upload `content` followed by a newline to `remote`.
    ///
    /// The bytes come from a short-lived producer child whose stdout is piped
    /// into the upload client.  Both run concurrently.  The upload's result
    /// takes precedence; if it succeeded, a producer that exited non-zero (or
    /// was killed) still fails the call with [`Error::ProducerFailed`].
    ///
    /// `stderr` is attached to the upload client.  A configured deadline
    /// covers the whole call: the producer only gets what the upload left.
    pub fn upload_from_string(
        &self,
        remote: &str,
        content: &str,
        stderr: Option<Stdio>,
    ) -> Result<()> {
        let started = Instant::now();
        let producer_args = vec![
            PRODUCER[0].to_string(),
            PRODUCER[1].to_string(),
            content.to_string(),
        ];
        let mut producer = process::spawn(&producer_args, Redirects {
            stdin: Stdio::null(),
            stdout: Stdio::piped(),
            stderr: Stdio::inherit(),
        })?;

        let pipe: ChildStdout = producer
            .child_mut()
            .and_then(|c| c.stdout.take())
            .ok_or_else(|| Error::ProducerFailed {
                detail: "producer did not expose stdout".into(),
            })?;

        let options = UploadOptions {
            inline_string: true,
            stderr,
            ..UploadOptions::default()
        };
        self.upload_from_stream(remote, pipe, options)?;

        let status = producer
            .wait(Direction::Upload, remaining(self.deadline, started))
            .map_err(|e| match (e, self.deadline) {
                (Error::TimedOut { direction, .. }, Some(after)) => {
                    Error::TimedOut { direction, after }
                },
                (e, _) => e,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::ProducerFailed {
                detail: format!("{} exited with {status}", PRODUCER[0]),
            })
        }
    }
}

/// What is left of `deadline` once `started` has elapsed.
fn remaining(deadline: Option<Duration>, started: Instant) -> Option<Duration> {
    deadline.map(|after| after.saturating_sub(started.elapsed()))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
