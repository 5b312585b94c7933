//! Spawn-and-wait primitive.
//!
//! Every transfer is one child process with its stdio redirected to
//! caller-supplied handles.  [`run`] spawns it, blocks until it exits (or
//! until an optional deadline passes) and hands back the exit status.
//!
//! Children are held in a [`ChildGuard`] while running: if the wait is
//! abandoned for any reason (deadline, panic) the child is killed and reaped
//! on drop so no zombie or orphan outlives the call.

use std::{
    process::{Child, Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

use tracing::{debug, warn};

use crate::{
    backend::Direction,
    error::{Error, Result},
};

/// How often [`wait_with_deadline`] polls the child.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

// ─── Stdio bundle ─────────────────────────────────────────────────────────────

/// Redirections for a single child.
#[derive(Debug)]
pub struct Redirects {
    pub stdin: Stdio,
    pub stdout: Stdio,
    pub stderr: Stdio,
}

impl Default for Redirects {
    fn default() -> Self {
        Self {
            stdin: Stdio::null(),
            stdout: Stdio::inherit(),
            stderr: Stdio::inherit(),
        }
    }
}

// ─── Child guard ──────────────────────────────────────────────────────────────

/// Owns a running child; kills and reaps it on drop unless it was waited.
#[derive(Debug)]
pub struct ChildGuard {
    child: Option<Child>,
}

impl ChildGuard {
    pub const fn new(child: Child) -> Self {
        Self { child: Some(child) }
    }

    /// Mutable access to the child, e.g. to take its stdout.
    pub fn child_mut(&mut self) -> Option<&mut Child> {
        self.child.as_mut()
    }

    /// Block until the child exits, or until `deadline` elapses.
    pub fn wait(mut self, direction: Direction, deadline: Option<Duration>) -> Result<ExitStatus> {
        let Some(child) = self.child.as_mut() else {
            return Err(Error::Wait {
                source: std::io::Error::other("child already reaped"),
            });
        };
        let status = match deadline {
            None => child.wait().map_err(|source| Error::Wait { source })?,
            Some(after) => wait_with_deadline(child, direction, after)?,
        };
        self.child = None;
        Ok(status)
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

// ─── Spawning ─────────────────────────────────────────────────────────────────

/// Spawn `args[0]` with `args[1..]` and the given redirections.
///
/// The [`Command`] (and with it the parent's copies of any handles moved into
/// `redirects`) is dropped before this returns, so pipe ends are owned solely
/// by the child.
pub fn spawn(args: &[String], redirects: Redirects) -> Result<ChildGuard> {
    let (prog, rest) = args.split_first().ok_or_else(|| Error::Spawn {
        program: String::new(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
    })?;

    let child = Command::new(prog)
        .args(rest)
        .stdin(redirects.stdin)
        .stdout(redirects.stdout)
        .stderr(redirects.stderr)
        .spawn()
        .map_err(|source| Error::Spawn {
            program: prog.clone(),
            source,
        })?;

    debug!(pid = child.id(), program = %prog, "spawned child");
    Ok(ChildGuard::new(child))
}

/// Spawn, wait, and map a non-zero exit to [`Error::TransferFailed`].
pub fn run(
    direction: Direction,
    args: &[String],
    redirects: Redirects,
    deadline: Option<Duration>,
) -> Result<()> {
    let status = spawn(args, redirects)?.wait(direction, deadline)?;
    check_status(direction, status)
}

/// Translate an exit status into the crate's error taxonomy.
pub fn check_status(direction: Direction, status: ExitStatus) -> Result<()> {
    match status.code() {
        Some(0) => {
            debug!(%direction, "client exited 0");
            Ok(())
        },
        Some(code) => {
            warn!(%direction, code, "client exited non-zero");
            Err(Error::TransferFailed { direction, code })
        },
        None => {
            warn!(%direction, "client terminated by signal");
            Err(Error::Terminated { direction })
        },
    }
}

fn wait_with_deadline(child: &mut Child, direction: Direction, after: Duration) -> Result<ExitStatus> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait().map_err(|source| Error::Wait { source })? {
            return Ok(status);
        }
        if started.elapsed() >= after {
            warn!(%direction, ?after, pid = child.id(), "deadline elapsed; killing client");
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::TimedOut { direction, after });
        }
        thread::sleep(POLL_INTERVAL);
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
