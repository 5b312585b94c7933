//! Error type shared by every library operation.

use std::{io, path::PathBuf, time::Duration};

use thiserror::Error;

use crate::backend::Direction;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The backend name does not match any entry in the profile table.
    #[error("unsupported storage backend: '{0}' (expected OSS, SFTP or S3)")]
    UnsupportedBackend(String),

    /// The client exited with a non-zero status.
    #[error("failed to {direction}, return code: {code}")]
    TransferFailed { direction: Direction, code: i32 },

    /// The client was killed by a signal and left no exit code.
    #[error("{direction} client terminated by a signal")]
    Terminated { direction: Direction },

    /// The producer feeding an inline-string upload exited non-zero.
    #[error("inline-string producer failed: {detail}")]
    ProducerFailed { detail: String },

    /// The configured deadline elapsed before the client exited.
    #[error("{direction} did not finish within {after:?}")]
    TimedOut { direction: Direction, after: Duration },

    #[error("failed to spawn {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for child process")]
    Wait {
        #[source]
        source: io::Error,
    },

    /// Opening, creating or inspecting a local file failed.
    #[error("local file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Exit code carried by a [`Error::TransferFailed`], if any.
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::TransferFailed { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
