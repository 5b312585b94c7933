//! Session context consumed by [`crate::FileStreamClient`].
//!
//! The surrounding backup/restore orchestrator knows where the filestream
//! client lives and which host-info file it should read.  Both are opaque
//! paths from this crate's point of view; they are forwarded to the client
//! untouched.

use std::path::{Path, PathBuf};

/// Provides the two paths every client invocation needs.
pub trait SessionContext {
    /// Path to the external filestream client executable.
    fn client_path(&self) -> &Path;

    /// Path to the host-info descriptor file read by the client.
    fn host_info_path(&self) -> &Path;
}

/// A fixed pair of paths, for callers that have no richer context object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticContext {
    pub client: PathBuf,
    pub host_info: PathBuf,
}

impl StaticContext {
    pub fn new(client: impl Into<PathBuf>, host_info: impl Into<PathBuf>) -> Self {
        Self {
            client: client.into(),
            host_info: host_info.into(),
        }
    }
}

impl SessionContext for StaticContext {
    fn client_path(&self) -> &Path {
        &self.client
    }

    fn host_info_path(&self) -> &Path {
        &self.host_info
    }
}

impl<T: SessionContext + ?Sized> SessionContext for &T {
    fn client_path(&self) -> &Path {
        (**self).client_path()
    }

    fn host_info_path(&self) -> &Path {
        (**self).host_info_path()
    }
}
