//! Storage backends and the client actions they map to.
//!
//! The filestream client does not know about "backends" as such; it is told
//! what to do through a single `--meta.action=<action>` flag whose value
//! encodes both the direction and the storage system.  [`PROFILES`] is the
//! one place where that pairing is written down.
//!
//! | Backend          | Name   | Download        | Upload        | Buffer flag              |
//! |------------------|--------|-----------------|---------------|--------------------------|
//! | Object store     | `OSS`  | `downloadOss`   | `uploadOss`   | `--meta.ossBufferSize`   |
//! | Secure copy      | `SFTP` | `DownloadSsh`   | `uploadSsh`   | —                        |
//! | S3-compatible    | `S3`   | `downloadMinio` | `uploadMinio` | `--meta.minioBufferSize` |

use std::{fmt, str::FromStr};

use crate::error::Error;

// ─── Backend ─────────────────────────────────────────────────────────────────

/// Remote storage system a transfer targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Object storage (`OSS`).
    ObjectStore,
    /// Secure-copy server (`SFTP`).
    SecureCopy,
    /// S3-compatible storage such as MinIO (`S3`).
    S3Compatible,
}

impl Backend {
    /// Every supported backend, in table order.
    pub const ALL: [Self; 3] = [Self::ObjectStore, Self::SecureCopy, Self::S3Compatible];

    /// The external name used in config files and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ObjectStore => "OSS",
            Self::SecureCopy => "SFTP",
            Self::S3Compatible => "S3",
        }
    }

    /// Static action/flag profile for this backend.
    pub fn profile(self) -> &'static BackendProfile {
        // PROFILES is indexed in `ALL` order.
        &PROFILES[self as usize]
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive parse of `OSS`, `SFTP` or `S3`.
impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnsupportedBackend(s.to_string()))
    }
}

// ─── Action ──────────────────────────────────────────────────────────────────

/// Operation identifier passed to the client as `--meta.action=<action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    DownloadOss,
    UploadOss,
    DownloadSsh,
    UploadSsh,
    DownloadMinio,
    UploadMinio,
}

impl Action {
    /// Wire value understood by the client binary.
    ///
    /// `DownloadSsh` is capitalised on the wire; the client matches it
    /// verbatim.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DownloadOss => "downloadOss",
            Self::UploadOss => "uploadOss",
            Self::DownloadSsh => "DownloadSsh",
            Self::UploadSsh => "uploadSsh",
            Self::DownloadMinio => "downloadMinio",
            Self::UploadMinio => "uploadMinio",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Direction ───────────────────────────────────────────────────────────────

/// Which way bytes flow relative to the local side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Upload,
    Download,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Upload => "upload",
            Self::Download => "download",
        })
    }
}

// ─── Profile table ───────────────────────────────────────────────────────────

/// Everything that differs between backends.
#[derive(Debug, PartialEq, Eq)]
pub struct BackendProfile {
    pub download: Action,
    pub upload: Action,
    /// Name of the `--meta.<flag>=<bytes>` buffer hint, if the backend takes one.
    pub buffer_flag: Option<&'static str>,
}

impl BackendProfile {
    /// Action for the given direction.
    pub const fn action(&self, direction: Direction) -> Action {
        match direction {
            Direction::Upload => self.upload,
            Direction::Download => self.download,
        }
    }
}

static PROFILES: [BackendProfile; 3] = [
    BackendProfile {
        download: Action::DownloadOss,
        upload: Action::UploadOss,
        buffer_flag: Some("ossBufferSize"),
    },
    BackendProfile {
        download: Action::DownloadSsh,
        upload: Action::UploadSsh,
        buffer_flag: None,
    },
    BackendProfile {
        download: Action::DownloadMinio,
        upload: Action::UploadMinio,
        buffer_flag: Some("minioBufferSize"),
    },
];

// ─── Tests ────────────────────────────────────────────────────────────────────
