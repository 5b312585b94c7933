//! Configuration types and loading logic.
//!
//! `Config` is a direct 1-to-1 mapping of `filestream.toml`.  Every field has
//! a `Default` so the file is optional; the CLI can still be pointed at a
//! client through `--backend`/`--sink` and the defaults below.
//!
//! # File format
//!
//! ```toml
//! [client]
//! path         = "/usr/local/bin/filestream-client"
//! host_info    = "/etc/filestream/host_info.json"
//! timeout_secs = 3600      # optional; omit to wait forever
//!
//! [storage]
//! backend = "OSS"          # OSS | SFTP | S3
//! sink    = "default"
//! ```
//!
//! # Layering
//!
//! [`PartialConfig`] mirrors `Config` with every field optional.  A global
//! file and a per-directory file are each parsed into a `PartialConfig`,
//! merged field by field (local wins), then [`PartialConfig::resolve`]d.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    client::FileStreamClient,
    context::SessionContext,
    error::Result,
};

// ─── Top-level ────────────────────────────────────────────────────────────────

/// Root configuration object, deserialised from `filestream.toml`.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the client binary and its host-info file live.
    #[serde(default)]
    pub client: ClientConfig,

    /// Which backend and sink transfers target.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Build a client from this config.
    ///
    /// Fails with [`crate::Error::UnsupportedBackend`] when `[storage].backend` is
    /// not a known backend name.
    pub fn build_client(&self) -> Result<FileStreamClient> {
        let client =
            FileStreamClient::from_storage_name(&self.client, &self.storage.backend, &*self.storage.sink)?;
        Ok(match self.client.timeout() {
            Some(after) => client.with_deadline(after),
            None => client,
        })
    }
}

// ─── [client] ─────────────────────────────────────────────────────────────────

/// Location of the external client and the host-info file it reads.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Path to the filestream client executable.  A bare name is looked up
    /// on `$PATH`.
    #[serde(default = "default_client_path")]
    pub path: PathBuf,

    /// Path to the host-info descriptor passed as `--hostInfoFilePath`.
    #[serde(default = "default_host_info")]
    pub host_info: PathBuf,

    /// Kill the client after this many seconds.  `None` waits forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            path: default_client_path(),
            host_info: default_host_info(),
            timeout_secs: None,
        }
    }
}

impl SessionContext for ClientConfig {
    fn client_path(&self) -> &Path {
        &self.path
    }

    fn host_info_path(&self) -> &Path {
        &self.host_info
    }
}

// ─── [storage] ────────────────────────────────────────────────────────────────

/// Target backend and sink.
///
/// `backend` is kept as text so an unknown name surfaces as
/// [`crate::Error::UnsupportedBackend`] when the client is built rather than as a
/// TOML parse error.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: String,

    #[serde(default = "default_sink")]
    pub sink: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            sink: default_sink(),
        }
    }
}

// ─── Defaults ─────────────────────────────────────────────────────────────────

pub fn default_client_path() -> PathBuf {
    PathBuf::from("filestream-client")
}

pub fn default_host_info() -> PathBuf {
    PathBuf::from("host_info.json")
}

pub fn default_backend() -> String {
    "OSS".into()
}

pub fn default_sink() -> String {
    "default".into()
}

// ─── Partial (layered) config ─────────────────────────────────────────────────

/// `Config` with every leaf optional, used to layer several files.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct PartialConfig {
    #[serde(default)]
    pub client: PartialClient,
    #[serde(default)]
    pub storage: PartialStorage,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct PartialClient {
    pub path: Option<PathBuf>,
    pub host_info: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct PartialStorage {
    pub backend: Option<String>,
    pub sink: Option<String>,
}

impl PartialConfig {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            client: PartialClient {
                path: other.client.path.or(self.client.path),
                host_info: other.client.host_info.or(self.client.host_info),
                timeout_secs: other.client.timeout_secs.or(self.client.timeout_secs),
            },
            storage: PartialStorage {
                backend: other.storage.backend.or(self.storage.backend),
                sink: other.storage.sink.or(self.storage.sink),
            },
        }
    }

    /// Fill unset fields with defaults.
    pub fn resolve(self) -> Config {
        Config {
            client: ClientConfig {
                path: self.client.path.unwrap_or_else(default_client_path),
                host_info: self.client.host_info.unwrap_or_else(default_host_info),
                timeout_secs: self.client.timeout_secs,
            },
            storage: StorageConfig {
                backend: self.storage.backend.unwrap_or_else(default_backend),
                sink: self.storage.sink.unwrap_or_else(default_sink),
            },
        }
    }
}

// ─── Loader ───────────────────────────────────────────────────────────────────

/// Errors raised while reading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Parse `path` as a [`PartialConfig`].
///
/// Returns `Ok(None)` when the file does not exist and an error when it
/// exists but cannot be read or is not valid TOML.
pub fn parse_partial(path: &Path) -> std::result::Result<Option<PartialConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Read and parse a full `Config` from `path`, defaulting when absent.
pub fn load_config(path: &Path) -> std::result::Result<Config, ConfigError> {
    Ok(parse_partial(path)?.unwrap_or_default().resolve())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::{backend::Backend, error::Error};

    // ── Defaults ─────────────────────────────────────────────────────────────

    #[test]
    fn default_config_targets_oss() {
        let cfg = Config::default();
        assert_eq!(cfg.storage.backend, "OSS");
        assert_eq!(cfg.storage.sink, "default");
        assert!(cfg.client.timeout_secs.is_none());
    }

    #[test]
    fn empty_toml_deserialises_to_defaults() {
        let cfg: Config = toml::from_str("").expect("empty toml should parse");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        let cfg: Config = toml::from_str(
            r#"
            [storage]
            backend = "SFTP"
            "#,
        )
        .expect("parse failed");
        assert_eq!(cfg.storage.backend, "SFTP");
        assert_eq!(cfg.storage.sink, default_sink());
        assert_eq!(cfg.client.path, default_client_path());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let original = Config {
            client: ClientConfig {
                path: "/opt/fs/client".into(),
                host_info: "/opt/fs/hosts.json".into(),
                timeout_secs: Some(60),
            },
            storage: StorageConfig {
                backend: "S3".into(),
                sink: "minio-a".into(),
            },
        };
        let text = toml::to_string(&original).expect("serialisation failed");
        let recovered: Config = toml::from_str(&text).expect("deserialisation failed");
        assert_eq!(recovered, original);
    }

    // ── build_client ─────────────────────────────────────────────────────────

    #[test]
    fn build_client_resolves_backend() {
        let mut cfg = Config::default();
        cfg.storage.backend = "s3".into();
        let client = cfg.build_client().unwrap();
        assert_eq!(client.backend(), Backend::S3Compatible);
        assert_eq!(client.sink(), "default");
    }

    #[test]
    fn build_client_rejects_unknown_backend() {
        let mut cfg = Config::default();
        cfg.storage.backend = "ftp".into();
        assert!(matches!(
            cfg.build_client().unwrap_err(),
            Error::UnsupportedBackend(_)
        ));
    }

    // ── merge / resolve ──────────────────────────────────────────────────────

    #[test]
    fn merge_prefers_local_values() {
        let global = PartialConfig {
            client: PartialClient {
                path: Some("/global/client".into()),
                host_info: Some("/global/hosts.json".into()),
                timeout_secs: Some(10),
            },
            storage: PartialStorage {
                backend: Some("OSS".into()),
                sink: Some("g".into()),
            },
        };
        let local = PartialConfig {
            storage: PartialStorage {
                backend: Some("SFTP".into()),
                sink: None,
            },
            ..PartialConfig::default()
        };
        let cfg = global.merge(local).resolve();
        assert_eq!(cfg.client.path, PathBuf::from("/global/client"));
        assert_eq!(cfg.client.timeout_secs, Some(10));
        assert_eq!(cfg.storage.backend, "SFTP");
        assert_eq!(cfg.storage.sink, "g");
    }

    #[test]
    fn resolve_empty_partial_is_default() {
        assert_eq!(PartialConfig::default().resolve(), Config::default());
    }

    // ── load_config ───────────────────────────────────────────────────────────

    #[test]
    fn load_config_returns_defaults_for_missing_file() {
        let path = Path::new("/tmp/this-file-should-never-exist-fs123.toml");
        assert!(!path.exists(), "test precondition: file must not exist");
        assert_eq!(load_config(path).unwrap(), Config::default());
    }

    #[test]
    fn load_config_parses_valid_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"
            [client]
            path      = "/opt/fs/client"
            host_info = "/opt/fs/hosts.json"

            [storage]
            sink = "nightly"
            "#
        )
        .unwrap();

        let cfg = load_config(f.path()).expect("should parse valid toml");
        assert_eq!(cfg.client.path, PathBuf::from("/opt/fs/client"));
        assert_eq!(cfg.storage.sink, "nightly");
        assert_eq!(cfg.storage.backend, "OSS");
    }

    #[test]
    fn load_config_errors_on_invalid_toml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "not valid toml ][[[").unwrap();
        assert!(matches!(
            load_config(f.path()).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }
}
