//! Shared fixtures: a POSIX-shell stand-in for the filestream client.
//!
//! The stub keeps everything next to the host-info file it is handed, so each
//! test gets an isolated "remote" simply by using its own temp directory:
//!
//! - `calls.log`   — one line per invocation with the full argument list
//! - `store/<key>` — uploaded bytes, `/` in the remote path replaced by `_`
//!
//! Special remote paths drive failure modes:
//!
//! | Remote path  | Behaviour                                 |
//! |--------------|-------------------------------------------|
//! | `exit/<n>`   | exit with status `n` without touching I/O |
//! | `sleep/<n>`  | sleep `n` seconds, then exit 0            |
//! | `stderr/<m>` | write `m` to stderr, drain stdin, exit 0  |

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use filestream::StaticContext;

const STUB: &str = r#"#!/bin/sh
action=""
name=""
hostinfo=""
for arg in "$@"; do
    case "$arg" in
        --meta.action=*) action="${arg#--meta.action=}" ;;
        --meta.filename=*) name="${arg#--meta.filename=}" ;;
        --hostInfoFilePath=*) hostinfo="${arg#--hostInfoFilePath=}" ;;
    esac
done
dir="$(dirname "$hostinfo")"
printf '%s\n' "$*" >> "$dir/calls.log"
case "$name" in
    exit/*) exit "${name#exit/}" ;;
    sleep/*) exec sleep "${name#sleep/}" ;;
    stderr/*) printf '%s\n' "${name#stderr/}" >&2; cat > /dev/null; exit 0 ;;
esac
mkdir -p "$dir/store"
key="$dir/store/$(printf '%s' "$name" | tr '/' '_')"
case "$action" in
    upload*) cat > "$key" ;;
    download*|Download*) cat "$key" ;;
    *) printf 'unknown action: %s\n' "$action" >&2; exit 64 ;;
esac
"#;

/// Path to the stub client, written once per test binary.
pub fn stub_client() -> &'static Path {
    static STUB_PATH: OnceLock<PathBuf> = OnceLock::new();
    STUB_PATH.get_or_init(|| {
        let dir = std::env::temp_dir().join(format!("filestream-stub-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("filestream-client");
        fs::write(&path, STUB).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    })
}

/// An isolated remote: a temp dir holding the host-info file the stub reads.
pub struct Remote {
    pub root: tempfile::TempDir,
    pub host_info: PathBuf,
}

impl Remote {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let host_info = root.path().join("host_info.json");
        fs::write(&host_info, "{}").unwrap();
        Self { root, host_info }
    }

    pub fn context(&self) -> StaticContext {
        StaticContext::new(stub_client(), &self.host_info)
    }

    /// Bytes stored under `remote`, if any upload reached it.
    pub fn stored(&self, remote: &str) -> Option<Vec<u8>> {
        fs::read(self.root.path().join("store").join(remote.replace('/', "_"))).ok()
    }

    /// Every recorded invocation, one argument string per line.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.root.path().join("calls.log"))
            .map(|s| s.lines().map(str::to_owned).collect())
            .unwrap_or_default()
    }
}
