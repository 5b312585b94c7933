//! Command argument construction helpers.
//!
//! This module is responsible for *building* the argument lists that will be
//! passed to the filestream client.  It does **not** execute anything —
//! process execution lives in [`crate::process`].  Every function here is
//! pure and unit-testable without spawning a child.
//!
//! # Invocation shape
//!
//! ```text
//! <client> --meta.action=<action> --meta.sink=<sink> --meta.filename=<remote>
//!          --hostInfoFilePath=<path> [--meta.<bufferFlag>=<bytes>]
//! ```

use std::path::PathBuf;

use crate::backend::{Backend, Direction};

/// Buffer size requested for inline-string uploads.
pub const INLINE_BUFFER_SIZE: u64 = 102_400;

// ─── Target ───────────────────────────────────────────────────────────────────

/// Immutable per-session invocation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub client: PathBuf,
    pub host_info: PathBuf,
    pub sink: String,
    pub backend: Backend,
}

// ─── Builders ─────────────────────────────────────────────────────────────────

/// Builds the argument list shared by every invocation:
///
/// ```text
/// <client> --meta.action=<action> --meta.sink=<sink> --meta.filename=<remote> --hostInfoFilePath=<path>
/// ```
pub fn base_args(target: &Target, direction: Direction, remote: &str) -> Vec<String> {
    let action = target.backend.profile().action(direction);
    vec![
        target.client.to_string_lossy().into_owned(),
        format!("--meta.action={action}"),
        format!("--meta.sink={}", target.sink),
        format!("--meta.filename={remote}"),
        format!("--hostInfoFilePath={}", target.host_info.to_string_lossy()),
    ]
}

/// Arguments for a download of `remote`.
pub fn download_args(target: &Target, remote: &str) -> Vec<String> {
    base_args(target, Direction::Download, remote)
}

/// Arguments for an upload of `remote`.
///
/// A buffer-size flag is appended when [`buffer_size`] yields a value and the
/// backend has a flag for it.
pub fn upload_args(
    target: &Target,
    remote: &str,
    size_hint: Option<u64>,
    inline_string: bool,
) -> Vec<String> {
    let mut cmd = base_args(target, Direction::Upload, remote);
    if let (Some(flag), Some(bytes)) = (
        target.backend.profile().buffer_flag,
        buffer_size(size_hint, inline_string),
    ) {
        cmd.push(format!("--meta.{flag}={bytes}"));
    }
    cmd
}

/// Buffer size to request: an explicit size hint wins over the inline-string
/// default.
pub const fn buffer_size(size_hint: Option<u64>, inline_string: bool) -> Option<u64> {
    match (size_hint, inline_string) {
        (Some(n), _) => Some(n),
        (None, true) => Some(INLINE_BUFFER_SIZE),
        (None, false) => None,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_target(backend: Backend) -> Target {
        Target {
            client: "/opt/filestream/client".into(),
            host_info: "/etc/filestream/host_info.json".into(),
            sink: "default".into(),
            backend,
        }
    }

    fn buffer_flags(args: &[String]) -> Vec<&String> {
        args.iter().filter(|a| a.contains("BufferSize=")).collect()
    }

    // ── buffer_size ───────────────────────────────────────────────────────────

    #[test]
    fn buffer_size_none_without_hint_or_inline() {
        assert_eq!(buffer_size(None, false), None);
    }

    #[test]
    fn buffer_size_inline_default() {
        assert_eq!(buffer_size(None, true), Some(102_400));
    }

    #[test]
    fn buffer_size_hint_overrides_inline() {
        assert_eq!(buffer_size(Some(7), true), Some(7));
        assert_eq!(buffer_size(Some(0), false), Some(0));
    }

    // ── base_args ─────────────────────────────────────────────────────────────

    #[test]
    fn base_args_start_with_client() {
        let args = download_args(&make_target(Backend::ObjectStore), "a/b");
        assert_eq!(args[0], "/opt/filestream/client");
        assert_eq!(args.len(), 5);
    }

    #[test]
    fn download_args_never_carry_buffer_flag() {
        for b in Backend::ALL {
            assert!(buffer_flags(&download_args(&make_target(b), "x")).is_empty());
        }
    }

    #[test]
    fn remote_path_with_spaces_is_one_argument() {
        let args = download_args(&make_target(Backend::SecureCopy), "my dir/file 1");
        assert!(args.contains(&"--meta.filename=my dir/file 1".to_string()));
    }

    // ── upload_args ───────────────────────────────────────────────────────────

    #[test]
    fn inline_upload_sets_102400_for_oss_and_s3() {
        let oss = upload_args(&make_target(Backend::ObjectStore), "k", None, true);
        assert_eq!(buffer_flags(&oss), vec!["--meta.ossBufferSize=102400"]);

        let s3 = upload_args(&make_target(Backend::S3Compatible), "k", None, true);
        assert_eq!(buffer_flags(&s3), vec!["--meta.minioBufferSize=102400"]);
    }

    #[test]
    fn sftp_upload_never_carries_buffer_flag() {
        let t = make_target(Backend::SecureCopy);
        assert!(buffer_flags(&upload_args(&t, "k", None, true)).is_empty());
        assert!(buffer_flags(&upload_args(&t, "k", Some(4096), false)).is_empty());
    }

    #[test]
    fn size_hint_sets_exact_value() {
        let args = upload_args(&make_target(Backend::ObjectStore), "k", Some(123_456), false);
        assert_eq!(buffer_flags(&args), vec!["--meta.ossBufferSize=123456"]);
    }

    #[test]
    fn size_hint_wins_over_inline_and_appears_once() {
        let args = upload_args(&make_target(Backend::S3Compatible), "k", Some(42), true);
        assert_eq!(buffer_flags(&args), vec!["--meta.minioBufferSize=42"]);
    }

    #[test]
    fn plain_upload_has_no_buffer_flag() {
        let args = upload_args(&make_target(Backend::ObjectStore), "k", None, false);
        assert!(buffer_flags(&args).is_empty());
    }

    // ── insta snapshots ───────────────────────────────────────────────────────

    #[test]
    fn snapshot_upload_args_oss_with_hint() {
        let args = upload_args(
            &make_target(Backend::ObjectStore),
            "backup/full.xbstream",
            Some(2048),
            false,
        );
        insta::assert_debug_snapshot!(args, @r#"
        [
            "/opt/filestream/client",
            "--meta.action=uploadOss",
            "--meta.sink=default",
            "--meta.filename=backup/full.xbstream",
            "--hostInfoFilePath=/etc/filestream/host_info.json",
            "--meta.ossBufferSize=2048",
        ]
        "#);
    }

    #[test]
    fn snapshot_download_args_sftp() {
        let args = download_args(&make_target(Backend::SecureCopy), "binlog/binlog_list");
        insta::assert_debug_snapshot!(args, @r#"
        [
            "/opt/filestream/client",
            "--meta.action=DownloadSsh",
            "--meta.sink=default",
            "--meta.filename=binlog/binlog_list",
            "--hostInfoFilePath=/etc/filestream/host_info.json",
        ]
        "#);
    }
}
