//! `filestream init` — scaffold a starter `filestream.toml`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::ui::StageOutcome;

const TEMPLATE: &str = r#"# filestream configuration
#
# Values here override ~/.config/filestream/config.toml field by field.

[client]
path      = "filestream-client"   # executable; bare names are looked up on $PATH
host_info = "host_info.json"      # passed as --hostInfoFilePath
# timeout_secs = 3600             # kill the client after this long

[storage]
backend = "OSS"                   # OSS | SFTP | S3
sink    = "default"
"#;

/// Write [`TEMPLATE`] to `path`, refusing to overwrite an existing file.
pub fn run(path: &Path) -> Result<()> {
    let label = format!("Init {}", path.display());

    if path.exists() {
        let err = anyhow::anyhow!("{} already exists, refusing to overwrite", path.display());
        StageOutcome::failed_with(&label, &err).print();
        return Err(err);
    }

    std::fs::write(path, TEMPLATE).with_context(|| format!("writing {}", path.display()))?;
    StageOutcome::ok(&label).print();
    Ok(())
}
