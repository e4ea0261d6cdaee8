#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::constants::LOG_DIR;

/// Writes the raw result body to `<directory>/log/result_<timestamp>.json`.
///
/// Does nothing and returns `None` when the `log` directory does not exist.
pub fn save_result(directory: &Path, content: &[u8]) -> Result<Option<PathBuf>> {
    let log_dir = directory.join(LOG_DIR);
    if !log_dir.is_dir() {
        return Ok(None);
    }

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = log_dir.join(format!("result_{stamp}.json"));
    std::fs::write(&path, content)
        .with_context(|| format!("Could not write result log {}", path.display()))?;

    tracing::debug!("Saved raw result to {}", path.display());
    Ok(Some(path))
}
