#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::Path;

use crate::error::{SubmitError, SubmitResult};

/// Reads `file_name` inside `directory` as UTF-8 text
///
/// * `directory`: the exercise directory
/// * `file_name`: path relative to `directory`, as written in the manifest
///
/// A missing, unreadable, or non UTF-8 file is reported as
/// [`SubmitError::NotFound`] naming `file_name`.
pub fn read_utf8_file(directory: &Path, file_name: &str) -> SubmitResult<String> {
    let path = directory.join(file_name);
    std::fs::read_to_string(&path).map_err(|e| {
        tracing::debug!("Could not read {}: {}", path.display(), e);
        SubmitError::not_found(file_name)
    })
}

/// Returns the last component of the absolute form of `directory`, used to
/// label a submission. Falls back to the path as given.
pub fn display_name(directory: &Path) -> String {
    let absolute = std::path::absolute(directory).unwrap_or_else(|_| directory.to_path_buf());
    absolute
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .next_back()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .unwrap_or_else(|| directory.display().to_string())
}
