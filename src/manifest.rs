#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::Path;

use serde::Serialize;

use crate::{
    constants::MANIFEST_FILE,
    error::{SubmitError, SubmitResult},
    util::read_utf8_file,
};

/// A file listed in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Path of the source file, relative to the exercise directory
    pub file_name: String,
    /// Server-side identifier of the file
    pub file_id:   i64,
}

/// The parsed `.co` control file of an exercise directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlFile {
    /// Opaque token authorizing the submission
    validation_token: String,
    /// Where the payload is POSTed
    target_url:       String,
    /// Files to submit, in manifest order
    entries:          Vec<ManifestEntry>,
}

impl ControlFile {
    /// Reads and parses `<directory>/.co`
    pub fn load(directory: &Path) -> SubmitResult<Self> {
        let text = read_utf8_file(directory, MANIFEST_FILE)?;
        Self::parse(&text)
    }

    /// Parses the manifest text.
    ///
    /// Line 1 is the validation token, line 2 the target URL, and every
    /// following line a `file_name=file_id` pair split on the first `=`.
    /// Only blank lines at the very end are tolerated.
    pub fn parse(text: &str) -> SubmitResult<Self> {
        let mut lines = text.lines();

        let validation_token = lines
            .next()
            .ok_or_else(|| SubmitError::malformed(1, "", "missing validation token"))?
            .to_string();
        let target_url = lines
            .next()
            .ok_or_else(|| SubmitError::malformed(2, "", "missing target url"))?
            .to_string();

        let mut data: Vec<&str> = lines.collect();
        while data.last().is_some_and(|l| l.trim().is_empty()) {
            data.pop();
        }

        let mut entries = Vec::new();
        for (idx, line) in data.into_iter().enumerate() {
            let line_number = idx + 3;
            let (file_name, file_id) = line
                .split_once('=')
                .ok_or_else(|| SubmitError::malformed(line_number, line, "expected `name=id`"))?;
            let file_id = file_id.trim().parse::<i64>().map_err(|e| {
                SubmitError::malformed(line_number, line, format!("file id is not an integer ({e})"))
            })?;

            entries.push(ManifestEntry {
                file_name: file_name.to_string(),
                file_id,
            });
        }

        tracing::debug!("Manifest lists {} file(s) for {}", entries.len(), target_url);
        Ok(Self {
            validation_token,
            target_url,
            entries,
        })
    }

    /// Returns the validation token.
    pub fn validation_token(&self) -> &str {
        &self.validation_token
    }

    /// Returns the target url.
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Returns the listed files in manifest order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }
}
