#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::Path;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{error::SubmitResult, manifest::ControlFile, util::read_utf8_file};

/// One submitted file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAttributes {
    /// Server-side identifier copied from the manifest
    pub file_id: i64,
    /// Full source text
    pub content: String,
}

/// Submitted files, serialized as an object keyed by manifest position
/// (`"0"`, `"1"`, ...) in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilesAttributes(Vec<FileAttributes>);

impl FilesAttributes {
    /// Returns the files in manifest order.
    pub fn files(&self) -> &[FileAttributes] {
        &self.0
    }
}

impl Serialize for FilesAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (idx, file) in self.0.iter().enumerate() {
            map.serialize_entry(&idx.to_string(), file)?;
        }
        map.end()
    }
}

/// Inner object of the payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteEvaluation {
    /// Token from the first manifest line
    pub validation_token: String,
    /// The submitted sources
    pub files_attributes: FilesAttributes,
}

/// The JSON document POSTed to CodeOcean
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    /// The only top-level key
    pub remote_evaluation: RemoteEvaluation,
}

impl SubmissionPayload {
    /// Reads every file listed in `control` from `directory` and assembles
    /// the payload.
    ///
    /// * `on_file`: called with each file name just before it is read, so
    ///   callers can show progress
    pub fn build(
        control: &ControlFile,
        directory: &Path,
        mut on_file: impl FnMut(&str),
    ) -> SubmitResult<Self> {
        let files = control
            .entries()
            .iter()
            .map(|entry| {
                on_file(&entry.file_name);
                Ok(FileAttributes {
                    file_id: entry.file_id,
                    content: read_utf8_file(directory, &entry.file_name)?,
                })
            })
            .collect::<SubmitResult<Vec<_>>>()?;

        Ok(Self {
            remote_evaluation: RemoteEvaluation {
                validation_token: control.validation_token().to_string(),
                files_attributes: FilesAttributes(files),
            },
        })
    }

    /// Serializes the payload without any whitespace between tokens and
    /// with non-ASCII characters left as UTF-8.
    pub fn to_json(&self) -> SubmitResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
