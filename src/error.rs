#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use crate::{response::ResponseDefect, submit::RawResponse};

/// An enum to represent everything that can stop a submission
#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    /// The manifest or one of the files it lists is missing or not UTF-8.
    #[error("File \"{file}\" not found")]
    NotFound {
        /// name of the file as written in the manifest (or `.co`)
        file: String,
    },
    /// The submission directory does not exist or is not a directory.
    #[error("{} is not a directory", path.display())]
    NotADirectory {
        /// the path given on the command line
        path: PathBuf,
    },
    /// A manifest line does not follow the expected layout.
    #[error("Malformed .co file, line {line} (`{text}`): {reason}")]
    MalformedManifest {
        /// 1-based line number
        line:   usize,
        /// the offending line
        text:   String,
        /// what is wrong with it
        reason: String,
    },
    /// The payload could not be serialized.
    #[error("Could not serialize the submission: {0}")]
    Payload(#[from] serde_json::Error),
    /// No response could be obtained from the server.
    #[error("Generic exception: could not reach {url}: {cause}")]
    Network {
        /// target of the request
        url:   String,
        /// rendered cause chain of the transport error
        cause: String,
    },
    /// A response was obtained but does not have the expected shape.
    #[error("Unexpected response from server (status {}): {defect}", response.status())]
    UnexpectedResponse {
        /// the first check that failed
        defect:   ResponseDefect,
        /// everything the server sent back
        response: Box<RawResponse>,
    },
}

impl SubmitError {
    /// Creates a [`SubmitError::NotFound`] for `file`
    pub fn not_found(file: impl Into<String>) -> Self {
        SubmitError::NotFound { file: file.into() }
    }

    /// Creates a [`SubmitError::MalformedManifest`]
    pub fn malformed(line: usize, text: impl Into<String>, reason: impl Into<String>) -> Self {
        SubmitError::MalformedManifest {
            line,
            text: text.into(),
            reason: reason.into(),
        }
    }
}

/// Result type used throughout the submission pipeline
pub type SubmitResult<T> = Result<T, SubmitError>;
