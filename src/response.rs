#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{SubmitError, SubmitResult},
    submit::RawResponse,
};

/// The grading outcome CodeOcean reports for one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Name of the graded file
    pub filename:       String,
    /// Number of passed tests
    pub passed:         u64,
    /// Number of tests run
    pub count:          u64,
    /// Relative importance of the file
    pub weight:         f64,
    /// Fraction of tests passed, in `[0, 1]`
    pub score:          f64,
    /// Server-side status such as `ok` or `failed`
    #[serde(default)]
    pub status:         Option<String>,
    /// Captured standard output of the test run
    #[serde(default)]
    pub stdout:         Option<String>,
    /// Captured standard error of the test run
    #[serde(default)]
    pub stderr:         Option<String>,
    /// Free-form feedback
    #[serde(default)]
    pub message:        Option<String>,
    /// Individual failure messages
    #[serde(default)]
    pub error_messages: Option<Vec<String>>,
}

impl ResultEntry {
    /// CodeOcean points earned by this file, `score * weight`.
    pub fn points(&self) -> f64 {
        self.score * self.weight
    }
}

/// The first check a response failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseDefect {
    /// Status other than 201 Created.
    Status(u16),
    /// Missing or non-JSON `content-type`.
    ContentType(Option<String>),
    /// Body is not valid JSON.
    InvalidJson(String),
    /// Body is JSON but not an array.
    NotAnArray,
    /// First element is not an object with a `filename` key.
    MissingFilename,
    /// An element lacks a field or has one of the wrong type.
    InvalidEntry(String),
}

impl Display for ResponseDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseDefect::Status(s) => write!(f, "expected status 201, got {s}"),
            ResponseDefect::ContentType(Some(ct)) => {
                write!(f, "expected application/json, got `{ct}`")
            }
            ResponseDefect::ContentType(None) => write!(f, "no content-type header"),
            ResponseDefect::InvalidJson(e) => write!(f, "body is not valid JSON ({e})"),
            ResponseDefect::NotAnArray => write!(f, "body is not a JSON array"),
            ResponseDefect::MissingFilename => {
                write!(f, "first result is not an object with a `filename`")
            }
            ResponseDefect::InvalidEntry(e) => write!(f, "malformed result entry ({e})"),
        }
    }
}

/// Checks that `response` is a created grading result and returns its
/// entries in the order the server sent them.
///
/// An empty array is a valid result with no graded files.
pub fn validate(response: RawResponse) -> SubmitResult<Vec<ResultEntry>> {
    match check(&response) {
        Ok(entries) => Ok(entries),
        Err(defect) => {
            tracing::debug!("Rejecting response: {}", defect);
            Err(SubmitError::UnexpectedResponse {
                defect,
                response: Box::new(response),
            })
        }
    }
}

/// Runs the checks in order, stopping at the first failure.
fn check(response: &RawResponse) -> Result<Vec<ResultEntry>, ResponseDefect> {
    if response.status() != 201 {
        return Err(ResponseDefect::Status(response.status()));
    }
    if !response.is_json() {
        return Err(ResponseDefect::ContentType(
            response.header("content-type").map(str::to_string),
        ));
    }

    let body: Value = serde_json::from_slice(response.content())
        .map_err(|e| ResponseDefect::InvalidJson(e.to_string()))?;
    let Value::Array(items) = body else {
        return Err(ResponseDefect::NotAnArray);
    };
    if let Some(first) = items.first() {
        let has_filename = first
            .as_object()
            .is_some_and(|o| o.contains_key("filename"));
        if !has_filename {
            return Err(ResponseDefect::MissingFilename);
        }
    }

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<ResultEntry>(item)
                .map_err(|e| ResponseDefect::InvalidEntry(e.to_string()))
        })
        .collect()
}
