//! # co-submit
//!
//! Submits the sources of a CodeOcean exercise directory for remote
//! evaluation and renders the graded result.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Totals over the graded files
pub mod aggregate;
/// HTTP client and report settings
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Errors that can end a submission
pub mod error;
/// Parsing the `.co` control file
pub mod manifest;
/// Building the JSON submission
pub mod payload;
/// Turning results and failures into text
pub mod report;
/// Checking the shape of the server response
pub mod response;
/// Persisting raw results next to the exercise
pub mod results_log;
/// The HTTP exchange
pub mod submit;
/// Utility functions for convenience
pub mod util;

use std::path::Path;

use aggregate::AggregateResult;
use config::{ClientConfig, ReportOptions};
use error::{SubmitError, SubmitResult};
use manifest::ControlFile;
use payload::SubmissionPayload;
use response::{ResponseDefect, ResultEntry};
use submit::{RawResponse, Submitter};

/// How a submission that reached the server ended
#[derive(Debug)]
pub enum Outcome {
    /// The server graded the files.
    Graded {
        /// Per-file results in server order
        entries:   Vec<ResultEntry>,
        /// Totals over `entries`
        aggregate: AggregateResult,
    },
    /// The server answered with something that is not a grading result.
    Rejected {
        /// The first check that failed
        defect:   ResponseDefect,
        /// Everything the server sent back
        response: Box<RawResponse>,
    },
}

/// Submits the exercise in `directory` and renders the outcome.
///
/// Report text is handed to `emit` piece by piece as soon as it is known, so
/// the list of submitted files shows up before the (slow) grading request.
/// A response that fails validation is rendered and returned as
/// [`Outcome::Rejected`]; only problems that prevent getting a response at
/// all are returned as errors.
pub fn evaluate(
    directory: &Path,
    options: &ReportOptions,
    config: &ClientConfig,
    mut emit: impl FnMut(&str),
) -> SubmitResult<Outcome> {
    emit(&report::render_banner(directory));
    if !directory.is_dir() {
        return Err(SubmitError::NotADirectory {
            path: directory.to_path_buf(),
        });
    }

    let control = ControlFile::load(directory)?;
    emit("Submit");
    let payload = SubmissionPayload::build(&control, directory, |name| emit(&format!(" {name}")))?;
    let body = payload.to_json()?;

    let response = Submitter::new(config)?.post(control.target_url(), body)?;
    let location = response.header("location").unwrap_or_default().to_string();
    let content = response.content().to_vec();

    match response::validate(response) {
        Ok(entries) => {
            emit(&format!("\n Submission created: {location}"));
            if let Err(e) = results_log::save_result(directory, &content) {
                tracing::warn!("{e:#}");
            }

            let aggregate = AggregateResult::from_entries(&entries);
            emit(&report::render_results(&entries, &aggregate, options));
            Ok(Outcome::Graded { entries, aggregate })
        }
        Err(SubmitError::UnexpectedResponse { defect, response }) => {
            tracing::debug!("Response rejected: {}", defect);
            emit(&report::render_unexpected_response(&response));
            Ok(Outcome::Rejected { defect, response })
        }
        Err(other) => Err(other),
    }
}
