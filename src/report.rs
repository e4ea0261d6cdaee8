#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{fmt::Write, path::Path};

use colored::Colorize;
use reqwest::StatusCode;
use serde_json::Value;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};

use crate::{
    aggregate::{AggregateResult, round2},
    config::ReportOptions,
    constants::{BAR_EMPTY, BAR_FILLED, BAR_WIDTH, VERSION, WRAP_WIDTH},
    error::SubmitError,
    response::ResultEntry,
    submit::RawResponse,
    util::display_name,
};

/// Guidance shown instead of a dump for 503 Service Unavailable
pub const UNAVAILABLE_HINT: &str =
    "Most likely no execution environment is currently available.\nTry again later.";

/// Guidance shown instead of a dump for 422 Unprocessable Entity
pub const UNPROCESSABLE_HINT: &str =
    "The server cannot process the payload. This is an error\nin the script. Please report.";

/// One row of the per-file summary table
#[derive(Tabled)]
struct SummaryRow {
    /// 1-based position in the result
    #[tabled(rename = "#")]
    index:  usize,
    /// Graded file
    #[tabled(rename = "File")]
    file:   String,
    /// `passed/count`
    #[tabled(rename = "Tests")]
    tests:  String,
    /// Points reached, 2 decimals
    #[tabled(rename = "Points")]
    points: String,
    /// Reachable points, 2 decimals
    #[tabled(rename = "Weight")]
    weight: String,
    /// Server status
    #[tabled(rename = "Status")]
    status: String,
}

/// Splits one line into pieces of at most `width` characters, breaking on
/// whitespace where possible. Leading indentation is kept on the first piece.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];

    let mut pieces = Vec::new();
    let mut current = indent.to_string();
    let mut current_len = indent.chars().count();
    let mut fresh = true;

    for word in body.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let sep = usize::from(!fresh);
            if current_len + sep + word.len() <= width {
                if !fresh {
                    current.push(' ');
                }
                current.extend(word.iter());
                current_len += sep + word.len();
                fresh = false;
                break;
            }
            if !fresh {
                pieces.push(std::mem::take(&mut current));
                current_len = 0;
                fresh = true;
                continue;
            }
            if current_len > 0 {
                // indentation alone does not earn its own line
                current.clear();
                current_len = 0;
                continue;
            }
            // longer than a whole line
            let rest = word.split_off(width.max(1));
            pieces.push(word.into_iter().collect());
            word = rest;
            if word.is_empty() {
                break;
            }
        }
    }
    if !fresh {
        pieces.push(current);
    }
    pieces
}

/// Wraps `text` for the report: tabs become two spaces, blank lines stay as
/// empty lines, everything else is soft-wrapped at [`WRAP_WIDTH`].
pub fn wrap_text(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            let line = line.replace('\t', "  ");
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                wrap_line(&line, WRAP_WIDTH)
            }
        })
        .collect()
}

/// A bar of [`BAR_WIDTH`] characters filled in proportion to `percent`.
pub fn score_bar(percent: f64) -> String {
    let filled = ((BAR_WIDTH as f64 * percent / 100.0).floor().max(0.0) as usize).min(BAR_WIDTH);
    format!(
        "{}{} {}%",
        BAR_FILLED.to_string().repeat(filled),
        BAR_EMPTY.to_string().repeat(BAR_WIDTH - filled),
        percent
    )
}

/// Heading printed before anything is submitted.
pub fn render_banner(directory: &Path) -> String {
    format!(
        "{}\n {}\n",
        format!(" CodeOcean Remote Client v{VERSION}").bold(),
        display_name(directory)
    )
}

/// Appends a titled, wrapped block to `out` unless `text` is empty.
fn push_section(out: &mut String, title: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {}", format!("-- {title} --").dimmed());
    for line in wrap_text(text) {
        let _ = writeln!(out, "  {line}");
    }
}

/// Renders the graded result: one block per file in server order, then the
/// score bar and a summary table with a grand total.
pub fn render_results(
    entries: &[ResultEntry],
    aggregate: &AggregateResult,
    options: &ReportOptions,
) -> String {
    let mut out = String::new();

    for (idx, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "\n{}", format!("({}) {}", idx + 1, entry.filename).bold());
        if options.show_stdout {
            push_section(&mut out, "stdout", entry.stdout.as_deref().unwrap_or_default());
        }
        if options.show_stderr {
            push_section(&mut out, "stderr", entry.stderr.as_deref().unwrap_or_default());
        }
        if let Some(errors) = entry.error_messages.as_ref().filter(|e| !e.is_empty()) {
            let _ = writeln!(out, "  {}", "-- error_messages --".dimmed());
            for error in errors {
                for line in wrap_text(error) {
                    let _ = writeln!(out, "  {line}");
                }
                out.push('\n');
            }
        }
        push_section(&mut out, "message", entry.message.as_deref().unwrap_or_default());
    }

    let _ = writeln!(out, "\n {}\n", score_bar(aggregate.percent()));

    let rows: Vec<SummaryRow> = entries
        .iter()
        .enumerate()
        .map(|(idx, e)| SummaryRow {
            index:  idx + 1,
            file:   e.filename.clone(),
            tests:  format!("{}/{}", e.passed, e.count),
            points: format!("{:.2}", round2(e.points())),
            weight: format!("{:.2}", e.weight),
            status: e.status.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(rows)
        .with(Panel::header("Result"))
        .with(Panel::footer(format!(
            "Total: passed {}/{} tests, points = {:.2} / {:.2}",
            aggregate.total_passed,
            aggregate.total_count,
            aggregate.total_weighted_score,
            aggregate.total_weight
        )))
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .with(Style::modern())
        .to_string();
    let _ = writeln!(out, "{table}");

    out
}

/// Renders a response that failed validation. 503 and 422 get a short hint;
/// anything else is dumped with all headers and the decoded body.
pub fn render_unexpected_response(response: &RawResponse) -> String {
    let mut out = String::new();
    let status = response.status();
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status");

    let _ = writeln!(out, "\n{}", "--- Unexpected response from server (CodeOcean) ---".red());
    let _ = writeln!(out, "Http-Status:{status} ({reason})");

    if response.is_json() {
        if let Ok(Value::Object(body)) = serde_json::from_slice::<Value>(response.content()) {
            match body.get("message") {
                Some(Value::String(message)) => {
                    let _ = writeln!(out, "{message}");
                }
                Some(Value::Null) | None => {}
                Some(other) => {
                    let _ = writeln!(out, "{other}");
                }
            }
        }
    }

    if status == StatusCode::SERVICE_UNAVAILABLE.as_u16() {
        let _ = writeln!(out, "\n{UNAVAILABLE_HINT}");
        return out;
    }
    if status == StatusCode::UNPROCESSABLE_ENTITY.as_u16() {
        let _ = writeln!(out, "\n{UNPROCESSABLE_HINT}");
        return out;
    }

    let _ = writeln!(out, "\n----- Http-Headers:");
    for (name, value) in response.headers() {
        let _ = writeln!(out, "{name} : {value}");
    }
    let _ = writeln!(out, "\n----- Content (utf-8 decoded):");
    let _ = writeln!(out, "{}", String::from_utf8_lossy(response.content()));

    out
}

/// Renders any error that ended a run.
pub fn render_fatal(err: &SubmitError) -> String {
    match err {
        SubmitError::UnexpectedResponse { response, .. } => render_unexpected_response(response),
        other => format!("{other}\n"),
    }
}
