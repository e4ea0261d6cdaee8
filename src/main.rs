#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # co-submit
//!
//! Submits an exercise downloaded from CodeOcean for remote evaluation.
//!
//! Extract the exercise zip into a directory and run `co-submit <directory>`.
//! The `.co` file in that directory names the files to send; CodeOcean runs
//! the tests and the result is printed as a report. Captured stdout/stderr of
//! the test run are only shown when asked for with `--stdout`/`--stderr`.

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use bpaf::*;
use co_submit::{
    config::{ClientConfig, ReportOptions},
    constants::VERSION,
    evaluate,
    report::render_fatal,
};
use dotenvy::dotenv;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Command line arguments
#[derive(Debug, Clone)]
struct Opts {
    /// Include stdout of the test run
    stdout:    bool,
    /// Include stderr of the test run
    stderr:    bool,
    /// Overrides the request timeout, in seconds
    timeout:   Option<u64>,
    /// Log pipeline steps
    verbose:   bool,
    /// Exercise directory containing the `.co` file
    directory: PathBuf,
}

/// Parse the command line arguments
fn options() -> Opts {
    let stdout = short('o')
        .long("stdout")
        .help("output also stdout")
        .switch();
    let stderr = short('e')
        .long("stderr")
        .help("output also stderr")
        .switch();
    let timeout = short('t')
        .long("timeout")
        .help("seconds to wait for the grading result")
        .argument::<u64>("SECS")
        .optional();
    let verbose = short('v')
        .long("verbose")
        .help("log what is being done")
        .switch();
    let directory = positional::<PathBuf>("DIRECTORY")
        .help("directory with .co file")
        .fallback(PathBuf::from("."));

    construct!(Opts {
        stdout,
        stderr,
        timeout,
        verbose,
        directory
    })
    .to_options()
    .descr("CodeOcean Remote Client: submits an exercise and prints the graded result")
    .version(VERSION)
    .run()
}

fn main() -> Result<()> {
    dotenv().ok();
    let opts = options();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let filter_layer =
        LevelFilter::from_level(if opts.verbose { Level::DEBUG } else { Level::WARN });
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let mut config = match ClientConfig::from_env().context("Invalid client configuration") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            return Ok(());
        }
    };
    if let Some(secs) = opts.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let report_options = ReportOptions::builder()
        .show_stdout(opts.stdout)
        .show_stderr(opts.stderr)
        .build();

    if let Err(e) = evaluate(&opts.directory, &report_options, &config, |text| println!("{text}")) {
        print!("{}", render_fatal(&e));
    }

    Ok(())
}
