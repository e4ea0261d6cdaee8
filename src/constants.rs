#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::time::Duration;

/// Version reported by the banner and `--version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the control file inside an exercise directory
pub const MANIFEST_FILE: &str = ".co";

/// Optional subdirectory where raw results are persisted
pub const LOG_DIR: &str = "log";

/// Column at which long report lines are soft-wrapped
pub const WRAP_WIDTH: usize = 70;

/// Number of characters in the score bar
pub const BAR_WIDTH: usize = 70;

/// Filled part of the score bar
pub const BAR_FILLED: char = '\u{2593}';

/// Empty part of the score bar
pub const BAR_EMPTY: char = '\u{2591}';

/// Content type sent with the submission and expected back
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Total time allowed for the grading request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Time allowed to establish the connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable overriding [`DEFAULT_TIMEOUT`], in seconds
pub const TIMEOUT_ENV: &str = "CO_SUBMIT_TIMEOUT";

/// Environment variable overriding [`DEFAULT_CONNECT_TIMEOUT`], in seconds
pub const CONNECT_TIMEOUT_ENV: &str = "CO_SUBMIT_CONNECT_TIMEOUT";
