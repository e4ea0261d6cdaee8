#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::time::Duration;

use anyhow::{Context, Result};
use bon::Builder;

use crate::constants::{
    CONNECT_TIMEOUT_ENV, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, TIMEOUT_ENV, VERSION,
};

/// Reads a duration in whole seconds from `var`, if `lookup` knows it.
fn seconds_from(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Result<Option<Duration>> {
    match lookup(var) {
        Some(raw) => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{var} must be a number of seconds, got `{raw}`"))?;
            Ok(Some(Duration::from_secs(secs)))
        }
        None => Ok(None),
    }
}

/// Settings for the HTTP client used to submit
#[derive(Debug, Clone, Builder)]
pub struct ClientConfig {
    /// Total time allowed for the request, including grading on the server.
    #[builder(default = DEFAULT_TIMEOUT)]
    timeout:         Duration,
    /// Time allowed to establish the connection.
    #[builder(default = DEFAULT_CONNECT_TIMEOUT)]
    connect_timeout: Duration,
    /// Value of the `User-Agent` header.
    #[builder(into, default = format!("co-submit/{VERSION}"))]
    user_agent:      String,
    /// Honour `HTTP_PROXY` and friends from the environment.
    #[builder(default = true)]
    system_proxy:    bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClientConfig {
    /// Builds a config from `CO_SUBMIT_TIMEOUT` and
    /// `CO_SUBMIT_CONNECT_TIMEOUT`, falling back to the defaults for unset
    /// variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through
    /// `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout = seconds_from(&lookup, TIMEOUT_ENV)?.unwrap_or(DEFAULT_TIMEOUT);
        let connect_timeout =
            seconds_from(&lookup, CONNECT_TIMEOUT_ENV)?.unwrap_or(DEFAULT_CONNECT_TIMEOUT);

        Ok(Self::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build())
    }

    /// Returns a copy with a different total timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the total request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns whether proxies from the environment are used.
    pub fn system_proxy(&self) -> bool {
        self.system_proxy
    }
}

/// What the success report includes besides scores and messages
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct ReportOptions {
    /// Include each file's captured stdout.
    #[builder(default)]
    pub show_stdout: bool,
    /// Include each file's captured stderr.
    #[builder(default)]
    pub show_stderr: bool,
}
