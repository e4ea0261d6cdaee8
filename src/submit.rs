#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use reqwest::{blocking::Client, header::CONTENT_TYPE};

use crate::{
    config::ClientConfig,
    constants::JSON_CONTENT_TYPE,
    error::{SubmitError, SubmitResult},
};

/// Status, headers and body of the one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    status:  u16,
    /// Header pairs in the order the server sent them
    headers: Vec<(String, String)>,
    /// Undecoded body
    content: Vec<u8>,
}

impl RawResponse {
    /// Creates a new response record
    pub fn new(status: u16, headers: Vec<(String, String)>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            content: content.into(),
        }
    }

    /// Returns the status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns all headers in received order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the body bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns the first header named `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// True if the `content-type` header announces JSON.
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(|v| v.starts_with(JSON_CONTENT_TYPE))
    }
}

/// Renders a transport error together with everything that caused it.
fn describe(err: reqwest::Error) -> String {
    format!("{:#}", anyhow::Error::from(err))
}

/// Sends submissions over a blocking HTTP client
#[derive(Debug, Clone)]
pub struct Submitter {
    /// Client configured with the timeouts from [`ClientConfig`]
    client: Client,
}

impl Submitter {
    /// Creates a submitter from `config`
    pub fn new(config: &ClientConfig) -> SubmitResult<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent());
        if !config.system_proxy() {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| SubmitError::Network {
                url:   String::new(),
                cause: describe(e),
            })?;
        Ok(Self { client })
    }

    /// POSTs `payload` to `url` as JSON exactly once.
    ///
    /// Any response the server sends, whatever its status, comes back as a
    /// [`RawResponse`]. Only failing to get a response at all is an error.
    pub fn post(&self, url: &str, payload: Vec<u8>) -> SubmitResult<RawResponse> {
        let network_error = |e: reqwest::Error| SubmitError::Network {
            url:   url.to_string(),
            cause: describe(e),
        };

        tracing::debug!("POST {} ({} bytes)", url, payload.len());
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(payload)
            .send()
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let content = response.bytes().map_err(network_error)?.to_vec();
        tracing::debug!("Received status {} with {} byte body", status, content.len());

        Ok(RawResponse::new(status, headers, content))
    }
}
