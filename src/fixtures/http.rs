use std::time::Duration;

use crate::error::{NorminoError, Result};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP client abstraction for dependency injection.
pub trait HttpClient {
    /// Perform a GET request and return the response body as bytes.
    ///
    /// # Errors
    /// Returns [`NorminoError::Http`] on connection failures and non-2xx statuses.
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;

    /// Perform a GET request and return the response body as text.
    ///
    /// # Errors
    /// Same as [`HttpClient::get_bytes`].
    fn get_text(&self, url: &str) -> Result<String> {
        let bytes = self.get_bytes(url)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Production HTTP client using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("normino/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| http_error("client", format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[cfg(not(tarpaulin_include))]
impl HttpClient for ReqwestClient {
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).send().map_err(|e| {
            let message = if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            http_error(url, message)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(url, format!("HTTP {status}")));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| http_error(url, format!("failed to read response: {e}")))
    }
}

fn http_error(url: &str, message: String) -> NorminoError {
    NorminoError::Http {
        url: url.to_string(),
        message,
    }
}
