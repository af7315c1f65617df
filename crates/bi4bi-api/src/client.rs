// Backend HTTP client
//
// Wraps `reqwest::Client` with bi4bi-specific URL construction and the
// connection-test request body. The body shape is fixed by the backend:
// the config mapping is keyed by "<adapter>_prod".

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Connection parameters for one BI tool, as the backend expects them.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionParams {
    pub server: String,
    pub api_version: String,
    pub personal_access_token_name: String,
    pub personal_access_token_secret: String,
    pub site_name: String,
}

#[derive(Serialize)]
struct TestConnectionBody<'a> {
    adapter: &'a str,
    config: HashMap<String, &'a ConnectionParams>,
}

/// HTTP client for the backend's `/reports/*` surface.
#[derive(Debug, Clone)]
pub struct ReportsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ReportsClient {
    /// Create a client with a bounded per-request timeout.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::from_reqwest)?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL for a backend path.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/{path}");
        // The base URL was already validated; a bad join means the path
        // constant is wrong, which the Backend variant reports plainly.
        Url::parse(&full).map_err(|e| Error::Backend {
            status: 0,
            message: format!("invalid backend URL: {e}"),
        })
    }

    /// Validate connection parameters against the backend.
    ///
    /// One attempt, bounded by the client timeout. Success is a 2xx
    /// response; the body is not interpreted further. Any other status
    /// maps to [`Error::Backend`] with a preview of the response body.
    pub async fn test_connection(
        &self,
        adapter_key: &str,
        params: &ConnectionParams,
    ) -> Result<(), Error> {
        let url = self.api_url("reports/test-connection")?;
        debug!(adapter = adapter_key, "POST {url}");

        let mut config = HashMap::new();
        config.insert(format!("{adapter_key}_prod"), params);
        let body = TestConnectionBody {
            adapter: adapter_key,
            config,
        };

        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::from_reqwest)?;

        let status = resp.status();
        if status.is_success() {
            debug!(adapter = adapter_key, "connection test passed");
            return Ok(());
        }

        let text = resp.text().await.unwrap_or_default();
        let message: String = if text.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("no response body")
                .to_owned()
        } else {
            text.chars().take(200).collect()
        };
        Err(Error::Backend {
            status: status.as_u16(),
            message,
        })
    }
}
