//! HTTP template fetching.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Fetches template text over HTTP/HTTPS.
///
/// Templates are authored and published elsewhere; the overlay pulls them
/// fresh per render. The fetcher owns its connection pool, so reuse one
/// instance rather than constructing per request.
pub struct TemplateFetcher {
    client: Client,
    timeout: Duration,
}

impl TemplateFetcher {
    /// Create a fetcher with the default 30-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("overlay")
                .timeout(timeout)
                .build()
                .expect("failed to build HTTP client"),
            timeout,
        }
    }

    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the template at `url`, returning the body text untouched.
    ///
    /// Non-success statuses are errors; the body is never inspected here.
    /// Whether it contains tokens is the renderer's business.
    pub fn fetch(&self, url: &str) -> ClientResult<String> {
        debug!("fetching template from {}", url);
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text()?;
        debug!("fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

impl Default for TemplateFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn default_timeout_is_30_seconds() {
        let fetcher = TemplateFetcher::new();
        assert_eq!(fetcher.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn custom_timeout() {
        let fetcher = TemplateFetcher::with_timeout(Duration::from_secs(5));
        assert_eq!(fetcher.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn fetch_returns_body_untouched() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/people/template");
            then.status(200).body("<h1>{{user.name}}</h1>");
        });

        let fetcher = TemplateFetcher::new();
        let body = fetcher.fetch(&server.url("/people/template")).unwrap();

        mock.assert();
        assert_eq!(body, "<h1>{{user.name}}</h1>");
    }

    #[test]
    fn fetch_maps_404_to_status_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let fetcher = TemplateFetcher::new();
        let err = fetcher.fetch(&server.url("/missing")).unwrap_err();

        match err {
            ClientError::Status { status, url } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert!(url.ends_with("/missing"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
