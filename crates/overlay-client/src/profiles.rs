//! Profile lookup against a backing directory API.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use overlay_render::slugify;

use crate::error::{ClientError, ClientResult};

/// Where profile records come from.
#[derive(Debug, Clone)]
pub enum ProfileSource {
    /// A public directory that serves its whole listing at `{base_url}/users`.
    /// Records are matched client-side by slug.
    Mock { base_url: String },

    /// An internal API queried per record: `{base_url}?slug=<slug>`, plus a
    /// `code` query parameter when an access code is configured.
    Internal {
        base_url: String,
        access_code: Option<String>,
    },
}

/// Resolves slugs to profile records.
///
/// # Example
///
/// ```rust,no_run
/// use overlay_client::{ProfileClient, ProfileSource};
///
/// let client = ProfileClient::new(ProfileSource::Mock {
///     base_url: "https://directory.example.net".into(),
/// });
/// let record = client.lookup("ada-lovelace").unwrap();
/// assert_eq!(record["name"], "Ada Lovelace");
/// ```
pub struct ProfileClient {
    client: Client,
    source: ProfileSource,
}

impl ProfileClient {
    /// Create a client with the default 30-second timeout.
    pub fn new(source: ProfileSource) -> Self {
        Self::with_timeout(source, Duration::from_secs(30))
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(source: ProfileSource, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("overlay")
                .timeout(timeout)
                .build()
                .expect("failed to build HTTP client"),
            source,
        }
    }

    /// Resolve `slug` to a profile record.
    ///
    /// A slug nothing answers to is [`ClientError::ProfileNotFound`]; other
    /// failures are transport or status errors.
    pub fn lookup(&self, slug: &str) -> ClientResult<Value> {
        match &self.source {
            ProfileSource::Mock { base_url } => self.lookup_mock(base_url, slug),
            ProfileSource::Internal {
                base_url,
                access_code,
            } => self.lookup_internal(base_url, access_code.as_deref(), slug),
        }
    }

    fn lookup_mock(&self, base_url: &str, slug: &str) -> ClientResult<Value> {
        let url = format!("{}/users", base_url.trim_end_matches('/'));
        debug!("looking up '{}' in directory listing {}", slug, url);

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { status, url });
        }

        let listing: Value = response.json()?;
        let Some(users) = listing.as_array() else {
            return Err(ClientError::UnexpectedPayload {
                url,
                message: "expected a JSON array of users".into(),
            });
        };

        users
            .iter()
            .find(|user| profile_slug(user).as_deref() == Some(slug))
            .cloned()
            .ok_or_else(|| ClientError::ProfileNotFound {
                slug: slug.to_string(),
            })
    }

    fn lookup_internal(
        &self,
        base_url: &str,
        access_code: Option<&str>,
        slug: &str,
    ) -> ClientResult<Value> {
        debug!("looking up '{}' against profile API {}", slug, base_url);

        let mut request = self.client.get(base_url).query(&[("slug", slug)]);
        if let Some(code) = access_code {
            request = request.query(&[("code", code)]);
        }

        let response = request.send()?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::ProfileNotFound {
                slug: slug.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                url: base_url.to_string(),
            });
        }

        Ok(response.json()?)
    }
}

/// The slug a directory record answers to: an explicit non-empty `slug`
/// field when present, otherwise derived from the display name. Records
/// with neither (or a name that slugifies to nothing) answer to no slug.
pub fn profile_slug(record: &Value) -> Option<String> {
    if let Some(slug) = record.get("slug").and_then(Value::as_str) {
        if !slug.trim().is_empty() {
            return Some(slug.to_string());
        }
    }

    let name = record.get("name").and_then(Value::as_str)?;
    let derived = slugify(name);
    (!derived.is_empty()).then_some(derived)
}
