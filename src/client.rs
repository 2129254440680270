//! App Store Connect API client.
//!
//! Low-level HTTP transport that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on resource types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{AscError, Result};
use crate::pagination::{validate_next_url, Envelope, SingleEnvelope};
use crate::query::ListQuery;

const DEFAULT_API_URL: &str = "https://api.appstoreconnect.apple.com";
const USER_AGENT: &str = concat!("ascapi/", env!("CARGO_PKG_VERSION"));

/// Low-level App Store Connect API client.
///
/// Handles authentication and HTTP requests. Resource-specific operations
/// are implemented via the `Get`, `List`, `Create`, `Update`, and `Delete`
/// traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use ascapi::AscClient;
///
/// # fn example() -> ascapi::Result<()> {
/// // Create from environment variables
/// let client = AscClient::from_env()?;
///
/// // Or configure manually
/// let client = AscClient::new("bearer-token", "https://api.appstoreconnect.apple.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AscClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
    allowed_hosts: Arc<Vec<String>>,
}

impl std::fmt::Debug for AscClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AscClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl AscClient {
    /// Create a client from environment variables.
    ///
    /// Uses `ASC_BEARER_TOKEN` for authentication and optionally
    /// `ASC_API_URL` for the base URL (defaults to
    /// `https://api.appstoreconnect.apple.com`).
    ///
    /// # Errors
    ///
    /// Returns an error if `ASC_BEARER_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("ASC_BEARER_TOKEN").map_err(|_| {
            AscError::ConfigMissing("ASC_BEARER_TOKEN environment variable not set".to_string())
        })?;

        let base_url = env::var("ASC_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided bearer token and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or has no host.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with / so Url::join keeps the full path
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;
        let base_host = host_with_port(&base_url).ok_or_else(|| {
            AscError::ConfigMissing(format!("base URL '{base_url}' has no host"))
        })?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(AscError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
            allowed_hosts: Arc::new(vec![base_host]),
        })
    }

    /// Add a host (`host` or `host:port`) to the pagination allow-list.
    ///
    /// Next-page URLs are only followed when their host is on this list;
    /// by default it contains just the base URL's host.
    #[must_use]
    pub fn with_allowed_host(mut self, host: &str) -> Self {
        let mut hosts = (*self.allowed_hosts).clone();
        hosts.push(host.to_string());
        self.allowed_hosts = Arc::new(hosts);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Hosts that server-supplied next-page URLs may point at.
    pub fn allowed_hosts(&self) -> &[String] {
        &self.allowed_hosts
    }

    /// Issue a request and return the raw response body.
    ///
    /// `path_or_url` is either an API path (`/v1/...`) joined onto the base
    /// URL, or an absolute URL (already validated next-page cursors).
    /// Attaches the bearer token and JSON content negotiation; a 2xx
    /// response yields the raw body (empty for 204), a non-2xx response is
    /// decoded into [`AscError::Api`].
    #[tracing::instrument(skip(self, body))]
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path_or_url: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>> {
        let url = self.resolve(path_or_url)?;

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(AscError::Http)?;
        let response = Self::check_response(response).await?;
        let bytes = response.bytes().await.map_err(AscError::Http)?;
        Ok(bytes.to_vec())
    }

    /// Fetch one page of a list endpoint.
    ///
    /// A `next_url` on the query replaces path and query construction
    /// entirely (the cursor already encodes them) and must pass the
    /// next-URL guard first. Otherwise the encoded query string is
    /// appended to `path`.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<Envelope<T>> {
        let target = match query.next_url_value() {
            Some(next) => validate_next_url(next, &self.allowed_hosts)?.to_string(),
            None => {
                let encoded = query.encode();
                if encoded.is_empty() {
                    path.to_string()
                } else {
                    format!("{path}?{encoded}")
                }
            }
        };

        let data = self.send::<()>(Method::GET, &target, None).await?;
        decode(&data)
    }

    /// Fetch a single resource.
    pub async fn get_single<T: DeserializeOwned>(&self, path: &str) -> Result<SingleEnvelope<T>> {
        let data = self.send::<()>(Method::GET, path, None).await?;
        decode(&data)
    }

    /// Create a resource and decode the returned single envelope.
    pub async fn post_single<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<SingleEnvelope<T>> {
        let data = self.send(Method::POST, path, Some(body)).await?;
        decode(&data)
    }

    /// Update a resource and decode the returned single envelope.
    pub async fn patch_single<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<SingleEnvelope<T>> {
        let data = self.send(Method::PATCH, path, Some(body)).await?;
        decode(&data)
    }

    /// Delete a resource.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// Send a relationship batch (`POST` adds, `DELETE` removes).
    pub async fn modify_relationships<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<()> {
        self.send(method, path, Some(body)).await?;
        Ok(())
    }

    fn resolve(&self, path_or_url: &str) -> Result<Url> {
        if path_or_url.starts_with("https://") || path_or_url.starts_with("http://") {
            Ok(Url::parse(path_or_url)?)
        } else {
            Ok(self.base_url.join(path_or_url.trim_start_matches('/'))?)
        }
    }

    /// Check response status and convert non-2xx into structured errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        Err(Self::extract_api_error(response, status).await)
    }

    /// Decode the ASC error envelope `{"errors":[{code,title,detail}]}`.
    async fn extract_api_error(response: Response, status: StatusCode) -> AscError {
        let body = match response.bytes().await {
            Ok(b) => b,
            Err(_) => {
                return AscError::Api {
                    status: status.as_u16(),
                    code: String::new(),
                    title: format!("HTTP {status}"),
                    detail: None,
                }
            }
        };

        if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(&body) {
            if let Some(first) = envelope.errors.into_iter().next() {
                return AscError::Api {
                    status: status.as_u16(),
                    code: first.code,
                    title: first.title,
                    detail: first.detail,
                };
            }
        }

        AscError::Api {
            status: status.as_u16(),
            code: String::new(),
            title: String::from_utf8_lossy(&body).into_owned(),
            detail: None,
        }
    }
}

fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    serde_json::from_slice(data).map_err(AscError::Decode)
}

/// `host` or `host:port` for an URL, matching allow-list entries.
pub(crate) fn host_with_port(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{host}:{port}")),
        None => Some(host.to_string()),
    }
}

#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorObject>,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorObject {
    #[serde(default)]
    code: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: Option<String>,
}
