//! The request executor: one HTTP call per logical operation, with bearer
//! attachment, bounded retries, and error classification.
//!
//! [`Client`] is the entry point. Use [`ClientBuilder`] to configure the base
//! URL, API version, timeout, and retry policy.

use crate::{
    error::{ApiError, Result},
    request::RequestSpec,
    retry::RetryPolicy,
    token::TokenState,
};
use http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Default per-attempt timeout covering connect plus response.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default API version segment in the URL prefix.
const DEFAULT_API_VERSION: &str = "v1";

/// An authenticated client for the PMO platform API.
///
/// Cloning is cheap: clones share the connection pool, configuration, and
/// the single bearer credential. Multiple calls may run concurrently; each
/// call runs its own sequential attempt loop and only the token state is
/// shared between them.
///
/// # Examples
///
/// ```no_run
/// use pmo_client::Client;
///
/// # async fn example() -> pmo_client::Result<()> {
/// let client = Client::builder()
///     .base_url("http://localhost:4000")?
///     .build()?;
///
/// let session = client.authenticate("user@example.com", "pass123").await?;
/// println!("authenticated as {}", session.user.name);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    api_version: String,
    default_headers: HeaderMap,
    retry: RetryPolicy,
    timeout: Duration,
    token: TokenState,
}

impl Client {
    /// Creates a new [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The shared bearer credential holder.
    pub fn token_state(&self) -> &TokenState {
        &self.inner.token
    }

    /// Returns `true` if a credential is present and within its lifetime.
    ///
    /// Advisory only: an expired credential does not stop requests from being
    /// sent (see [`TokenState::current_token`]).
    pub fn is_authenticated(&self) -> bool {
        self.inner.token.is_valid()
    }

    /// Executes one logical call and decodes the 2xx body into `Res`.
    ///
    /// Runs the full attempt loop: retryable failures (transport, 429, 5xx)
    /// are retried with backoff up to the configured budget; everything else
    /// is surfaced immediately. A 204 or empty body decodes as JSON `null`,
    /// so use `Option<T>` (or [`Client::execute_empty`]) for endpoints that
    /// may respond with no content.
    pub async fn execute<Res>(&self, spec: RequestSpec) -> Result<Res>
    where
        Res: DeserializeOwned,
    {
        let (status, body) = self.send_with_retry(&spec, None).await?;
        decode_body(status, body)
    }

    /// Executes one logical call, discarding any response body.
    pub async fn execute_empty(&self, spec: RequestSpec) -> Result<()> {
        self.send_with_retry(&spec, None).await?;
        Ok(())
    }

    /// Like [`Client::execute`], but aborts when `cancel` fires.
    ///
    /// Cancellation interrupts both an in-flight attempt and a pending
    /// backoff sleep, resolving the call with a Transport-kind error
    /// (code `"cancelled"`).
    pub async fn execute_with_cancel<Res>(
        &self,
        spec: RequestSpec,
        cancel: &CancellationToken,
    ) -> Result<Res>
    where
        Res: DeserializeOwned,
    {
        let (status, body) = self.send_with_retry(&spec, Some(cancel)).await?;
        decode_body(status, body)
    }

    /// The attempt loop. Resolves to exactly one 2xx payload or the last
    /// classified error.
    async fn send_with_retry(
        &self,
        spec: &RequestSpec,
        cancel: Option<&CancellationToken>,
    ) -> Result<(StatusCode, Option<String>)> {
        let mut attempt: u32 = 0;

        loop {
            let result = match cancel {
                Some(token) => tokio::select! {
                    _ = token.cancelled() => return Err(ApiError::cancelled()),
                    result = self.send_once(spec, attempt) => result,
                },
                None => self.send_once(spec, attempt).await,
            };

            let err = match result {
                Ok(success) => return Ok(success),
                Err(err) => err,
            };

            tracing::warn!(
                error = %err,
                attempt = attempt + 1,
                method = %spec.method,
                path = %spec.path,
                "Request attempt failed"
            );

            if !err.is_retryable() || self.inner.retry.is_last_attempt(attempt) {
                return Err(err);
            }

            let delay = self.inner.retry.backoff.delay_for(attempt);
            tracing::info!(
                delay_ms = delay.as_millis() as u64,
                attempt = attempt + 1,
                "Retrying request after backoff"
            );

            match cancel {
                Some(token) => tokio::select! {
                    _ = token.cancelled() => return Err(ApiError::cancelled()),
                    _ = tokio::time::sleep(delay) => {}
                },
                None => tokio::time::sleep(delay).await,
            }

            attempt += 1;
        }
    }

    /// Builds and sends a single attempt, classifying any failure.
    async fn send_once(
        &self,
        spec: &RequestSpec,
        attempt: u32,
    ) -> Result<(StatusCode, Option<String>)> {
        let mut url = self.inner.base_url.clone();
        url.set_path(&format!("/api/{}{}", self.inner.api_version, spec.path));
        for (key, value) in &spec.query {
            url.query_pairs_mut().append_pair(key, value);
        }

        tracing::debug!(
            method = %spec.method,
            url = %url,
            attempt = attempt + 1,
            "Executing HTTP request"
        );

        let mut request = self
            .inner
            .http
            .request(spec.method.clone(), url)
            .timeout(self.inner.timeout);

        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }

        if spec.requires_auth {
            // A present token is attached even past its expiry; the server's
            // 401 is what forces re-authentication.
            if let Some(token) = self.inner.token.current_token() {
                request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
        }

        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        tracing::info!(
            status = status.as_u16(),
            attempt = attempt + 1,
            "Received HTTP response"
        );

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();

            if status.is_client_error() {
                tracing::error!(status = status.as_u16(), response = %raw, "Client error (4xx)");
            } else {
                tracing::warn!(status = status.as_u16(), response = %raw, "Server error (5xx)");
            }

            return Err(ApiError::from_response(status, &raw));
        }

        let text = response.text().await?;
        if status == StatusCode::NO_CONTENT || text.is_empty() {
            Ok((status, None))
        } else {
            Ok((status, Some(text)))
        }
    }
}

/// Decodes a 2xx body; an absent body decodes as JSON `null`.
fn decode_body<Res>(status: StatusCode, body: Option<String>) -> Result<Res>
where
    Res: DeserializeOwned,
{
    let text = body.unwrap_or_else(|| "null".to_string());
    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(error = %e, raw_response = %text, "Failed to decode response body");
        ApiError::decode(status, &e)
    })
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use pmo_client::{Backoff, Client, RetryPolicy};
/// use std::time::Duration;
///
/// # fn example() -> pmo_client::Result<()> {
/// let client = Client::builder()
///     .base_url("http://localhost:4000")?
///     .api_version("v1")
///     .timeout(Duration::from_secs(30))
///     .retry_policy(RetryPolicy::new(3).with_backoff(Backoff::exponential(Duration::from_secs(1))))
///     .default_header("User-Agent", "pmo-client/0.1")?
///     .build()?;
/// # let _ = client;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    api_version: String,
    default_headers: HeaderMap,
    retry: RetryPolicy,
    timeout: Duration,
}

impl ClientBuilder {
    /// Creates a builder with the default version, timeout, and retry policy.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            default_headers: HeaderMap::new(),
            retry: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the base URL for all requests (scheme + host + port).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let parsed = Url::parse(url.as_ref())
            .map_err(|e| ApiError::config(format!("invalid base URL: {e}")))?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    /// Sets the API version segment of the URL prefix. Defaults to `v1`.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Adds a header included in every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ApiError::config(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ApiError::config(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the attempt budget and backoff schedule.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the per-attempt timeout (connect + response). Defaults to 30s.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the configured [`Client`] with an empty token state.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was provided or the underlying HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| ApiError::config("base URL is required"))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                api_version: self.api_version,
                default_headers: self.default_headers,
                retry: self.retry,
                timeout: self.timeout,
                token: TokenState::new(),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
