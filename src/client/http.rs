//! HTTP client implementation for the Alpaca REST APIs.

use std::sync::Arc;

use reqwest::{redirect, Method};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::auth::Credentials;
use crate::error::ApiError;
use crate::{Error, Result};

use super::config::{ClientConfig, RetryConfig};
use super::request::{parse_method, PreparedRequest};

/// A generic client for one Alpaca API family.
///
/// The client validates credentials once at construction, then builds,
/// sends and retries requests against `{base_url}/{api_version}{path}`.
/// Cloning is cheap: clones share credentials, configuration and the
/// connection pool, and can be used from many tasks at once.
///
/// # Example
///
/// ```no_run
/// use paca_rs::{BaseUrl, ClientConfig, Credentials, RestClient};
///
/// # async fn example() -> paca_rs::Result<()> {
/// let credentials = Credentials::key_pair("AKXXXX", "secret")?;
/// let client = RestClient::new(BaseUrl::TradingPaper, credentials, ClientConfig::default())?;
///
/// // Raw JSON, or `None` for an empty response
/// let account = client.request(reqwest::Method::GET, "/account", None).await?;
///
/// // Or decode straight into a type
/// let clock: serde_json::Value = client.get("/clock").await?;
/// # Ok(())
/// # }
/// ```
pub struct RestClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) credentials: Credentials,
    pub(crate) config: ClientConfig,
    pub(crate) base_url: String,
}

impl RestClient {
    /// Create a client for `base_url` with validated credentials.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        // Redirect responses surface as API errors.
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                credentials,
                config,
                base_url: base_url.into(),
            }),
        })
    }

    /// Create a client with credentials read from the environment.
    pub fn from_env(base_url: impl Into<String>, config: ClientConfig) -> Result<Self> {
        Self::new(base_url, Credentials::from_env()?, config)
    }

    /// The default base URL of this client.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Build a request without sending it.
    ///
    /// `base_url` and `api_version` override the client defaults for this
    /// request only.
    pub fn prepare(
        &self,
        method: Method,
        path: &str,
        data: Option<Value>,
        base_url: Option<&str>,
        api_version: Option<&str>,
    ) -> Result<PreparedRequest> {
        let config = &self.inner.config;
        PreparedRequest::build(
            &self.inner.credentials,
            config.use_basic_auth,
            &config.user_agent,
            method,
            path,
            data,
            base_url.unwrap_or(&self.inner.base_url),
            api_version.unwrap_or(&config.api_version),
        )
    }

    /// Send a request and return the decoded JSON body.
    ///
    /// Returns `Ok(None)` for an empty 2xx body, and also when every attempt
    /// hit a retryable status and `raise_on_exhaustion` is off.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        data: Option<Value>,
    ) -> Result<Option<Value>> {
        self.request_with(method, path, data, None, None).await
    }

    /// Like [`request`](Self::request), with per-call base URL and API
    /// version overrides.
    pub async fn request_with(
        &self,
        method: Method,
        path: &str,
        data: Option<Value>,
        base_url: Option<&str>,
        api_version: Option<&str>,
    ) -> Result<Option<Value>> {
        let prepared = self.prepare(method, path, data, base_url, api_version)?;
        self.dispatch(prepared).await
    }

    /// Like [`request`](Self::request), with the HTTP verb given by name.
    ///
    /// Accepts `GET`, `POST`, `PUT`, `PATCH` and `DELETE` in any case. Any
    /// other verb is rejected before a request is sent.
    pub async fn call(
        &self,
        method: &str,
        path: &str,
        data: Option<Value>,
    ) -> Result<Option<Value>> {
        self.request(parse_method(method)?, path, data).await
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        wrap(self.request(Method::GET, path, None).await?)
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let data = serde_json::to_value(query)?;
        wrap(self.request(Method::GET, path, Some(data)).await?)
    }

    /// Make a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let data = serde_json::to_value(body)?;
        wrap(self.request(Method::POST, path, Some(data)).await?)
    }

    /// Make a PUT request.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let data = serde_json::to_value(body)?;
        wrap(self.request(Method::PUT, path, Some(data)).await?)
    }

    /// Make a PATCH request.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let data = serde_json::to_value(body)?;
        wrap(self.request(Method::PATCH, path, Some(data)).await?)
    }

    /// Make a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        wrap(self.request(Method::DELETE, path, None).await?)
    }

    /// Make a DELETE request with query parameters.
    pub async fn delete_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let data = serde_json::to_value(query)?;
        wrap(self.request(Method::DELETE, path, Some(data)).await?)
    }

    /// Send a prepared request, retrying on the configured statuses.
    async fn dispatch(&self, prepared: PreparedRequest) -> Result<Option<Value>> {
        let mut retry = RetryState::new(&self.inner.config.retry);
        let mut attempt: u32 = 1;

        loop {
            tracing::debug!(
                method = %prepared.method,
                url = %prepared.url,
                attempt,
                "Sending request"
            );

            let response = prepared
                .clone()
                .into_reqwest(&self.inner.http)?
                .send()
                .await?;
            let status = response.status().as_u16();
            let text = response.text().await?;

            if (200..300).contains(&status) {
                if text.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(serde_json::from_str(&text)?));
            }

            if retry.is_retryable(status) {
                if retry.consume() {
                    tracing::warn!(
                        status,
                        url = %prepared.url,
                        attempts_remaining = retry.attempts_remaining,
                        wait_ms = retry.config.retry_wait.as_millis() as u64,
                        "Retryable response, waiting before next attempt"
                    );
                    tokio::time::sleep(retry.config.retry_wait).await;
                    attempt += 1;
                    continue;
                }

                tracing::warn!(status, url = %prepared.url, attempts = attempt, "Retries exhausted");
                if !retry.config.raise_on_exhaustion {
                    return Ok(None);
                }
            }

            let error = ApiError::classify(status, text);
            tracing::debug!(status, code = ?error.code().ok(), "API error response");
            return Err(error.into());
        }
    }
}

/// Per-call retry bookkeeping. Lives for one dispatch only.
struct RetryState<'a> {
    attempts_remaining: u32,
    config: &'a RetryConfig,
}

impl<'a> RetryState<'a> {
    fn new(config: &'a RetryConfig) -> Self {
        Self {
            attempts_remaining: config.retry_attempts,
            config,
        }
    }

    fn is_retryable(&self, status: u16) -> bool {
        self.config.should_retry_status(status)
    }

    /// Use up one retry; `false` once none remain.
    fn consume(&mut self) -> bool {
        if self.attempts_remaining == 0 {
            return false;
        }
        self.attempts_remaining -= 1;
        true
    }
}

/// Decode a raw response into a typed record.
///
/// An empty response decodes as JSON `null`, so `Option<T>` and `()` accept
/// it. Mismatches surface as [`Error::Validation`].
///
/// # Example
///
/// ```
/// use paca_rs::client::wrap;
///
/// #[derive(serde::Deserialize)]
/// struct Clock {
///     is_open: bool,
/// }
///
/// let clock: Clock = wrap(Some(serde_json::json!({"is_open": true}))).unwrap();
/// assert!(clock.is_open);
///
/// let nothing: Option<Clock> = wrap(None).unwrap();
/// assert!(nothing.is_none());
/// ```
pub fn wrap<T: DeserializeOwned>(raw: Option<Value>) -> Result<T> {
    serde_json::from_value(raw.unwrap_or(Value::Null)).map_err(|source| Error::Validation {
        target: std::any::type_name::<T>(),
        source,
    })
}

impl Clone for RestClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.inner.base_url)
            .field("credentials", &self.inner.credentials)
            .field("config", &self.inner.config)
            .finish()
    }
}
