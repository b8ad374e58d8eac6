use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, IntoUrl, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::credentials::Credentials;
use crate::repository::{Storage, StorageError};

mod catalog_api;
pub(crate) mod mapping;
mod session_api;
mod test_api;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiConfigError {
    #[error("invalid base URL {raw:?}: {reason}")]
    InvalidBaseUrl { raw: String, reason: String },

    #[error("base URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// Where the test-management service lives and how long to wait for it.
///
/// No timeout is set by default, so the HTTP client's own defaults apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Option<Duration>,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ApiConfigError` if `base_url` does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ApiConfigError> {
        let parsed = Url::parse(base_url.trim()).map_err(|e| ApiConfigError::InvalidBaseUrl {
            raw: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiConfigError::UnsupportedScheme(parsed.scheme().to_owned()));
        }
        Ok(Self {
            base_url: parsed,
            timeout: None,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// # Errors
    ///
    /// Returns `ApiConfigError::ZeroTimeout` for a zero timeout.
    pub fn validate(&self) -> Result<(), ApiConfigError> {
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ApiConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Absolute URL for an API path such as `session/start`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// URL of one document in `collection`, with `id` encoded as a single path segment.
    #[must_use]
    pub fn resource_url(&self, collection: &str, id: &str) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path, so this cannot fail.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(collection).push(id);
        }
        url
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HttpInitError {
    #[error(transparent)]
    Config(#[from] ApiConfigError),
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Repository backend that talks to the remote REST service.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    config: ApiConfig,
}

impl HttpRepository {
    /// # Errors
    ///
    /// Returns `HttpInitError` if the config is invalid or the client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, HttpInitError> {
        config.validate()?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str, auth: &Credentials) -> RequestBuilder {
        self.request_to(method, self.config.endpoint(path), auth)
    }

    /// Start a request, attaching a bearer token when the caller has one.
    fn request_to(&self, method: Method, url: impl IntoUrl, auth: &Credentials) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match auth.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, StorageError> {
        let response = builder
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        check_status(response)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &Credentials,
    ) -> Result<T, StorageError> {
        let response = Self::send(self.request(Method::GET, path, auth)).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

fn check_status(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    tracing::debug!(%status, url = %response.url(), "service rejected request");
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StorageError::Unauthorized,
        StatusCode::NOT_FOUND => StorageError::NotFound,
        other => StorageError::Status(other.as_u16()),
    })
}

impl Storage {
    /// Build a `Storage` backed by the remote REST service.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError` if the HTTP client cannot be built.
    pub fn http(config: ApiConfig) -> Result<Self, HttpInitError> {
        let repo = HttpRepository::new(config)?;
        Ok(Self {
            groups: Arc::new(repo.clone()),
            sub_groups: Arc::new(repo.clone()),
            tests: Arc::new(repo.clone()),
            sessions: Arc::new(repo),
        })
    }
}
