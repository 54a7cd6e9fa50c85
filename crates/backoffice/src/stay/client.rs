//! HTTP transport for the Stay API.
//!
//! One `reqwest::Client` with a fixed timeout; every request carries the
//! application API key, plus the operator session token when one is stored.
//! Typed endpoint methods live in the per-entity modules (`rooms`, `users`,
//! `bookings`, `comments`, `locations`).

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::config::StayApiConfig;

use super::types::{ApiEnvelope, RejectionBody};
use super::{GENERIC_REJECTION, StayCache, StayError};

/// Header carrying the application API key on every request.
const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the operator session token, when present.
const SESSION_HEADER: &str = "token";

/// Client for the Stay API.
///
/// Cheaply cloneable; clones share the HTTP pool, the response cache, and
/// the stored session token.
#[derive(Clone)]
pub struct StayClient {
    inner: Arc<StayClientInner>,
}

struct StayClientInner {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    /// Operator session token; cleared exactly once on a 401.
    session: RwLock<Option<SecretString>>,
    cache: StayCache,
}

impl StayClient {
    /// Create a new Stay API client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: &StayApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(StayClientInner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                api_key: config.api_key.clone(),
                session: RwLock::new(None),
                cache: StayCache::new(Duration::from_secs(config.cache_ttl_secs)),
            }),
        }
    }

    // =========================================================================
    // Session token
    // =========================================================================

    /// Store the operator session token used for authenticated calls.
    pub async fn set_session_token(&self, token: SecretString) {
        *self.inner.session.write().await = Some(token);
    }

    /// Explicitly clear the stored session token (logout).
    pub async fn clear_session_token(&self) {
        *self.inner.session.write().await = None;
    }

    /// Whether a session token is currently stored.
    pub async fn has_session_token(&self) -> bool {
        self.inner.session.read().await.is_some()
    }

    /// Clear the session token in reaction to a 401.
    ///
    /// Only the first 401 does anything; with no token stored there is
    /// nothing left to clear, so repeated 401s cannot loop.
    async fn expire_session(&self) {
        let mut session = self.inner.session.write().await;
        if session.take().is_some() {
            tracing::warn!("Stay API rejected the session token; cleared stored token");
        }
    }

    // =========================================================================
    // Request plumbing (used by the entity modules)
    // =========================================================================

    pub(crate) fn cache(&self) -> &StayCache {
        &self.inner.cache
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, StayError> {
        let builder = self.inner.http.get(self.url(path)).query(query);
        self.execute(builder, path).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StayError> {
        let builder = self.inner.http.post(self.url(path)).json(body);
        self.execute(builder, path).await
    }

    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StayError> {
        let builder = self.inner.http.put(self.url(path)).json(body);
        self.execute(builder, path).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, StayError> {
        let builder = self.inner.http.delete(self.url(path)).query(query);
        self.execute(builder, path).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<T, StayError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("formFile", part);
        let builder = self
            .inner
            .http
            .post(self.url(path))
            .query(query)
            .multipart(form);
        self.execute(builder, path).await
    }

    /// Send a request and unwrap the platform envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        resource: &str,
    ) -> Result<T, StayError> {
        let mut builder = builder.header(API_KEY_HEADER, self.inner.api_key.expose_secret());
        {
            let session = self.inner.session.read().await;
            if let Some(token) = session.as_ref() {
                builder = builder.header(SESSION_HEADER, token.expose_secret());
            }
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session().await;
            return Err(StayError::Unauthorized);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(StayError::NotFound(resource.to_owned()));
        }

        if !status.is_success() {
            let rejection: RejectionBody = serde_json::from_str(&text).unwrap_or_default();
            tracing::error!(
                status = %status,
                resource = %resource,
                body = %text.chars().take(500).collect::<String>(),
                "Stay API returned non-success status"
            );
            return Err(StayError::Rejected {
                status: status.as_u16(),
                field: rejection.field.clone(),
                message: rejection
                    .into_message()
                    .unwrap_or_else(|| GENERIC_REJECTION.to_owned()),
            });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                resource = %resource,
                body = %text.chars().take(500).collect::<String>(),
                "Failed to parse Stay API response"
            );
            StayError::Parse(e)
        })?;

        Ok(envelope.content)
    }
}
