// Auth client: obtains, caches and hands out the session token that
// authorizes mutating booking calls.

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::http::{ApiError, ApiResponse, HttpClient, RequestOptions};
use crate::retry::{BackoffStrategy, LinearBackoff};
use crate::types::{Credentials, TokenResponse};

pub const AUTH_ENDPOINT: &str = "/auth";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication token unobtainable after {attempts} attempt(s)")]
    TokenUnobtainable {
        attempts: u32,
        #[source]
        last_error: Option<ApiError>,
    },

    #[error("Token cannot be sent as a cookie: {0}")]
    InvalidToken(String),
}

// Single token slot. Clones share the slot, so every client built from the
// same cache sees (and clears) the same token. No expiry.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    slot: Arc<RwLock<Option<String>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.slot.read().clone()
    }

    // An empty token is never stored; it leaves the slot as it was.
    pub fn store(&self, token: impl Into<String>) {
        let token = token.into();
        if token.is_empty() {
            return;
        }
        *self.slot.write() = Some(token);
    }

    pub fn clear(&self) {
        self.slot.write().take();
    }

    pub fn is_empty(&self) -> bool {
        self.slot.read().is_none()
    }

    pub fn shares_slot_with(&self, other: &TokenCache) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

// Builds the `Cookie: token=<value>` header set for protected endpoints.
pub fn cookie_headers(token: &str) -> Result<HeaderMap, AuthError> {
    let value = HeaderValue::from_str(&format!("token={}", token))
        .map_err(|err| AuthError::InvalidToken(err.to_string()))?;
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, value);
    Ok(headers)
}

#[derive(Clone)]
pub struct AuthClient {
    http: HttpClient,
    cache: TokenCache,
    credentials: Credentials,
    max_attempts: u32,
    backoff: Arc<dyn BackoffStrategy>,
}

impl AuthClient {
    pub fn new(http: HttpClient, cache: TokenCache, credentials: Credentials) -> Self {
        Self {
            http,
            cache,
            credentials,
            max_attempts: 3,
            backoff: Arc::new(LinearBackoff::default()),
        }
    }

    pub fn from_config(http: HttpClient, cache: TokenCache, config: &ClientConfig) -> Self {
        Self::new(http, cache, config.credentials.clone())
            .with_max_attempts(config.auth_retry.max_attempts)
            .with_backoff(Arc::new(LinearBackoff::new(config.auth_retry.backoff_step())))
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_backoff(mut self, backoff: Arc<dyn BackoffStrategy>) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // Calls the token endpoint without touching the cache. Rejected
    // credentials come back as a normal response carrying `reason`.
    pub async fn fetch_token<C>(
        &self,
        credentials: &C,
    ) -> Result<ApiResponse<TokenResponse>, ApiError>
    where
        C: Serialize + ?Sized,
    {
        self.http
            .post(AUTH_ENDPOINT, credentials, RequestOptions::default())
            .await
    }

    // Same as fetch_token, and stores any issued token in the shared cache
    pub async fn create_token<C>(
        &self,
        credentials: &C,
    ) -> Result<ApiResponse<TokenResponse>, ApiError>
    where
        C: Serialize + ?Sized,
    {
        let result = self.fetch_token(credentials).await?;
        if let Some(token) = result.data.issued_token() {
            self.cache.store(token);
        }
        Ok(result)
    }

    pub async fn get_admin_token(&self) -> Result<String, AuthError> {
        self.get_admin_token_with_attempts(self.max_attempts).await
    }

    // Cached token if there is one, otherwise up to `max_attempts` token
    // requests with the configured credentials. A zero budget still makes
    // one attempt.
    pub async fn get_admin_token_with_attempts(
        &self,
        max_attempts: u32,
    ) -> Result<String, AuthError> {
        if let Some(token) = self.cache.get() {
            debug!("using cached token");
            return Ok(token);
        }

        let max_attempts = max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            match self.create_token(&self.credentials).await {
                Ok(result) => {
                    if let Some(token) = self.cache.get() {
                        info!(attempt, "obtained token");
                        return Ok(token);
                    }
                    // Cache was cleared concurrently after create_token stored it
                    if let Some(token) = result.data.issued_token() {
                        self.cache.store(token);
                        info!(attempt, "obtained token");
                        return Ok(token.to_string());
                    }
                    warn!(
                        attempt,
                        status = result.status().as_u16(),
                        reason = result.data.reason.as_deref().unwrap_or("none"),
                        "token request returned no token"
                    );
                }
                Err(err) => {
                    warn!(attempt, error = %err, "token request failed");
                    last_error = Some(err);
                }
            }

            if attempt < max_attempts {
                let delay = self.backoff.delay_for(attempt);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        error!(attempts = max_attempts, "giving up on token acquisition");
        Err(AuthError::TokenUnobtainable {
            attempts: max_attempts,
            last_error,
        })
    }

    pub async fn auth_headers(&self) -> Result<HeaderMap, AuthError> {
        let token = self.get_admin_token().await?;
        cookie_headers(&token)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
