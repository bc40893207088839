// One session = one transport + one token cache. Clients handed out by a
// session share its cache; separate sessions never see each other's token.

use std::sync::Arc;

use crate::auth::{AuthClient, TokenCache};
use crate::booking::BookingClient;
use crate::config::{ClientConfig, ClientError};
use crate::health::HealthClient;
use crate::http::{HttpClient, ReqwestTransport, Transport};

#[derive(Clone)]
pub struct ApiSession {
    config: ClientConfig,
    http: HttpClient,
    token_cache: TokenCache,
}

impl ApiSession {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(&config)?;
        tracing::info!(base_url = transport.base_url(), "api session ready");
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            http: HttpClient::new(transport),
            token_cache: TokenCache::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // Unwrapped adapter, for calls that must bypass the auth client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.token_cache
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::from_config(self.http.clone(), self.token_cache.clone(), &self.config)
    }

    pub fn bookings(&self) -> BookingClient {
        BookingClient::new(self.http.clone(), self.auth())
    }

    pub fn health(&self) -> HealthClient {
        HealthClient::new(self.http.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock_transport::ScriptedTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_clients_from_one_session_share_the_cache() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({ "token": "shared1" }));
        let session = ApiSession::with_transport(ClientConfig::default(), transport.clone());

        let token = session.auth().get_admin_token().await.unwrap();
        assert_eq!(token, "shared1");

        let bookings = session.bookings();
        assert!(bookings.auth().cache().shares_slot_with(session.token_cache()));
        assert_eq!(bookings.auth().get_admin_token().await.unwrap(), "shared1");
        assert_eq!(transport.request_count(), 1);

        bookings.auth().clear_cache();
        assert!(session.token_cache().is_empty());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let first = ApiSession::with_transport(ClientConfig::default(), ScriptedTransport::new());
        let second = ApiSession::with_transport(ClientConfig::default(), ScriptedTransport::new());

        first.token_cache().store("first-only");
        assert!(second.token_cache().is_empty());
        assert!(!first.token_cache().shares_slot_with(second.token_cache()));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ClientConfig::with_base_url("not a url");
        assert!(matches!(ApiSession::new(config), Err(ClientError::ConfigError(_))));
    }
}
