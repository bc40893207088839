// Liveness probe. The service answers GET /ping with 201 Created.

use reqwest::StatusCode;

use crate::http::{ApiError, ApiResponse, HttpClient, RequestOptions};

pub const PING_ENDPOINT: &str = "/ping";
pub const HEALTHY_STATUS: StatusCode = StatusCode::CREATED;

#[derive(Clone)]
pub struct HealthClient {
    http: HttpClient,
}

impl HealthClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn ping(&self) -> Result<ApiResponse<String>, ApiError> {
        self.http.get_text(PING_ENDPOINT, RequestOptions::default()).await
    }

    pub async fn is_healthy(&self) -> bool {
        match self.ping().await {
            Ok(result) => result.status() == HEALTHY_STATUS,
            Err(err) => {
                tracing::warn!(error = %err, "health check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> HealthClient {
        let config = ClientConfig::with_base_url(server.base_url());
        HealthClient::new(HttpClient::from_config(&config).unwrap())
    }

    #[tokio::test]
    async fn test_ping_returns_text_body() {
        let server = MockServer::start_async().await;
        let ping = server
            .mock_async(|when, then| {
                when.method(GET).path("/ping");
                then.status(201).body("Created");
            })
            .await;

        let client = client_for(&server);
        let result = client.ping().await.unwrap();

        ping.assert_async().await;
        assert_eq!(result.status(), StatusCode::CREATED);
        assert_eq!(result.data, "Created");
        assert!(client.is_healthy().await);
    }

    #[tokio::test]
    async fn test_unexpected_status_is_unhealthy() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ping");
                then.status(503).body("Service Unavailable");
            })
            .await;

        let client = client_for(&server);
        assert!(!client.is_healthy().await);
    }
}
