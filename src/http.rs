// HTTP client adapter
// Turns (method, path, query, body, headers) into a transport call and hands
// back the raw response together with a best-effort decoded body.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::{ClientConfig, ClientError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// A request as handed to the transport. Paths are relative to the base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

// Fully buffered response
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    elapsed: Duration,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    // True for any 2xx status.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    // Wall-clock time spent in the transport, zero if it was not measured
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

// Raw response plus the decoded body
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub response: RawResponse,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }
}

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

// reqwest-backed transport bound to one base URL
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: Option<u64>,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate_base_url()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(default_headers)
            .danger_accept_invalid_certs(config.ignore_https_errors);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ClientError::InitError(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.timeout_ms,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

}

// Timeout carries the configured limit; with no limit configured a timed out
// request is reported as a network error.
fn map_reqwest_error(err: reqwest::Error, timeout_ms: Option<u64>) -> ApiError {
    match timeout_ms {
        Some(ms) if err.is_timeout() => ApiError::Timeout(ms),
        _ if err.is_builder() => ApiError::InvalidRequest(err.to_string()),
        _ => ApiError::NetworkError(err.to_string()),
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let ApiRequest {
            method,
            path,
            query,
            headers,
            body,
        } = request;
        let url = self.url_for(&path);
        let started = Instant::now();

        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, self.timeout_ms))?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| map_reqwest_error(err, self.timeout_ms))?;
        let elapsed = started.elapsed();

        debug!(
            %method,
            %url,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "request completed"
        );

        Ok(RawResponse::new(status, response_headers, bytes).with_elapsed(elapsed))
    }
}

// Extra headers and query parameters for a single call
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub params: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn with_headers(headers: HeaderMap) -> Self {
        Self {
            headers,
            ..Default::default()
        }
    }

    pub fn with_params(params: Vec<(String, String)>) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

// Thin verb-level wrapper over a shared transport. No retry, no timeout.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(config)?)))
    }

    pub async fn get<T>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        let response = self.send(Method::GET, endpoint, None, options).await?;
        Ok(decode(response))
    }

    pub async fn get_text(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<String>, ApiError> {
        let response = self.send(Method::GET, endpoint, None, options).await?;
        let data = response.text();
        Ok(ApiResponse { response, data })
    }

    pub async fn post<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        let response = self.send(Method::POST, endpoint, Some(body), options).await?;
        Ok(decode(response))
    }

    pub async fn put<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        let response = self.send(Method::PUT, endpoint, Some(body), options).await?;
        Ok(decode(response))
    }

    pub async fn patch<T, B>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        let response = self.send(Method::PATCH, endpoint, Some(body), options).await?;
        Ok(decode(response))
    }

    pub async fn delete(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<RawResponse, ApiError> {
        self.send(Method::DELETE, endpoint, None, options).await
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<RawResponse, ApiError> {
        let request = ApiRequest {
            method,
            path: endpoint.to_string(),
            query: options.params,
            headers: options.headers,
            body,
        };
        self.transport.execute(request).await
    }
}

fn encode_body<B>(body: &B) -> Result<Value, ApiError>
where
    B: Serialize + ?Sized,
{
    serde_json::to_value(body).map_err(|err| ApiError::InvalidRequest(err.to_string()))
}

fn decode<T>(response: RawResponse) -> ApiResponse<T>
where
    T: DeserializeOwned + Default,
{
    let data = parse_body(&response);
    ApiResponse { response, data }
}

// Decodes a JSON body, falling back to an empty object (or `T::default()`
// when `T` cannot be built from `{}`) instead of failing.
pub fn parse_body<T>(response: &RawResponse) -> T
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_slice::<T>(response.body()) {
        Ok(data) => data,
        Err(err) => {
            debug!(
                status = response.status().as_u16(),
                error = %err,
                "response body did not decode, using an empty value"
            );
            serde_json::from_str("{}").unwrap_or_default()
        }
    }
}
