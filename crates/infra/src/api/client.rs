//! The HTTP access layer
//!
//! Every call to the backend goes through [`ApiClient::execute`]: join the
//! path onto the base URL, attach the query string and bearer token, send
//! once, and hand back the 2xx body unchanged or a normalized [`ApiError`].

use std::time::Duration;

use async_trait::async_trait;
use mizan_core::ApiGateway;
use mizan_domain::{ApiConfig, ApiError, ApiRequest, HttpMethod, MizanError, QueryParams};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Method;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use url::Url;

use super::errors::{map_status_error, success_body};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Client for the admin backend's JSON API
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: HttpClient,
    /// Validated base URL without a trailing `/`
    base_url: String,
}

impl ApiClient {
    /// Create a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// `MizanError::Config` when the base URL does not parse or the HTTP
    /// client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, MizanError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| MizanError::from(InfraError::from(e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut http = HttpClient::builder().user_agent(config.user_agent.clone()).default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            http = http.timeout(Duration::from_secs(secs));
        }

        Ok(Self { http: http.build()?, base_url })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET path?params`.
    ///
    /// # Errors
    ///
    /// Any failure, normalized into an [`ApiError`].
    pub async fn get(
        &self,
        path: &str,
        token: Option<&str>,
        params: &QueryParams,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(path).with_token(token).with_query(params.clone());
        self.execute(request, &CancellationToken::new()).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Any failure, normalized into an [`ApiError`].
    pub async fn post(&self, path: &str, body: Value, token: Option<&str>) -> Result<Value, ApiError> {
        self.execute(ApiRequest::post(path, body).with_token(token), &CancellationToken::new()).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Any failure, normalized into an [`ApiError`].
    pub async fn put(&self, path: &str, body: Value, token: Option<&str>) -> Result<Value, ApiError> {
        self.execute(ApiRequest::put(path, body).with_token(token), &CancellationToken::new()).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// Any failure, normalized into an [`ApiError`].
    pub async fn del(&self, path: &str, token: Option<&str>) -> Result<Value, ApiError> {
        self.execute(ApiRequest::delete(path).with_token(token), &CancellationToken::new()).await
    }

    /// Send `request` once, abandoning it if `cancel` fires first.
    ///
    /// # Errors
    ///
    /// `Cancelled`, `Network` when no response arrived, `Http` for a non-2xx
    /// status, or `Decode` for a 2xx body that is not JSON.
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn execute(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<Value, ApiError> {
        if cancel.is_cancelled() {
            return Err(ApiError::cancelled());
        }

        let url = self.build_url(&request.path, &request.query)?;
        let mut builder = self.http.request(to_method(request.method), url);

        if let Some(token) = request.token.as_deref().filter(|t| !t.is_empty()) {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = self.http.send(builder, cancel).await?;
        if response.is_success() {
            debug!(status = response.status, "request succeeded");
            return success_body(&response);
        }

        let error = map_status_error(&response);
        if response.status >= 500 {
            warn!(status = response.status, "backend server error");
        } else {
            debug!(status = response.status, "request rejected");
        }
        Err(error)
    }

    /// Full URL for `path` with the effective `params` as query string.
    ///
    /// # Errors
    ///
    /// A network-kind [`ApiError`] when the joined URL does not parse.
    pub fn build_url(&self, path: &str, params: &QueryParams) -> Result<Url, ApiError> {
        let path = path.trim().trim_start_matches('/');
        let joined =
            if path.is_empty() { self.base_url.clone() } else { format!("{}/{path}", self.base_url) };

        let mut url = Url::parse(&joined)
            .map_err(|e| ApiError::network(format!("could not build request URL: {e}")))?;

        let mut pairs = params.effective().peekable();
        if pairs.peek().is_some() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }
}

#[async_trait]
impl ApiGateway for ApiClient {
    async fn send(&self, request: ApiRequest, cancel: &CancellationToken) -> Result<Value, ApiError> {
        self.execute(request, cancel).await
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiConfig>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Shorthand for a configuration with only a base URL.
    pub fn base_url(self, base_url: impl Into<String>) -> Self {
        self.config(ApiConfig::new(base_url))
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// `MizanError::Config` when no configuration was given or it is invalid.
    pub fn build(self) -> Result<ApiClient, MizanError> {
        let config = self
            .config
            .ok_or_else(|| MizanError::Config("API base URL not set".to_string()))?;

        ApiClient::new(&config)
    }
}
