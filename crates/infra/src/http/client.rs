use std::time::Duration;

use mizan_domain::{ApiError, MizanError};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::{api_error_from_reqwest, InfraError};

/// Status and raw body of a response, read in full
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client that sends each request once and gives up when the caller
/// cancels.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, MizanError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request and read its body, racing `cancel`.
    ///
    /// Any status is returned as-is; only transport failures are errors. A
    /// cancelled request drops the in-flight future and yields
    /// [`ApiError::cancelled`].
    pub async fn send(
        &self,
        builder: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, ApiError> {
        let request = builder.build().map_err(|err| api_error_from_reqwest(&err))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, url = %url.path(), "sending HTTP request");

        let exchange = async {
            let response = self.client.execute(request).await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(HttpResponse { status, body })
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(%method, url = %url.path(), "HTTP request cancelled");
                Err(ApiError::cancelled())
            }
            result = exchange => match result {
                Ok(response) => {
                    debug!(%method, url = %url.path(), status = response.status, "received HTTP response");
                    Ok(response)
                }
                Err(err) => {
                    debug!(%method, url = %url.path(), error = %err, "HTTP request failed");
                    Err(api_error_from_reqwest(&err))
                }
            },
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl HttpClientBuilder {
    /// Per-request timeout. Unset means requests wait indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient, MizanError> {
        let mut builder = ReqwestClient::builder().no_proxy();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| MizanError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use mizan_domain::ApiErrorKind;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn returns_any_status_with_its_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<html>missing</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().expect("http client");
        let response = client
            .send(client.request(Method::GET, server.uri()), &CancellationToken::new())
            .await
            .expect("response");

        assert_eq!(response.status, 404);
        assert_eq!(response.body, "<html>missing</html>");
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn sends_user_agent_and_default_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "mizan-test"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let client = HttpClient::builder()
            .user_agent("mizan-test")
            .default_headers(headers)
            .build()
            .expect("http client");

        let response = client
            .send(client.request(Method::GET, server.uri()), &CancellationToken::new())
            .await
            .expect("response");
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn does_not_retry_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().expect("http client");
        let response = client
            .send(client.request(Method::GET, server.uri()), &CancellationToken::new())
            .await
            .expect("response");

        assert_eq!(response.status, 500);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn cancellation_abandons_a_slow_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
            .mount(&server)
            .await;

        let client = HttpClient::new().expect("http client");
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = client
            .send(client.request(Method::GET, server.uri()), &cancel)
            .await
            .expect_err("cancelled");
        assert_eq!(err.kind, ApiErrorKind::Cancelled);
    }

    #[tokio::test]
    async fn configured_timeout_is_a_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client =
            HttpClient::builder().timeout(Duration::from_millis(100)).build().expect("http client");
        let err = client
            .send(client.request(Method::GET, server.uri()), &CancellationToken::new())
            .await
            .expect_err("timed out");

        assert_eq!(err.kind, ApiErrorKind::Network);
        assert_eq!(err.status, None);
        assert!(err.detail.as_deref().is_some_and(|d| d.contains("timed out")));
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED
        let url = format!("http://{}", addr);

        let client = HttpClient::new().expect("http client");
        let err = client
            .send(client.request(Method::GET, &url), &CancellationToken::new())
            .await
            .expect_err("network failure");

        assert_eq!(err.kind, ApiErrorKind::Network);
        assert_eq!(err.status, None);
    }
}
