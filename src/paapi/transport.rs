//! Signed HTTP transport for PAAPI5 operations.

use crate::error::Result;
use crate::paapi::endpoints::EndpointConfig;
use crate::paapi::resources::Operation;
use crate::paapi::signer::{Credentials, SignableRequest, Signer};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

const TARGET_PREFIX: &str = "com.amazon.paapi5.v1.ProductAdvertisingAPIv1";
const CONTENT_ENCODING: &str = "amz-1.0";
const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Default `user-agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("amz-paapi/", env!("CARGO_PKG_VERSION"));

/// Status and body of one API call, before any deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub successful: bool,
    pub status_code: u16,
    pub content: String,
}

/// Sends a serialized operation body - enables stubbing for tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `body` for `operation`. Non-2xx statuses come back as
    /// `successful == false`; only network failures are errors.
    async fn send(&self, operation: Operation, body: &str) -> Result<RawResponse>;
}

/// Options for the HTTP transport.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub proxy: Option<String>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            proxy: None,
        }
    }
}

/// wreq-backed transport that signs every request with SigV4.
pub struct HttpTransport {
    client: Client,
    signer: Signer,
    host: String,
    user_agent: String,
    base_url: Option<String>,
}

impl HttpTransport {
    pub fn new(
        credentials: Credentials,
        endpoint: &EndpointConfig,
        options: &TransportOptions,
    ) -> Result<Self> {
        Self::with_base_url(credentials, endpoint, options, None)
    }

    /// Creates a transport with an optional custom base URL (for testing).
    ///
    /// The signed `host` header stays the real API host either way.
    pub fn with_base_url(
        credentials: Credentials,
        endpoint: &EndpointConfig,
        options: &TransportOptions,
        base_url: Option<String>,
    ) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout);

        if let Some(proxy_url) = &options.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            builder = builder.proxy(wreq::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            signer: Signer::paapi(credentials, endpoint.region),
            host: endpoint.api_host(),
            user_agent: options.user_agent.clone(),
            base_url,
        })
    }

    fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| format!("https://{}", self.host))
    }

    /// Builds and signs the request for `operation`.
    fn signed_request(&self, operation: Operation, body: &str) -> Result<SignableRequest> {
        let path = format!("/paapi5/{}", operation.path_segment());
        let mut request = SignableRequest::new("POST", &self.host, &path, body)
            .header("content-encoding", CONTENT_ENCODING)
            .header("content-type", CONTENT_TYPE)
            .header("x-amz-target", format!("{}.{}", TARGET_PREFIX, operation));

        self.signer.sign(&mut request, Utc::now())?;
        Ok(request)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, operation: Operation, body: &str) -> Result<RawResponse> {
        let request = self.signed_request(operation, body)?;
        let url = format!("{}{}", self.base_url(), request.path);

        info!("{} -> POST {}", operation, url);

        let mut builder =
            self.client.post(url.as_str()).header("user-agent", self.user_agent.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(request.body).send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        let content = response.text().await?;

        if !status.is_success() {
            warn!("{} failed with status {}", operation, status);
            return Ok(RawResponse { successful: false, status_code: status.as_u16(), content });
        }

        Ok(RawResponse { successful: true, status_code: status.as_u16(), content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paapi::endpoints::{Endpoint, EndpointConfigRepository};
    use wiremock::matchers::{body_string, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_transport(base_url: Option<String>) -> HttpTransport {
        let repo = EndpointConfigRepository::new();
        HttpTransport::with_base_url(
            Credentials::new("AKIDEXAMPLE", "secret"),
            repo.get(Endpoint::De).unwrap(),
            &TransportOptions::default(),
            base_url,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_send_sets_paapi_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/paapi5/searchitems"))
            .and(header("x-amz-target", "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.SearchItems"))
            .and(header("content-encoding", "amz-1.0"))
            .and(header_exists("x-amz-date"))
            .and(header_exists("authorization"))
            .and(body_string(r#"{"Keywords":"lego"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"SearchResult":{}}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = make_transport(Some(mock_server.uri()));
        let response =
            transport.send(Operation::SearchItems, r#"{"Keywords":"lego"}"#).await.unwrap();

        assert!(response.successful);
        assert_eq!(response.status_code, 200);
        assert_eq!(response.content, r#"{"SearchResult":{}}"#);
    }

    #[tokio::test]
    async fn test_send_non_success_returns_body() {
        let mock_server = MockServer::start().await;
        let error_body = r#"{"Errors":[{"Code":"InvalidSignature","Message":"Invalid"}]}"#;

        Mock::given(method("POST"))
            .and(path("/paapi5/getitems"))
            .respond_with(ResponseTemplate::new(400).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let transport = make_transport(Some(mock_server.uri()));
        let response = transport.send(Operation::GetItems, "{}").await.unwrap();

        assert!(!response.successful);
        assert_eq!(response.status_code, 400);
        assert_eq!(response.content, error_body);
    }

    #[tokio::test]
    async fn test_send_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = make_transport(Some(mock_server.uri()));
        let response = transport.send(Operation::GetVariations, "{}").await.unwrap();
        assert!(!response.successful);
        assert_eq!(response.status_code, 503);
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on port 9 (discard) in the test environment
        let transport = make_transport(Some("http://127.0.0.1:9".to_string()));
        let err = transport.send(Operation::GetItems, "{}").await.unwrap_err();
        assert!(matches!(err, crate::error::PaapiError::Transport(_)));
    }

    #[test]
    fn test_signed_request_shape() {
        let transport = make_transport(None);
        let request = transport.signed_request(Operation::GetVariations, "{}").unwrap();

        assert_eq!(request.path, "/paapi5/getvariations");
        assert_eq!(
            request.headers["x-amz-target"],
            "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.GetVariations"
        );
        assert_eq!(request.headers["host"], "webservices.amazon.de");
        assert!(request.headers["authorization"].contains("/eu-west-1/ProductAdvertisingAPI/"));
    }

    #[test]
    fn test_base_url_default() {
        let transport = make_transport(None);
        assert_eq!(transport.base_url(), "https://webservices.amazon.de");
    }
}
