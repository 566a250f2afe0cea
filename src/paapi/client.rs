//! High-level PAAPI5 client: validate, build, sign, send, map.

use crate::error::{PaapiError, Result};
use crate::paapi::endpoints::{Endpoint, EndpointConfig, EndpointConfigRepository};
use crate::paapi::mapper::ResponseMapper;
use crate::paapi::models::{
    GetItemsResponse, GetVariationsResponse, PaapiResponse, SearchItemsResponse,
};
use crate::paapi::request::{to_json, ItemsRequest, RequestBuilder, SearchRequest, VariationsRequest};
use crate::paapi::resources::Operation;
use crate::paapi::signer::Credentials;
use crate::paapi::transport::{HttpTransport, Transport, TransportOptions};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Callback invoked with every raw payload before it is mapped.
pub type RawObserver = Arc<dyn Fn(Operation, &str) + Send + Sync>;

/// Settings needed to construct a [`PaapiClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: Endpoint,
    pub partner_tag: String,
    pub strict_json_mapping: bool,
    pub transport: TransportOptions,
}

impl ClientOptions {
    pub fn new(endpoint: Endpoint, partner_tag: impl Into<String>) -> Self {
        Self {
            endpoint,
            partner_tag: partner_tag.into(),
            strict_json_mapping: false,
            transport: TransportOptions::default(),
        }
    }
}

/// Product Advertising API client.
///
/// Holds only immutable state; share it behind an `Arc` for concurrent calls.
pub struct PaapiClient<T: Transport = HttpTransport> {
    transport: T,
    builder: RequestBuilder,
    mapper: ResponseMapper,
    endpoint: EndpointConfig,
    observer: Option<RawObserver>,
}

impl PaapiClient<HttpTransport> {
    /// Creates a client that talks to the real API over HTTPS.
    pub fn new(credentials: Credentials, options: &ClientOptions) -> Result<Self> {
        let endpoint = EndpointConfigRepository::new().get(options.endpoint)?.clone();
        let transport = HttpTransport::new(credentials, &endpoint, &options.transport)?;
        Ok(Self::from_parts(transport, endpoint, options))
    }
}

impl<T: Transport> PaapiClient<T> {
    /// Creates a client on top of any transport (for testing or custom stacks).
    pub fn with_transport(transport: T, options: &ClientOptions) -> Result<Self> {
        let endpoint = EndpointConfigRepository::new().get(options.endpoint)?.clone();
        Ok(Self::from_parts(transport, endpoint, options))
    }

    fn from_parts(transport: T, endpoint: EndpointConfig, options: &ClientOptions) -> Self {
        Self {
            builder: RequestBuilder::new(options.partner_tag.clone(), &endpoint),
            mapper: ResponseMapper::new(options.strict_json_mapping),
            transport,
            endpoint,
            observer: None,
        }
    }

    /// Registers a callback that sees each raw response body before mapping.
    pub fn with_raw_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(Operation, &str) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Keyword search with the default resource set.
    pub async fn search_items_by_keyword(&self, keyword: &str) -> Result<SearchItemsResponse> {
        self.search_items(&SearchRequest::new(keyword)).await
    }

    pub async fn search_items(&self, request: &SearchRequest) -> Result<SearchItemsResponse> {
        info!("Searching items: {}", request.keywords);
        let wire = self.builder.search_items(request)?;
        self.execute(&wire).await
    }

    /// Looks up items by ID with the default resource set.
    pub async fn get_items_by_ids<S: AsRef<str>>(&self, item_ids: &[S]) -> Result<GetItemsResponse> {
        let request = ItemsRequest::new(item_ids.iter().map(|id| id.as_ref().to_string()));
        self.get_items(&request).await
    }

    pub async fn get_items(&self, request: &ItemsRequest) -> Result<GetItemsResponse> {
        info!("Getting {} item(s)", request.item_ids.len());
        let wire = self.builder.get_items(request)?;
        self.execute(&wire).await
    }

    /// Looks up variations of an ASIN with the default resource set.
    pub async fn get_variations_by_asin(&self, asin: &str) -> Result<GetVariationsResponse> {
        self.get_variations(&VariationsRequest::new(asin)).await
    }

    pub async fn get_variations(
        &self,
        request: &VariationsRequest,
    ) -> Result<GetVariationsResponse> {
        info!("Getting variations of {}", request.asin);
        let wire = self.builder.get_variations(request)?;
        self.execute(&wire).await
    }

    async fn execute<W, R>(&self, wire: &W) -> Result<R>
    where
        W: Serialize + Sync,
        R: PaapiResponse,
    {
        let operation = R::OPERATION;
        let json = to_json(wire)?;

        let raw = self.transport.send(operation, &json).await?;
        if let Some(observer) = &self.observer {
            observer(operation, &raw.content);
        }

        if !raw.successful {
            return Err(PaapiError::Api { status: raw.status_code, body: raw.content });
        }

        let response: R = self.mapper.map(&raw.content)?;
        if let Some(message) = response.error_message() {
            debug!("{} returned API errors: {}", operation, message);
        }
        Ok(response)
    }
}

impl<T: Transport> fmt::Debug for PaapiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaapiClient")
            .field("endpoint", &self.endpoint)
            .field("marketplace", &self.builder.marketplace())
            .field("strict", &self.mapper.is_strict())
            .finish_non_exhaustive()
    }
}
