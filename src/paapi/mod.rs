//! Product Advertising API 5.0 client.

pub mod client;
pub mod endpoints;
pub mod mapper;
pub mod models;
pub mod request;
pub mod resources;
pub mod signer;
pub mod transport;

pub use client::{ClientOptions, PaapiClient};
pub use endpoints::{Endpoint, EndpointConfig, EndpointConfigRepository};
pub use mapper::ResponseMapper;
pub use models::{GetItemsResponse, GetVariationsResponse, Item, PaapiResponse, SearchItemsResponse};
pub use request::{ItemsRequest, SearchRequest, SortBy, VariationsRequest};
pub use resources::{Operation, ResourceValidator};
pub use signer::Credentials;
pub use transport::{HttpTransport, RawResponse, Transport, TransportOptions};
