//! Error taxonomy for the PAAPI5 client.

use thiserror::Error;

/// Errors surfaced by the client before, during, or after a PAAPI5 call.
///
/// Payload-level API errors (an `Errors` array next to a missing result) are not
/// represented here; those come back as a typed response whose
/// `is_successful()` is false.
#[derive(Debug, Error)]
pub enum PaapiError {
    /// A requested resource is not in the operation's allow-list.
    #[error("Resources has wrong values")]
    InvalidResources {
        /// Offending resource strings.
        invalid: Vec<String>,
    },

    /// Request or response JSON could not be (de)serialized.
    #[error("Cannot serialize object")]
    Serialization(#[source] Option<serde_json::Error>),

    /// Strict mapping found a field the typed model does not capture.
    #[error("Unmapped field in response: {path}")]
    UnmappedField {
        /// JSON path of the first unmapped field, e.g. `SearchResult.Items[0].Foo`.
        path: String,
    },

    /// Non-2xx HTTP status from the API.
    #[error("API request failure {status} {body}")]
    Api { status: u16, body: String },

    /// Network-level failure (DNS, TLS, timeout).
    #[error("Transport failure: {0}")]
    Transport(#[from] wreq::Error),

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Signing failure: {0}")]
    Signing(String),

    /// Legacy XML payload could not be parsed.
    #[error("Invalid XML response: {0}")]
    Xml(#[from] quick_xml::DeError),
}

impl From<serde_json::Error> for PaapiError {
    fn from(err: serde_json::Error) -> Self {
        PaapiError::Serialization(Some(err))
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, PaapiError>;
