//! Response trees of the pre-PAAPI5 XML API.

pub mod models;

use crate::error::Result;
use serde::de::DeserializeOwned;
use tracing::debug;

pub use models::{CartCreateResponse, ItemSearchErrorResponse, ItemSearchResponse};

/// Deserializes a legacy XML response document into `T`.
///
/// Namespace declarations and unknown elements are ignored.
pub fn parse_xml<T: DeserializeOwned>(xml: &str) -> Result<T> {
    debug!("Parsing {} bytes of legacy XML", xml.len());
    Ok(quick_xml::de::from_str(xml)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaapiError;

    #[test]
    fn test_parse_minimal_error_response() {
        let xml = r#"<?xml version="1.0"?>
            <ItemSearchErrorResponse xmlns="http://ecs.amazonaws.com/doc/2013-08-01/">
                <Error><Code>MissingParameter</Code><Message>Keywords missing</Message></Error>
                <RequestId>abc-123</RequestId>
            </ItemSearchErrorResponse>"#;

        let response: ItemSearchErrorResponse = parse_xml(xml).unwrap();
        assert_eq!(response.request_id.as_deref(), Some("abc-123"));
        assert_eq!(response.error.code.as_deref(), Some("MissingParameter"));
    }

    #[test]
    fn test_malformed_xml_is_xml_error() {
        let err = parse_xml::<ItemSearchResponse>("<ItemSearchResponse><Items>").unwrap_err();
        assert!(matches!(err, PaapiError::Xml(_)));
    }
}
