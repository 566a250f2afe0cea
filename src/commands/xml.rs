//! Legacy XML inspection command.

use crate::legacy::{parse_xml, CartCreateResponse, ItemSearchErrorResponse, ItemSearchResponse};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Root element expected in a legacy XML document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlKind {
    ItemSearch,
    ItemSearchError,
    CartCreate,
}

impl std::str::FromStr for XmlKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "item-search" => Ok(XmlKind::ItemSearch),
            "item-search-error" => Ok(XmlKind::ItemSearchError),
            "cart-create" => Ok(XmlKind::CartCreate),
            _ => Err(format!(
                "Unknown XML kind: {}. Use: item-search, item-search-error, cart-create",
                s
            )),
        }
    }
}

impl std::fmt::Display for XmlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            XmlKind::ItemSearch => write!(f, "item-search"),
            XmlKind::ItemSearchError => write!(f, "item-search-error"),
            XmlKind::CartCreate => write!(f, "cart-create"),
        }
    }
}

/// Parses a saved legacy XML response and summarizes it.
pub struct XmlCommand {
    kind: XmlKind,
}

impl XmlCommand {
    pub fn new(kind: XmlKind) -> Self {
        Self { kind }
    }

    pub fn execute(&self, path: &Path) -> Result<String> {
        let xml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read XML file: {}", path.display()))?;
        info!("Parsing {} as {}", path.display(), self.kind);
        self.summarize(&xml)
    }

    pub fn summarize(&self, xml: &str) -> Result<String> {
        let context = || format!("Failed to parse {} response", self.kind);

        match self.kind {
            XmlKind::ItemSearch => {
                let response: ItemSearchResponse = parse_xml(xml).with_context(context)?;
                Ok(summarize_item_search(&response))
            }
            XmlKind::ItemSearchError => {
                let response: ItemSearchErrorResponse = parse_xml(xml).with_context(context)?;
                Ok(format!(
                    "Error:      {}\nMessage:    {}\nRequest ID: {}",
                    response.error.code.as_deref().unwrap_or("N/A"),
                    response.error.message.as_deref().unwrap_or("N/A"),
                    response.request_id.as_deref().unwrap_or("N/A")
                ))
            }
            XmlKind::CartCreate => {
                let response: CartCreateResponse = parse_xml(xml).with_context(context)?;
                Ok(summarize_cart(&response))
            }
        }
    }
}

fn summarize_item_search(response: &ItemSearchResponse) -> String {
    let mut lines = Vec::new();

    for error in response.errors() {
        lines.push(format!(
            "Error: {} - {}",
            error.code.as_deref().unwrap_or("N/A"),
            error.message.as_deref().unwrap_or("")
        ));
    }

    if let Some(total) = response.items.total_results {
        lines.push(format!("Total results: {}", total));
    }

    for item in response.items() {
        lines.push(format!("{:<10}  {}", item.asin, item.title().unwrap_or("")));
    }

    lines.push(format!("{} items", response.items().len()));
    lines.join("\n")
}

fn summarize_cart(response: &CartCreateResponse) -> String {
    let Some(cart) = &response.cart else {
        return "No cart in response".to_string();
    };

    let mut lines = vec![format!("Cart ID:  {}", cart.cart_id.as_deref().unwrap_or("N/A"))];
    if let Some(url) = &cart.purchase_url {
        lines.push(format!("Purchase: {}", url));
    }
    for item in cart.items() {
        lines.push(format!(
            "{} x {} ({})",
            item.quantity.unwrap_or(0),
            item.asin.as_deref().unwrap_or("N/A"),
            item.title.as_deref().unwrap_or("")
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_xml_kind_parsing() {
        assert_eq!("item-search".parse::<XmlKind>().unwrap(), XmlKind::ItemSearch);
        assert_eq!("Cart-Create".parse::<XmlKind>().unwrap(), XmlKind::CartCreate);
        assert!("cart".parse::<XmlKind>().unwrap_err().contains("Unknown XML kind"));
        assert_eq!(XmlKind::ItemSearchError.to_string(), "item-search-error");
    }

    #[test]
    fn test_summarize_item_search_with_error() {
        let xml = r#"<ItemSearchResponse><Items>
            <Request><IsValid>False</IsValid><Errors><Error>
                <Code>AWS.MissingParameters</Code><Message>Keywords missing</Message>
            </Error></Errors></Request>
        </Items></ItemSearchResponse>"#;

        let output = XmlCommand::new(XmlKind::ItemSearch).summarize(xml).unwrap();
        assert!(output.contains("Error: AWS.MissingParameters - Keywords missing"));
        assert!(output.ends_with("0 items"));
    }

    #[test]
    fn test_execute_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "<CartCreateResponse><Cart><CartId>123-456</CartId></Cart></CartCreateResponse>"
        )
        .unwrap();

        let output = XmlCommand::new(XmlKind::CartCreate).execute(file.path()).unwrap();
        assert!(output.contains("Cart ID:  123-456"));
    }

    #[test]
    fn test_execute_missing_file() {
        let err = XmlCommand::new(XmlKind::CartCreate)
            .execute(Path::new("/nonexistent/cart.xml"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read XML file"));
    }

    #[test]
    fn test_summarize_malformed() {
        let err = XmlCommand::new(XmlKind::ItemSearchError).summarize("<oops").unwrap_err();
        assert!(err.to_string().contains("Failed to parse item-search-error response"));
    }
}
