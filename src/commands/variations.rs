//! Variations command implementation.

use super::{build_client, render};
use crate::config::Config;
use crate::format::Formatter;
use crate::paapi::{PaapiClient, Transport, VariationsRequest};
use anyhow::{Context, Result};
use tracing::info;

/// Lists the variations of a parent or child ASIN.
pub struct VariationsCommand {
    config: Config,
    show_raw: bool,
}

impl VariationsCommand {
    /// Creates a new variations command.
    pub fn new(config: Config) -> Self {
        Self { config, show_raw: false }
    }

    pub fn show_raw(mut self, show_raw: bool) -> Self {
        self.show_raw = show_raw;
        self
    }

    pub async fn execute(&self, asin: &str, page: Option<u32>) -> Result<String> {
        let client = build_client(&self.config, self.show_raw)?;
        self.execute_with_client(&client, asin, page).await
    }

    /// Fetches variations with a provided client (for testing).
    pub async fn execute_with_client<T: Transport>(
        &self,
        client: &PaapiClient<T>,
        asin: &str,
        page: Option<u32>,
    ) -> Result<String> {
        let asin = asin.trim().to_uppercase();
        if asin.len() != 10 || !asin.chars().all(|c| c.is_ascii_alphanumeric()) {
            anyhow::bail!(
                "Invalid ASIN format: '{}'. ASIN should be 10 alphanumeric characters.",
                asin
            );
        }

        let mut request = VariationsRequest::new(asin.as_str());
        if let Some(page) = page {
            request = request.page(page);
        }

        let response = client.get_variations(&request).await.context("Request error")?;

        if let Some(summary) =
            response.variations_result.as_ref().and_then(|r| r.variation_summary.as_ref())
        {
            info!(
                "{} has {} variation(s) over {} page(s)",
                asin,
                summary.variation_count.unwrap_or(0),
                summary.page_count.unwrap_or(0)
            );
        }

        render(&response, response.items(), &Formatter::new(self.config.format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::paapi::client::tests::{make_client, StubTransport};

    const VARIATIONS_OK: &str = r#"{"VariationsResult": {
        "Items": [
            {"ASIN": "B07H65KP63", "ParentASIN": "B07H6GXN3D", "ItemInfo": {"Title": {"DisplayValue": "Shirt, Red"}}},
            {"ASIN": "B07H65KP64", "ParentASIN": "B07H6GXN3D", "ItemInfo": {"Title": {"DisplayValue": "Shirt, Blue"}}}
        ],
        "VariationSummary": {"PageCount": 1, "VariationCount": 2}
    }}"#;

    fn make_command(format: OutputFormat) -> VariationsCommand {
        VariationsCommand::new(Config { format, ..Config::default() })
    }

    #[tokio::test]
    async fn test_variations_command_csv() {
        let client = make_client(StubTransport::ok(VARIATIONS_OK));
        let output = make_command(OutputFormat::Csv)
            .execute_with_client(&client, "b07h65kp63", Some(2))
            .await
            .unwrap();

        assert!(output.contains("B07H65KP63,B07H6GXN3D,\"Shirt, Red\""));
        assert_eq!(output.lines().count(), 3);

        let (_, body) = client.transport().last_request().unwrap();
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["ASIN"], "B07H65KP63");
        assert_eq!(body["VariationPage"], 2);
    }

    #[tokio::test]
    async fn test_variations_command_invalid_asin() {
        let client = make_client(StubTransport::ok(VARIATIONS_OK));
        let err = make_command(OutputFormat::Table)
            .execute_with_client(&client, "B07-H65", None)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid ASIN format"));
        assert_eq!(client.transport().call_count(), 0);
    }

    #[tokio::test]
    async fn test_variations_command_missing_result() {
        let client = make_client(StubTransport::ok("{}"));
        let err = make_command(OutputFormat::Table)
            .execute_with_client(&client, "B07H65KP63", None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Request error");
    }
}
