//! Item lookup command implementation.

use super::{build_client, render};
use crate::config::Config;
use crate::format::Formatter;
use crate::paapi::{ItemsRequest, PaapiClient, PaapiResponse, Transport};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Looks up one or more items by ID.
pub struct ItemsCommand {
    config: Config,
    show_raw: bool,
}

impl ItemsCommand {
    /// Creates a new items command.
    pub fn new(config: Config) -> Self {
        Self { config, show_raw: false }
    }

    pub fn show_raw(mut self, show_raw: bool) -> Self {
        self.show_raw = show_raw;
        self
    }

    /// Fetches items by ID and returns formatted output.
    pub async fn execute(&self, item_ids: &[String]) -> Result<String> {
        let client = build_client(&self.config, self.show_raw)?;
        self.execute_with_client(&client, item_ids).await
    }

    /// Fetches items with a provided client (for testing).
    pub async fn execute_with_client<T: Transport>(
        &self,
        client: &PaapiClient<T>,
        item_ids: &[String],
    ) -> Result<String> {
        let ids: Vec<String> =
            item_ids.iter().map(|id| id.trim().to_uppercase()).filter(|id| !id.is_empty()).collect();
        if ids.is_empty() {
            anyhow::bail!("No item IDs given");
        }

        info!("Looking up items: {}", ids.join(", "));

        let response = client.get_items(&ItemsRequest::new(ids)).await.context("Request error")?;
        let formatter = Formatter::new(self.config.format);

        let items = response.items();
        if items.is_empty() {
            return render(&response, items, &formatter);
        }

        // Partial results still print; per-ID errors go to the log
        if let Some(message) = response.error_message() {
            warn!("Some items could not be fetched: {}", message);
        }

        // A single hit reads better as a detail view
        match items {
            [item] => Ok(formatter.format_item(item)),
            _ => Ok(formatter.format_items(items)),
        }
    }
}
