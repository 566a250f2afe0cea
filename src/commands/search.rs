//! Search command implementation.

use super::{build_client, render};
use crate::config::Config;
use crate::format::Formatter;
use crate::paapi::{PaapiClient, SearchRequest, Transport};
use anyhow::{Context, Result};
use tracing::info;

/// Executes a keyword search.
pub struct SearchCommand {
    config: Config,
    show_raw: bool,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config, show_raw: false }
    }

    /// Echoes raw response bodies to stderr.
    pub fn show_raw(mut self, show_raw: bool) -> Self {
        self.show_raw = show_raw;
        self
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, request: &SearchRequest) -> Result<String> {
        let client = build_client(&self.config, self.show_raw)?;
        self.execute_with_client(&client, request).await
    }

    /// Executes the search with a provided client (for testing).
    pub async fn execute_with_client<T: Transport>(
        &self,
        client: &PaapiClient<T>,
        request: &SearchRequest,
    ) -> Result<String> {
        let response = client.search_items(request).await.context("Request error")?;

        if let Some(result) = &response.search_result {
            info!(
                "Search returned {} of {} items",
                result.items.len(),
                result.total_result_count.unwrap_or(0)
            );
        }

        render(&response, response.items(), &Formatter::new(self.config.format))
    }
}
