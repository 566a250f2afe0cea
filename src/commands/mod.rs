//! CLI command implementations.

pub mod endpoints;
pub mod items;
pub mod search;
pub mod variations;
pub mod xml;

pub use items::ItemsCommand;
pub use search::SearchCommand;
pub use variations::VariationsCommand;
pub use xml::{XmlCommand, XmlKind};

use crate::config::Config;
use crate::format::Formatter;
use crate::paapi::{Item, PaapiClient, PaapiResponse};
use anyhow::{Context, Result};
use tracing::debug;

/// Builds a live client from configuration.
///
/// With `show_raw`, every raw response body is echoed to stderr before mapping.
pub fn build_client(config: &Config, show_raw: bool) -> Result<PaapiClient> {
    let credentials = config.credentials()?;
    let options = config.client_options()?;
    let client = PaapiClient::new(credentials, &options).context("Failed to create HTTP client")?;

    if show_raw {
        Ok(client.with_raw_observer(|operation, raw| {
            eprintln!("--- {} raw response ---\n{}\n---", operation, raw);
        }))
    } else {
        Ok(client)
    }
}

/// Formats the items of a response, or fails with a generic request error.
///
/// The API's own messages are only logged, at debug level.
fn render<R: PaapiResponse>(response: &R, items: &[Item], formatter: &Formatter) -> Result<String> {
    if !response.is_successful() {
        if let Some(message) = response.error_message() {
            debug!("{} errors: {}", R::OPERATION, message);
        }
        anyhow::bail!("Request error");
    }
    Ok(formatter.format_items(items))
}
