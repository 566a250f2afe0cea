//! amz-paapi - Amazon Product Advertising API command-line client

use amz_paapi::commands::endpoints::list_endpoints;
use amz_paapi::commands::{ItemsCommand, SearchCommand, VariationsCommand, XmlCommand, XmlKind};
use amz_paapi::config::{Config, OutputFormat};
use amz_paapi::paapi::{Endpoint, SearchRequest, SortBy};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-paapi",
    version,
    about = "Amazon Product Advertising API 5.0 client",
    long_about = "Search and look up Amazon products through the signed Product Advertising API."
)]
struct Cli {
    /// Marketplace endpoint (us, uk, de, ...)
    #[arg(short, long, global = true)]
    endpoint: Option<Endpoint>,

    /// Associate partner tag
    #[arg(short, long, global = true)]
    partner_tag: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Fail on response fields the models do not know
    #[arg(long, global = true)]
    strict: bool,

    /// Echo raw response bodies to stderr
    #[arg(long, global = true)]
    raw: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search items by keywords
    #[command(alias = "s")]
    Search {
        /// Search keywords
        keywords: String,

        /// Result page (1-10)
        #[arg(long)]
        page: Option<u32>,

        /// Items per page (1-10)
        #[arg(long)]
        count: Option<u32>,

        /// Sort order (relevance, featured, newest, reviews, price-low-to-high, price-high-to-low)
        #[arg(long)]
        sort_by: Option<SortBy>,

        /// Search index (e.g., Books, Electronics)
        #[arg(long)]
        search_index: Option<String>,
    },

    /// Look up items by ASIN
    #[command(alias = "i")]
    Items {
        /// Item IDs to look up
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// List variations of an ASIN
    #[command(alias = "v")]
    Variations {
        /// Parent or child ASIN
        asin: String,

        /// Variation page
        #[arg(long)]
        page: Option<u32>,
    },

    /// List supported endpoints
    Endpoints,

    /// Parse a saved legacy XML response
    Xml {
        /// XML file to parse
        file: PathBuf,

        /// Document type (item-search, item-search-error, cart-create)
        #[arg(short, long, default_value = "item-search")]
        kind: XmlKind,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env()?;

    // Apply CLI overrides
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(tag) = cli.partner_tag {
        config.partner_tag = Some(tag);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.strict {
        config.strict_json_mapping = true;
    }

    match cli.command {
        Commands::Search { keywords, page, count, sort_by, search_index } => {
            let mut request = SearchRequest::new(keywords);
            if let Some(page) = page {
                request = request.page(page);
            }
            if let Some(count) = count {
                request = request.count(count);
            }
            if let Some(sort_by) = sort_by {
                request = request.sort_by(sort_by);
            }
            if let Some(index) = search_index {
                request = request.search_index(index);
            }

            let cmd = SearchCommand::new(config).show_raw(cli.raw);
            println!("{}", cmd.execute(&request).await?);
        }

        Commands::Items { ids } => {
            let cmd = ItemsCommand::new(config).show_raw(cli.raw);
            println!("{}", cmd.execute(&ids).await?);
        }

        Commands::Variations { asin, page } => {
            let cmd = VariationsCommand::new(config).show_raw(cli.raw);
            println!("{}", cmd.execute(&asin, page).await?);
        }

        Commands::Endpoints => {
            println!("{}", list_endpoints());
        }

        Commands::Xml { file, kind } => {
            println!("{}", XmlCommand::new(kind).execute(&file)?);
        }
    }

    Ok(())
}
