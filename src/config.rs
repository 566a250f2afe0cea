//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::paapi::{ClientOptions, Credentials, Endpoint, TransportOptions};
use crate::paapi::transport::DEFAULT_USER_AGENT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Marketplace to query
    #[serde(default)]
    pub endpoint: Endpoint,

    /// Associate tag sent with every request (e.g., nager-20)
    #[serde(default)]
    pub partner_tag: Option<String>,

    /// PAAPI access key
    #[serde(default)]
    pub access_key: Option<String>,

    /// PAAPI secret key, read from file or env but never written back
    #[serde(default, skip_serializing)]
    pub secret_key: Option<String>,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Fail on response fields the typed models do not capture
    #[serde(default)]
    pub strict_json_mapping: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::Us,
            partner_tag: None,
            access_key: None,
            secret_key: None,
            user_agent: default_user_agent(),
            strict_json_mapping: false,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            proxy: None,
            format: OutputFormat::Table,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("partner_tag", &self.partner_tag)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("strict_json_mapping", &self.strict_json_mapping)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("proxy", &self.proxy)
            .field("format", &self.format)
            .finish()
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("amz-paapi").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    ///
    /// An unknown `PAAPI_ENDPOINT` is an error rather than a silent fallback.
    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(endpoint) = std::env::var("PAAPI_ENDPOINT") {
            self.endpoint = endpoint
                .parse()
                .with_context(|| format!("Invalid PAAPI_ENDPOINT: {}", endpoint))?;
        }

        if let Ok(tag) = std::env::var("PAAPI_PARTNER_TAG") {
            self.partner_tag = Some(tag);
        }

        if let Ok(key) = std::env::var("PAAPI_ACCESS_KEY") {
            self.access_key = Some(key);
        }

        if let Ok(key) = std::env::var("PAAPI_SECRET_KEY") {
            self.secret_key = Some(key);
        }

        if let Ok(proxy) = std::env::var("PAAPI_PROXY") {
            self.proxy = Some(proxy);
        }

        Ok(self)
    }

    /// Returns the signing credentials, failing if either key is missing.
    pub fn credentials(&self) -> Result<Credentials> {
        let access_key = self
            .access_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .context("Missing access key (set access_key or PAAPI_ACCESS_KEY)")?;
        let secret_key = self
            .secret_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .context("Missing secret key (set secret_key or PAAPI_SECRET_KEY)")?;
        Ok(Credentials::new(access_key, secret_key))
    }

    /// Builds client options, failing if no partner tag is configured.
    pub fn client_options(&self) -> Result<ClientOptions> {
        let partner_tag = self
            .partner_tag
            .as_deref()
            .filter(|t| !t.is_empty())
            .context("Missing partner tag (set partner_tag or PAAPI_PARTNER_TAG)")?;

        Ok(ClientOptions {
            endpoint: self.endpoint,
            partner_tag: partner_tag.to_string(),
            strict_json_mapping: self.strict_json_mapping,
            transport: TransportOptions {
                user_agent: self.user_agent.clone(),
                timeout: Duration::from_secs(self.timeout_secs),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                proxy: self.proxy.clone(),
            },
        })
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
