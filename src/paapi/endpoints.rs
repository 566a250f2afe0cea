//! PAAPI5 marketplace endpoints and their signing regions.

use crate::error::{PaapiError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Supported PAAPI5 marketplaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    #[default]
    Us,
    Uk,
    De,
    Fr,
    Es,
    It,
    Nl,
    Se,
    Pl,
    Be,
    Tr,
    Eg,
    Sa,
    Ae,
    In,
    Ca,
    Mx,
    Br,
    Jp,
    Sg,
    Au,
}

impl Endpoint {
    /// Returns all supported endpoints.
    pub fn all() -> &'static [Endpoint] {
        &[
            Endpoint::Us,
            Endpoint::Uk,
            Endpoint::De,
            Endpoint::Fr,
            Endpoint::Es,
            Endpoint::It,
            Endpoint::Nl,
            Endpoint::Se,
            Endpoint::Pl,
            Endpoint::Be,
            Endpoint::Tr,
            Endpoint::Eg,
            Endpoint::Sa,
            Endpoint::Ae,
            Endpoint::In,
            Endpoint::Ca,
            Endpoint::Mx,
            Endpoint::Br,
            Endpoint::Jp,
            Endpoint::Sg,
            Endpoint::Au,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            Endpoint::Us => "us",
            Endpoint::Uk => "uk",
            Endpoint::De => "de",
            Endpoint::Fr => "fr",
            Endpoint::Es => "es",
            Endpoint::It => "it",
            Endpoint::Nl => "nl",
            Endpoint::Se => "se",
            Endpoint::Pl => "pl",
            Endpoint::Be => "be",
            Endpoint::Tr => "tr",
            Endpoint::Eg => "eg",
            Endpoint::Sa => "sa",
            Endpoint::Ae => "ae",
            Endpoint::In => "in",
            Endpoint::Ca => "ca",
            Endpoint::Mx => "mx",
            Endpoint::Br => "br",
            Endpoint::Jp => "jp",
            Endpoint::Sg => "sg",
            Endpoint::Au => "au",
        }
    }

    fn host_and_region(&self) -> (&'static str, &'static str) {
        match self {
            Endpoint::Us => ("amazon.com", "us-east-1"),
            Endpoint::Ca => ("amazon.ca", "us-east-1"),
            Endpoint::Mx => ("amazon.com.mx", "us-east-1"),
            Endpoint::Br => ("amazon.com.br", "us-east-1"),
            Endpoint::Uk => ("amazon.co.uk", "eu-west-1"),
            Endpoint::De => ("amazon.de", "eu-west-1"),
            Endpoint::Fr => ("amazon.fr", "eu-west-1"),
            Endpoint::Es => ("amazon.es", "eu-west-1"),
            Endpoint::It => ("amazon.it", "eu-west-1"),
            Endpoint::Nl => ("amazon.nl", "eu-west-1"),
            Endpoint::Se => ("amazon.se", "eu-west-1"),
            Endpoint::Pl => ("amazon.pl", "eu-west-1"),
            Endpoint::Be => ("amazon.com.be", "eu-west-1"),
            Endpoint::Tr => ("amazon.com.tr", "eu-west-1"),
            Endpoint::Eg => ("amazon.eg", "eu-west-1"),
            Endpoint::Sa => ("amazon.sa", "eu-west-1"),
            Endpoint::Ae => ("amazon.ae", "eu-west-1"),
            Endpoint::In => ("amazon.in", "eu-west-1"),
            Endpoint::Jp => ("amazon.co.jp", "us-west-2"),
            Endpoint::Sg => ("amazon.sg", "us-west-2"),
            Endpoint::Au => ("amazon.com.au", "us-west-2"),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Endpoint {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "us" | "usa" | "united states" => Ok(Endpoint::Us),
            "uk" | "gb" | "united kingdom" => Ok(Endpoint::Uk),
            "de" | "germany" => Ok(Endpoint::De),
            "fr" | "france" => Ok(Endpoint::Fr),
            "es" | "spain" => Ok(Endpoint::Es),
            "it" | "italy" => Ok(Endpoint::It),
            "nl" | "netherlands" => Ok(Endpoint::Nl),
            "se" | "sweden" => Ok(Endpoint::Se),
            "pl" | "poland" => Ok(Endpoint::Pl),
            "be" | "belgium" => Ok(Endpoint::Be),
            "tr" | "turkey" => Ok(Endpoint::Tr),
            "eg" | "egypt" => Ok(Endpoint::Eg),
            "sa" | "saudi arabia" => Ok(Endpoint::Sa),
            "ae" | "uae" | "united arab emirates" => Ok(Endpoint::Ae),
            "in" | "india" => Ok(Endpoint::In),
            "ca" | "canada" => Ok(Endpoint::Ca),
            "mx" | "mexico" => Ok(Endpoint::Mx),
            "br" | "brazil" => Ok(Endpoint::Br),
            "jp" | "japan" => Ok(Endpoint::Jp),
            "sg" | "singapore" => Ok(Endpoint::Sg),
            "au" | "australia" => Ok(Endpoint::Au),
            _ => Err(EndpointParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EndpointParseError(String);

impl fmt::Display for EndpointParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<String> = Endpoint::all().iter().map(ToString::to_string).collect();
        write!(f, "Unknown endpoint '{}'. Valid endpoints: {}", self.0, valid.join(", "))
    }
}

impl std::error::Error for EndpointParseError {}

/// Host and signing region of one marketplace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Bare host without `www.` / `webservices.`, e.g. `amazon.de`.
    pub host: &'static str,
    /// AWS region used in the SigV4 credential scope.
    pub region: &'static str,
}

impl EndpointConfig {
    /// Marketplace value sent in request bodies, e.g. `www.amazon.de`.
    pub fn marketplace(&self) -> String {
        format!("www.{}", self.host)
    }

    /// API host, e.g. `webservices.amazon.de`.
    pub fn api_host(&self) -> String {
        format!("webservices.{}", self.host)
    }
}

/// Lookup table from [`Endpoint`] to [`EndpointConfig`], populated once.
#[derive(Debug, Clone)]
pub struct EndpointConfigRepository {
    configs: HashMap<Endpoint, EndpointConfig>,
}

impl EndpointConfigRepository {
    pub fn new() -> Self {
        let configs = Endpoint::all()
            .iter()
            .map(|endpoint| {
                let (host, region) = endpoint.host_and_region();
                (*endpoint, EndpointConfig { host, region })
            })
            .collect();
        Self { configs }
    }

    /// Returns the host/region pair for an endpoint.
    pub fn get(&self, endpoint: Endpoint) -> Result<&EndpointConfig> {
        self.configs
            .get(&endpoint)
            .ok_or_else(|| PaapiError::UnknownEndpoint(endpoint.to_string()))
    }

    /// Parses an endpoint code and looks it up.
    pub fn get_by_code(&self, code: &str) -> Result<&EndpointConfig> {
        let endpoint: Endpoint =
            code.parse().map_err(|_| PaapiError::UnknownEndpoint(code.to_string()))?;
        self.get(endpoint)
    }
}

impl Default for EndpointConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}
