//! Caller-facing requests, their wire shapes, and the builder that joins the two.

use crate::error::{PaapiError, Result};
use crate::paapi::endpoints::EndpointConfig;
use crate::paapi::resources::{
    default_item_resources, default_search_resources, default_variation_resources, Operation,
    ResourceValidator,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Partner type injected into every request.
pub const PARTNER_TYPE: &str = "Associates";

/// Sort order for SearchItems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    AvgCustomerReviews,
    Featured,
    NewestArrivals,
    #[serde(rename = "Price:HighToLow")]
    PriceHighToLow,
    #[serde(rename = "Price:LowToHigh")]
    PriceLowToHigh,
    Relevance,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ':'], "").as_str() {
            "avgcustomerreviews" | "reviews" => Ok(SortBy::AvgCustomerReviews),
            "featured" => Ok(SortBy::Featured),
            "newestarrivals" | "newest" => Ok(SortBy::NewestArrivals),
            "pricehightolow" => Ok(SortBy::PriceHighToLow),
            "pricelowtohigh" => Ok(SortBy::PriceLowToHigh),
            "relevance" => Ok(SortBy::Relevance),
            _ => Err(format!(
                "Unknown sort order: {}. Use: reviews, featured, newest, price-high-to-low, price-low-to-high, relevance",
                s
            )),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortBy::AvgCustomerReviews => "AvgCustomerReviews",
            SortBy::Featured => "Featured",
            SortBy::NewestArrivals => "NewestArrivals",
            SortBy::PriceHighToLow => "Price:HighToLow",
            SortBy::PriceLowToHigh => "Price:LowToHigh",
            SortBy::Relevance => "Relevance",
        };
        f.write_str(s)
    }
}

/// High-level SearchItems request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchRequest {
    pub keywords: String,
    pub resources: Vec<String>,
    pub item_page: Option<u32>,
    pub item_count: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub browse_node_id: Option<String>,
    pub search_index: Option<String>,
    /// Lowest price in the smallest currency unit (cents).
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub brand: Option<String>,
    pub condition: Option<String>,
}

impl SearchRequest {
    /// Keyword search with the default resource set.
    pub fn new(keywords: impl Into<String>) -> Self {
        Self { keywords: keywords.into(), resources: default_search_resources(), ..Self::default() }
    }

    pub fn with_resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = resources.into_iter().map(Into::into).collect();
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.item_page = Some(page);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.item_count = Some(count);
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn search_index(mut self, index: impl Into<String>) -> Self {
        self.search_index = Some(index.into());
        self
    }

    pub fn browse_node(mut self, id: impl Into<String>) -> Self {
        self.browse_node_id = Some(id.into());
        self
    }
}

/// High-level GetItems request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemsRequest {
    pub item_ids: Vec<String>,
    pub resources: Vec<String>,
    /// `ASIN` unless set otherwise.
    pub item_id_type: Option<String>,
}

impl ItemsRequest {
    pub fn new<I, S>(item_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            item_ids: item_ids.into_iter().map(Into::into).collect(),
            resources: default_item_resources(),
            item_id_type: None,
        }
    }

    pub fn with_resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = resources.into_iter().map(Into::into).collect();
        self
    }
}

/// High-level GetVariations request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariationsRequest {
    pub asin: String,
    pub resources: Vec<String>,
    pub variation_page: Option<u32>,
    pub variation_count: Option<u32>,
}

impl VariationsRequest {
    pub fn new(asin: impl Into<String>) -> Self {
        Self { asin: asin.into(), resources: default_variation_resources(), ..Self::default() }
    }

    pub fn with_resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = resources.into_iter().map(Into::into).collect();
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.variation_page = Some(page);
        self
    }
}

// Wire shapes

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchItemsRequest {
    pub keywords: String,
    pub resources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browse_node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub partner_tag: String,
    pub partner_type: String,
    pub marketplace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsRequest {
    pub item_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id_type: Option<String>,
    pub resources: Vec<String>,
    pub partner_tag: String,
    pub partner_type: String,
    pub marketplace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetVariationsRequest {
    #[serde(rename = "ASIN")]
    pub asin: String,
    pub resources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_count: Option<u32>,
    pub partner_tag: String,
    pub partner_type: String,
    pub marketplace: String,
}

/// Turns caller requests into wire requests, injecting partner and marketplace fields.
///
/// Every build validates resources first and short-circuits with
/// [`PaapiError::InvalidResources`] before anything is constructed.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    partner_tag: String,
    marketplace: String,
    validator: ResourceValidator,
}

impl RequestBuilder {
    pub fn new(partner_tag: impl Into<String>, endpoint: &EndpointConfig) -> Self {
        Self {
            partner_tag: partner_tag.into(),
            marketplace: endpoint.marketplace(),
            validator: ResourceValidator::new(),
        }
    }

    pub fn marketplace(&self) -> &str {
        &self.marketplace
    }

    pub fn search_items(&self, request: &SearchRequest) -> Result<SearchItemsRequest> {
        self.validate(&request.resources, Operation::SearchItems)?;

        Ok(SearchItemsRequest {
            keywords: request.keywords.clone(),
            resources: request.resources.clone(),
            item_page: request.item_page,
            item_count: request.item_count,
            sort_by: request.sort_by,
            browse_node_id: request.browse_node_id.clone(),
            search_index: request.search_index.clone(),
            min_price: request.min_price,
            max_price: request.max_price,
            brand: request.brand.clone(),
            condition: request.condition.clone(),
            partner_tag: self.partner_tag.clone(),
            partner_type: PARTNER_TYPE.to_string(),
            marketplace: self.marketplace.clone(),
        })
    }

    pub fn get_items(&self, request: &ItemsRequest) -> Result<GetItemsRequest> {
        self.validate(&request.resources, Operation::GetItems)?;

        Ok(GetItemsRequest {
            item_ids: request.item_ids.clone(),
            item_id_type: request.item_id_type.clone(),
            resources: request.resources.clone(),
            partner_tag: self.partner_tag.clone(),
            partner_type: PARTNER_TYPE.to_string(),
            marketplace: self.marketplace.clone(),
        })
    }

    pub fn get_variations(&self, request: &VariationsRequest) -> Result<GetVariationsRequest> {
        self.validate(&request.resources, Operation::GetVariations)?;

        Ok(GetVariationsRequest {
            asin: request.asin.clone(),
            resources: request.resources.clone(),
            variation_page: request.variation_page,
            variation_count: request.variation_count,
            partner_tag: self.partner_tag.clone(),
            partner_type: PARTNER_TYPE.to_string(),
            marketplace: self.marketplace.clone(),
        })
    }

    fn validate(&self, resources: &[String], operation: Operation) -> Result<()> {
        let invalid = self.validator.invalid_resources(resources, operation);
        if invalid.is_empty() {
            return Ok(());
        }

        warn!("Rejecting {} request, invalid resources: {}", operation, invalid.join(", "));
        Err(PaapiError::InvalidResources { invalid })
    }
}

/// Serializes a wire request, treating empty output as a failure.
pub fn to_json<T: Serialize>(request: &T) -> Result<String> {
    let json = serde_json::to_string(request)?;
    if json.is_empty() {
        return Err(PaapiError::Serialization(None));
    }
    debug!("Serialized request ({} bytes)", json.len());
    Ok(json)
}
