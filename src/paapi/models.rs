//! Typed PAAPI5 response payloads.
//!
//! Field names follow the wire format (PascalCase). Everything the API may omit
//! is an `Option` or a defaulted `Vec`, so lenient mapping tolerates sparse
//! payloads produced by reduced resource lists.

use crate::paapi::resources::Operation;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Common surface of the three operation responses.
///
/// `is_successful` and `error_message` are derived after deserialization and
/// are never part of the wire payload.
pub trait PaapiResponse: DeserializeOwned + Serialize {
    const OPERATION: Operation;

    /// Whether the operation-specific result payload is present.
    fn has_result(&self) -> bool;

    /// Non-empty error list, if the API reported any.
    fn errors(&self) -> Option<&[ErrorData]>;

    fn is_successful(&self) -> bool {
        self.has_result() && self.errors().is_none()
    }

    /// Error messages joined with newlines.
    fn error_message(&self) -> Option<String> {
        self.errors().map(|errors| {
            errors.iter().filter_map(|e| e.message.as_deref()).collect::<Vec<_>>().join("\n")
        })
    }
}

fn non_empty(errors: &Option<Vec<ErrorData>>) -> Option<&[ErrorData]> {
    errors.as_deref().filter(|e| !e.is_empty())
}

/// One entry of the `Errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorData {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchItemsResponse {
    pub search_result: Option<SearchResult>,
    pub errors: Option<Vec<ErrorData>>,
}

impl SearchItemsResponse {
    pub fn items(&self) -> &[Item] {
        self.search_result.as_ref().map(|r| r.items.as_slice()).unwrap_or_default()
    }
}

impl PaapiResponse for SearchItemsResponse {
    const OPERATION: Operation = Operation::SearchItems;

    fn has_result(&self) -> bool {
        self.search_result.is_some()
    }

    fn errors(&self) -> Option<&[ErrorData]> {
        non_empty(&self.errors)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResult {
    #[serde(default)]
    pub items: Vec<Item>,
    pub total_result_count: Option<u32>,
    #[serde(rename = "SearchURL")]
    pub search_url: Option<String>,
    /// Refinement bins are passed through untyped.
    pub search_refinements: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsResponse {
    pub items_result: Option<ItemsResult>,
    pub errors: Option<Vec<ErrorData>>,
}

impl GetItemsResponse {
    pub fn items(&self) -> &[Item] {
        self.items_result.as_ref().map(|r| r.items.as_slice()).unwrap_or_default()
    }
}

impl PaapiResponse for GetItemsResponse {
    const OPERATION: Operation = Operation::GetItems;

    fn has_result(&self) -> bool {
        self.items_result.is_some()
    }

    fn errors(&self) -> Option<&[ErrorData]> {
        non_empty(&self.errors)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsResult {
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetVariationsResponse {
    pub variations_result: Option<VariationsResult>,
    pub errors: Option<Vec<ErrorData>>,
}

impl GetVariationsResponse {
    pub fn items(&self) -> &[Item] {
        self.variations_result.as_ref().map(|r| r.items.as_slice()).unwrap_or_default()
    }
}

impl PaapiResponse for GetVariationsResponse {
    const OPERATION: Operation = Operation::GetVariations;

    fn has_result(&self) -> bool {
        self.variations_result.is_some()
    }

    fn errors(&self) -> Option<&[ErrorData]> {
        non_empty(&self.errors)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariationsResult {
    #[serde(default)]
    pub items: Vec<Item>,
    pub variation_summary: Option<VariationSummary>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariationSummary {
    pub page_count: Option<u32>,
    pub price: Option<VariationPrice>,
    pub variation_count: Option<u32>,
    #[serde(default)]
    pub variation_dimensions: Vec<VariationDimension>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariationPrice {
    pub highest_price: Option<OfferPrice>,
    pub lowest_price: Option<OfferPrice>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariationDimension {
    pub display_name: Option<String>,
    pub locale: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

/// A single product as returned by any of the three operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(rename = "ASIN", default)]
    pub asin: String,
    #[serde(rename = "DetailPageURL")]
    pub detail_page_url: Option<String>,
    #[serde(rename = "ParentASIN")]
    pub parent_asin: Option<String>,
    pub browse_node_info: Option<BrowseNodeInfo>,
    pub customer_reviews: Option<CustomerReviews>,
    pub images: Option<Images>,
    pub item_info: Option<ItemInfo>,
    pub offers: Option<Offers>,
    /// Rental listings share the offer shape closely enough that callers rarely need them typed.
    pub rental_offers: Option<serde_json::Value>,
    pub score: Option<f64>,
    pub variation_attributes: Option<Vec<VariationAttribute>>,
}

impl Item {
    pub fn title(&self) -> Option<&str> {
        self.item_info.as_ref()?.title.as_ref().map(|t| t.display_value.as_str())
    }

    pub fn brand(&self) -> Option<&str> {
        let by_line = self.item_info.as_ref()?.by_line_info.as_ref()?;
        by_line.brand.as_ref().or(by_line.manufacturer.as_ref()).map(|b| b.display_value.as_str())
    }

    /// Price of the first listing.
    pub fn price(&self) -> Option<&OfferPrice> {
        self.first_listing()?.price.as_ref()
    }

    /// Original price of the first listing when it is on sale.
    pub fn saving_basis(&self) -> Option<&OfferPrice> {
        self.first_listing()?.saving_basis.as_ref()
    }

    pub fn is_prime(&self) -> bool {
        self.first_listing()
            .and_then(|l| l.delivery_info.as_ref())
            .and_then(|d| d.is_prime_eligible)
            .unwrap_or(false)
    }

    pub fn primary_image_url(&self) -> Option<&str> {
        let primary = self.images.as_ref()?.primary.as_ref()?;
        primary
            .large
            .as_ref()
            .or(primary.medium.as_ref())
            .or(primary.small.as_ref())
            .map(|i| i.url.as_str())
    }

    pub fn features(&self) -> &[String] {
        self.item_info
            .as_ref()
            .and_then(|i| i.features.as_ref())
            .map(|f| f.display_values.as_slice())
            .unwrap_or_default()
    }

    fn first_listing(&self) -> Option<&OfferListing> {
        self.offers.as_ref()?.listings.first()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariationAttribute {
    pub name: Option<String>,
    pub value: Option<String>,
}

// Images

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Images {
    pub primary: Option<ImageType>,
    pub variants: Option<Vec<ImageType>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageType {
    pub small: Option<ImageSize>,
    pub medium: Option<ImageSize>,
    pub large: Option<ImageSize>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageSize {
    #[serde(rename = "URL", default)]
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

// ItemInfo

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemInfo {
    pub by_line_info: Option<ByLineInfo>,
    pub classifications: Option<Classifications>,
    pub content_info: Option<ContentInfo>,
    pub content_rating: Option<ContentRating>,
    pub external_ids: Option<ExternalIds>,
    pub features: Option<MultiValuedAttribute>,
    pub manufacture_info: Option<ManufactureInfo>,
    pub product_info: Option<ProductInfo>,
    pub technical_info: Option<TechnicalInfo>,
    pub title: Option<SingleStringValuedAttribute>,
    pub trade_in_info: Option<TradeInInfo>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SingleStringValuedAttribute {
    #[serde(default)]
    pub display_value: String,
    pub label: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SingleBooleanValuedAttribute {
    #[serde(default)]
    pub display_value: bool,
    pub label: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SingleIntegerValuedAttribute {
    #[serde(default)]
    pub display_value: i64,
    pub label: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultiValuedAttribute {
    #[serde(default)]
    pub display_values: Vec<String>,
    pub label: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnitBasedAttribute {
    #[serde(default)]
    pub display_value: f64,
    pub label: Option<String>,
    pub locale: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DimensionBasedAttribute {
    pub height: Option<UnitBasedAttribute>,
    pub length: Option<UnitBasedAttribute>,
    pub weight: Option<UnitBasedAttribute>,
    pub width: Option<UnitBasedAttribute>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ByLineInfo {
    pub brand: Option<SingleStringValuedAttribute>,
    pub contributors: Option<Vec<Contributor>>,
    pub manufacturer: Option<SingleStringValuedAttribute>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contributor {
    pub locale: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub role_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Classifications {
    pub binding: Option<SingleStringValuedAttribute>,
    pub product_group: Option<SingleStringValuedAttribute>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentInfo {
    pub edition: Option<SingleStringValuedAttribute>,
    pub languages: Option<Languages>,
    pub pages_count: Option<SingleIntegerValuedAttribute>,
    pub publication_date: Option<SingleStringValuedAttribute>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Languages {
    #[serde(default)]
    pub display_values: Vec<LanguageType>,
    pub label: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LanguageType {
    pub display_value: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentRating {
    pub audience_rating: Option<SingleStringValuedAttribute>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExternalIds {
    #[serde(rename = "EANs")]
    pub eans: Option<MultiValuedAttribute>,
    #[serde(rename = "ISBNs")]
    pub isbns: Option<MultiValuedAttribute>,
    #[serde(rename = "UPCs")]
    pub upcs: Option<MultiValuedAttribute>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManufactureInfo {
    pub item_part_number: Option<SingleStringValuedAttribute>,
    pub model: Option<SingleStringValuedAttribute>,
    pub warranty: Option<SingleStringValuedAttribute>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductInfo {
    pub color: Option<SingleStringValuedAttribute>,
    pub is_adult_product: Option<SingleBooleanValuedAttribute>,
    pub item_dimensions: Option<DimensionBasedAttribute>,
    pub release_date: Option<SingleStringValuedAttribute>,
    pub size: Option<SingleStringValuedAttribute>,
    pub unit_count: Option<SingleIntegerValuedAttribute>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TechnicalInfo {
    pub energy_efficiency_class: Option<SingleStringValuedAttribute>,
    pub formats: Option<MultiValuedAttribute>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TradeInInfo {
    pub is_eligible_for_trade_in: Option<bool>,
    pub price: Option<TradeInPrice>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TradeInPrice {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub display_amount: Option<String>,
}

// Offers

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Offers {
    #[serde(default)]
    pub listings: Vec<OfferListing>,
    #[serde(default)]
    pub summaries: Vec<OfferSummary>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferListing {
    pub availability: Option<OfferAvailability>,
    pub condition: Option<OfferCondition>,
    pub delivery_info: Option<OfferDeliveryInfo>,
    pub id: Option<String>,
    pub is_buy_box_winner: Option<bool>,
    pub loyalty_points: Option<OfferLoyaltyPoints>,
    pub merchant_info: Option<OfferMerchantInfo>,
    pub price: Option<OfferPrice>,
    pub program_eligibility: Option<OfferProgramEligibility>,
    pub promotions: Option<Vec<OfferPromotion>>,
    pub saving_basis: Option<OfferPrice>,
    #[serde(rename = "ViolatesMAP")]
    pub violates_map: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferAvailability {
    pub max_order_quantity: Option<u32>,
    pub message: Option<String>,
    pub min_order_quantity: Option<u32>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferCondition {
    pub condition_note: Option<OfferConditionNote>,
    pub display_value: Option<String>,
    pub label: Option<String>,
    pub locale: Option<String>,
    pub sub_condition: Option<OfferSubCondition>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferSubCondition {
    pub display_value: Option<String>,
    pub label: Option<String>,
    pub locale: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferConditionNote {
    pub locale: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferDeliveryInfo {
    pub is_amazon_fulfilled: Option<bool>,
    pub is_free_shipping_eligible: Option<bool>,
    pub is_prime_eligible: Option<bool>,
    pub shipping_charges: Option<Vec<OfferShippingCharge>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferShippingCharge {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub display_amount: Option<String>,
    pub is_rate_tax_inclusive: Option<bool>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferLoyaltyPoints {
    pub points: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferMerchantInfo {
    pub default_shipping_country: Option<String>,
    pub feedback_count: Option<u32>,
    pub feedback_rating: Option<f64>,
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferPrice {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub display_amount: String,
    pub price_per_unit: Option<f64>,
    pub savings: Option<OfferSavings>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferSavings {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub display_amount: Option<String>,
    pub percentage: Option<u32>,
    pub price_per_unit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferProgramEligibility {
    pub is_prime_exclusive: Option<bool>,
    pub is_prime_pantry: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferPromotion {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub discount_percent: Option<u32>,
    pub display_amount: Option<String>,
    pub price_per_unit: Option<f64>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferSummary {
    pub condition: Option<OfferCondition>,
    pub highest_price: Option<OfferPrice>,
    pub lowest_price: Option<OfferPrice>,
    pub offer_count: Option<u32>,
}

// BrowseNodeInfo

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BrowseNodeInfo {
    #[serde(default)]
    pub browse_nodes: Vec<BrowseNode>,
    pub website_sales_rank: Option<WebsiteSalesRank>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BrowseNode {
    pub ancestor: Option<Box<BrowseNodeAncestor>>,
    pub context_free_name: Option<String>,
    pub display_name: Option<String>,
    pub id: Option<String>,
    pub is_root: Option<bool>,
    pub sales_rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BrowseNodeAncestor {
    pub ancestor: Option<Box<BrowseNodeAncestor>>,
    pub context_free_name: Option<String>,
    pub display_name: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebsiteSalesRank {
    pub context_free_name: Option<String>,
    pub display_name: Option<String>,
    pub id: Option<String>,
    pub sales_rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerReviews {
    pub count: Option<u32>,
    pub star_rating: Option<StarRating>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StarRating {
    pub value: Option<f64>,
}
