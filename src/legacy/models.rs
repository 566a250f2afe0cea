//! XML models of the legacy ItemSearch and CartCreate operations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperationRequest {
    pub request_id: Option<String>,
    pub request_processing_time: Option<f64>,
}

/// `Request` echo block, carrying validation errors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LegacyRequest {
    pub is_valid: Option<String>,
    pub errors: Option<LegacyErrors>,
}

impl LegacyRequest {
    pub fn is_valid(&self) -> bool {
        self.is_valid.as_deref().is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    pub fn errors(&self) -> &[LegacyError] {
        self.errors.as_ref().map(|e| e.error.as_slice()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LegacyErrors {
    #[serde(default)]
    pub error: Vec<LegacyError>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LegacyError {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemSearchResponse {
    pub operation_request: Option<OperationRequest>,
    #[serde(default)]
    pub items: LegacyItems,
}

impl ItemSearchResponse {
    pub fn items(&self) -> &[LegacyItem] {
        &self.items.item
    }

    /// Request-level errors (e.g. invalid parameter combinations).
    pub fn errors(&self) -> &[LegacyError] {
        self.items.request.as_ref().map(LegacyRequest::errors).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LegacyItems {
    pub request: Option<LegacyRequest>,
    pub total_results: Option<u32>,
    pub total_pages: Option<u32>,
    pub more_search_results_url: Option<String>,
    #[serde(default)]
    pub item: Vec<LegacyItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LegacyItem {
    #[serde(rename = "ASIN")]
    pub asin: String,
    #[serde(rename = "ParentASIN")]
    pub parent_asin: Option<String>,
    #[serde(rename = "DetailPageURL")]
    pub detail_page_url: Option<String>,
    pub sales_rank: Option<u32>,
    pub small_image: Option<LegacyImage>,
    pub medium_image: Option<LegacyImage>,
    pub large_image: Option<LegacyImage>,
    pub item_attributes: Option<ItemAttributes>,
}

impl LegacyItem {
    pub fn title(&self) -> Option<&str> {
        self.item_attributes.as_ref()?.title.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LegacyImage {
    #[serde(rename = "URL")]
    pub url: String,
    pub height: Option<Dimension>,
    pub width: Option<Dimension>,
}

/// Measurement with a `Units` attribute, e.g. `<Height Units="pixels">75</Height>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension {
    #[serde(rename = "@Units")]
    pub units: Option<String>,
    #[serde(rename = "$text")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemAttributes {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub manufacturer: Option<String>,
    pub product_group: Option<String>,
    #[serde(rename = "EAN")]
    pub ean: Option<String>,
    pub list_price: Option<LegacyPrice>,
    #[serde(default)]
    pub feature: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LegacyPrice {
    /// Amount in the currency's smallest unit.
    pub amount: Option<u64>,
    pub currency_code: Option<String>,
    pub formatted_price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemSearchErrorResponse {
    #[serde(default)]
    pub error: LegacyError,
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CartCreateResponse {
    pub operation_request: Option<OperationRequest>,
    pub cart: Option<Cart>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cart {
    pub request: Option<LegacyRequest>,
    pub cart_id: Option<String>,
    #[serde(rename = "HMAC")]
    pub hmac: Option<String>,
    #[serde(rename = "URLEncodedHMAC")]
    pub url_encoded_hmac: Option<String>,
    #[serde(rename = "PurchaseURL")]
    pub purchase_url: Option<String>,
    pub sub_total: Option<LegacyPrice>,
    pub cart_items: Option<CartItems>,
}

impl Cart {
    pub fn items(&self) -> &[CartItem] {
        self.cart_items.as_ref().map(|c| c.cart_item.as_slice()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CartItems {
    pub sub_total: Option<LegacyPrice>,
    #[serde(default)]
    pub cart_item: Vec<CartItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CartItem {
    pub cart_item_id: Option<String>,
    #[serde(rename = "ASIN")]
    pub asin: Option<String>,
    pub seller_nickname: Option<String>,
    pub quantity: Option<u32>,
    pub title: Option<String>,
    pub product_group: Option<String>,
    pub price: Option<LegacyPrice>,
    pub item_total: Option<LegacyPrice>,
}
