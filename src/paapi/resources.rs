//! Per-operation resource allow-lists and the admission check run before any request is built.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// PAAPI5 operations supported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    SearchItems,
    GetItems,
    GetVariations,
}

impl Operation {
    pub fn all() -> &'static [Operation] {
        &[Operation::SearchItems, Operation::GetItems, Operation::GetVariations]
    }

    /// Operation name as it appears in `x-amz-target`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::SearchItems => "SearchItems",
            Operation::GetItems => "GetItems",
            Operation::GetVariations => "GetVariations",
        }
    }

    /// Lowercased path segment, e.g. `/paapi5/searchitems`.
    pub fn path_segment(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SearchItems" => Ok(Operation::SearchItems),
            "GetItems" => Ok(Operation::GetItems),
            "GetVariations" => Ok(Operation::GetVariations),
            _ => Err(format!("Unknown operation: {}", s)),
        }
    }
}

const BROWSE_NODE_RESOURCES: &[&str] = &[
    "BrowseNodeInfo.BrowseNodes",
    "BrowseNodeInfo.BrowseNodes.Ancestor",
    "BrowseNodeInfo.BrowseNodes.SalesRank",
    "BrowseNodeInfo.WebsiteSalesRank",
];

const CUSTOMER_REVIEW_RESOURCES: &[&str] = &["CustomerReviews.Count", "CustomerReviews.StarRating"];

const IMAGE_RESOURCES: &[&str] = &[
    "Images.Primary.Small",
    "Images.Primary.Medium",
    "Images.Primary.Large",
    "Images.Variants.Small",
    "Images.Variants.Medium",
    "Images.Variants.Large",
];

const ITEM_INFO_RESOURCES: &[&str] = &[
    "ItemInfo.ByLineInfo",
    "ItemInfo.Classifications",
    "ItemInfo.ContentInfo",
    "ItemInfo.ContentRating",
    "ItemInfo.ExternalIds",
    "ItemInfo.Features",
    "ItemInfo.ManufactureInfo",
    "ItemInfo.ProductInfo",
    "ItemInfo.TechnicalInfo",
    "ItemInfo.Title",
    "ItemInfo.TradeInInfo",
];

const OFFER_RESOURCES: &[&str] = &[
    "Offers.Listings.Availability.MaxOrderQuantity",
    "Offers.Listings.Availability.Message",
    "Offers.Listings.Availability.MinOrderQuantity",
    "Offers.Listings.Availability.Type",
    "Offers.Listings.Condition",
    "Offers.Listings.Condition.ConditionNote",
    "Offers.Listings.Condition.SubCondition",
    "Offers.Listings.DeliveryInfo.IsAmazonFulfilled",
    "Offers.Listings.DeliveryInfo.IsFreeShippingEligible",
    "Offers.Listings.DeliveryInfo.IsPrimeEligible",
    "Offers.Listings.DeliveryInfo.ShippingCharges",
    "Offers.Listings.IsBuyBoxWinner",
    "Offers.Listings.LoyaltyPoints.Points",
    "Offers.Listings.MerchantInfo",
    "Offers.Listings.Price",
    "Offers.Listings.ProgramEligibility.IsPrimeExclusive",
    "Offers.Listings.ProgramEligibility.IsPrimePantry",
    "Offers.Listings.Promotions",
    "Offers.Listings.SavingBasis",
    "Offers.Summaries.HighestPrice",
    "Offers.Summaries.LowestPrice",
    "Offers.Summaries.OfferCount",
];

const RENTAL_OFFER_RESOURCES: &[&str] = &[
    "RentalOffers.Listings.Availability.MaxOrderQuantity",
    "RentalOffers.Listings.Availability.Message",
    "RentalOffers.Listings.Availability.MinOrderQuantity",
    "RentalOffers.Listings.Availability.Type",
    "RentalOffers.Listings.BasePrice",
    "RentalOffers.Listings.Condition",
    "RentalOffers.Listings.Condition.ConditionNote",
    "RentalOffers.Listings.Condition.SubCondition",
    "RentalOffers.Listings.DeliveryInfo.IsAmazonFulfilled",
    "RentalOffers.Listings.DeliveryInfo.IsFreeShippingEligible",
    "RentalOffers.Listings.DeliveryInfo.IsPrimeEligible",
    "RentalOffers.Listings.DeliveryInfo.ShippingCharges",
    "RentalOffers.Listings.MerchantInfo",
];

const PARENT_ASIN: &[&str] = &["ParentASIN"];

const VARIATION_SUMMARY_RESOURCES: &[&str] = &[
    "VariationSummary.Price.HighestPrice",
    "VariationSummary.Price.LowestPrice",
    "VariationSummary.VariationDimension",
];

fn item_resources() -> impl Iterator<Item = &'static str> {
    BROWSE_NODE_RESOURCES
        .iter()
        .chain(CUSTOMER_REVIEW_RESOURCES)
        .chain(IMAGE_RESOURCES)
        .chain(ITEM_INFO_RESOURCES)
        .chain(OFFER_RESOURCES)
        .chain(RENTAL_OFFER_RESOURCES)
        .chain(PARENT_ASIN)
        .copied()
}

fn allow_list(operation: Operation) -> HashSet<&'static str> {
    match operation {
        Operation::SearchItems => item_resources().chain(["SearchRefinements"]).collect(),
        Operation::GetItems => item_resources().collect(),
        Operation::GetVariations => {
            item_resources().chain(VARIATION_SUMMARY_RESOURCES.iter().copied()).collect()
        }
    }
}

/// Resources requested by `SearchRequest::new`.
pub fn default_search_resources() -> Vec<String> {
    default_item_resources().into_iter().chain(["SearchRefinements".to_string()]).collect()
}

/// Resources requested by `ItemsRequest::new`.
pub fn default_item_resources() -> Vec<String> {
    BROWSE_NODE_RESOURCES
        .iter()
        .take(3)
        .chain(IMAGE_RESOURCES)
        .chain(ITEM_INFO_RESOURCES.iter().filter(|r| **r != "ItemInfo.ManufactureInfo"))
        .chain(OFFER_RESOURCES.iter().filter(|r| {
            !matches!(
                **r,
                "Offers.Listings.Condition.ConditionNote"
                    | "Offers.Listings.DeliveryInfo.ShippingCharges"
                    | "Offers.Listings.IsBuyBoxWinner"
            )
        }))
        .chain(PARENT_ASIN)
        .map(|r| r.to_string())
        .collect()
}

/// Resources requested by `VariationsRequest::new`.
pub fn default_variation_resources() -> Vec<String> {
    ["VariationSummary.VariationDimension"]
        .iter()
        .chain(IMAGE_RESOURCES)
        .map(|r| r.to_string())
        .collect()
}

/// Checks caller-supplied resources against the fixed allow-list of an operation.
#[derive(Debug, Clone)]
pub struct ResourceValidator {
    allowed: HashMap<Operation, HashSet<&'static str>>,
}

impl ResourceValidator {
    pub fn new() -> Self {
        let allowed = Operation::all().iter().map(|op| (*op, allow_list(*op))).collect();
        Self { allowed }
    }

    /// Returns true iff every resource is allowed for the named operation.
    ///
    /// Unknown operation names are never valid. Matching is case-sensitive.
    pub fn is_valid<S: AsRef<str>>(&self, resources: &[S], operation: &str) -> bool {
        match operation.parse::<Operation>() {
            Ok(op) => self.is_valid_for(resources, op),
            Err(_) => {
                debug!("Rejecting resources for unknown operation {}", operation);
                false
            }
        }
    }

    pub fn is_valid_for<S: AsRef<str>>(&self, resources: &[S], operation: Operation) -> bool {
        self.invalid_resources(resources, operation).is_empty()
    }

    /// Returns the entries that are not in the allow-list for `operation`.
    pub fn invalid_resources<S: AsRef<str>>(
        &self,
        resources: &[S],
        operation: Operation,
    ) -> Vec<String> {
        let Some(allowed) = self.allowed.get(&operation) else {
            return resources.iter().map(|r| r.as_ref().to_string()).collect();
        };

        resources
            .iter()
            .map(|r| r.as_ref())
            .filter(|r| !allowed.contains(*r))
            .map(str::to_string)
            .collect()
    }
}

impl Default for ResourceValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists_are_valid() {
        let validator = ResourceValidator::new();
        assert!(validator.is_valid(&default_search_resources(), "SearchItems"));
        assert!(validator.is_valid(&default_item_resources(), "GetItems"));
        assert!(validator.is_valid(&default_variation_resources(), "GetVariations"));
    }

    #[test]
    fn test_empty_list_is_valid() {
        let validator = ResourceValidator::new();
        let empty: [&str; 0] = [];
        for op in Operation::all() {
            assert!(validator.is_valid(&empty, op.as_str()));
        }
    }

    #[test]
    fn test_unknown_resource_rejected() {
        let validator = ResourceValidator::new();
        let resources = ["ItemInfo.Title", "ItemInfo.Nonsense"];
        assert!(!validator.is_valid(&resources, "GetItems"));
        assert_eq!(
            validator.invalid_resources(&resources, Operation::GetItems),
            vec!["ItemInfo.Nonsense".to_string()]
        );
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let validator = ResourceValidator::new();
        assert!(!validator.is_valid(&["iteminfo.title"], "SearchItems"));
        assert!(validator.is_valid(&["ItemInfo.Title"], "SearchItems"));
    }

    #[test]
    fn test_unknown_operation_rejected() {
        let validator = ResourceValidator::new();
        assert!(!validator.is_valid(&["ItemInfo.Title"], "GetBrowseNodes"));
        assert!(!validator.is_valid(&["ItemInfo.Title"], "searchitems"));
    }

    #[test]
    fn test_search_refinements_only_for_search() {
        let validator = ResourceValidator::new();
        assert!(validator.is_valid(&["SearchRefinements"], "SearchItems"));
        assert!(!validator.is_valid(&["SearchRefinements"], "GetItems"));
        assert!(!validator.is_valid(&["SearchRefinements"], "GetVariations"));
    }

    #[test]
    fn test_variation_summary_only_for_variations() {
        let validator = ResourceValidator::new();
        let resources = ["VariationSummary.VariationDimension"];
        assert!(validator.is_valid(&resources, "GetVariations"));
        assert!(!validator.is_valid(&resources, "GetItems"));
        assert!(!validator.is_valid(&resources, "SearchItems"));
    }

    #[test]
    fn test_every_allowed_resource_passes_alone() {
        let validator = ResourceValidator::new();
        for op in Operation::all() {
            for resource in allow_list(*op) {
                assert!(validator.is_valid_for(&[resource], *op), "{} / {}", op, resource);
            }
        }
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::SearchItems.path_segment(), "searchitems");
        assert_eq!(Operation::GetVariations.to_string(), "GetVariations");
        assert_eq!("GetItems".parse::<Operation>().unwrap(), Operation::GetItems);
        assert!("getitems".parse::<Operation>().is_err());
    }
}
