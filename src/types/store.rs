//! Store-level types: storefront metadata, categories, and the merchant.

use serde::{Deserialize, Serialize};

/// Store identifier issued by the hosting platform (e.g. "st_9fKq2x").
pub type StoreID = String;

/// Normalized storefront metadata.
///
/// Built once per successful parse. Missing upstream data degrades to empty
/// fields here; only the product list can fail a parse.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreRecord {
    /// Unique store identifier.
    pub id: StoreID,

    /// Display name of the storefront.
    pub title: String,

    /// May be empty; many stores never fill it in.
    pub description: String,

    /// ISO-4217 code as reported by the page (e.g. "INR").
    pub currency: String,

    pub categories: Vec<CategorySummary>,

    pub merchant: MerchantRecord,
}

/// One category as listed on the storefront.
///
/// `products` keeps whatever shape the page uses: plain product IDs on
/// newer pages, embedded product objects on older ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category_name: String,

    pub category_id: String,

    /// Number of products the page reports for this category. May be stale;
    /// never used to size the normalized product list.
    pub category_count: i64,

    #[serde(default)]
    pub products: Vec<serde_json::Value>,
}

/// The merchant behind a storefront.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MerchantRecord {
    pub id: String,

    pub name: String,

    /// Avatar or logo URL, empty when the merchant has none.
    pub image: String,

    /// CSS color the storefront is themed with, may be empty.
    pub brand_color: String,

    pub support_details: SupportDetails,
}

/// Merchant contact channels surfaced on the storefront.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SupportDetails {
    pub support_email: Option<String>,

    pub support_mobile: Option<String>,
}
