//! Product-level types.

use serde::{Deserialize, Serialize};

/// Normalized product entry.
///
/// Prices are in the smallest currency unit (paise, cents). No display
/// conversion happens here; dividing by 100 is the consumer's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Unique within one parse result.
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub images: Vec<String>,

    pub selling_price: i64,

    /// Price after discount. Equals `selling_price` when no discount runs.
    pub discounted_price: i64,

    /// -1 denotes unlimited stock.
    pub stock: i64,

    pub stock_available: i64,

    pub stock_sold: i64,

    /// Upstream-defined state ("in_stock", "unlimited", "out_of_stock", ...),
    /// passed through verbatim.
    pub status: String,

    #[serde(default)]
    pub categories: Vec<ProductCategoryRef>,
}

/// Category membership carried on a product entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductCategoryRef {
    pub id: String,

    pub name: String,

    pub alias: String,

    pub catalog_count: i64,
}
