//! The assembled parse result.

use serde::{Deserialize, Serialize};

use super::{ProductRecord, StoreRecord};

/// Final catalog payload: store metadata plus the normalized product list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreCatalog {
    pub store: StoreRecord,

    pub products: Vec<ProductRecord>,

    /// Always the length of `products`, never an upstream-reported count.
    #[serde(rename = "totalProducts")]
    pub total_products: i64,
}

impl StoreCatalog {
    /// Combines the normalized pieces into the response shape.
    pub fn assemble(store: StoreRecord, products: Vec<ProductRecord>) -> Self {
        let total_products = products.len() as i64;
        Self {
            store,
            products,
            total_products,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_tracks_product_list_length() {
        let catalog = StoreCatalog::assemble(StoreRecord::default(), Vec::new());
        assert_eq!(catalog.total_products, 0);
    }

    #[test]
    fn total_products_serializes_camel_case() {
        let catalog = StoreCatalog::assemble(StoreRecord::default(), Vec::new());
        let json = serde_json::to_value(&catalog).unwrap();
        assert!(json.get("totalProducts").is_some());
        assert!(json.get("total_products").is_none());
    }
}
