//! Schema normalization over the decoded hydration tree.
//!
//! The page embeds a react-query cache: a `dehydratedState` holding a list
//! of queries, each with a compound query key and a data snapshot. Neither
//! the keys nor the data shapes are contractually stable across page
//! versions, so every lookup here is an ordered list of predicates tried in
//! priority order rather than a fixed path.

use std::collections::HashSet;

use serde_json::Value;

use crate::types::{
    CategorySummary, MerchantRecord, ProductCategoryRef, ProductRecord, StoreCatalog, StoreRecord,
    SupportDetails,
};
use crate::Error;

/// Upper bound on cache entries inspected per page. Real pages carry a
/// handful; the cap keeps a pathological payload from pinning the scan.
const MAX_SCANNED_ENTRIES: usize = 256;

/// Known nesting points for the dehydrated query list, newest layout first.
const QUERY_PATHS: &[&[&str]] = &[
    &["props", "pageProps", "dehydratedState", "queries"],
    &["pageProps", "dehydratedState", "queries"],
    &["dehydratedState", "queries"],
];

/// Runs extract, normalize and assemble over already-fetched HTML.
///
/// This is the whole pipeline minus the network, and what the fixture tests
/// drive.
pub fn parse_store_page(html: &str) -> Result<StoreCatalog, Error> {
    let state = crate::extract::extract_embedded_state(html)?;
    let (store, products) = normalize_catalog(&state)?;
    Ok(StoreCatalog::assemble(store, products))
}

/// Narrows the raw hydration tree into the public schema.
///
/// Store and merchant data are best-effort and default to empty records
/// when absent. Products decide the parse: a page whose cache holds no
/// usable product entry fails with [`Error::NoProductsFound`].
pub fn normalize_catalog(state: &Value) -> Result<(StoreRecord, Vec<ProductRecord>), Error> {
    let entries = cache_entries(state);
    tracing::debug!(entries = entries.len(), "scanning hydration cache");

    let store_data = entries
        .iter()
        .find(|e| is_store_key(&e.key) && e.data.is_object())
        .map(|e| e.data);
    let merchant_data = entries
        .iter()
        .find(|e| is_merchant_key(&e.key) && e.data.is_object())
        .map(|e| e.data)
        .or_else(|| store_data.and_then(|s| field(s, &["merchant", "seller", "owner"])));

    let mut products: Vec<ProductRecord> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut skipped = 0usize;
    for entry in entries.iter().filter(|e| is_product_key(&e.key)) {
        for raw in product_candidates(entry.data) {
            match normalize_product(raw) {
                Ok(product) => {
                    if seen.insert(product.id.clone()) {
                        products.push(product);
                    }
                }
                Err(reason) => {
                    skipped += 1;
                    tracing::warn!(%reason, "skipping malformed product entry");
                }
            }
        }
    }

    if products.is_empty() {
        tracing::error!("hydration cache holds no product entries");
        return Err(Error::NoProductsFound);
    }
    tracing::debug!(kept = products.len(), skipped, "normalized product list");

    let categories = category_summaries(store_data, &entries);
    let merchant = normalize_merchant(merchant_data);
    let store = normalize_store(store_data, categories, merchant);
    Ok((store, products))
}

/// One cache entry: its flattened key and its data node.
struct CacheEntry<'a> {
    key: String,
    data: &'a Value,
}

/// Collects cache entries from wherever this page version keeps them:
/// a dehydrated query list under one of [`QUERY_PATHS`], or page props
/// carrying the data inline on pages predating the query cache.
fn cache_entries(state: &Value) -> Vec<CacheEntry<'_>> {
    for path in QUERY_PATHS {
        if let Some(queries) = at_path(state, path).and_then(Value::as_array) {
            return queries
                .iter()
                .take(MAX_SCANNED_ENTRIES)
                .filter_map(|query| {
                    let key = flatten_query_key(query.get("queryKey")?);
                    let data = query
                        .get("state")
                        .and_then(|s| s.get("data"))
                        .or_else(|| query.get("data"))?;
                    Some(CacheEntry { key, data })
                })
                .collect();
        }
    }

    for path in [&["props", "pageProps"][..], &["pageProps"][..]] {
        if let Some(props) = at_path(state, path).and_then(Value::as_object) {
            return props
                .iter()
                .take(MAX_SCANNED_ENTRIES)
                .map(|(k, v)| CacheEntry {
                    key: fold_key(k),
                    data: v,
                })
                .collect();
        }
    }

    Vec::new()
}

fn at_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.get(*key))
}

/// Query keys are arrays of scalars ("store", "st_9fKq2x", page numbers)
/// or, on some versions, one compound string. Flattened to a single
/// lowercase token for predicate matching.
fn flatten_query_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.to_ascii_lowercase(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| match part {
                Value::String(s) => Some(s.to_ascii_lowercase()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(":"),
        _ => String::new(),
    }
}

fn is_store_key(key: &str) -> bool {
    key.contains("store")
        && !key.contains("product")
        && !key.contains("merchant")
        && !key.contains("categor")
}

fn is_merchant_key(key: &str) -> bool {
    key.contains("merchant") || key.contains("seller")
}

fn is_product_key(key: &str) -> bool {
    key.contains("product") || key.contains("item") || key.contains("catalog")
}

fn is_category_key(key: &str) -> bool {
    key.contains("categor")
}

/// Pulls the raw product objects out of a product cache entry, whichever
/// of the shipped shapes it uses: a bare array, an object wrapping one
/// under `products`/`items`/`data`, or an infinite-query `pages` list.
fn product_candidates(data: &Value) -> Vec<&Value> {
    if let Some(items) = data.as_array() {
        return items.iter().collect();
    }
    if let Some(items) = field(data, &["products", "items", "data"]).and_then(Value::as_array) {
        return items.iter().collect();
    }
    if let Some(pages) = field(data, &["pages"]).and_then(Value::as_array) {
        return pages
            .iter()
            .filter_map(|page| {
                field(page, &["products", "items", "data"]).and_then(Value::as_array)
            })
            .flatten()
            .collect();
    }
    Vec::new()
}

/// Narrows one raw product object into a [`ProductRecord`].
///
/// Identity, price and stock must be present and coercible; everything
/// else defaults. A failure here skips this product only.
fn normalize_product(raw: &Value) -> Result<ProductRecord, String> {
    if !raw.is_object() {
        return Err("product entry is not an object".to_string());
    }

    let id = string_field(raw, &["id", "_id", "productId"])
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "missing product id".to_string())?;

    let selling_price = int_field(raw, &["sellingPrice", "price", "mrp"])
        .ok_or_else(|| format!("product {id}: selling price is missing or not numeric"))?;

    let discounted_price = match field(raw, &["discountedPrice", "discountPrice", "salePrice"]) {
        Some(v) => coerce_int(v)
            .ok_or_else(|| format!("product {id}: discounted price is not numeric"))?
            .min(selling_price),
        None => selling_price,
    };

    let stock = int_field(raw, &["stock", "quantity", "inventory"])
        .ok_or_else(|| format!("product {id}: stock is missing or not numeric"))?;

    let stock_available = int_field(raw, &["stockAvailable", "availableStock", "available"])
        .unwrap_or(stock)
        .max(-1);
    let stock_sold = int_field(raw, &["stockSold", "soldStock", "sold"])
        .unwrap_or(0)
        .max(0);

    Ok(ProductRecord {
        name: string_field(raw, &["name", "title"]).unwrap_or_default(),
        description: string_field(raw, &["description", "details"]).unwrap_or_default(),
        images: image_list(raw),
        selling_price,
        discounted_price,
        stock,
        stock_available,
        stock_sold,
        status: string_field(raw, &["status", "stockStatus", "availability"]).unwrap_or_default(),
        categories: category_refs(raw),
        id,
    })
}

fn normalize_store(
    data: Option<&Value>,
    categories: Vec<CategorySummary>,
    merchant: MerchantRecord,
) -> StoreRecord {
    let Some(store) = data else {
        return StoreRecord {
            categories,
            merchant,
            ..StoreRecord::default()
        };
    };
    StoreRecord {
        id: string_field(store, &["id", "_id", "storeId"]).unwrap_or_default(),
        title: string_field(store, &["title", "name", "storeName"]).unwrap_or_default(),
        description: string_field(store, &["description", "about"]).unwrap_or_default(),
        currency: string_field(store, &["currency", "currencyCode"]).unwrap_or_default(),
        categories,
        merchant,
    }
}

fn normalize_merchant(data: Option<&Value>) -> MerchantRecord {
    let Some(merchant) = data else {
        return MerchantRecord::default();
    };
    let support_source = field(merchant, &["supportDetails", "support", "contact"])
        .filter(|v| v.is_object())
        .unwrap_or(merchant);
    MerchantRecord {
        id: string_field(merchant, &["id", "_id", "merchantId"]).unwrap_or_default(),
        name: string_field(merchant, &["name", "merchantName"]).unwrap_or_default(),
        image: string_field(merchant, &["image", "avatar", "logo"]).unwrap_or_default(),
        brand_color: string_field(merchant, &["brandColor", "themeColor", "color"])
            .unwrap_or_default(),
        support_details: SupportDetails {
            support_email: string_field(support_source, &["supportEmail", "email"]),
            support_mobile: string_field(support_source, &["supportMobile", "mobile", "phone"]),
        },
    }
}

/// Category list from the store entry, or from a category-keyed cache
/// entry when the store carries none.
fn category_summaries(
    store_data: Option<&Value>,
    entries: &[CacheEntry<'_>],
) -> Vec<CategorySummary> {
    let items = store_data
        .and_then(|store| field(store, &["categories", "catalogs"]))
        .and_then(Value::as_array)
        .or_else(|| {
            entries
                .iter()
                .find(|e| is_category_key(&e.key))
                .and_then(|e| {
                    e.data
                        .as_array()
                        .or_else(|| field(e.data, &["categories", "data"]).and_then(Value::as_array))
                })
        });

    let Some(items) = items else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item.is_object())
        .map(|item| CategorySummary {
            category_name: string_field(item, &["name", "categoryName", "title"])
                .unwrap_or_default(),
            category_id: string_field(item, &["id", "_id", "categoryId"]).unwrap_or_default(),
            category_count: int_field(item, &["count", "productCount", "catalogCount"])
                .unwrap_or(0)
                .max(0),
            products: field(item, &["products", "items", "productIds"])
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        })
        .collect()
}

fn category_refs(raw: &Value) -> Vec<ProductCategoryRef> {
    let Some(items) = field(raw, &["categories", "catalogs"]).and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item.is_object())
        .map(|item| ProductCategoryRef {
            id: string_field(item, &["id", "_id", "categoryId"]).unwrap_or_default(),
            name: string_field(item, &["name", "categoryName"]).unwrap_or_default(),
            alias: string_field(item, &["alias", "slug", "handle"]).unwrap_or_default(),
            catalog_count: int_field(item, &["catalogCount", "count", "productCount"])
                .unwrap_or(0)
                .max(0),
        })
        .collect()
}

fn image_list(raw: &Value) -> Vec<String> {
    if let Some(items) = field(raw, &["images", "imageUrls", "photos"]).and_then(Value::as_array) {
        return items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                other => string_field(other, &["url", "src", "image"]),
            })
            .collect();
    }
    match string_field(raw, &["image", "imageUrl", "thumbnail"]) {
        Some(url) if !url.is_empty() => vec![url],
        _ => Vec::new(),
    }
}

/// First present, non-null field among `names`. Exact names are tried in
/// order, then a spelling-tolerant pass matches keys with case and
/// separators stripped, since the page has flipped between camel and snake
/// spellings before.
fn field<'a>(value: &'a Value, names: &[&str]) -> Option<&'a Value> {
    let obj = value.as_object()?;
    for name in names {
        if let Some(v) = obj.get(*name) {
            if !v.is_null() {
                return Some(v);
            }
        }
    }
    for (key, v) in obj {
        if v.is_null() {
            continue;
        }
        let folded = fold_key(key);
        if names.iter().any(|name| fold_key(name) == folded) {
            return Some(v);
        }
    }
    None
}

fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn string_field(value: &Value, names: &[&str]) -> Option<String> {
    match field(value, names)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn int_field(value: &Value, names: &[&str]) -> Option<i64> {
    coerce_int(field(value, names)?)
}

/// Coerces upstream numerics. Integers, whole floats and numeric strings
/// have all shipped at one point or another.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.round() as i64))
        }
        _ => None,
    }
}
