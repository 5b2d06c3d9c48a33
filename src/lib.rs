//! Parser for Take App hosted storefront pages.
//!
//! Fetches a merchant's storefront page, pulls out the client-side query
//! cache Next.js embeds for hydration, and reshapes it into a stable
//! catalog schema. The page's internal shape is versioned and undocumented,
//! so normalization works by predicate matching rather than fixed paths.

mod client;
mod errors;
mod extract;
mod normalize;
mod store_url;
pub mod types;
mod user_agent;

pub use self::client::Client;
pub use self::errors::Error;
pub use self::extract::extract_embedded_state;
pub use self::normalize::{normalize_catalog, parse_store_page};
pub use self::store_url::{validate_store_url, StoreUrl};
