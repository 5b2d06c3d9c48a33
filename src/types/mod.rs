mod store;
pub use self::store::{CategorySummary, MerchantRecord, StoreID, StoreRecord, SupportDetails};

mod product;
pub use self::product::{ProductCategoryRef, ProductRecord};

mod catalog;
pub use self::catalog::StoreCatalog;
