//! Cache layer: region invalidation tokens + the in-process product cache.

pub mod product_cache;
pub mod region;

pub use product_cache::{CacheConfig, ProductCache};
pub use region::{RegionTokens, REGION_CATALOG, REGION_ITEM};
