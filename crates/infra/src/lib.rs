//! Infrastructure layer: repository/source seams, adapters, cache.

pub mod cache;
pub mod repository;
pub mod sources;

pub use cache::{CacheConfig, ProductCache, RegionTokens, REGION_CATALOG, REGION_ITEM};
pub use repository::{InMemoryProductRepository, PostgresProductRepository, ProductRepository};
pub use sources::{CatalogSource, CategorySource, InMemoryCatalogSource, InMemoryCategorySource};
