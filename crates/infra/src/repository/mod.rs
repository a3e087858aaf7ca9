//! Product persistence seam.
//!
//! The service treats storage as an opaque collaborator behind
//! `ProductRepository`. Products are stored raw: no inherited properties, no
//! outlines — enrichment happens on the read path.

use async_trait::async_trait;
use merx_catalog::CatalogProduct;
use merx_core::{CatalogId, CatalogResult, ProductId};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductRepository;
pub use postgres::PostgresProductRepository;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Batch load by id. Unknown ids are skipped; order is unspecified.
    /// Variations come back nested in their main product.
    async fn get_by_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<CatalogProduct>>;

    /// Insert-or-update each product (match on id).
    async fn upsert(&self, products: &[CatalogProduct]) -> CatalogResult<()>;

    /// Delete by id. Unknown ids are a no-op at this layer.
    async fn delete(&self, ids: &[ProductId]) -> CatalogResult<()>;

    /// True if another product in `catalog_id` already uses `code`.
    async fn exists_code(
        &self,
        catalog_id: CatalogId,
        code: &str,
        except: Option<ProductId>,
    ) -> CatalogResult<bool>;
}
