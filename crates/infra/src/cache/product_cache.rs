//! In-process cache for enriched products.
//!
//! Entries hold the fully enriched product; response-group trimming happens on
//! a clone at read time, so one entry serves every detail level. Each entry
//! carries the item-region and per-product token generations it was built
//! under and is validated against them on every read. Callers loading a miss
//! should capture tokens with [`ProductCache::capture_for`] before hitting the
//! backing store, so a write that lands mid-load leaves the eventual entry
//! already stale.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use merx_catalog::CatalogProduct;
use merx_core::ProductId;
use moka::sync::Cache;

use super::region::{RegionTokens, REGION_ITEM};

/// Sizing/expiry knobs for the product cache.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub max_entries: u64,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(30 * 60),
        }
    }
}

#[derive(Clone)]
struct CachedProduct {
    product: Arc<CatalogProduct>,
    captured: Arc<Vec<(String, u64)>>,
}

/// Token-validated product cache keyed by id.
pub struct ProductCache {
    inner: Cache<ProductId, CachedProduct>,
    tokens: Arc<RegionTokens>,
}

impl ProductCache {
    pub fn new(config: CacheConfig, tokens: Arc<RegionTokens>) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { inner, tokens }
    }

    pub fn tokens(&self) -> &Arc<RegionTokens> {
        &self.tokens
    }

    /// Snapshot the token generations governing `id`. Take this before
    /// loading a miss and pass it to [`Self::insert_with_tokens`].
    pub fn capture_for(&self, id: ProductId) -> Vec<(String, u64)> {
        let scopes = vec![REGION_ITEM.to_string(), RegionTokens::product_key(id)];
        self.tokens.capture(&scopes)
    }

    /// Insert an enriched product, capturing token generations now. Only safe
    /// when no load happened in between; misses filled from a backing store
    /// should use [`Self::insert_with_tokens`] instead.
    pub fn insert(&self, product: CatalogProduct) -> Arc<CatalogProduct> {
        let captured = self.capture_for(product.id);
        self.insert_with_tokens(product, captured)
    }

    /// Insert an enriched product under generations captured earlier. If a
    /// write expired the product while it was being loaded, the entry goes in
    /// already stale and the next read evicts it.
    /// Returns the shared handle so the caller can serve the same read.
    pub fn insert_with_tokens(
        &self,
        product: CatalogProduct,
        captured: Vec<(String, u64)>,
    ) -> Arc<CatalogProduct> {
        let id = product.id;
        let entry = CachedProduct {
            product: Arc::new(product),
            captured: Arc::new(captured),
        };
        let handle = entry.product.clone();
        self.inner.insert(id, entry);
        handle
    }

    /// Token-validated lookup. Stale entries are evicted and reported as
    /// misses.
    pub fn get(&self, id: ProductId) -> Option<Arc<CatalogProduct>> {
        let entry = self.inner.get(&id)?;
        if self.tokens.is_current(&entry.captured) {
            Some(entry.product)
        } else {
            self.inner.invalidate(&id);
            None
        }
    }

    /// Partition `ids` into cache hits and misses. Ids are assumed deduped by
    /// the caller; duplicates just hit the same entry twice.
    pub fn get_many(&self, ids: &[ProductId]) -> (HashMap<ProductId, Arc<CatalogProduct>>, Vec<ProductId>) {
        let mut hits = HashMap::with_capacity(ids.len());
        let mut misses = Vec::new();
        for &id in ids {
            match self.get(id) {
                Some(product) => {
                    hits.insert(id, product);
                }
                None => misses.push(id),
            }
        }
        (hits, misses)
    }

    /// Drop every entry (tokens untouched).
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merx_core::CatalogId;

    fn cache() -> ProductCache {
        ProductCache::new(CacheConfig::default(), Arc::new(RegionTokens::new()))
    }

    fn product(code: &str) -> CatalogProduct {
        CatalogProduct::new(CatalogId::new(), code, "Widget")
    }

    #[test]
    fn inserted_products_are_returned_until_expired() {
        let cache = cache();
        let product = product("SKU-1");
        let id = product.id;

        cache.insert(product);
        assert!(cache.get(id).is_some());

        cache.tokens().expire_product(id);
        assert!(cache.get(id).is_none());
        // And the stale entry is gone, not just hidden.
        assert!(cache.get(id).is_none());
    }

    #[test]
    fn item_region_expiry_flushes_all_entries() {
        let cache = cache();
        let a = product("SKU-A");
        let b = product("SKU-B");
        let (a_id, b_id) = (a.id, b.id);
        cache.insert(a);
        cache.insert(b);
        assert_eq!(cache.entry_count(), 2);

        cache.tokens().expire_region(REGION_ITEM);

        assert!(cache.get(a_id).is_none());
        assert!(cache.get(b_id).is_none());
    }

    #[test]
    fn product_expiry_is_scoped_to_one_id() {
        let cache = cache();
        let a = product("SKU-A");
        let b = product("SKU-B");
        let (a_id, b_id) = (a.id, b.id);
        cache.insert(a);
        cache.insert(b);

        cache.tokens().expire_product(a_id);

        assert!(cache.get(a_id).is_none());
        assert!(cache.get(b_id).is_some());
    }

    #[test]
    fn reinsert_after_expiry_is_valid_again() {
        let cache = cache();
        let original = product("SKU-1");
        let id = original.id;
        cache.insert(original.clone());
        cache.tokens().expire_product(id);
        assert!(cache.get(id).is_none());

        cache.insert(original);
        assert!(cache.get(id).is_some());
    }

    #[test]
    fn write_landing_mid_load_leaves_the_entry_stale() {
        let cache = cache();
        let product = product("SKU-1");
        let id = product.id;

        // A reader notices the miss and snapshots tokens before loading.
        let captured = cache.capture_for(id);
        // A concurrent write expires the product while the load is in flight.
        cache.tokens().expire_product(id);

        cache.insert_with_tokens(product, captured);
        assert!(cache.get(id).is_none());
    }

    #[test]
    fn get_many_partitions_hits_and_misses() {
        let cache = cache();
        let cached = product("SKU-1");
        let cached_id = cached.id;
        let missing_id = ProductId::new();
        cache.insert(cached);

        let (hits, misses) = cache.get_many(&[cached_id, missing_id]);
        assert_eq!(hits.len(), 1);
        assert!(hits.contains_key(&cached_id));
        assert_eq!(misses, vec![missing_id]);
    }
}
