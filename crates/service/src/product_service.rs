//! The catalog product service: cache-aside reads, enrichment, writes.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;

use merx_catalog::outline::validate_chain;
use merx_catalog::{
    apply_inheritance, Catalog, CatalogProduct, Outline, ProductChanged, ProductChanging,
    ProductEvent, ResponseGroup, SkuGenerator,
};
use merx_core::{CatalogError, CatalogResult, CategoryId, ProductId};
use merx_events::{ChangedEntry, EventBus};
use merx_infra::{
    CacheConfig, CatalogSource, CategorySource, ProductCache, ProductRepository, RegionTokens,
    REGION_CATALOG,
};

use crate::validator::{DefaultProductValidator, ProductValidator};

/// CRUD/read service for catalog products.
///
/// Read path: batch cache-aside. Cache misses are loaded from the repository
/// in one call, run through the enrichment pipeline (dependency resolution →
/// property inheritance → outline computation → variation SKU fill), cached at
/// full detail, then trimmed per request by response group.
///
/// Write path: validate → `Changing` event → persist → invalidate cache
/// scopes → `Changed` event. Publication failures are logged, never rolled
/// back into the write (the bus is at-least-once).
pub struct ProductService<R, C, G, B> {
    repository: Arc<R>,
    catalogs: Arc<C>,
    categories: Arc<G>,
    bus: Arc<B>,
    cache: ProductCache,
    tokens: Arc<RegionTokens>,
    sku: SkuGenerator,
    validator: Box<dyn ProductValidator>,
}

impl<R, C, G, B> ProductService<R, C, G, B>
where
    R: ProductRepository,
    C: CatalogSource,
    G: CategorySource,
    B: EventBus<ProductEvent>,
{
    pub fn new(
        repository: Arc<R>,
        catalogs: Arc<C>,
        categories: Arc<G>,
        bus: Arc<B>,
        cache_config: CacheConfig,
    ) -> Self {
        let tokens = Arc::new(RegionTokens::new());
        let cache = ProductCache::new(cache_config, tokens.clone());
        Self {
            repository,
            catalogs,
            categories,
            bus,
            cache,
            tokens,
            sku: SkuGenerator::default(),
            validator: Box::new(DefaultProductValidator),
        }
    }

    pub fn with_validator(mut self, validator: Box<dyn ProductValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_sku_generator(mut self, sku: SkuGenerator) -> Self {
        self.sku = sku;
        self
    }

    /// Invalidation tokens, shared with the cache. Exposed so adjacent
    /// services (category/catalog writes) can expire scopes they own.
    pub fn tokens(&self) -> &Arc<RegionTokens> {
        &self.tokens
    }

    /// Batch read. Results come back in request order; unknown ids are
    /// absent, duplicates collapse to one instance.
    pub async fn get_by_ids(
        &self,
        ids: &[ProductId],
        group: ResponseGroup,
    ) -> CatalogResult<Vec<CatalogProduct>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut ordered = Vec::with_capacity(ids.len());
        let mut seen = HashSet::with_capacity(ids.len());
        for &id in ids {
            if seen.insert(id) {
                ordered.push(id);
            }
        }

        let (mut found, misses) = self.cache.get_many(&ordered);

        if !misses.is_empty() {
            tracing::debug!(requested = ordered.len(), misses = misses.len(), "loading products");
            // Snapshot tokens before the load so a write landing mid-load
            // leaves the new entry already stale.
            let mut captured: HashMap<ProductId, Vec<(String, u64)>> = misses
                .iter()
                .map(|&id| (id, self.cache.capture_for(id)))
                .collect();
            let loaded = self.repository.get_by_ids(&misses).await?;
            for mut product in loaded {
                self.enrich(&mut product).await?;
                let tokens = captured
                    .remove(&product.id)
                    .unwrap_or_else(|| self.cache.capture_for(product.id));
                let handle = self.cache.insert_with_tokens(product, tokens);
                found.insert(handle.id, handle);
            }
        }

        let mut results = Vec::with_capacity(found.len());
        for id in ordered {
            if let Some(product) = found.get(&id) {
                let mut trimmed = (**product).clone();
                trimmed.reduce_details(group);
                results.push(trimmed);
            }
        }
        Ok(results)
    }

    /// Single-id convenience wrapper over `get_by_ids`.
    pub async fn get_by_id(
        &self,
        id: ProductId,
        group: ResponseGroup,
    ) -> CatalogResult<Option<CatalogProduct>> {
        Ok(self.get_by_ids(&[id], group).await?.into_iter().next())
    }

    /// Persist a batch of products (insert or update by id).
    pub async fn save_changes(&self, mut products: Vec<CatalogProduct>) -> CatalogResult<()> {
        if products.is_empty() {
            return Ok(());
        }

        for product in &products {
            self.validator.validate(product)?;
            if self
                .repository
                .exists_code(product.catalog_id, &product.code, Some(product.id))
                .await?
            {
                return Err(CatalogError::conflict(format!(
                    "code {:?} already used in catalog {}",
                    product.code, product.catalog_id
                )));
            }
        }

        let now = Utc::now();
        for product in &mut products {
            product.modified_at = now;
            for variation in &mut product.variations {
                if variation.code.trim().is_empty() {
                    variation.code = self.sku.generate();
                }
            }
        }

        let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
        let existing: HashMap<ProductId, CatalogProduct> = self
            .repository
            .get_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut entries = Vec::with_capacity(products.len());
        let mut any_added = false;
        for product in &products {
            match existing.get(&product.id) {
                Some(old) => entries.push(ChangedEntry::modified(old.clone(), product.clone())),
                None => {
                    any_added = true;
                    entries.push(ChangedEntry::added(product.clone()));
                }
            }
        }

        self.publish(ProductEvent::Changing(ProductChanging {
            entries: entries.clone(),
            occurred_at: now,
        }));

        self.repository.upsert(&products).await?;

        for product in &products {
            self.tokens.expire_product(product.id);
            if let Some(main_id) = product.main_product_id {
                self.tokens.expire_product(main_id);
            }
        }
        if any_added {
            // New members change listing shape.
            self.tokens.expire_region(REGION_CATALOG);
        }

        self.publish(ProductEvent::Changed(ProductChanged {
            entries,
            occurred_at: now,
        }));

        tracing::info!(count = products.len(), "saved products");
        Ok(())
    }

    /// Delete products by id. Every id must exist.
    pub async fn delete(&self, ids: &[ProductId]) -> CatalogResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let mut unique: Vec<ProductId> = Vec::new();
        let mut seen = HashSet::new();
        for &id in ids {
            if seen.insert(id) {
                unique.push(id);
            }
        }

        let existing = self.repository.get_by_ids(&unique).await?;
        if existing.len() != unique.len() {
            return Err(CatalogError::NotFound);
        }

        let now = Utc::now();
        // Mains cache their variation rows nested, so they go stale too.
        let main_ids: Vec<ProductId> = existing
            .iter()
            .filter_map(|product| product.main_product_id)
            .collect();
        let entries: Vec<ChangedEntry<CatalogProduct>> =
            existing.into_iter().map(ChangedEntry::deleted).collect();

        self.publish(ProductEvent::Changing(ProductChanging {
            entries: entries.clone(),
            occurred_at: now,
        }));

        self.repository.delete(&unique).await?;

        for &id in &unique {
            self.tokens.expire_product(id);
        }
        for id in main_ids {
            self.tokens.expire_product(id);
        }
        self.tokens.expire_region(REGION_CATALOG);

        self.publish(ProductEvent::Changed(ProductChanged {
            entries,
            occurred_at: now,
        }));

        tracing::info!(count = unique.len(), "deleted products");
        Ok(())
    }

    /// Enrichment pipeline, run once per cache miss.
    async fn enrich(&self, product: &mut CatalogProduct) -> CatalogResult<()> {
        let catalog = self
            .catalogs
            .get(product.catalog_id)
            .await?
            .ok_or_else(|| {
                CatalogError::invariant(format!(
                    "product {} references missing catalog {}",
                    product.id, product.catalog_id
                ))
            })?;

        let category = match product.category_id {
            Some(category_id) => Some(self.categories.get(category_id).await?.ok_or_else(|| {
                CatalogError::invariant(format!(
                    "product {} references missing category {category_id}",
                    product.id
                ))
            })?),
            None => None,
        };

        apply_inheritance(product, &catalog, category.as_ref());

        product.outlines = self.resolve_outlines(product, &catalog).await?;

        // Display-only SKUs for variations saved without one; persisted codes
        // are generated on the write path instead.
        for variation in &mut product.variations {
            if variation.code.trim().is_empty() {
                variation.code = self.sku.generate();
            }
        }

        Ok(())
    }

    /// One outline per placement: the product's own catalog/category spot
    /// plus every link. Links pointing at a missing catalog are skipped with
    /// a warning; the product's own catalog missing is an error (`enrich`
    /// resolved it already).
    async fn resolve_outlines(
        &self,
        product: &CatalogProduct,
        own_catalog: &Catalog,
    ) -> CatalogResult<Vec<Outline>> {
        let mut outlines = Vec::with_capacity(1 + product.links.len());

        outlines.push(
            self.placement_outline(own_catalog, product.category_id, product)
                .await?,
        );

        for link in &product.links {
            let catalog = if link.catalog_id == own_catalog.id {
                own_catalog.clone()
            } else {
                match self.catalogs.get(link.catalog_id).await? {
                    Some(catalog) => catalog,
                    None => {
                        tracing::warn!(
                            product_id = %product.id,
                            catalog_id = %link.catalog_id,
                            "skipping link with missing catalog"
                        );
                        continue;
                    }
                }
            };
            outlines.push(
                self.placement_outline(&catalog, link.category_id, product)
                    .await?,
            );
        }

        Ok(outlines)
    }

    async fn placement_outline(
        &self,
        catalog: &Catalog,
        category_id: Option<CategoryId>,
        product: &CatalogProduct,
    ) -> CatalogResult<Outline> {
        let chain = match category_id {
            Some(id) => {
                let chain = self.categories.ancestors(id).await?;
                validate_chain(&chain)?;
                chain
            }
            None => Vec::new(),
        };
        Ok(Outline::for_placement(catalog, &chain, product))
    }

    /// Publish, tolerating bus failures (write already durable or imminent).
    fn publish(&self, event: ProductEvent) {
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!(error = ?err, "failed to publish product event");
        }
    }
}
