//! Cache-region invalidation tokens.
//!
//! A region is a named invalidation scope backed by a generation counter.
//! Cached entries capture the generations of the scopes they depend on at
//! insert time; expiring a scope bumps its counter, which turns every entry
//! that captured the old generation into a miss. Nothing is eagerly evicted —
//! validation happens on read.

use dashmap::DashMap;
use merx_core::ProductId;

/// Region covering catalog/listing shape (membership, adds and deletes).
pub const REGION_CATALOG: &str = "catalog";

/// Region covering all cached product entries (bulk expiry).
pub const REGION_ITEM: &str = "item";

/// Generation counters for named invalidation scopes.
///
/// Scopes are created lazily: a scope that was never expired has generation 0,
/// so entries inserted before its first expiry validate against 0.
#[derive(Debug, Default)]
pub struct RegionTokens {
    generations: DashMap<String, u64>,
}

impl RegionTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-product scope key within the item region.
    pub fn product_key(id: ProductId) -> String {
        format!("item:{id}")
    }

    /// Current generation of a scope (0 if never expired).
    pub fn current(&self, scope: &str) -> u64 {
        self.generations.get(scope).map(|g| *g).unwrap_or(0)
    }

    /// Expire a scope: every entry that captured the previous generation
    /// becomes stale.
    pub fn expire(&self, scope: &str) {
        *self.generations.entry(scope.to_string()).or_insert(0) += 1;
    }

    /// Expire a single product without touching the item region: unrelated
    /// cached products stay valid.
    pub fn expire_product(&self, id: ProductId) {
        self.expire(&Self::product_key(id));
    }

    /// Expire a whole region.
    pub fn expire_region(&self, region: &str) {
        self.expire(region);
    }

    /// Capture the current generations of the scopes an entry depends on.
    pub fn capture(&self, scopes: &[String]) -> Vec<(String, u64)> {
        scopes
            .iter()
            .map(|s| (s.clone(), self.current(s)))
            .collect()
    }

    /// True if every captured (scope, generation) pair is still current.
    pub fn is_current(&self, captured: &[(String, u64)]) -> bool {
        captured
            .iter()
            .all(|(scope, generation)| self.current(scope) == *generation)
    }
}
