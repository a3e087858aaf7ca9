//! Product change events published around writes.

use chrono::{DateTime, Utc};
use merx_events::{ChangedEntry, Event};
use serde::{Deserialize, Serialize};

use crate::product::CatalogProduct;

/// Published *before* a write batch is persisted. Consumers may veto nothing;
/// this is a notification, not a hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductChanging {
    pub entries: Vec<ChangedEntry<CatalogProduct>>,
    pub occurred_at: DateTime<Utc>,
}

/// Published *after* a write batch is persisted and caches are invalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductChanged {
    pub entries: Vec<ChangedEntry<CatalogProduct>>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductEvent {
    Changing(ProductChanging),
    Changed(ProductChanged),
}

impl ProductEvent {
    pub fn entries(&self) -> &[ChangedEntry<CatalogProduct>] {
        match self {
            ProductEvent::Changing(e) => &e.entries,
            ProductEvent::Changed(e) => &e.entries,
        }
    }
}

impl Event for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::Changing(_) => "catalog.product.changing",
            ProductEvent::Changed(_) => "catalog.product.changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::Changing(e) => e.occurred_at,
            ProductEvent::Changed(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merx_core::CatalogId;
    use merx_events::EntryState;

    #[test]
    fn event_types_are_stable() {
        let product = CatalogProduct::new(CatalogId::new(), "SKU-1", "Widget");
        let changing = ProductEvent::Changing(ProductChanging {
            entries: vec![ChangedEntry::added(product.clone())],
            occurred_at: Utc::now(),
        });
        let changed = ProductEvent::Changed(ProductChanged {
            entries: vec![ChangedEntry::modified(product.clone(), product)],
            occurred_at: Utc::now(),
        });

        assert_eq!(changing.event_type(), "catalog.product.changing");
        assert_eq!(changed.event_type(), "catalog.product.changed");
        assert_eq!(changing.entries()[0].state, EntryState::Added);
        assert!(changed.entries()[0].old.is_some());
    }
}
