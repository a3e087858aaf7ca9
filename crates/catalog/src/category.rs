//! Category: a node in a catalog's navigation tree.

use merx_core::{CatalogId, CategoryId, Entity};
use serde::{Deserialize, Serialize};

use crate::property::Property;

/// A category inside a catalog. `parent_id` is `None` for root categories.
///
/// The `properties` set holds this category's *resolved* definitions, i.e. the
/// source a product inherits from without walking the chain again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub catalog_id: CatalogId,
    pub parent_id: Option<CategoryId>,
    pub code: String,
    pub name: String,
    pub is_active: bool,
    pub properties: Vec<Property>,
}

impl Category {
    pub fn new(id: CategoryId, catalog_id: CatalogId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            catalog_id,
            parent_id: None,
            code: name.to_ascii_lowercase().replace(' ', "-"),
            name,
            is_active: true,
            properties: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
