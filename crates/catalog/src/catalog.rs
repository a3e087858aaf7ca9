//! Catalog: the outermost grouping of categories and products.

use merx_core::{CatalogId, Entity};
use serde::{Deserialize, Serialize};

use crate::property::Property;

/// A catalog. Carries catalog-scoped property definitions that every product
/// and category underneath it inherits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: CatalogId,
    pub name: String,
    pub default_language: String,
    pub properties: Vec<Property>,
}

impl Catalog {
    pub fn new(id: CatalogId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            default_language: "en-US".to_string(),
            properties: Vec::new(),
        }
    }
}

impl Entity for Catalog {
    type Id = CatalogId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
