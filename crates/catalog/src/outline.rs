//! Outlines: precomputed navigational breadcrumb paths.
//!
//! An outline records where a product sits inside one catalog: the catalog
//! itself, the category ancestor chain (root first), then the product. A
//! product linked into several placements carries one outline per placement.

use merx_core::{CatalogError, CatalogResult, ValueObject};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::category::Category;
use crate::product::CatalogProduct;

/// What kind of object an outline item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoObjectType {
    Catalog,
    Category,
    CatalogProduct,
}

/// One step of a breadcrumb path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineItem {
    pub id: Uuid,
    pub name: String,
    pub seo_object_type: SeoObjectType,
}

impl ValueObject for OutlineItem {}

/// A breadcrumb path: catalog → category ancestors → product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub items: Vec<OutlineItem>,
}

impl Outline {
    /// Build the outline for one placement of `product`.
    ///
    /// `chain` is the category ancestor chain root-first, ending with the
    /// category the product is placed in; empty for catalog-level placements.
    pub fn for_placement(catalog: &Catalog, chain: &[Category], product: &CatalogProduct) -> Self {
        let mut items = Vec::with_capacity(chain.len() + 2);
        items.push(OutlineItem {
            id: *catalog.id.as_uuid(),
            name: catalog.name.clone(),
            seo_object_type: SeoObjectType::Catalog,
        });
        for category in chain {
            items.push(OutlineItem {
                id: *category.id.as_uuid(),
                name: category.name.clone(),
                seo_object_type: SeoObjectType::Category,
            });
        }
        items.push(OutlineItem {
            id: *product.id.as_uuid(),
            name: product.name.clone(),
            seo_object_type: SeoObjectType::CatalogProduct,
        });
        Self { items }
    }

    /// Render the path as ids joined by `/`.
    pub fn path(&self) -> String {
        let ids: Vec<String> = self.items.iter().map(|i| i.id.to_string()).collect();
        ids.join("/")
    }
}

/// Reject ancestor chains that revisit a category.
///
/// A chain handed back by a category source must be acyclic; a repeated id
/// means the stored parent pointers form a loop and outline resolution for
/// this placement cannot terminate.
pub fn validate_chain(chain: &[Category]) -> CatalogResult<()> {
    let mut seen = std::collections::HashSet::with_capacity(chain.len());
    for category in chain {
        if !seen.insert(category.id) {
            return Err(CatalogError::invariant(format!(
                "cyclic category chain at {}",
                category.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use merx_core::{CatalogId, CategoryId};

    #[test]
    fn outline_starts_with_catalog_and_ends_with_product() {
        let catalog = Catalog::new(CatalogId::new(), "Main");
        let root = Category::new(CategoryId::new(), catalog.id, "Tools");
        let leaf = Category::new(CategoryId::new(), catalog.id, "Drills").with_parent(root.id);
        let product = CatalogProduct::new(catalog.id, "SKU-1", "Drill 2000");

        let outline = Outline::for_placement(&catalog, &[root.clone(), leaf.clone()], &product);

        assert_eq!(outline.items.len(), 4);
        assert_eq!(outline.items[0].seo_object_type, SeoObjectType::Catalog);
        assert_eq!(outline.items[1].id, *root.id.as_uuid());
        assert_eq!(outline.items[2].id, *leaf.id.as_uuid());
        assert_eq!(
            outline.items.last().unwrap().seo_object_type,
            SeoObjectType::CatalogProduct
        );

        let path = outline.path();
        assert!(path.starts_with(&catalog.id.to_string()));
        assert!(path.ends_with(&product.id.to_string()));
    }

    #[test]
    fn catalog_level_placement_has_two_items() {
        let catalog = Catalog::new(CatalogId::new(), "Main");
        let product = CatalogProduct::new(catalog.id, "SKU-1", "Drill 2000");

        let outline = Outline::for_placement(&catalog, &[], &product);
        assert_eq!(outline.items.len(), 2);
    }

    #[test]
    fn cyclic_chains_are_rejected() {
        let catalog_id = CatalogId::new();
        let a = Category::new(CategoryId::new(), catalog_id, "A");
        let b = Category::new(CategoryId::new(), catalog_id, "B");
        let chain = vec![a.clone(), b, a];

        let err = validate_chain(&chain).unwrap_err();
        assert!(matches!(err, CatalogError::InvariantViolation(_)));
    }
}
