//! CatalogProduct: the sellable item, with its sub-sections.

use chrono::{DateTime, Utc};
use merx_core::{CatalogId, CategoryId, Entity, ProductId, ValueObject};
use serde::{Deserialize, Serialize};

use crate::outline::Outline;
use crate::property::{Property, PropertyValue};
use crate::response_group::ResponseGroup;

/// An image attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub sort_order: u32,
    pub language: Option<String>,
}

impl ValueObject for Image {}

/// A non-image binary attachment (spec sheet, manual, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub url: String,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl ValueObject for Asset {}

/// An additional placement of a product in some catalog/category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryLink {
    pub catalog_id: CatalogId,
    pub category_id: Option<CategoryId>,
}

impl ValueObject for CategoryLink {}

/// Localized editorial content (long description, usage notes, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorialReview {
    pub content: String,
    pub review_type: String,
    pub language: Option<String>,
}

impl ValueObject for EditorialReview {}

/// In-memory representation of a sellable item.
///
/// A product lives in exactly one catalog (`catalog_id`) and optionally one
/// category (`category_id`); `links` add further placements. Variations are
/// products whose `main_product_id` points at their parent and which are
/// carried nested inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub catalog_id: CatalogId,
    pub category_id: Option<CategoryId>,
    /// SKU code. Unique within a catalog.
    pub code: String,
    pub name: String,
    pub main_product_id: Option<ProductId>,
    pub is_active: bool,
    pub is_buyable: bool,
    pub images: Vec<Image>,
    pub assets: Vec<Asset>,
    /// Own property values. Never produced by inheritance.
    pub property_values: Vec<PropertyValue>,
    /// Resolved property definitions (own + inherited after enrichment).
    pub properties: Vec<Property>,
    pub variations: Vec<CatalogProduct>,
    pub links: Vec<CategoryLink>,
    pub reviews: Vec<EditorialReview>,
    /// Navigational breadcrumb paths, one per placement (computed).
    pub outlines: Vec<Outline>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl CatalogProduct {
    pub fn new(catalog_id: CatalogId, code: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            catalog_id,
            category_id: None,
            code: code.into(),
            name: name.into(),
            main_product_id: None,
            is_active: true,
            is_buyable: true,
            images: Vec::new(),
            assets: Vec::new(),
            property_values: Vec::new(),
            properties: Vec::new(),
            variations: Vec::new(),
            links: Vec::new(),
            reviews: Vec::new(),
            outlines: Vec::new(),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn is_variation(&self) -> bool {
        self.main_product_id.is_some()
    }

    /// Trim sub-sections not selected by `group`.
    ///
    /// `INFO` fields (id, code, name, flags, placement, timestamps) always
    /// survive. Variations that are kept are trimmed recursively with the same
    /// group, except that the VARIATIONS flag itself is not nested (variations
    /// of variations do not exist).
    pub fn reduce_details(&mut self, group: ResponseGroup) {
        if !group.contains(ResponseGroup::ASSETS) {
            self.images.clear();
            self.assets.clear();
        }
        if !group.contains(ResponseGroup::PROPERTIES) {
            self.property_values.clear();
            self.properties.clear();
        }
        if !group.contains(ResponseGroup::LINKS) {
            self.links.clear();
        }
        if !group.contains(ResponseGroup::OUTLINES) {
            self.outlines.clear();
        }
        if !group.contains(ResponseGroup::REVIEWS) {
            self.reviews.clear();
        }
        if group.contains(ResponseGroup::VARIATIONS) {
            for variation in &mut self.variations {
                variation.reduce_details(group - ResponseGroup::VARIATIONS);
            }
        } else {
            self.variations.clear();
        }
    }
}

impl Entity for CatalogProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{Outline, OutlineItem, SeoObjectType};
    use crate::property::{PropertyScope, PropertyValueType};

    fn full_product() -> CatalogProduct {
        let catalog_id = CatalogId::new();
        let mut product = CatalogProduct::new(catalog_id, "SKU-1", "Widget");
        product.images.push(Image {
            url: "https://cdn.example/widget.png".into(),
            sort_order: 0,
            language: None,
        });
        product.assets.push(Asset {
            url: "https://cdn.example/widget.pdf".into(),
            name: "spec sheet".into(),
            mime_type: "application/pdf".into(),
            size_bytes: 1024,
        });
        product
            .property_values
            .push(PropertyValue::text("Color", "red"));
        product.properties.push(Property::new(
            "Color",
            PropertyValueType::ShortText,
            PropertyScope::Product,
        ));
        product.links.push(CategoryLink {
            catalog_id,
            category_id: None,
        });
        product.reviews.push(EditorialReview {
            content: "long description".into(),
            review_type: "fullreview".into(),
            language: None,
        });
        product.outlines.push(Outline {
            items: vec![OutlineItem {
                id: *catalog_id.as_uuid(),
                name: "catalog".into(),
                seo_object_type: SeoObjectType::Catalog,
            }],
        });

        let mut variation = CatalogProduct::new(catalog_id, "SKU-1-A", "Widget A");
        variation.main_product_id = Some(product.id);
        variation.images.push(Image {
            url: "https://cdn.example/widget-a.png".into(),
            sort_order: 0,
            language: None,
        });
        product.variations.push(variation);
        product
    }

    #[test]
    fn info_only_strips_every_section_but_identity() {
        let mut product = full_product();
        let code = product.code.clone();
        product.reduce_details(ResponseGroup::INFO);

        assert_eq!(product.code, code);
        assert!(product.images.is_empty());
        assert!(product.assets.is_empty());
        assert!(product.property_values.is_empty());
        assert!(product.links.is_empty());
        assert!(product.outlines.is_empty());
        assert!(product.reviews.is_empty());
        assert!(product.variations.is_empty());
    }

    #[test]
    fn variations_are_trimmed_recursively() {
        let mut product = full_product();
        product.reduce_details(ResponseGroup::INFO | ResponseGroup::VARIATIONS);

        assert_eq!(product.variations.len(), 1);
        assert!(product.variations[0].images.is_empty());
    }

    #[test]
    fn full_group_keeps_everything() {
        let mut product = full_product();
        let before = product.clone();
        product.reduce_details(ResponseGroup::ITEM_LARGE);
        assert_eq!(product, before);
    }
}
