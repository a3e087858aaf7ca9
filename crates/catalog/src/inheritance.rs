//! Property inheritance: catalog → category → product → variation.
//!
//! Inheritance resolves property *definitions* only. A product's own
//! `PropertyValue`s are facts it carries and are never created, replaced or
//! removed here.

use crate::catalog::Catalog;
use crate::category::Category;
use crate::product::CatalogProduct;
use crate::property::{Property, PropertyScope};

/// Merge `incoming` definitions into `base`, overriding case-insensitively by
/// name and appending the rest. Later levels win.
fn merge_properties(base: &mut Vec<Property>, incoming: &[Property]) {
    for prop in incoming {
        if let Some(existing) = base.iter_mut().find(|p| p.same_name(&prop.name)) {
            *existing = prop.clone();
        } else {
            base.push(prop.clone());
        }
    }
}

/// Resolve the inherited property set for `product` and its variations.
///
/// Resolution order: catalog-scope definitions, then the category's resolved
/// set, then the product's own definitions; each later level overrides earlier
/// definitions of the same (case-insensitive) name. Variations receive the
/// main product's resolved set with their own `Variation`-scope definitions
/// layered on top.
pub fn apply_inheritance(product: &mut CatalogProduct, catalog: &Catalog, category: Option<&Category>) {
    let own: Vec<Property> = product.properties.clone();

    let mut resolved: Vec<Property> = Vec::new();
    merge_properties(&mut resolved, &catalog.properties);
    if let Some(category) = category {
        merge_properties(&mut resolved, &category.properties);
    }
    merge_properties(&mut resolved, &own);

    product.properties = resolved.clone();

    for variation in &mut product.variations {
        let variation_own: Vec<Property> = variation
            .properties
            .iter()
            .filter(|p| p.scope == PropertyScope::Variation)
            .cloned()
            .collect();
        let mut variation_resolved = resolved.clone();
        merge_properties(&mut variation_resolved, &variation_own);
        variation.properties = variation_resolved;
    }
}
