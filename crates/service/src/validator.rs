//! Write-path validation seam.

use merx_catalog::CatalogProduct;
use merx_core::{CatalogError, CatalogResult};

/// Validates products before they are persisted.
///
/// The default rule set covers structural sanity; deployments with stricter
/// rules plug in their own implementation.
pub trait ProductValidator: Send + Sync {
    fn validate(&self, product: &CatalogProduct) -> CatalogResult<()>;
}

fn valid_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Default rules: non-empty name and code, safe code charset, variations
/// linked to their main product, required properties present.
#[derive(Debug, Default)]
pub struct DefaultProductValidator;

impl ProductValidator for DefaultProductValidator {
    fn validate(&self, product: &CatalogProduct) -> CatalogResult<()> {
        if product.name.trim().is_empty() {
            return Err(CatalogError::validation("product name cannot be empty"));
        }
        if !valid_code(&product.code) {
            return Err(CatalogError::validation(format!(
                "invalid product code: {:?}",
                product.code
            )));
        }

        for required in product.properties.iter().filter(|p| p.required) {
            let has_value = product
                .property_values
                .iter()
                .any(|v| required.same_name(&v.property_name));
            if !has_value {
                return Err(CatalogError::validation(format!(
                    "missing value for required property {:?}",
                    required.name
                )));
            }
        }

        for variation in &product.variations {
            if variation.main_product_id != Some(product.id) {
                return Err(CatalogError::validation(format!(
                    "variation {} does not reference its main product",
                    variation.id
                )));
            }
            // Empty variation codes are allowed here; the service generates
            // them before persisting.
            if !variation.code.trim().is_empty() && !valid_code(&variation.code) {
                return Err(CatalogError::validation(format!(
                    "invalid variation code: {:?}",
                    variation.code
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merx_catalog::{Property, PropertyScope, PropertyValue, PropertyValueType};
    use merx_core::CatalogId;

    fn product() -> CatalogProduct {
        CatalogProduct::new(CatalogId::new(), "SKU-1", "Widget")
    }

    #[test]
    fn accepts_a_minimal_product() {
        assert!(DefaultProductValidator.validate(&product()).is_ok());
    }

    #[test]
    fn rejects_blank_name_and_bad_codes() {
        let mut blank_name = product();
        blank_name.name = "  ".into();
        assert!(matches!(
            DefaultProductValidator.validate(&blank_name),
            Err(CatalogError::Validation(_))
        ));

        let mut bad_code = product();
        bad_code.code = "SKU 1!".into();
        assert!(DefaultProductValidator.validate(&bad_code).is_err());

        let mut empty_code = product();
        empty_code.code = String::new();
        assert!(DefaultProductValidator.validate(&empty_code).is_err());
    }

    #[test]
    fn rejects_unlinked_variations() {
        let mut main = product();
        let stray = product(); // main_product_id is None
        main.variations.push(stray);
        assert!(DefaultProductValidator.validate(&main).is_err());
    }

    #[test]
    fn allows_empty_variation_codes() {
        let mut main = product();
        let mut variation = product();
        variation.main_product_id = Some(main.id);
        variation.code = String::new();
        main.variations.push(variation);
        assert!(DefaultProductValidator.validate(&main).is_ok());
    }

    #[test]
    fn required_properties_must_have_values() {
        let mut p = product();
        p.properties.push(
            Property::new("Color", PropertyValueType::ShortText, PropertyScope::Product).required(),
        );
        assert!(DefaultProductValidator.validate(&p).is_err());

        p.property_values.push(PropertyValue::text("color", "red"));
        assert!(DefaultProductValidator.validate(&p).is_ok());
    }
}
