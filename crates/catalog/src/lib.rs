//! `merx-catalog` — pure catalog domain model.
//!
//! Products, catalogs, categories, properties and the deterministic pieces of
//! the enrichment pipeline: property inheritance, outline building,
//! response-group trimming and SKU generation. No IO lives here.

pub mod catalog;
pub mod category;
pub mod events;
pub mod inheritance;
pub mod outline;
pub mod product;
pub mod property;
pub mod response_group;
pub mod sku;

pub use catalog::Catalog;
pub use category::Category;
pub use events::{ProductChanged, ProductChanging, ProductEvent};
pub use inheritance::apply_inheritance;
pub use outline::{Outline, OutlineItem, SeoObjectType};
pub use product::{Asset, CatalogProduct, CategoryLink, EditorialReview, Image};
pub use property::{Property, PropertyScope, PropertyValue, PropertyValueData, PropertyValueType};
pub use response_group::ResponseGroup;
pub use sku::SkuGenerator;
