//! `merx-service` — application glue over the catalog domain.
//!
//! `ProductService` layers cache-aside batch reads, the enrichment pipeline
//! and write-path invalidation/eventing over the repository and source seams.

pub mod product_service;
pub mod validator;


pub use product_service::ProductService;
pub use validator::{DefaultProductValidator, ProductValidator};
