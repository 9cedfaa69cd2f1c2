//! Catalog layer - static content the store is seeded from

pub mod loader;
pub mod schema;

pub use loader::{Catalog, CatalogError};
