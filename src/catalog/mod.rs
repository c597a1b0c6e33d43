pub mod loader;
pub mod types;

pub use loader::{builtin_catalog, load_catalog, load_default, CatalogError, CATALOG_PATH};
pub use types::{Product, User};
