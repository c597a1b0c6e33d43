use std::path::Path;

use thiserror::Error;

use crate::catalog::types::Product;

/// Where the shipped catalog lives, relative to the crate root.
pub const CATALOG_PATH: &str = "data/catalog.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads a product catalog (a JSON array of products) from `path`.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Product>, CatalogError> {
    let text = std::fs::read_to_string(path)?;
    let products: Vec<Product> = serde_json::from_str(&text)?;
    Ok(products)
}

/// Loads the catalog from [`CATALOG_PATH`], falling back to the builtin
/// catalog when the file is missing or unreadable.
pub fn load_default() -> Vec<Product> {
    load_catalog(CATALOG_PATH).unwrap_or_else(|_| builtin_catalog())
}

/// A small embedded catalog so the worker and demos run without any files
/// on disk. Ten products over four categories and five colors.
pub fn builtin_catalog() -> Vec<Product> {
    vec![
        Product::new("Canvas Sneakers", "footwear", "white", 49.0),
        Product::new("Trail Runners", "footwear", "blue", 89.0),
        Product::new("Leather Boots", "footwear", "brown", 129.0),
        Product::new("Denim Jacket", "apparel", "blue", 79.0),
        Product::new("Wool Sweater", "apparel", "grey", 65.0),
        Product::new("Rain Shell", "apparel", "green", 99.0),
        Product::new("Daypack", "bags", "black", 55.0),
        Product::new("Messenger Bag", "bags", "brown", 72.0),
        Product::new("Steel Bottle", "gear", "grey", 24.0),
        Product::new("Camp Mug", "gear", "green", 14.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_distinct_names() {
        let products = builtin_catalog();
        assert_eq!(products.len(), 10);
        let mut names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), products.len());
    }

    #[test]
    fn load_catalog_reports_missing_file() {
        let err = load_catalog("no/such/catalog.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn load_catalog_reports_bad_json() {
        let dir = std::env::temp_dir();
        let path = dir.join("affinity_nn_bad_catalog.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_catalog_parses_an_array_of_products() {
        let dir = std::env::temp_dir();
        let path = dir.join("affinity_nn_ok_catalog.json");
        std::fs::write(
            &path,
            r#"[{"name":"Mug","category":"gear","color":"red","price":9.5}]"#,
        )
        .unwrap();
        let products = load_catalog(&path).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Mug");
        let _ = std::fs::remove_file(&path);
    }
}
