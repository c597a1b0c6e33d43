use serde::{Deserialize, Serialize};

/// One catalog entry. Category and color are free-form strings; the encoder
/// assigns them one-hot slots from whatever values the context observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub color: String,
    pub price: f64,
}

/// A user profile: age plus the full records of every product they bought.
/// Purchases are nested `Product` values, not references into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub age: f64,
    pub purchases: Vec<Product>,
}

impl Product {
    pub fn new(name: &str, category: &str, color: &str, price: f64) -> Self {
        Product {
            name: name.to_string(),
            category: category.to_string(),
            color: color.to_string(),
            price,
        }
    }
}

impl User {
    pub fn new(age: f64, purchases: Vec<Product>) -> Self {
        User { age, purchases }
    }
}
