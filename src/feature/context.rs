use std::collections::HashMap;

use thiserror::Error;

use crate::catalog::{Product, User};

#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    #[error("cannot build an encoding context from an empty product list")]
    EmptyProducts,
    #[error("cannot build an encoding context from an empty user list")]
    EmptyUsers,
}

/// Observed bounds of a continuous field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    pub fn new(min: f64, max: f64) -> Self {
        MinMax { min, max }
    }

    /// Rescales `v` linearly to [0, 1]. A degenerate range (min == max)
    /// maps everything to 0.0 instead of dividing by zero.
    pub fn normalize(&self, v: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            0.0
        } else {
            (v - self.min) / span
        }
    }
}

/// Everything the encoder needs, computed once per training run from the
/// full record set and then treated as read-only.
///
/// One-hot slots are assigned in first-seen order over the catalog followed
/// by the users' purchase records, so the same records always produce the
/// same layout. `avg_purchaser_age` holds normalized ages keyed by product
/// name; products nobody bought are absent and encode as 0.0.
#[derive(Debug, Clone)]
pub struct EncodingContext {
    pub age_range: MinMax,
    pub price_range: MinMax,
    pub category_index: HashMap<String, usize>,
    pub color_index: HashMap<String, usize>,
    pub avg_purchaser_age: HashMap<String, f64>,
    pub feature_dim: usize,
}

impl EncodingContext {
    /// Scans products and users and derives normalization bounds, one-hot
    /// index maps, and per-product average purchaser ages.
    ///
    /// Price bounds cover both the catalog and the nested purchase records;
    /// age bounds cover the users. Empty inputs are an error rather than a
    /// context that silently encodes everything to zero.
    pub fn build(products: &[Product], users: &[User]) -> Result<Self, EncodeError> {
        if products.is_empty() {
            return Err(EncodeError::EmptyProducts);
        }
        if users.is_empty() {
            return Err(EncodeError::EmptyUsers);
        }

        let mut category_index: HashMap<String, usize> = HashMap::new();
        let mut color_index: HashMap<String, usize> = HashMap::new();
        let mut price_min = f64::INFINITY;
        let mut price_max = f64::NEG_INFINITY;

        {
            let mut observe = |p: &Product| {
                intern(&mut category_index, &p.category);
                intern(&mut color_index, &p.color);
                price_min = price_min.min(p.price);
                price_max = price_max.max(p.price);
            };
            for p in products {
                observe(p);
            }
            for u in users {
                for p in &u.purchases {
                    observe(p);
                }
            }
        }

        let age_min = users.iter().map(|u| u.age).fold(f64::INFINITY, f64::min);
        let age_max = users
            .iter()
            .map(|u| u.age)
            .fold(f64::NEG_INFINITY, f64::max);
        let age_range = MinMax::new(age_min, age_max);

        // Sum of purchaser ages and purchase counts per product name.
        let mut age_sums: HashMap<String, (f64, usize)> = HashMap::new();
        for u in users {
            for p in &u.purchases {
                let entry = age_sums.entry(p.name.clone()).or_insert((0.0, 0));
                entry.0 += u.age;
                entry.1 += 1;
            }
        }
        let avg_purchaser_age: HashMap<String, f64> = age_sums
            .into_iter()
            .map(|(name, (sum, count))| (name, age_range.normalize(sum / count as f64)))
            .collect();

        let feature_dim = 2 + category_index.len() + color_index.len();

        Ok(EncodingContext {
            age_range,
            price_range: MinMax::new(price_min, price_max),
            category_index,
            color_index,
            avg_purchaser_age,
            feature_dim,
        })
    }
}

fn intern(map: &mut HashMap<String, usize>, key: &str) {
    if !map.contains_key(key) {
        let next = map.len();
        map.insert(key.to_string(), next);
    }
}
