use crate::catalog::{Product, User};
use crate::feature::context::EncodingContext;

// Field weights. They sum to 1.0 by convention; nothing enforces it.
pub const PRICE_WEIGHT: f64 = 0.4;
pub const AGE_WEIGHT: f64 = 0.3;
pub const CATEGORY_WEIGHT: f64 = 0.2;
pub const COLOR_WEIGHT: f64 = 0.1;

/// Encodes a product as `[price, age, one-hot category, one-hot color]`,
/// each group scaled by its field weight.
///
/// The age slot carries the normalized average age of the users who bought
/// this product, 0.0 if nobody has. A category or color the context never
/// observed leaves its one-hot group all zero.
pub fn encode_product(product: &Product, ctx: &EncodingContext) -> Vec<f64> {
    let mut v = vec![0.0; ctx.feature_dim];
    v[0] = PRICE_WEIGHT * ctx.price_range.normalize(product.price);
    v[1] = AGE_WEIGHT
        * ctx
            .avg_purchaser_age
            .get(&product.name)
            .copied()
            .unwrap_or(0.0);
    if let Some(&i) = ctx.category_index.get(&product.category) {
        v[2 + i] = CATEGORY_WEIGHT;
    }
    if let Some(&i) = ctx.color_index.get(&product.color) {
        v[2 + ctx.category_index.len() + i] = COLOR_WEIGHT;
    }
    v
}

/// Encodes a user as the mean of their purchased-product vectors, with the
/// age slot replaced by the user's own normalized age.
///
/// A user with no purchases encodes to zero everywhere except the age slot.
pub fn encode_user(user: &User, ctx: &EncodingContext) -> Vec<f64> {
    let mut v = vec![0.0; ctx.feature_dim];
    if !user.purchases.is_empty() {
        for p in &user.purchases {
            let pv = encode_product(p, ctx);
            for (slot, x) in v.iter_mut().zip(pv.iter()) {
                *slot += x;
            }
        }
        let inv = 1.0 / user.purchases.len() as f64;
        for slot in v.iter_mut() {
            *slot *= inv;
        }
    }
    v[1] = AGE_WEIGHT * ctx.age_range.normalize(user.age);
    v
}
