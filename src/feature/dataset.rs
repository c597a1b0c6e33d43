use crate::catalog::{Product, User};
use crate::feature::context::EncodingContext;
use crate::feature::encoder::{encode_product, encode_user};

/// Assembled training matrix: one row per (user, product) pair.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub inputs: Vec<Vec<f64>>,
    pub labels: Vec<Vec<f64>>,
    pub feature_dim: usize,
}

impl TrainingSet {
    /// Width of each input row: user vector plus product vector.
    pub fn input_width(&self) -> usize {
        2 * self.feature_dim
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Builds the full cross product of users and products, user-major.
///
/// Each row is `encode_user(user) ++ encode_product(product)`; the label is
/// 1.0 when the user's purchase list contains a product with the same name,
/// else 0.0. No deduplication or sampling: `users.len() * products.len()`
/// rows, always.
pub fn assemble(users: &[User], products: &[Product], ctx: &EncodingContext) -> TrainingSet {
    let product_vectors: Vec<Vec<f64>> =
        products.iter().map(|p| encode_product(p, ctx)).collect();

    let n = users.len() * products.len();
    let mut inputs = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);

    for user in users {
        let user_vec = encode_user(user, ctx);
        for (product, pv) in products.iter().zip(product_vectors.iter()) {
            let mut row = Vec::with_capacity(2 * ctx.feature_dim);
            row.extend_from_slice(&user_vec);
            row.extend_from_slice(pv);
            inputs.push(row);

            let purchased = user.purchases.iter().any(|p| p.name == product.name);
            labels.push(vec![if purchased { 1.0 } else { 0.0 }]);
        }
    }

    TrainingSet {
        inputs,
        labels,
        feature_dim: ctx.feature_dim,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Vec<Product>, Vec<User>) {
        let products = vec![
            Product::new("A", "shoes", "red", 10.0),
            Product::new("B", "shoes", "blue", 20.0),
            Product::new("C", "hats", "green", 30.0),
        ];
        let users = vec![
            User::new(20.0, vec![products[0].clone()]),
            User::new(40.0, vec![products[1].clone(), products[2].clone()]),
        ];
        (products, users)
    }

    #[test]
    fn row_count_is_users_times_products() {
        let (products, users) = fixture();
        let ctx = EncodingContext::build(&products, &users).unwrap();
        let set = assemble(&users, &products, &ctx);
        assert_eq!(set.len(), users.len() * products.len());
        assert_eq!(set.labels.len(), set.inputs.len());
    }

    #[test]
    fn rows_have_twice_the_feature_dimension() {
        let (products, users) = fixture();
        let ctx = EncodingContext::build(&products, &users).unwrap();
        let set = assemble(&users, &products, &ctx);
        for row in &set.inputs {
            assert_eq!(row.len(), set.input_width());
        }
        assert_eq!(set.input_width(), 2 * ctx.feature_dim);
    }

    #[test]
    fn labels_mark_purchases_by_name() {
        let (products, users) = fixture();
        let ctx = EncodingContext::build(&products, &users).unwrap();
        let set = assemble(&users, &products, &ctx);
        // User-major ordering: user 0 over A, B, C then user 1 over A, B, C.
        let flat: Vec<f64> = set.labels.iter().map(|l| l[0]).collect();
        assert_eq!(flat, vec![1.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn rows_concatenate_user_then_product_vectors() {
        let (products, users) = fixture();
        let ctx = EncodingContext::build(&products, &users).unwrap();
        let set = assemble(&users, &products, &ctx);
        let user_vec = encode_user(&users[0], &ctx);
        let product_vec = encode_product(&products[1], &ctx);
        let row = &set.inputs[1];
        assert_eq!(&row[..ctx.feature_dim], user_vec.as_slice());
        assert_eq!(&row[ctx.feature_dim..], product_vec.as_slice());
    }
}
