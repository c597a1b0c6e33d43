/// Categorical cross-entropy for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Added inside log() so log(0) never produces -inf.
const EPS: f64 = 1e-12;

impl CrossEntropyLoss {
    /// L = -sum(expected[i] * ln(predicted[i] + eps))
    ///
    /// `predicted` are softmax probabilities, `expected` a one-hot (or soft)
    /// target distribution of the same length.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, e)| -e * (p + EPS).ln())
            .sum()
    }

    /// Gradient of the combined Softmax + cross-entropy with respect to the
    /// pre-softmax logits: predicted - expected, element-wise.
    ///
    /// The Softmax activation reports an identity derivative so this combined
    /// delta is not chained through the Jacobian a second time.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, e)| p - e)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hot_target_reads_the_true_class() {
        let loss = CrossEntropyLoss::loss(&[0.9, 0.1], &[1.0, 0.0]);
        assert!((loss - (-(0.9f64 + EPS).ln())).abs() < 1e-12);
    }

    #[test]
    fn zero_probability_stays_finite() {
        let loss = CrossEntropyLoss::loss(&[0.0, 1.0], &[1.0, 0.0]);
        assert!(loss.is_finite());
    }

    #[test]
    fn combined_gradient_is_p_minus_e() {
        let d = CrossEntropyLoss::derivative(&[0.7, 0.2, 0.1], &[0.0, 1.0, 0.0]);
        assert!((d[0] - 0.7).abs() < 1e-12);
        assert!((d[1] + 0.8).abs() < 1e-12);
    }
}
