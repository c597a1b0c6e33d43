/// Binary cross-entropy for use with a Sigmoid output layer. This is the
/// loss behind the purchase/no-purchase affinity labels.
pub struct BceLoss;

const EPS: f64 = 1e-12;

impl BceLoss {
    /// Scalar BCE: -mean(y * ln(p + eps) + (1 - y) * ln(1 - p + eps))
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, y)| -(y * (p + EPS).ln() + (1.0 - y) * (1.0 - p + EPS).ln()))
            .sum::<f64>()
            / n
    }

    /// Per-output gradient: (p - y) / ((p + eps) * (1 - p + eps))
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, y)| (p - y) / ((p + EPS) * (1.0 - p + EPS)))
            .collect()
    }
}
