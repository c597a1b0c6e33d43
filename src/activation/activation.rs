#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
    Tanh,
    Identity,
    /// Softmax is a vector-valued activation; it is applied at the layer
    /// level (see `Layer::forward`), never element-wise.
    Softmax,
}

impl ActivationFunction {
    /// Element-wise activation. `Softmax` must go through the layer-level
    /// path instead.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::ReLU => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Identity => x,
            ActivationFunction::Softmax => {
                panic!("softmax is vector-valued; apply it via Layer::forward")
            }
        }
    }

    /// Element-wise derivative of the activation as a function of the
    /// pre-activation value z.
    ///
    /// For `Softmax` the training loop pairs it with cross-entropy, whose
    /// combined gradient is already `predicted - expected`. Returning 1.0
    /// passes that delta through without applying the Jacobian twice.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::ReLU => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Softmax => 1.0,
        }
    }
}

/// Numerically stable softmax over a full vector of logits.
/// Subtracting the max keeps the exponentials in range without changing
/// the result.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&z| (z - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_midpoint_and_derivative() {
        let s = ActivationFunction::Sigmoid;
        assert!((s.function(0.0) - 0.5).abs() < 1e-12);
        // sigmoid'(0) = 0.25
        assert!((s.derivative(0.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn relu_clamps_negatives() {
        let r = ActivationFunction::ReLU;
        assert_eq!(r.function(-3.0), 0.0);
        assert_eq!(r.function(2.5), 2.5);
        assert_eq!(r.derivative(-1.0), 0.0);
        assert_eq!(r.derivative(1.0), 1.0);
    }

    #[test]
    fn tanh_derivative_matches_identity() {
        let t = ActivationFunction::Tanh;
        let x: f64 = 0.7;
        let expected = 1.0 - x.tanh() * x.tanh();
        assert!((t.derivative(x) - expected).abs() < 1e-12);
        assert_eq!(ActivationFunction::Identity.derivative(42.0), 1.0);
    }

    #[test]
    fn softmax_sums_to_one_and_survives_large_logits() {
        let probs = softmax(&[1000.0, 1001.0, 1002.0]);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(probs.iter().all(|p| p.is_finite() && *p > 0.0));
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    #[should_panic(expected = "vector-valued")]
    fn softmax_element_wise_is_rejected() {
        let _ = ActivationFunction::Softmax.function(0.0);
    }
}
