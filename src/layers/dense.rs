use crate::activation::{softmax, ActivationFunction};
use crate::math::Matrix;

/// Gradients for one layer, produced by `compute_gradients` and consumed by
/// the optimizer.
#[derive(Debug, Clone)]
pub struct LayerGrads {
    pub weights: Matrix,
    pub biases: Matrix,
}

/// A fully connected layer holding its own forward-pass caches.
///
/// Weights are stored as (input_size, size) so a 1 x input row vector
/// multiplies straight through. `zs` keeps the pre-activation values needed
/// for the backward pass.
#[derive(Debug)]
pub struct Layer {
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activation: ActivationFunction,
    pub outputs: Matrix,
    zs: Matrix,
}

impl Layer {
    /// He initialization before ReLU, Xavier otherwise; biases start at zero.
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Layer {
        let weights = match activation {
            ActivationFunction::ReLU => Matrix::he(input_size, size),
            _ => Matrix::xavier(input_size, size),
        };
        Layer {
            size,
            weights,
            biases: Matrix::zeros(1, size),
            activation,
            outputs: Matrix::zeros(1, size),
            zs: Matrix::zeros(1, size),
        }
    }

    /// Forward pass for one sample; caches z and the activation for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let x = Matrix::row_vector(input);
        let z = &x.matmul(&self.weights) + &self.biases;
        let a = match self.activation {
            ActivationFunction::Softmax => Matrix::row_vector(&softmax(z.row(0))),
            _ => z.map(|v| self.activation.function(v)),
        };
        self.zs = z;
        self.outputs = a;
        self.outputs.row(0).to_vec()
    }

    /// Computes this layer's gradients.
    ///
    /// `delta` is dL/da for this layer (error in activation space, 1 x size);
    /// `inputs` is the 1 x input_size activation that fed the layer. The
    /// element-wise chain through the activation uses the cached z values.
    pub fn compute_gradients(&self, delta: &Matrix, inputs: &Matrix) -> LayerGrads {
        let act_derivative = self.zs.map(|z| self.activation.derivative(z));
        let layer_delta = delta.hadamard(&act_derivative);
        LayerGrads {
            weights: inputs.transpose().matmul(&layer_delta),
            biases: layer_delta,
        }
    }

    /// Applies pre-computed gradients scaled by the learning rate.
    pub fn apply_gradients(&mut self, grads: &LayerGrads, lr: f64) {
        self.weights.add_scaled(&grads.weights, -lr);
        self.biases.add_scaled(&grads.biases, -lr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_caches_and_shapes() {
        let mut layer = Layer::new(3, 2, ActivationFunction::Sigmoid);
        let out = layer.forward(&[0.5, -0.5]);
        assert_eq!(out.len(), 3);
        assert_eq!((layer.outputs.rows, layer.outputs.cols), (1, 3));
        assert!(out.iter().all(|v| *v > 0.0 && *v < 1.0));
    }

    #[test]
    fn softmax_layer_outputs_a_distribution() {
        let mut layer = Layer::new(4, 3, ActivationFunction::Softmax);
        let out = layer.forward(&[1.0, 0.0, -1.0]);
        let sum: f64 = out.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn identity_neuron_gradient_chain() {
        let mut layer = Layer::new(1, 1, ActivationFunction::Identity);
        layer.weights = Matrix::from_rows(vec![vec![2.0]]);
        layer.biases = Matrix::from_rows(vec![vec![1.0]]);

        let out = layer.forward(&[3.0]);
        assert!((out[0] - 7.0).abs() < 1e-12);

        // Pretend the target was 4: dL/da = a - t = 3.
        let delta = Matrix::row_vector(&[3.0]);
        let inputs = Matrix::row_vector(&[3.0]);
        let grads = layer.compute_gradients(&delta, &inputs);
        assert!((grads.weights.get(0, 0) - 9.0).abs() < 1e-12);
        assert!((grads.biases.get(0, 0) - 3.0).abs() < 1e-12);

        layer.apply_gradients(&grads, 0.1);
        assert!((layer.weights.get(0, 0) - 1.1).abs() < 1e-12);
        assert!((layer.biases.get(0, 0) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn relu_layers_use_he_init() {
        // Not a distribution test; just confirms construction succeeds and
        // weights are populated for both init paths.
        let relu = Layer::new(8, 4, ActivationFunction::ReLU);
        let sig = Layer::new(8, 4, ActivationFunction::Sigmoid);
        assert!(relu.weights.data.iter().any(|v| *v != 0.0));
        assert!(sig.weights.data.iter().any(|v| *v != 0.0));
        assert!(relu.biases.data.iter().all(|v| *v == 0.0));
    }
}
