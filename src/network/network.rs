use crate::activation::ActivationFunction;
use crate::layers::Layer;

/// A feed-forward network: an ordered stack of dense layers.
#[derive(Debug)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a network from (size, input_size, activation) tuples, input to
    /// output. Consecutive sizes must chain: each layer's `input_size` is the
    /// previous layer's `size`.
    pub fn new(layer_specs: Vec<(usize, usize, ActivationFunction)>) -> Network {
        let layers: Vec<Layer> = layer_specs
            .into_iter()
            .map(|(size, input_size, activation)| Layer::new(size, input_size, activation))
            .collect();
        for pair in layers.windows(2) {
            assert_eq!(
                pair[0].size,
                pair[1].weights.rows,
                "layer sizes do not chain"
            );
        }
        Network { layers }
    }

    /// Forward pass; each layer caches its activations for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.forward(&current);
        }
        current
    }

    /// The width of the input the first layer expects.
    pub fn input_size(&self) -> usize {
        self.layers.first().map(|l| l.weights.rows).unwrap_or(0)
    }
}
