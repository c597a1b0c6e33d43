use crate::layers::{Layer, LayerGrads};

/// Plain stochastic gradient descent with a fixed learning rate.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one descent step to a layer from its pre-computed gradients.
    pub fn step(&self, layer: &mut Layer, grads: &LayerGrads) {
        layer.apply_gradients(grads, self.learning_rate);
    }
}
