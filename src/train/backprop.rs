use crate::layers::LayerGrads;
use crate::loss::{BceLoss, CrossEntropyLoss, LossType, MseLoss};
use crate::math::Matrix;
use crate::network::Network;

/// Scalar loss for one sample, dispatched on `LossType`.
pub(crate) fn compute_loss(predicted: &[f64], expected: &[f64], loss_type: LossType) -> f64 {
    match loss_type {
        LossType::Mse => MseLoss::loss(predicted, expected),
        LossType::CrossEntropy => CrossEntropyLoss::loss(predicted, expected),
        LossType::BinaryCrossEntropy => BceLoss::loss(predicted, expected),
    }
}

/// Per-output gradient for one sample, dispatched on `LossType`.
pub(crate) fn compute_loss_derivative(
    predicted: &[f64],
    expected: &[f64],
    loss_type: LossType,
) -> Vec<f64> {
    match loss_type {
        LossType::Mse => MseLoss::derivative(predicted, expected),
        LossType::CrossEntropy => CrossEntropyLoss::derivative(predicted, expected),
        LossType::BinaryCrossEntropy => BceLoss::derivative(predicted, expected),
    }
}

/// Runs one forward/backward pass for a single sample and returns the sample
/// loss together with per-layer gradients ordered input to output.
///
/// Gradients are not applied here; callers either hand them straight to the
/// optimizer (online SGD) or accumulate them over a mini-batch first.
pub(crate) fn backprop_sample(
    network: &mut Network,
    input: &[f64],
    expected: &[f64],
    loss_type: LossType,
) -> (f64, Vec<LayerGrads>) {
    let output = network.forward(input);
    let loss = compute_loss(&output, expected, loss_type);

    let error = compute_loss_derivative(&output, expected, loss_type);
    let mut delta = Matrix::row_vector(&error);

    let n_layers = network.layers.len();
    let mut grads: Vec<LayerGrads> = Vec::with_capacity(n_layers);

    for i in (0..n_layers).rev() {
        let input_for_layer = if i == 0 {
            Matrix::row_vector(input)
        } else {
            network.layers[i - 1].outputs.clone()
        };

        let layer_grads = network.layers[i].compute_gradients(&delta, &input_for_layer);

        if i > 0 {
            // Propagate the post-activation delta through this layer's
            // weights to get dL/da for the layer below.
            delta = layer_grads.biases.matmul(&network.layers[i].weights.transpose());
        }

        grads.push(layer_grads);
    }

    grads.reverse();
    (loss, grads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;

    #[test]
    fn gradients_cover_every_layer_in_order() {
        let mut net = Network::new(vec![
            (3, 2, ActivationFunction::Tanh),
            (1, 3, ActivationFunction::Sigmoid),
        ]);
        let (loss, grads) = backprop_sample(&mut net, &[0.2, 0.8], &[1.0], LossType::Mse);
        assert!(loss.is_finite());
        assert_eq!(grads.len(), 2);
        assert_eq!((grads[0].weights.rows, grads[0].weights.cols), (2, 3));
        assert_eq!((grads[1].weights.rows, grads[1].weights.cols), (3, 1));
        assert_eq!((grads[1].biases.rows, grads[1].biases.cols), (1, 1));
    }

    #[test]
    fn single_identity_neuron_matches_hand_derivation() {
        // y = w*x + b with w=2, b=0; MSE against target 0 for x=1 gives
        // dL/dw = 2*(y-t)*x / n = ... with our per-output (p - e) convention:
        // delta = 2, w_grad = x * delta = 2, b_grad = 2.
        let mut net = Network::new(vec![(1, 1, ActivationFunction::Identity)]);
        net.layers[0].weights = Matrix::from_rows(vec![vec![2.0]]);
        net.layers[0].biases = Matrix::from_rows(vec![vec![0.0]]);

        let (loss, grads) = backprop_sample(&mut net, &[1.0], &[0.0], LossType::Mse);
        assert!((loss - 4.0).abs() < 1e-12);
        assert!((grads[0].weights.get(0, 0) - 2.0).abs() < 1e-12);
        assert!((grads[0].biases.get(0, 0) - 2.0).abs() < 1e-12);
    }
}
