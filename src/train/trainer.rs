use crate::loss::LossType;
use crate::network::Network;
use crate::optim::Sgd;
use crate::train::backprop::backprop_sample;

/// One full pass of online SGD over the given samples, applying gradients
/// after every sample. Returns the mean loss of the pass.
///
/// This is the small-data entry point the standalone demos use; for shuffled
/// mini-batch epochs with progress reporting see `train_loop`.
pub fn fit_once(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
    optimizer: &Sgd,
    loss_type: LossType,
) -> f64 {
    assert!(!inputs.is_empty(), "inputs must not be empty");
    assert_eq!(
        inputs.len(),
        expected_outputs.len(),
        "inputs and expected_outputs must have equal length"
    );

    let mut total_loss = 0.0;

    for (input, expected) in inputs.iter().zip(expected_outputs.iter()) {
        let (loss, grads) = backprop_sample(network, input, expected, loss_type);
        total_loss += loss;

        for (layer, layer_grads) in network.layers.iter_mut().zip(grads.iter()) {
            optimizer.step(layer, layer_grads);
        }
    }

    total_loss / inputs.len() as f64
}
