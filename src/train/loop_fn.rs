use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::seq::SliceRandom;

use crate::layers::LayerGrads;
use crate::loss::LossType;
use crate::math::Matrix;
use crate::network::Network;
use crate::optim::Sgd;
use crate::train::backprop::{backprop_sample, compute_loss};
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs and returns the mean training
/// loss of the last completed epoch.
///
/// Arguments:
/// - `network`      - modified in place
/// - `train_inputs` - training samples, each of the network's input width
/// - `train_labels` - targets, same length as `train_inputs`
/// - `val_inputs`   - optional validation samples
/// - `val_labels`   - optional validation targets (paired with `val_inputs`)
/// - `optimizer`    - SGD optimizer (carries the learning rate)
/// - `config`       - hyperparameters, optional progress channel, stop flag
///
/// The loop breaks early if the progress receiver has been dropped or the
/// stop flag is set.
///
/// Panics if `train_inputs` is empty, lengths mismatch, or `batch_size == 0`.
pub fn train_loop(
    network: &mut Network,
    train_inputs: &[Vec<f64>],
    train_labels: &[Vec<f64>],
    val_inputs: Option<&[Vec<f64>]>,
    val_labels: Option<&[Vec<f64>]>,
    optimizer: &Sgd,
    config: &TrainConfig,
) -> f64 {
    assert!(!train_inputs.is_empty(), "train_inputs must not be empty");
    assert_eq!(
        train_inputs.len(),
        train_labels.len(),
        "train_inputs and train_labels must have equal length"
    );
    assert!(config.batch_size > 0, "batch_size must be at least 1");

    let mut last_train_loss = 0.0;

    for epoch in 1..=config.epochs {
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break;
            }
        }

        let t_start = Instant::now();

        let train_loss = run_one_epoch(
            network,
            train_inputs,
            train_labels,
            optimizer,
            config.batch_size,
            config.loss_type,
        );
        last_train_loss = train_loss;

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let train_accuracy = compute_accuracy(network, train_inputs, train_labels, config.loss_type);

        let (val_loss, val_accuracy) = match (val_inputs, val_labels) {
            (Some(vi), Some(vl)) if !vi.is_empty() => (
                Some(compute_eval_loss(network, vi, vl, config.loss_type)),
                compute_accuracy(network, vi, vl, config.loss_type),
            ),
            _ => (None, None),
        };

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            val_loss,
            train_accuracy,
            val_accuracy,
            elapsed_ms,
        };

        if let Some(ref tx) = config.progress_tx {
            // Receiver gone means nobody is listening; stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }

        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break;
            }
        }
    }

    last_train_loss
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One full epoch of shuffled mini-batch SGD. Returns the mean sample loss.
fn run_one_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    optimizer: &Sgd,
    batch_size: usize,
    loss_type: LossType,
) -> f64 {
    let n = inputs.len();
    let mut total_loss = 0.0;

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rand::thread_rng());

    for batch in indices.chunks(batch_size) {
        let mut acc: Vec<LayerGrads> = network
            .layers
            .iter()
            .map(|layer| LayerGrads {
                weights: Matrix::zeros(layer.weights.rows, layer.weights.cols),
                biases: Matrix::zeros(layer.biases.rows, layer.biases.cols),
            })
            .collect();

        for &idx in batch {
            let (loss, grads) = backprop_sample(network, &inputs[idx], &labels[idx], loss_type);
            total_loss += loss;
            for (a, g) in acc.iter_mut().zip(grads.iter()) {
                a.weights.add_scaled(&g.weights, 1.0);
                a.biases.add_scaled(&g.biases, 1.0);
            }
        }

        // Average over the batch, then step.
        let inv = 1.0 / batch.len() as f64;
        for (layer, a) in network.layers.iter_mut().zip(acc.iter_mut()) {
            a.weights = a.weights.map(|x| x * inv);
            a.biases = a.biases.map(|x| x * inv);
            optimizer.step(layer, a);
        }
    }

    total_loss / n as f64
}

/// Mean loss over a dataset without touching weights (eval mode).
fn compute_eval_loss(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    loss_type: LossType,
) -> f64 {
    let n = inputs.len();
    if n == 0 {
        return 0.0;
    }
    let total: f64 = inputs
        .iter()
        .zip(labels.iter())
        .map(|(input, label)| {
            let output = network.forward(input);
            compute_loss(&output, label, loss_type)
        })
        .sum();
    total / n as f64
}

/// Fraction of samples classified correctly, or `None` when the loss has no
/// natural notion of accuracy.
///
/// Cross-entropy runs compare argmax positions; binary cross-entropy runs
/// threshold every output at 0.5. MSE runs return `None`.
fn compute_accuracy(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    loss_type: LossType,
) -> Option<f64> {
    let n = inputs.len();
    if n == 0 {
        return None;
    }

    let correct = match loss_type {
        LossType::Mse => return None,
        LossType::CrossEntropy => inputs
            .iter()
            .zip(labels.iter())
            .filter(|(input, label)| {
                let output = network.forward(input);
                argmax(&output) == argmax(label)
            })
            .count(),
        LossType::BinaryCrossEntropy => inputs
            .iter()
            .zip(labels.iter())
            .filter(|(input, label)| {
                let output = network.forward(input);
                output
                    .iter()
                    .zip(label.iter())
                    .all(|(p, y)| (*p >= 0.5) == (*y >= 0.5))
            })
            .count(),
    };

    Some(correct as f64 / n as f64)
}

/// Index of the maximum element in a slice.
fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
