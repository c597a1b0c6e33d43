/// Selects which loss function the training loop uses.
///
/// - `Mse`                - mean-squared error; pair with Identity or Sigmoid.
/// - `CrossEntropy`       - categorical cross-entropy; pair with Softmax.
///   Its gradient is the combined Softmax+CE delta (predicted - expected).
/// - `BinaryCrossEntropy` - binary cross-entropy; pair with a single Sigmoid
///   output, as the affinity scorer does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossType {
    Mse,
    CrossEntropy,
    BinaryCrossEntropy,
}
