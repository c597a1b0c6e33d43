/// Per-epoch training statistics produced by `train_loop`.
///
/// When a progress channel is configured in `TrainConfig`, one value is sent
/// at the end of every completed epoch. The worker turns these into outbound
/// progress events; the demos print them directly.
#[derive(Debug, Clone)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean training loss over all samples in this epoch.
    pub train_loss: f64,
    /// Mean validation loss, if a validation set was provided.
    pub val_loss: Option<f64>,
    /// Training accuracy in [0, 1]; set for classification losses only.
    pub train_accuracy: Option<f64>,
    /// Validation accuracy in [0, 1]; requires a validation set and a
    /// classification loss.
    pub val_accuracy: Option<f64>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

impl EpochStats {
    /// Fraction of the run completed after this epoch, in (0, 1].
    pub fn progress(&self) -> f64 {
        self.epoch as f64 / self.total_epochs.max(1) as f64
    }
}
