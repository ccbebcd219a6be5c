use serde::{Serialize, Deserialize};
use std::fmt;

use crate::network::diagnostics::WorstEntry;

/// Immutable training-progress snapshot.
///
/// One record is emitted after every completed minibatch and another after
/// each epoch's full test-set evaluation. Callbacks run synchronously on the
/// training thread; any marshaling elsewhere is the receiver's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainProgress {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// 1-based minibatch number within the current epoch.
    pub batch: usize,
    /// Minibatches per epoch.
    pub total_batches: usize,
    /// Fraction of training samples classified correctly so far this epoch.
    pub training_accuracy: f64,
    /// Fraction of test samples classified correctly at the last evaluation;
    /// 0 until the first epoch completes.
    pub test_accuracy: f64,
    /// Wall-clock time since the run started, in milliseconds.
    pub elapsed_ms: u64,
    /// Worst diagnostic value in the network (NaN/∞ first, else max |value|).
    pub worst: WorstEntry,
}

impl fmt::Display for TrainProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "epoch {}/{}, batch {}/{}, train & test accuracy ({:.3}, {:.3}), \
             elapsed ms {}, worst {} {:.4}",
            self.epoch,
            self.total_epochs,
            self.batch,
            self.total_batches,
            self.training_accuracy,
            self.test_accuracy,
            self.elapsed_ms,
            self.worst.name,
            self.worst.value,
        )
    }
}
