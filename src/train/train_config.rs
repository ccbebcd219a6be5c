use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Configuration for a [`train`](crate::train::train) run.
///
/// # Fields
/// - `epochs`        — total number of full passes over the training data
/// - `batch_size`    — samples per minibatch; use `1` for online SGD
/// - `learning_rate` — SGD step size, divided by the batch size on apply
/// - `stop_flag`     — optional atomic flag; setting it to `true` from any
///                     thread requests a cooperative stop. The loop polls it
///                     at every minibatch and sample boundary and returns
///                     without completing the current epoch. Setting it is
///                     idempotent.
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a config with no stop flag.
    pub fn new(epochs: usize, batch_size: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            learning_rate,
            stop_flag: None,
        }
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }
}
