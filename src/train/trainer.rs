use rand::Rng;
use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::data::dataset::DataSet;
use crate::error::{Error, Result};
use crate::math::vector::Vector;
use crate::network::network::Network;
use crate::train::progress::TrainProgress;
use crate::train::train_config::TrainConfig;

/// How a training run ended. A run is either driven to completion or stopped
/// cooperatively; partial weight updates from a cancelled run are retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainOutcome {
    Completed,
    Cancelled,
}

/// Trains `network` on `data.training_set` with minibatch SGD.
///
/// Per epoch: the index permutation is reshuffled with the supplied RNG and
/// split into minibatches (the last may be short). Each minibatch zeroes the
/// gradient accumulators, feeds forward and backpropagates every sample, then
/// applies one averaged weight update. A progress record is emitted after
/// every minibatch and again after the epoch's full test-set evaluation
/// (feed-forward only).
///
/// The function is synchronous; run it on a dedicated thread and share
/// `config.stop_flag` to cancel from elsewhere. The flag is polled at the
/// start of every minibatch and every sample — when set, the loop returns
/// `Ok(TrainOutcome::Cancelled)` immediately and no further progress records
/// are emitted.
///
/// Fails with `Error::InvalidConfig`, before touching the network, if the
/// batch size is zero, the training set is empty or mismatched with the
/// network's input size, or any layer uses an activation without a derivative
/// (Softmax).
pub fn train<R: Rng>(
    network: &mut Network,
    data: &DataSet,
    rng: &mut R,
    config: &TrainConfig,
    on_progress: &mut dyn FnMut(&TrainProgress),
) -> Result<TrainOutcome> {
    if config.batch_size == 0 {
        return Err(Error::InvalidConfig("batch size must be at least 1".to_owned()));
    }
    if data.training_set.is_empty() {
        return Err(Error::InvalidConfig("training set is empty".to_owned()));
    }
    if data.training_set[0].input.size() != network.input_size() {
        return Err(Error::InvalidConfig(format!(
            "training input size {} does not match network input size {}",
            data.training_set[0].input.size(),
            network.input_size()
        )));
    }
    if let Some(layer) = network.activations().iter().position(|a| !a.trainable()) {
        return Err(Error::InvalidConfig(format!(
            "layer {layer} uses an activation with no derivative; training cannot start"
        )));
    }

    let stop_requested = || {
        config
            .stop_flag
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    };

    let training_size = data.training_set.len();
    let total_batches = (training_size + config.batch_size - 1) / config.batch_size;
    let mut indices: Vec<usize> = (0..training_size).collect();

    let start = Instant::now();
    let mut test_accuracy = 0.0;

    for epoch in 1..=config.epochs {
        shuffle(rng, &mut indices);

        let mut training_passed = 0usize;
        let mut training_processed = 0usize;

        for batch in 0..total_batches {
            if stop_requested() {
                return Ok(TrainOutcome::Cancelled);
            }

            let batch_start = batch * config.batch_size;
            let batch_len = config.batch_size.min(training_size - batch_start);

            network.zero_deltas();
            for k in 0..batch_len {
                if stop_requested() {
                    return Ok(TrainOutcome::Cancelled);
                }

                let point = &data.training_set[indices[batch_start + k]];
                let (err_vector, passed) = {
                    let output = network.feed_forward(&point.input);
                    (
                        output - &point.output,
                        max_index(output) == max_index(&point.output),
                    )
                };
                if passed {
                    training_passed += 1;
                }
                network.backpropagate_to_deltas(&err_vector);
            }
            network.modify_weights(config.learning_rate, batch_len);
            training_processed += batch_len;

            on_progress(&TrainProgress {
                epoch,
                total_epochs: config.epochs,
                batch: batch + 1,
                total_batches,
                training_accuracy: training_passed as f64 / training_processed as f64,
                test_accuracy,
                elapsed_ms: start.elapsed().as_millis() as u64,
                worst: network.worst_entry(),
            });
        }

        if stop_requested() {
            return Ok(TrainOutcome::Cancelled);
        }

        // Held-out evaluation: feed-forward only, no gradient accumulation.
        let mut test_passed = 0usize;
        for point in &data.test_set {
            let output = network.feed_forward(&point.input);
            if max_index(output) == max_index(&point.output) {
                test_passed += 1;
            }
        }
        test_accuracy = if data.test_set.is_empty() {
            0.0
        } else {
            test_passed as f64 / data.test_set.len() as f64
        };

        on_progress(&TrainProgress {
            epoch,
            total_epochs: config.epochs,
            batch: total_batches,
            total_batches,
            training_accuracy: training_passed as f64 / training_processed as f64,
            test_accuracy,
            elapsed_ms: start.elapsed().as_millis() as u64,
            worst: network.worst_entry(),
        });
    }

    Ok(TrainOutcome::Completed)
}

/// Fisher–Yates shuffle driven by the supplied RNG: each position `i` swaps
/// with a uniformly chosen index in `[i, len)`, so a seeded RNG yields a
/// reproducible permutation.
pub fn shuffle<R: Rng>(rng: &mut R, items: &mut [usize]) {
    let len = items.len();
    for i in 0..len {
        let j = rng.gen_range(i..len);
        items.swap(i, j);
    }
}

/// Index of the maximum component; the first index wins ties. The predicted
/// class of an output vector.
pub fn max_index(v: &Vector) -> usize {
    let mut max_index = 0;
    let mut max_value = v[0];
    for i in 1..v.size() {
        if max_value < v[i] {
            max_value = v[i];
            max_index = i;
        }
    }
    max_index
}
