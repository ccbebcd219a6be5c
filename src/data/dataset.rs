use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::math::vector::Vector;

/// One labeled sample: an input vector and its target output vector
/// (typically one-hot). Immutable after construction.
#[derive(Debug, Clone)]
pub struct DataPoint {
    pub input: Vector,
    pub output: Vector,
}

impl DataPoint {
    pub fn new(input: Vector, output: Vector) -> DataPoint {
        DataPoint { input, output }
    }
}

/// A training set and a held-out test set. Indexing is deterministic; the
/// trainer permutes indices rather than the sets themselves.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    pub training_set: Vec<DataPoint>,
    pub test_set: Vec<DataPoint>,
}

impl DataSet {
    /// Truncates both sets, e.g. to shorten experiments.
    pub fn trim(&mut self, training_size: usize, test_size: usize) {
        self.training_set.truncate(training_size);
        self.test_set.truncate(test_size);
    }

    /// Synthetic smoke-test data: random one-hot vectors of `vec_length`
    /// mapped to themselves.
    ///
    /// Deterministic (fixed seed), and the test set re-draws from the same
    /// seed so training and test content are identical — this exercises the
    /// training pipeline end to end, not generalization.
    pub fn synthetic(training_size: usize, test_size: usize, vec_length: usize) -> DataSet {
        const SEED: u64 = 1234;

        let generate = |count: usize| {
            let mut rng = StdRng::seed_from_u64(SEED);
            (0..count)
                .map(|_| {
                    let mut point = Vector::zeros(vec_length);
                    point[rng.gen_range(0..vec_length)] = 1.0;
                    DataPoint::new(point.clone(), point)
                })
                .collect()
        };

        DataSet {
            training_set: generate(training_size),
            test_set: generate(test_size),
        }
    }
}
