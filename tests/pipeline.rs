//! End-to-end pipeline: topology JSON round-trip, training on a background
//! thread with cooperative cancellation, and synchronous prediction.

use graphite_nn::{
    train, Activation, DataSet, Gaussian, Network, NetworkTopology, TrainConfig, TrainOutcome,
    Vector,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

fn topology() -> NetworkTopology {
    NetworkTopology {
        layer_sizes: vec![4, 8, 4],
        activations: vec![
            Activation::Identity,
            Activation::Logistic,
            Activation::Logistic,
        ],
    }
}

#[test]
fn trains_from_a_json_topology_and_predicts() {
    let json = serde_json::to_string(&topology()).unwrap();
    let restored: NetworkTopology = serde_json::from_str(&json).unwrap();

    let mut gaussian = Gaussian::from_seed(9);
    let mut network = Network::from_topology(&restored, &mut gaussian).unwrap();

    let data = DataSet::synthetic(16, 8, 4);
    let mut rng = StdRng::seed_from_u64(9);
    let config = TrainConfig::new(5, 4, 0.5);

    let outcome = train(&mut network, &data, &mut rng, &config, &mut |_| {}).unwrap();
    assert_eq!(outcome, TrainOutcome::Completed);

    let output = network.predict(&Vector::from_values(&[1.0, 0.0, 0.0, 0.0]));
    assert_eq!(output.size(), 4);
    assert!(output.iter().all(|v| v.is_finite()));
}

#[test]
fn background_training_stops_on_request_from_another_thread() {
    let stop = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel();

    let worker = {
        let stop = stop.clone();
        thread::spawn(move || {
            let mut gaussian = Gaussian::from_seed(13);
            let mut network =
                Network::new(&[4, 8, 4], Activation::Logistic, &mut gaussian).unwrap();
            let data = DataSet::synthetic(64, 16, 4);
            let mut rng = StdRng::seed_from_u64(13);
            // Enough epochs that the run cannot finish before the stop lands.
            let config = TrainConfig::new(1_000_000, 8, 0.5).with_stop_flag(stop);

            train(&mut network, &data, &mut rng, &config, &mut |progress| {
                let _ = tx.send(progress.clone());
            })
            .unwrap()
        })
    };

    // Wait until training is demonstrably underway, then cancel.
    let first = rx.recv().expect("no progress received");
    assert!(first.epoch >= 1);
    stop.store(true, Ordering::Relaxed);

    let outcome = worker.join().expect("training thread panicked");
    assert_eq!(outcome, TrainOutcome::Cancelled);
}
