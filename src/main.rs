// Minimal demo: trains a small network on the synthetic one-hot dataset and
// prints a progress line at each epoch boundary. All engine logic lives in
// the library (src/lib.rs and its modules).
use graphite_nn::{train, Activation, DataSet, Gaussian, Network, TrainConfig, Vector};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> graphite_nn::Result<()> {
    let data = DataSet::synthetic(200, 50, 8);
    let mut gaussian = Gaussian::from_seed(42);
    let mut network = Network::new(&[8, 16, 8], Activation::Logistic, &mut gaussian)?;

    let config = TrainConfig::new(50, 10, 1.0);
    let mut rng = StdRng::seed_from_u64(42);

    println!("graphite-nn: training 8 -> 16 -> 8 on the synthetic one-hot dataset");
    // Each epoch emits one record per minibatch plus one evaluation record;
    // print only the evaluation records.
    let mut emitted = 0usize;
    train(&mut network, &data, &mut rng, &config, &mut |progress| {
        emitted += 1;
        if emitted % (progress.total_batches + 1) == 0 {
            println!("{progress}");
        }
    })?;

    let sample = Vector::from_values(&[0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    println!("predict({sample}) -> {}", network.predict(&sample));
    Ok(())
}
