pub mod math;
pub mod activation;
pub mod network;
pub mod data;
pub mod train;
pub mod error;

// Convenience re-exports
pub use math::vector::Vector;
pub use math::matrix::Matrix;
pub use math::gaussian::Gaussian;
pub use activation::activation::Activation;
pub use network::network::Network;
pub use network::topology::NetworkTopology;
pub use network::diagnostics::WorstEntry;
pub use data::dataset::{DataPoint, DataSet};
pub use train::trainer::{train, TrainOutcome};
pub use train::train_config::TrainConfig;
pub use train::progress::TrainProgress;
pub use error::{Error, Result};
