pub mod trainer;
pub mod progress;
pub mod train_config;

pub use trainer::{train, TrainOutcome};
pub use progress::TrainProgress;
pub use train_config::TrainConfig;
