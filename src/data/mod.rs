pub mod dataset;
pub mod idx;

pub use dataset::{DataPoint, DataSet};
