pub mod vector;
pub mod matrix;
pub mod gaussian;

pub use vector::Vector;
pub use matrix::Matrix;
pub use gaussian::Gaussian;
