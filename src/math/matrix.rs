use serde::{Serialize, Deserialize};
use std::ops::Mul;

use crate::math::vector::Vector;

/// Dense `rows × cols` matrix of `f64` values.
///
/// Storage is row-major; that is an internal choice, not part of the
/// contract. Indices must lie in `[0, rows) × [0, cols)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Fills every entry from a scalar source (e.g. a Gaussian sampler).
    pub fn randomize<F: FnMut() -> f64>(&mut self, source: &mut F) {
        for v in self.data.iter_mut() {
            *v = source();
        }
    }

    pub fn fill(&mut self, value: f64) {
        for v in self.data.iter_mut() {
            *v = value;
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    pub fn add_at(&mut self, row: usize, col: usize, delta: f64) {
        self.data[row * self.cols + col] += delta;
    }

    /// Matrix × vector product writing into a caller-provided result vector,
    /// so the feed-forward hot loop does not allocate.
    ///
    /// `ans` must have length `m.rows` and `v` length `m.cols`.
    pub fn times_into(ans: &mut Vector, m: &Matrix, v: &Vector) {
        assert_eq!(ans.size(), m.rows, "result vector is of incorrect size");
        assert_eq!(v.size(), m.cols, "input vector is of incorrect size");
        for i in 0..m.rows {
            let mut sum = 0.0;
            for j in 0..m.cols {
                sum += m.get(i, j) * v[j];
            }
            ans[i] = sum;
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }
}

/// Matrix × vector: result length = `rows`; entry `i` is the dot product of
/// row `i` with the vector.
impl Mul<&Vector> for &Matrix {
    type Output = Vector;

    fn mul(self, v: &Vector) -> Vector {
        let mut ans = Vector::zeros(self.rows);
        Matrix::times_into(&mut ans, self, v);
        ans
    }
}

/// Vector × matrix: result length = `cols`; entry `j` is the dot product of
/// the vector with column `j`. Used to project backprop error signals through
/// the next layer's weights.
impl Mul<&Matrix> for &Vector {
    type Output = Vector;

    fn mul(self, m: &Matrix) -> Vector {
        assert_eq!(self.size(), m.rows, "vector is of incorrect size");
        let mut ans = Vector::zeros(m.cols);
        for j in 0..m.cols {
            let mut sum = 0.0;
            for i in 0..m.rows {
                sum += self[i] * m.get(i, j);
            }
            ans[j] = sum;
        }
        ans
    }
}
