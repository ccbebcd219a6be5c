use serde::{Serialize, Deserialize};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// Fixed-size dense vector of `f64` values, 0-indexed, mutable in place.
///
/// The size is fixed at construction. Binary operations require equal sizes
/// and panic otherwise — callers are responsible for shape correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    pub fn zeros(size: usize) -> Vector {
        Vector { data: vec![0.0; size] }
    }

    pub fn from_values(values: &[f64]) -> Vector {
        Vector { data: values.to_vec() }
    }

    pub fn size(&self) -> usize {
        self.data.len()
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

    /// Element-wise (Hadamard) product of two equal-size vectors.
    pub fn component_times(left: &Vector, right: &Vector) -> Vector {
        assert_eq!(left.size(), right.size(), "vectors are of incorrect sizes");
        let data = left.data.iter().zip(right.data.iter())
            .map(|(a, b)| a * b)
            .collect();
        Vector { data }
    }

    /// Sum of squares of all entries.
    pub fn length_squared(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum()
    }

    /// In-place element-wise addition, used on the feed-forward hot path to
    /// avoid allocating.
    pub fn add_in_place(&mut self, other: &Vector) {
        assert_eq!(self.size(), other.size(), "vectors are of incorrect sizes");
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index]
    }
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, rhs: &Vector) -> Vector {
        assert_eq!(self.size(), rhs.size(), "vectors are of incorrect sizes");
        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(a, b)| a + b)
            .collect();
        Vector { data }
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Vector {
        assert_eq!(self.size(), rhs.size(), "vectors are of incorrect sizes");
        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(a, b)| a - b)
            .collect();
        Vector { data }
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, scalar: f64) -> Vector {
        Vector { data: self.data.iter().map(|v| v * scalar).collect() }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.data {
            write!(f, "{v:.3} ")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_element_wise() {
        let a = Vector::from_values(&[1.0, 2.0, 3.0]);
        let b = Vector::from_values(&[4.0, 5.0, 6.0]);

        assert_eq!(&a + &b, Vector::from_values(&[5.0, 7.0, 9.0]));
        assert_eq!(&b - &a, Vector::from_values(&[3.0, 3.0, 3.0]));
        assert_eq!(&a * 2.0, Vector::from_values(&[2.0, 4.0, 6.0]));
        assert_eq!(
            Vector::component_times(&a, &b),
            Vector::from_values(&[4.0, 10.0, 18.0])
        );
    }

    #[test]
    fn length_squared_sums_squares() {
        let v = Vector::from_values(&[3.0, 4.0]);
        assert_eq!(v.length_squared(), 25.0);
    }

    #[test]
    fn add_in_place_matches_operator() {
        let mut a = Vector::from_values(&[1.0, -1.0]);
        let b = Vector::from_values(&[0.5, 0.5]);
        a.add_in_place(&b);
        assert_eq!(a, Vector::from_values(&[1.5, -0.5]));
    }

    #[test]
    #[should_panic(expected = "incorrect sizes")]
    fn mismatched_sizes_panic() {
        let a = Vector::zeros(2);
        let b = Vector::zeros(3);
        let _ = &a + &b;
    }
}
