use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;
use crate::math::vector::Vector;
use crate::network::network::Network;

/// The single worst value found in a network scan: any NaN or infinity wins
/// outright; otherwise the entry with the largest absolute magnitude.
///
/// Carried in progress records so divergence is visible without halting
/// training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorstEntry {
    /// Which array the value came from, e.g. `"W[1]"` or `"z[0]"`.
    pub name: String,
    pub value: f64,
}

impl Network {
    /// Scans every weight, bias, scratch, and activation value and reports
    /// the worst entry. A non-finite value is reported immediately.
    pub fn worst_entry(&self) -> WorstEntry {
        let mut scan = Scan::default();
        let last = self.num_layers() - 1;

        for n in 0..last {
            if scan.vector(&self.biases[n], "b", n)
                || scan.matrix(&self.weights[n], "W", n)
                || scan.vector(&self.z[n], "z", n)
                || scan.vector(&self.x[n], "x", n)
                || scan.vector(&self.eps[n], "eps", n)
            {
                return scan.into_entry();
            }
        }
        scan.vector(&self.x[last], "x", last);
        scan.into_entry()
    }
}

#[derive(Default)]
struct Scan {
    name: String,
    value: f64,
    non_finite: bool,
}

impl Scan {
    /// Returns true once a non-finite value is found, ending the scan.
    fn visit(&mut self, v: f64, label: &str, index: usize) -> bool {
        if !v.is_finite() {
            self.non_finite = true;
            self.name = format!("{label}[{index}]");
            self.value = v;
            return true;
        }
        if v.abs() > self.value {
            self.value = v.abs();
            self.name = format!("{label}[{index}]");
        }
        false
    }

    fn vector(&mut self, v: &Vector, label: &str, index: usize) -> bool {
        v.iter().any(|&val| self.visit(val, label, index))
    }

    fn matrix(&mut self, m: &Matrix, label: &str, index: usize) -> bool {
        m.iter().any(|&val| self.visit(val, label, index))
    }

    fn into_entry(self) -> WorstEntry {
        WorstEntry {
            name: self.name,
            value: self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::Activation;
    use crate::math::gaussian::Gaussian;

    fn net() -> Network {
        let mut gaussian = Gaussian::from_seed(3);
        Network::new(&[2, 3, 2], Activation::Logistic, &mut gaussian).unwrap()
    }

    #[test]
    fn reports_largest_magnitude_entry() {
        let mut net = net();
        net.zero_all();
        net.weight_mut(1).set(0, 2, -7.5);

        let worst = net.worst_entry();
        assert_eq!(worst.name, "W[1]");
        assert_eq!(worst.value, 7.5);
    }

    #[test]
    fn non_finite_values_take_priority() {
        let mut net = net();
        net.weight_mut(0).set(0, 0, 1.0e6);
        net.bias_mut(1)[0] = f64::NAN;

        let worst = net.worst_entry();
        assert_eq!(worst.name, "b[1]");
        assert!(worst.value.is_nan());
    }

    #[test]
    fn infinity_is_reported_by_name() {
        let mut net = net();
        net.bias_mut(0)[1] = f64::INFINITY;

        let worst = net.worst_entry();
        assert_eq!(worst.name, "b[0]");
        assert!(worst.value.is_infinite());
    }
}
