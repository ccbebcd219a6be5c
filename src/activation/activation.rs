use serde::{Serialize, Deserialize};

use crate::math::vector::Vector;

/// Per-layer activation function, paired with its derivative.
///
/// `Softmax` is vector-valued; it is applied at the whole-vector level in
/// `apply()` rather than element-wise, and its derivative (a full Jacobian)
/// is not implemented — a network with a Softmax layer is inference-only and
/// the trainer refuses to start on one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Identity,
    ReLU,
    Logistic,
    Softmax,
}

impl Activation {
    /// Element-wise activation. Must not be called for `Softmax`; use
    /// `apply()` which handles the full-vector form.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Identity => x,
            Activation::ReLU => if x > 0.0 { x } else { 0.0 },
            Activation::Logistic => logistic(x),
            Activation::Softmax => {
                panic!("Activation::Softmax::function() must not be called directly; \
                        use Activation::apply() which computes the full-vector softmax")
            }
        }
    }

    /// Element-wise derivative of the activation.
    ///
    /// ReLU's derivative at exactly 0 is defined as 1, matching the forward
    /// function's `max(0, x)` convention at the boundary.
    ///
    /// Panics for `Softmax`: the Jacobian contraction is not implemented and
    /// there is no silent element-wise substitute.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::Identity => 1.0,
            Activation::ReLU => if x < 0.0 { 0.0 } else { 1.0 },
            Activation::Logistic => {
                let fx = logistic(x);
                fx * (1.0 - fx)
            }
            Activation::Softmax => {
                panic!("softmax derivative not implemented; softmax layers are inference-only")
            }
        }
    }

    /// Applies the activation over a whole vector.
    pub fn apply(&self, v: &Vector) -> Vector {
        match self {
            Activation::Softmax => softmax(v),
            _ => {
                let mut ans = Vector::zeros(v.size());
                for i in 0..v.size() {
                    ans[i] = self.function(v[i]);
                }
                ans
            }
        }
    }

    /// Applies the derivative over a whole vector. Panics for `Softmax`.
    pub fn derive(&self, v: &Vector) -> Vector {
        let mut ans = Vector::zeros(v.size());
        for i in 0..v.size() {
            ans[i] = self.derivative(v[i]);
        }
        ans
    }

    /// Whether the derivative exists, i.e. a layer using this activation can
    /// take part in backpropagation.
    pub fn trainable(&self) -> bool {
        !matches!(self, Activation::Softmax)
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Full-vector softmax with the max-subtraction stability shift, so large
/// inputs do not overflow the exponential.
fn softmax(v: &Vector) -> Vector {
    assert!(v.size() > 0, "softmax of an empty vector");

    let mut max = v[0];
    for i in 1..v.size() {
        if v[i] > max {
            max = v[i];
        }
    }

    let mut ans = Vector::zeros(v.size());
    let mut sum = 0.0;
    for i in 0..v.size() {
        ans[i] = (v[i] - max).exp();
        sum += ans[i];
    }
    &ans * (1.0 / sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logistic_basic_values() {
        assert!((Activation::Logistic.function(0.0) - 0.5).abs() < 1e-12);
        assert!(Activation::Logistic.function(10.0) > 0.999);
        assert!(Activation::Logistic.function(-10.0) < 0.001);

        // f'(x) = f(x)(1 - f(x)), peaks at 0.25
        assert!((Activation::Logistic.derivative(0.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn relu_derivative_at_zero_is_one() {
        assert_eq!(Activation::ReLU.function(-2.0), 0.0);
        assert_eq!(Activation::ReLU.function(3.0), 3.0);
        assert_eq!(Activation::ReLU.derivative(-0.1), 0.0);
        assert_eq!(Activation::ReLU.derivative(0.0), 1.0);
        assert_eq!(Activation::ReLU.derivative(0.1), 1.0);
    }

    #[test]
    fn softmax_is_a_probability_vector() {
        let v = Vector::from_values(&[1.0, 2.0, 3.0]);
        let s = Activation::Softmax.apply(&v);

        let sum: f64 = s.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(s.iter().all(|&p| p >= 0.0));
        // Largest input gets the largest probability.
        assert!(s[2] > s[1] && s[1] > s[0]);
    }

    #[test]
    fn softmax_survives_huge_inputs() {
        let v = Vector::from_values(&[1000.0, 0.0, -1000.0]);
        let s = Activation::Softmax.apply(&v);
        assert!(s.iter().all(|p| p.is_finite()));
        let sum: f64 = s.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "softmax derivative not implemented")]
    fn softmax_derivative_fails_loudly() {
        let v = Vector::from_values(&[0.0, 1.0]);
        let _ = Activation::Softmax.derive(&v);
    }

    #[test]
    fn only_softmax_is_untrainable() {
        assert!(Activation::Identity.trainable());
        assert!(Activation::ReLU.trainable());
        assert!(Activation::Logistic.trainable());
        assert!(!Activation::Softmax.trainable());
    }
}
