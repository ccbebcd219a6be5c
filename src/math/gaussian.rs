use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Source of independent standard-normal draws, used to initialize weights
/// and biases.
///
/// Uses the trigonometric Box–Muller transform: each pair of uniform draws
/// yields two normal values, the second of which is cached and returned on
/// the next call. A uniform draw at the representable minimum is rejected to
/// keep `ln(u1)` finite.
pub struct Gaussian {
    rng: StdRng,
    cached: f64,
    generate: bool,
}

impl Gaussian {
    /// Seeded sampler, for reproducible initialization.
    pub fn from_seed(seed: u64) -> Gaussian {
        Gaussian::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Sampler seeded from fresh OS entropy.
    pub fn from_entropy() -> Gaussian {
        Gaussian::from_rng(StdRng::from_entropy())
    }

    pub fn from_rng(rng: StdRng) -> Gaussian {
        Gaussian {
            rng,
            cached: 0.0,
            generate: false,
        }
    }

    /// Next standard-normal draw.
    pub fn next(&mut self) -> f64 {
        self.generate = !self.generate;
        if !self.generate {
            return self.cached;
        }

        let mut u1: f64;
        let u2: f64;
        loop {
            u1 = self.rng.gen();
            if u1 > f64::MIN_POSITIVE {
                u2 = self.rng.gen();
                break;
            }
        }

        let r = (-2.0 * u1.ln()).sqrt();
        self.cached = r * (2.0 * PI * u2).sin();
        r * (2.0 * PI * u2).cos()
    }
}
