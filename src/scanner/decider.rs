use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Decides whether a simulated scan succeeds.
pub trait ScanDecider: Send + Sync + 'static {
    fn decide(&self) -> bool;
}

impl<F> ScanDecider for F
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    fn decide(&self) -> bool {
        self()
    }
}

/// Succeeds with a fixed probability.
pub struct RandomDecider {
    probability: f64,
    rng: Mutex<StdRng>
}

impl RandomDecider {
    pub fn new(probability: f64) -> Self {
        Self::with_rng(probability, StdRng::from_entropy())
    }

    /// A reproducible decider for tests and demos.
    pub fn seeded(probability: f64, seed: u64) -> Self {
        Self::with_rng(probability, StdRng::seed_from_u64(seed))
    }

    fn with_rng(probability: f64, rng: StdRng) -> Self {
        let probability = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };

        Self {
            probability,
            rng: Mutex::new(rng)
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl ScanDecider for RandomDecider {
    fn decide(&self) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_bool(self.probability)
    }
}

/// Always returns the same outcome.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecider(pub bool);

impl ScanDecider for FixedDecider {
    fn decide(&self) -> bool {
        self.0
    }
}
