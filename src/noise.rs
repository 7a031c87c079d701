use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest magnitude a noise sample may take.
pub const NOISE_BOUND: f64 = 0.25;

/// Bounded jitter applied to historical trend values.
///
/// Implementations must return values in `[-NOISE_BOUND, NOISE_BOUND]`.
pub trait NoiseSource {
    fn sample(&mut self) -> f64;
}

/// Uniform jitter, `(r - 0.5) * 0.5` for `r` in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct UniformNoise {
    rng: StdRng,
}

impl UniformNoise {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for UniformNoise {
    fn sample(&mut self) -> f64 {
        let r: f64 = self.rng.gen();
        (r - 0.5) * 0.5
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn sample(&mut self) -> f64 {
        0.0
    }
}

/// Constant jitter, clamped into the allowed bound.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn sample(&mut self) -> f64 {
        self.0.clamp(-NOISE_BOUND, NOISE_BOUND)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}
