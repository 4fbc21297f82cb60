//! Randomness applied to reported confidence values.
//!
//! Off by default so identical texts produce identical scores; deployments
//! that prefer less uniform-looking numbers can enable a small amplitude.

use rand::Rng;
use std::fmt::Debug;
use std::sync::Arc;

pub trait JitterSource: Debug + Send + Sync {
    /// Offset added to a confidence value before the final clamp.
    fn offset(&self) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn offset(&self) -> f64 {
        0.0
    }
}

/// Uniform draw from `[-amplitude, +amplitude]` using the thread-local RNG.
#[derive(Debug, Clone, Copy)]
pub struct UniformJitter {
    amplitude: f64,
}

impl UniformJitter {
    pub fn new(amplitude: f64) -> Self {
        Self {
            amplitude: amplitude.abs(),
        }
    }
}

impl JitterSource for UniformJitter {
    fn offset(&self) -> f64 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        rand::thread_rng().gen_range(-self.amplitude..=self.amplitude)
    }
}

/// Always returns the same offset. Useful for reproducing a reported score.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn offset(&self) -> f64 {
        self.0
    }
}

pub fn from_amplitude(amplitude: f64) -> Arc<dyn JitterSource> {
    if amplitude > 0.0 {
        Arc::new(UniformJitter::new(amplitude))
    } else {
        Arc::new(NoJitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_jitter_stays_in_range() {
        let jitter = UniformJitter::new(0.03);
        for _ in 0..1000 {
            let offset = jitter.offset();
            assert!((-0.03..=0.03).contains(&offset));
        }
    }

    #[test]
    fn test_zero_amplitude_disables_jitter() {
        assert_eq!(UniformJitter::new(0.0).offset(), 0.0);
        assert_eq!(from_amplitude(0.0).offset(), 0.0);
    }
}
