//! Source of uniform random values driving sampling decisions.
use rand::{Rng, RngCore};

/// Uniform random source producing values in `[0, 1)`.
///
/// Implemented for every [`RngCore`], so any `rand` generator can be injected.
/// Tests may implement it directly to script exact accept/reject sequences.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: RngCore> UniformSource for R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}
