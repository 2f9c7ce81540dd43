//! `cvm-estimator` is a Rust crate designed to estimate the number of distinct elements in a stream
//! using a fixed, user-chosen amount of memory.
//!
//! This library keeps a bounded random sample of the stream (the CVM algorithm) and scales its size
//! by the current sampling probability, giving an unbiased estimate without hashing tricks.
//!
//! ```
//! use cvm_estimator::{estimate, Params};
//!
//! let stream = (0..100_000u32).chain(0..100_000);
//! let params = Params::new().with_epsilon(0.1).with_delta(0.01);
//! let count = estimate(stream, &params).unwrap();
//! assert!((count - 100_000.0).abs() < 20_000.0);
//! ```
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod error;
pub mod estimator;
pub mod params;
pub mod random;
#[cfg(feature = "with_serde")]
mod serde;
pub mod sizing;

pub use error::{Error, InvalidParameter};
pub use estimator::CardinalityEstimator;
pub use params::{Params, DEFAULT_DELTA, DEFAULT_EPSILON, DEFAULT_THRESHOLD};
pub use random::UniformSource;

/// Estimate number of distinct elements in `stream`.
///
/// Parameters are validated before the stream is consumed.
pub fn estimate<I>(stream: I, params: &Params) -> Result<f64, InvalidParameter>
where
    I: IntoIterator,
    I::Item: Hash + Eq,
{
    estimate_with_rng(stream, params, StdRng::from_entropy())
}

/// Estimate number of distinct elements in `stream` drawing randomness from `rng`.
pub fn estimate_with_rng<I, R>(stream: I, params: &Params, rng: R) -> Result<f64, InvalidParameter>
where
    I: IntoIterator,
    I::Item: Hash + Eq,
    R: UniformSource,
{
    let mut estimator = CardinalityEstimator::<I::Item, R>::with_params_and_rng(params, rng)?;
    estimator.extend(stream);
    Ok(estimator.estimate())
}

/// Estimate number of distinct elements in a fallible `stream`.
///
/// Stops at the first failed element and returns its error unchanged as [`Error::Stream`];
/// no partial estimate is produced in that case.
pub fn try_estimate<I, T, E>(stream: I, params: &Params) -> Result<f64, Error<E>>
where
    I: IntoIterator<Item = Result<T, E>>,
    T: Hash + Eq,
{
    try_estimate_with_rng(stream, params, StdRng::from_entropy())
}

/// Estimate number of distinct elements in a fallible `stream` drawing randomness from `rng`.
pub fn try_estimate_with_rng<I, T, E, R>(
    stream: I,
    params: &Params,
    rng: R,
) -> Result<f64, Error<E>>
where
    I: IntoIterator<Item = Result<T, E>>,
    T: Hash + Eq,
    R: UniformSource,
{
    let mut estimator = CardinalityEstimator::<T, R>::with_params_and_rng(params, rng)?;
    for item in stream {
        estimator.insert(item.map_err(Error::Stream)?);
    }
    Ok(estimator.estimate())
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use test_case::test_case;

    /// Stream which must never be iterated.
    struct Untouchable;

    impl Iterator for Untouchable {
        type Item = u32;

        fn next(&mut self) -> Option<u32> {
            panic!("stream consumed before parameters were validated");
        }
    }

    #[test]
    fn test_empty_stream() {
        assert_eq!(estimate(std::iter::empty::<u64>(), &Params::new()), Ok(0.0));
    }

    #[test]
    fn test_exact_below_threshold() {
        let stream = ["a", "b", "c", "a", "b", "a"];
        assert_eq!(estimate(stream, &Params::new()), Ok(3.0));
    }

    #[test]
    fn test_seeded_estimate_is_reproducible() {
        let params = Params::new().with_threshold(50);
        let run = || estimate_with_rng(0..10_000u32, &params, StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(run(), run());
    }

    #[test_case(Params::new().with_epsilon(0.0) => "epsilon"; "zero epsilon")]
    #[test_case(Params::new().with_delta(0.0) => "delta"; "zero delta")]
    #[test_case(Params::new().with_delta(1.0) => "delta"; "unit delta")]
    #[test_case(Params::new().with_threshold(0) => "threshold"; "zero threshold")]
    fn test_invalid_params_do_not_touch_stream(params: Params) -> &'static str {
        let err = estimate(Untouchable, &params).unwrap_err();
        let name = err.name();

        let err = try_estimate(Untouchable.map(Ok::<_, io::Error>), &params).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        name
    }

    #[test]
    fn test_stream_error_propagated() {
        let stream = (0..10u32).map(|i| {
            if i == 5 {
                Err(io::Error::new(io::ErrorKind::InvalidData, "bad record"))
            } else {
                Ok(i)
            }
        });

        match try_estimate(stream, &Params::new()) {
            Err(Error::Stream(e)) => {
                assert_eq!(e.kind(), io::ErrorKind::InvalidData);
                assert_eq!(e.to_string(), "bad record");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_seeded_try_estimate_is_reproducible() {
        let params = Params::new().with_threshold(50);
        let run = || {
            let stream = (0..10_000u32).map(Ok::<_, io::Error>);
            try_estimate_with_rng(stream, &params, StdRng::seed_from_u64(9)).unwrap()
        };
        assert_eq!(run(), run());

        // same draws as the infallible entry point
        let infallible =
            estimate_with_rng(0..10_000u32, &params, StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(run(), infallible);
    }

    #[test]
    fn test_try_estimate() {
        let stream = (0..30u32).chain(0..30).map(Ok::<_, io::Error>);
        assert_eq!(try_estimate(stream, &Params::new()).unwrap(), 30.0);
    }
}
