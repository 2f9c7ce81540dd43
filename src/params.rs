//! Estimator configuration.
use crate::error::InvalidParameter;
use crate::sizing;

/// Default relative accuracy.
pub const DEFAULT_EPSILON: f64 = 0.99;
/// Default probability of exceeding the accuracy.
pub const DEFAULT_DELTA: f64 = 0.9;
/// Buffer threshold derived from `DEFAULT_EPSILON` and `DEFAULT_DELTA`.
pub const DEFAULT_THRESHOLD: usize = 39;

/// Parameters controlling the size of the retained set.
///
/// When `threshold` is set it is used verbatim and `epsilon` / `delta` are ignored.
/// Otherwise the threshold is derived from them via [`sizing::threshold`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub threshold: Option<usize>,
    pub epsilon: f64,
    pub delta: f64,
}

impl Params {
    /// Creates parameters with default accuracy and confidence.
    pub fn new() -> Self {
        Self {
            threshold: None,
            epsilon: DEFAULT_EPSILON,
            delta: DEFAULT_DELTA,
        }
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Validate parameters and resolve the buffer threshold.
    pub fn threshold(&self) -> Result<usize, InvalidParameter> {
        match self.threshold {
            Some(0) => Err(InvalidParameter::new(
                "threshold",
                0,
                "must be a positive integer",
            )),
            Some(threshold) => Ok(threshold),
            None => sizing::threshold(self.epsilon, self.delta),
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_threshold() {
        assert_eq!(Params::default().threshold(), Ok(DEFAULT_THRESHOLD));
        assert_eq!(
            sizing::threshold(DEFAULT_EPSILON, DEFAULT_DELTA),
            Ok(DEFAULT_THRESHOLD)
        );
    }

    #[test_case(Params::new().with_threshold(1) => Ok(1); "threshold of one")]
    #[test_case(Params::new().with_threshold(1000) => Ok(1000); "explicit threshold")]
    #[test_case(Params::new().with_threshold(7).with_epsilon(0.0).with_delta(2.0) => Ok(7); "explicit threshold skips sizing")]
    #[test_case(Params::new().with_epsilon(0.5).with_delta(0.1) => Ok(304); "derived threshold")]
    #[test_case(Params::new().with_threshold(0) => Err("threshold"); "zero threshold")]
    #[test_case(Params::new().with_epsilon(0.0) => Err("epsilon"); "zero epsilon")]
    #[test_case(Params::new().with_delta(0.0) => Err("delta"); "zero delta")]
    #[test_case(Params::new().with_delta(1.0) => Err("delta"); "unit delta")]
    fn test_threshold(params: Params) -> Result<usize, &'static str> {
        params.threshold().map_err(|e| e.name())
    }
}
