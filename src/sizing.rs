//! Buffer sizing policy.
//!
//! Maximum number of retained elements needed for an estimate to be within
//! relative error `epsilon` with probability at least `1 - delta`:
//!
//! `threshold = ceil((12 / epsilon^2) * log2(8 / delta))`
//!
//! The result is rounded up so the guarantee is never under-provisioned.

use crate::error::InvalidParameter;

/// Compute buffer threshold from accuracy `epsilon` and failure probability `delta`.
pub fn threshold(epsilon: f64, delta: f64) -> Result<usize, InvalidParameter> {
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(InvalidParameter::new(
            "epsilon",
            epsilon,
            "must be a positive finite number",
        ));
    }
    if !(delta > 0.0 && delta < 1.0) {
        return Err(InvalidParameter::new("delta", delta, "must be in (0, 1)"));
    }

    let size = ((12.0 / epsilon.powi(2)) * (8.0 / delta).log2()).ceil();
    // `usize::MAX as f64` rounds up, hence strict comparison
    if !size.is_finite() || size >= usize::MAX as f64 {
        return Err(InvalidParameter::new(
            "epsilon",
            epsilon,
            "buffer size does not fit into usize",
        ));
    }

    Ok((size as usize).max(1))
}
