//! Errors returned by estimator construction and stream estimation.
use std::convert::Infallible;

use thiserror::Error;

/// A construction parameter is outside of its valid domain.
///
/// Always detected before any stream element is consumed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid parameter `{name}` = {value}: {reason}")]
pub struct InvalidParameter {
    name: &'static str,
    value: String,
    reason: &'static str,
}

impl InvalidParameter {
    pub(crate) fn new(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Name of the rejected parameter (`threshold`, `epsilon` or `delta`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rejected value as it was supplied.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Error returned by stream-level estimation.
///
/// `E` is the error type of the element source; it defaults to `Infallible`
/// for streams that cannot fail.
#[derive(Debug, Error)]
pub enum Error<E = Infallible> {
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameter),
    /// Element source failed while iterating. The upstream error is passed through unchanged.
    #[error("stream error: {0}")]
    Stream(#[source] E),
}
