//! Cardinality estimator allows to estimate number of distinct elements
//! in the stream by keeping a bounded random sample of the elements seen so far.
//!
//! Algorithm by Chakraborty, Vinodchandran and Meel,
//! "Distinct Elements in Streams: An Algorithm for the (Text) Book":
//! https://arxiv.org/abs/2301.10191
//!
//! # Data-structure design rationale
//!
//! ## Bounded memory
//! The estimator keeps a retained set `X` of at most `threshold` elements
//! and a retention probability `p` starting at 1.
//! The threshold is either supplied directly or derived from accuracy `epsilon`
//! and failure probability `delta` (see [`crate::sizing`]), so memory usage is
//! `O(threshold)` regardless of stream cardinality.
//!
//! ## Unbiased sampling
//! Every element seen so far is present in `X` with probability exactly `p`,
//! independently of the others. Hence `|X| / p` is an unbiased estimate of the
//! number of distinct elements. Each incoming element is processed as follows:
//! - remove it from `X`, so only its most recent occurrence decides retention;
//! - draw `r` uniform in `[0, 1)` and insert it if `r < p` and `X` is not full;
//! - once `X` reaches `threshold`, keep every element with probability 1/2
//!   and halve `p`.
//!
//! ## High accuracy
//! - While distinct count stays below `threshold`, `p` stays 1 and
//!   the estimate is exact.
//! - Otherwise the estimate is within `epsilon` relative error with
//!   probability at least `1 - delta`.
//!
//! `p` is not guarded against floating-point underflow: with a tiny threshold and
//! an extremely long stream it may reach zero, after which `estimate` is not finite.

use std::collections::hash_set::Iter;
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasherDefault, Hash, Hasher};
use std::mem::size_of;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wyhash::WyHash;

use crate::error::InvalidParameter;
use crate::params::{Params, DEFAULT_THRESHOLD};
use crate::random::UniformSource;

/// Upper bound on capacity reserved upfront; larger thresholds grow on demand.
const MAX_INITIAL_CAPACITY: usize = 4096;

pub struct CardinalityEstimator<T, R = StdRng, H = WyHash>
where
    T: Hash + Eq,
    H: Hasher + Default,
{
    /// Retained sample of distinct elements
    retained: HashSet<T, BuildHasherDefault<H>>,
    /// Probability of any seen element being retained
    probability: f64,
    /// Maximum size of retained set
    threshold: usize,
    rng: R,
}

impl<T: Hash + Eq> CardinalityEstimator<T> {
    /// Creates new instance of `CardinalityEstimator` with default parameters
    /// and entropy-seeded random source.
    pub fn new() -> Self {
        Self::from_parts(DEFAULT_THRESHOLD, StdRng::from_entropy())
    }

    /// Creates new instance of `CardinalityEstimator` with explicit buffer threshold.
    pub fn with_threshold(threshold: usize) -> Result<Self, InvalidParameter> {
        Self::with_params(&Params::new().with_threshold(threshold))
    }

    /// Creates new instance of `CardinalityEstimator` with given parameters.
    pub fn with_params(params: &Params) -> Result<Self, InvalidParameter> {
        Self::with_params_and_rng(params, StdRng::from_entropy())
    }
}

impl<T, R, H> CardinalityEstimator<T, R, H>
where
    T: Hash + Eq,
    R: UniformSource,
    H: Hasher + Default,
{
    /// Creates new instance of `CardinalityEstimator` drawing randomness from `rng`.
    ///
    /// Independent estimators running side by side must use independently seeded sources.
    pub fn with_params_and_rng(params: &Params, rng: R) -> Result<Self, InvalidParameter> {
        let threshold = params.threshold()?;
        tracing::trace!(threshold, "created cardinality estimator");
        Ok(Self::from_parts(threshold, rng))
    }

    fn from_parts(threshold: usize, rng: R) -> Self {
        Self {
            retained: HashSet::with_capacity_and_hasher(
                threshold.min(MAX_INITIAL_CAPACITY),
                BuildHasherDefault::default(),
            ),
            probability: 1.0,
            threshold,
            rng,
        }
    }

    /// Process next element of the stream
    #[inline]
    pub fn insert(&mut self, item: T) {
        self.retained.remove(&item);

        // draw unconditionally, one value per processed element
        let r = self.rng.next_uniform();
        if r < self.probability && self.retained.len() < self.threshold {
            self.retained.insert(item);
        }

        if self.retained.len() >= self.threshold {
            self.thin();
        }
    }

    /// Keep every retained element with probability 1/2 and halve retention probability.
    fn thin(&mut self) {
        let before = self.retained.len();
        let rng = &mut self.rng;
        self.retained.retain(|_| rng.next_uniform() < 0.5);
        self.probability /= 2.0;

        tracing::debug!(
            before,
            after = self.retained.len(),
            probability = self.probability,
            "thinned retained set"
        );
    }
}

impl<T, R, H> CardinalityEstimator<T, R, H>
where
    T: Hash + Eq,
    H: Hasher + Default,
{
    /// Return cardinality estimate `|X| / p` of elements processed so far
    #[inline]
    pub fn estimate(&self) -> f64 {
        self.retained.len() as f64 / self.probability
    }

    /// Return number of currently retained elements
    #[inline]
    pub fn len(&self) -> usize {
        self.retained.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.retained.is_empty()
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Return current retention probability
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Return whether `item` is currently retained
    pub fn contains(&self, item: &T) -> bool {
        self.retained.contains(item)
    }

    /// Iterate over currently retained elements in arbitrary order
    pub fn iter(&self) -> Iter<'_, T> {
        self.retained.iter()
    }

    /// Return approximate memory size of `CardinalityEstimator`,
    /// counting one control byte per retained set bucket
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + self.retained.capacity() * (size_of::<T>() + 1)
    }
}

impl<T, R, H> Extend<T> for CardinalityEstimator<T, R, H>
where
    T: Hash + Eq,
    R: UniformSource,
    H: Hasher + Default,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.insert(item));
    }
}

impl<T: Hash + Eq> FromIterator<T> for CardinalityEstimator<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut estimator = Self::new();
        estimator.extend(iter);
        estimator
    }
}

impl<T: Hash + Eq> Default for CardinalityEstimator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R, H> Debug for CardinalityEstimator<T, R, H>
where
    T: Hash + Eq,
    H: Hasher + Default,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ threshold: {}, retained: {}, probability: {}, estimate: {} }}",
            self.threshold,
            self.len(),
            self.probability,
            self.estimate()
        )
    }
}
