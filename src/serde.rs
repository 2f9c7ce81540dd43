//! # Serde module for Params
//!
//! Estimator configuration can be stored alongside the job that runs it, so `Params`
//! implements serde serialization and deserialization. Estimator state itself is
//! never serialized: an estimator lives for exactly one pass over one stream.
//!
//! `Params` is converted into a plain struct with `threshold`, `epsilon` and `delta`
//! fields. Missing fields fall back to their defaults during deserialization, and the
//! result is validated the same way constructors validate it, so an invalid
//! configuration is rejected at load time rather than when the stream starts.
use serde::de::Error;
use serde::{Deserialize, Serialize};

use crate::params::Params;

#[derive(Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ParamsRepr {
    threshold: Option<usize>,
    epsilon: f64,
    delta: f64,
}

impl Default for ParamsRepr {
    fn default() -> Self {
        Params::new().into()
    }
}

impl From<Params> for ParamsRepr {
    fn from(params: Params) -> Self {
        Self {
            threshold: params.threshold,
            epsilon: params.epsilon,
            delta: params.delta,
        }
    }
}

impl Serialize for Params {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ParamsRepr::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = ParamsRepr::deserialize(deserializer)?;
        let params = Params {
            threshold: repr.threshold,
            epsilon: repr.epsilon,
            delta: repr.delta,
        };
        params.threshold().map_err(Error::custom)?;
        Ok(params)
    }
}
