#![no_main]

use cvm_estimator::{CardinalityEstimator, Params};
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // first byte picks the threshold, the rest is the stream
    let threshold = usize::from(data[0] % 16) + 1;
    let params = Params::new().with_threshold(threshold);
    let rng = StdRng::seed_from_u64(wyhash(data, 0));
    let mut estimator = CardinalityEstimator::<&[u8]>::with_params_and_rng(&params, rng).unwrap();

    for chunk in data[1..].chunks(2) {
        estimator.insert(chunk);
        assert!(estimator.len() <= threshold);
        assert!(estimator.probability() <= 1.0);
    }
});
