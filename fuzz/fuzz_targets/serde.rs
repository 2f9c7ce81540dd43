#![no_main]

use cvm_estimator::{CardinalityEstimator, Params};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(params) = serde_json::from_slice::<Params>(data) {
        // deserialized parameters are always valid
        let threshold = params.threshold().unwrap();
        // a single element never fills a buffer of two or more
        if (2..=1 << 20).contains(&threshold) {
            let mut estimator = CardinalityEstimator::<usize>::with_params(&params).unwrap();
            estimator.insert(1);
            assert_eq!(estimator.estimate(), 1.0);
        }
    }
});
