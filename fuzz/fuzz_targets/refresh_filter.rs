//! Fuzz target for the refresh-noise filter.

#![no_main]

use libfuzzer_sys::fuzz_target;

use tfcheck_core::{REFRESH_NOISE_MARKERS, filter_refresh_noise};

fuzz_target!(|output: String| {
    let filtered = filter_refresh_noise(&output);

    assert!(filtered.len() <= output.len());
    for line in filtered.lines() {
        assert!(!REFRESH_NOISE_MARKERS.iter().any(|m| line.contains(m)));
    }
    assert_eq!(filter_refresh_noise(&filtered), filtered);
});
