//! Fuzz target for feature schema rendering.
//!
//! Any JSON document the viewer could return must render without panicking.

#![no_main]

use hubsets::hub::features::render_features;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = render_features(&value);
    }
});
