//! Fuzz target for dataset reference parsing.
//!
//! Feeds arbitrary strings (repo ids and URLs) to the resolver, checking for
//! panics on malformed input.

#![no_main]

use hubsets::hub::resolve::parse_dataset_input;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(repo_id) = parse_dataset_input(input) {
            assert!(!repo_id.is_empty());
        }
    }
});
