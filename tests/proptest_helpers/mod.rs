#![allow(dead_code)]

use hubsets::hub::DatasetSummary;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Summaries with unique ids `ds/<index>` and download counts drawn from a
/// small range so ties are common.
pub fn arb_summaries(max_len: usize) -> impl Strategy<Value = Vec<DatasetSummary>> {
    prop::collection::vec(0u64..20, 0..=max_len).prop_map(|downloads| {
        downloads
            .into_iter()
            .enumerate()
            .map(|(i, downloads)| DatasetSummary {
                id: format!("ds/{i}"),
                downloads,
                ..DatasetSummary::default()
            })
            .collect()
    })
}

/// Registry position encoded in an id produced by [`arb_summaries`].
pub fn registry_index(id: &str) -> usize {
    id.trim_start_matches("ds/").parse().expect("generated id")
}
