//! Fuzz target for parquet export shard path parsing.

#![no_main]

use hubsets::hub::parquet_export::{parse_shard_path, select_config, shards_for_config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let shards: Vec<_> = text.lines().filter_map(parse_shard_path).collect();
    if let Some(config) = select_config(&shards, None) {
        let _ = shards_for_config(&shards, &config);
    }
});
