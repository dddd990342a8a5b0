//! Shard selection for the Hub's automatic parquet export.
//!
//! Every public dataset has a `refs/convert/parquet` branch laid out as
//! `<config>/<split>/NNNN.parquet`. Older exports used
//! `<config>/<dataset>-<split>[-NNNNN-of-NNNNN].parquet`; both are understood.

use std::collections::BTreeSet;
use std::path::Path;

/// Branch holding the parquet export.
pub const PARQUET_REVISION: &str = "refs/convert/parquet";

/// One parquet file of the export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParquetShard {
    pub config: String,
    pub split: String,
    pub path: String,
}

/// Shards of one split, in path order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitShards {
    pub split: String,
    pub paths: Vec<String>,
}

pub fn parse_shard_path(path: &str) -> Option<ParquetShard> {
    if !path.ends_with(".parquet") {
        return None;
    }

    let segments: Vec<&str> = path.split('/').collect();
    let split = match segments.as_slice() {
        [_, split, .., _] => normalize_split_dir(split).to_string(),
        [_, file] => split_from_legacy_name(file)?,
        _ => return None,
    };

    Some(ParquetShard {
        config: segments[0].to_string(),
        split,
        path: path.to_string(),
    })
}

/// Pick the export configuration to load.
///
/// A requested config must be present. Otherwise the only config, then
/// `default`, then the first in sorted order.
pub fn select_config(shards: &[ParquetShard], requested: Option<&str>) -> Option<String> {
    let configs: BTreeSet<&str> = shards.iter().map(|shard| shard.config.as_str()).collect();

    if let Some(requested) = requested {
        return configs.contains(requested).then(|| requested.to_string());
    }

    if configs.len() == 1 {
        return configs.into_iter().next().map(str::to_string);
    }
    if configs.contains("default") {
        return Some("default".to_string());
    }
    configs.into_iter().next().map(str::to_string)
}

/// Group the shards of `config` by split. Splits appear in the order their
/// first shard sorts.
pub fn shards_for_config(shards: &[ParquetShard], config: &str) -> Vec<SplitShards> {
    let mut selected: Vec<&ParquetShard> = shards
        .iter()
        .filter(|shard| shard.config == config)
        .collect();
    selected.sort_by(|a, b| a.path.cmp(&b.path));

    let mut grouped: Vec<SplitShards> = Vec::new();
    for shard in selected {
        match grouped.iter_mut().find(|group| group.split == shard.split) {
            Some(group) => group.paths.push(shard.path.clone()),
            None => grouped.push(SplitShards {
                split: shard.split.clone(),
                paths: vec![shard.path.clone()],
            }),
        }
    }
    grouped
}

fn normalize_split_dir(name: &str) -> &str {
    name.strip_prefix("partial-").unwrap_or(name)
}

fn split_from_legacy_name(file_name: &str) -> Option<String> {
    let stem = Path::new(file_name).file_stem()?.to_str()?;
    stem.split('-')
        .rev()
        .find(|token| {
            !token.is_empty() && *token != "of" && !token.chars().all(|c| c.is_ascii_digit())
        })
        .filter(|token| *token != stem)
        .map(str::to_string)
}

/// Row count from the parquet footer.
#[cfg(feature = "parquet-rows")]
pub fn count_rows(path: &Path) -> Result<u64, crate::error::HubsetsError> {
    use ::parquet::file::reader::{FileReader, SerializedFileReader};

    let file = std::fs::File::open(path)?;
    let reader =
        SerializedFileReader::new(file).map_err(|source| crate::error::HubsetsError::LoadError {
            dataset_id: path.display().to_string(),
            message: format!("failed reading parquet footer: {source}"),
        })?;
    Ok(reader.metadata().file_metadata().num_rows().max(0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shards(paths: &[&str]) -> Vec<ParquetShard> {
        paths.iter().filter_map(|path| parse_shard_path(path)).collect()
    }

    #[test]
    fn parses_current_layout() {
        let shard = parse_shard_path("plain_text/train/0000.parquet").expect("shard");
        assert_eq!(shard.config, "plain_text");
        assert_eq!(shard.split, "train");
    }

    #[test]
    fn strips_partial_prefix() {
        let shard = parse_shard_path("default/partial-train/0003.parquet").expect("shard");
        assert_eq!(shard.split, "train");
    }

    #[test]
    fn parses_legacy_layout() {
        let shard = parse_shard_path("plain_text/imdb-unsupervised.parquet").expect("shard");
        assert_eq!(shard.split, "unsupervised");

        let sharded =
            parse_shard_path("plain_text/imdb-train-00001-of-00002.parquet").expect("shard");
        assert_eq!(sharded.split, "train");
    }

    #[test]
    fn ignores_non_parquet_and_root_files() {
        assert!(parse_shard_path(".gitattributes").is_none());
        assert!(parse_shard_path("README.md").is_none());
        assert!(parse_shard_path("root.parquet").is_none());
        assert!(parse_shard_path("cfg/nosplit.parquet").is_none());
    }

    #[test]
    fn config_selection_order() {
        let single = shards(&["only/train/0000.parquet"]);
        assert_eq!(select_config(&single, None).as_deref(), Some("only"));

        let with_default = shards(&["zz/train/0000.parquet", "default/train/0000.parquet"]);
        assert_eq!(select_config(&with_default, None).as_deref(), Some("default"));

        let sorted = shards(&["zz/train/0000.parquet", "aa/train/0000.parquet"]);
        assert_eq!(select_config(&sorted, None).as_deref(), Some("aa"));

        assert_eq!(select_config(&sorted, Some("zz")).as_deref(), Some("zz"));
        assert_eq!(select_config(&sorted, Some("missing")), None);
        assert_eq!(select_config(&[], None), None);
    }

    #[test]
    fn groups_shards_by_split() {
        let all = shards(&[
            "en/train/0001.parquet",
            "en/test/0000.parquet",
            "en/train/0000.parquet",
            "fr/train/0000.parquet",
        ]);

        let grouped = shards_for_config(&all, "en");
        assert_eq!(
            grouped,
            vec![
                SplitShards {
                    split: "test".to_string(),
                    paths: vec!["en/test/0000.parquet".to_string()],
                },
                SplitShards {
                    split: "train".to_string(),
                    paths: vec![
                        "en/train/0000.parquet".to_string(),
                        "en/train/0001.parquet".to_string()
                    ],
                },
            ]
        );
    }
}
