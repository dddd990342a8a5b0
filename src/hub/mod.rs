//! Hugging Face Hub access.
//!
//! This module owns remote-specific concerns (reference resolution, REST and
//! viewer calls, parquet export selection). The search, info and download
//! flows only see the [`Registry`] trait, so they run the same against the
//! live Hub and an in-memory registry.

pub mod client;
pub mod features;
pub mod parquet_export;
pub mod resolve;
pub mod viewer;

pub use client::{HubClient, HubConfig};

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::HubsetsError;

/// One search hit as returned by the registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DatasetSummary {
    pub id: String,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Metadata record of a single dataset repository.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DatasetDetail {
    pub id: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub citation: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A dataset fetched and split by the structured load path.
#[derive(Clone, Debug, Default)]
pub struct StructuredDataset {
    /// Configuration the shards belong to, if the dataset has any.
    pub config: Option<String>,
    /// Splits in export order.
    pub splits: Vec<SplitData>,
    /// Feature schema as reported by the dataset viewer.
    pub features: Option<Value>,
    /// Directory the shards were written to.
    pub local_dir: PathBuf,
}

impl StructuredDataset {
    pub fn split_names(&self) -> Vec<String> {
        self.splits.iter().map(|split| split.name.clone()).collect()
    }
}

/// One split of a structured load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitData {
    pub name: String,
    pub num_examples: Option<u64>,
    pub files: Vec<PathBuf>,
}

/// Read API of a dataset registry.
pub trait Registry {
    /// Search datasets by keyword. Results come back in registry order.
    fn search(&self, keyword: &str) -> Result<Vec<DatasetSummary>, HubsetsError>;

    /// Fetch the metadata record of one dataset.
    fn dataset_info(&self, dataset_id: &str) -> Result<DatasetDetail, HubsetsError>;

    /// Configuration names in registry order.
    fn config_names(&self, dataset_id: &str) -> Result<Vec<String>, HubsetsError>;

    /// Repository-relative paths of every file in the dataset repo.
    fn list_files(&self, dataset_id: &str) -> Result<Vec<String>, HubsetsError>;

    /// Fetch one repository file verbatim into `target`.
    fn fetch_file(
        &self,
        dataset_id: &str,
        remote_path: &str,
        target: &Path,
    ) -> Result<(), HubsetsError>;

    /// Fetch the dataset as named splits into `dest_dir`.
    fn load_structured(
        &self,
        dataset_id: &str,
        config: Option<&str>,
        dest_dir: &Path,
    ) -> Result<StructuredDataset, HubsetsError>;
}
