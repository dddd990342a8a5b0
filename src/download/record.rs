use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HubsetsError;
use crate::hub::features::render_features;
use crate::hub::StructuredDataset;

/// Sidecar written next to a structured download.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalDownloadRecord {
    pub dataset_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    pub splits: Vec<String>,
    /// Feature schema as text; empty when the schema was unavailable.
    pub features: String,
}

impl LocalDownloadRecord {
    pub fn from_dataset(dataset_id: &str, dataset: &StructuredDataset) -> Self {
        Self {
            dataset_id: dataset_id.to_string(),
            config: dataset.config.clone(),
            splits: dataset.split_names(),
            features: dataset
                .features
                .as_ref()
                .map(render_features)
                .unwrap_or_default(),
        }
    }

    /// `<config>_info.json`, or `dataset_info.json` without a config.
    pub fn file_name(&self) -> String {
        match self.config.as_deref() {
            Some(config) => format!("{}_info.json", config.replace(['/', '\\'], "_")),
            None => "dataset_info.json".to_string(),
        }
    }

    /// Write the record into `dir`, returning the file path.
    pub fn write(&self, dir: &Path) -> Result<PathBuf, HubsetsError> {
        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(self).map_err(|source| {
            HubsetsError::RecordWrite {
                path: path.clone(),
                source,
            }
        })?;
        std::fs::write(&path, json + "\n")?;
        Ok(path)
    }
}
