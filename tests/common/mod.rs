#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use hubsets::hub::{DatasetDetail, DatasetSummary, Registry, SplitData, StructuredDataset};
use hubsets::prompt::LinePrompter;
use hubsets::HubsetsError;

/// In-memory registry. Datasets missing from `configs` or `files` fail the
/// corresponding call; every call is recorded in `calls`.
#[derive(Default)]
pub struct MockRegistry {
    pub summaries: Vec<DatasetSummary>,
    pub search_error: Option<String>,
    pub details: BTreeMap<String, DatasetDetail>,
    pub configs: BTreeMap<String, Vec<String>>,
    pub files: BTreeMap<String, Vec<String>>,
    pub failing_files: BTreeSet<String>,
    pub structured_error: Option<String>,
    pub calls: RefCell<Vec<String>>,
}

impl MockRegistry {
    pub fn with_files(mut self, dataset_id: &str, files: &[&str]) -> Self {
        self.files.insert(
            dataset_id.to_string(),
            files.iter().map(|f| f.to_string()).collect(),
        );
        self
    }

    pub fn with_configs(mut self, dataset_id: &str, configs: &[&str]) -> Self {
        self.configs.insert(
            dataset_id.to_string(),
            configs.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn failing(mut self, path: &str) -> Self {
        self.failing_files.insert(path.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, prefix: &str) -> bool {
        self.calls.borrow().iter().any(|call| call.starts_with(prefix))
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn api_error(target: &str, message: &str) -> HubsetsError {
        HubsetsError::HubApiError {
            target: target.to_string(),
            message: message.to_string(),
        }
    }
}

impl Registry for MockRegistry {
    fn search(&self, keyword: &str) -> Result<Vec<DatasetSummary>, HubsetsError> {
        self.record(format!("search:{keyword}"));
        match &self.search_error {
            Some(message) => Err(Self::api_error(keyword, message)),
            None => Ok(self.summaries.clone()),
        }
    }

    fn dataset_info(&self, dataset_id: &str) -> Result<DatasetDetail, HubsetsError> {
        self.record(format!("info:{dataset_id}"));
        self.details
            .get(dataset_id)
            .cloned()
            .ok_or_else(|| Self::api_error(dataset_id, "404 Not Found"))
    }

    fn config_names(&self, dataset_id: &str) -> Result<Vec<String>, HubsetsError> {
        self.record(format!("configs:{dataset_id}"));
        self.configs
            .get(dataset_id)
            .cloned()
            .ok_or_else(|| HubsetsError::ViewerError {
                dataset_id: dataset_id.to_string(),
                message: "viewer unavailable".to_string(),
            })
    }

    fn list_files(&self, dataset_id: &str) -> Result<Vec<String>, HubsetsError> {
        self.record(format!("files:{dataset_id}"));
        self.files
            .get(dataset_id)
            .cloned()
            .ok_or_else(|| Self::api_error(dataset_id, "repository not found"))
    }

    fn fetch_file(
        &self,
        dataset_id: &str,
        remote_path: &str,
        target: &Path,
    ) -> Result<(), HubsetsError> {
        self.record(format!("fetch:{remote_path}"));
        if self.failing_files.contains(remote_path) {
            return Err(HubsetsError::DownloadError {
                dataset_id: dataset_id.to_string(),
                path: remote_path.to_string(),
                message: "connection reset".to_string(),
            });
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, format!("{dataset_id}:{remote_path}"))?;
        Ok(())
    }

    fn load_structured(
        &self,
        dataset_id: &str,
        config: Option<&str>,
        dest_dir: &Path,
    ) -> Result<StructuredDataset, HubsetsError> {
        self.record(format!("load:{dataset_id}:{}", config.unwrap_or("-")));
        if let Some(message) = &self.structured_error {
            return Err(HubsetsError::LoadError {
                dataset_id: dataset_id.to_string(),
                message: message.clone(),
            });
        }

        let export_config = config.unwrap_or("default");
        let mut splits = Vec::new();
        for (name, rows) in [("train", 10), ("test", 5)] {
            let file = dest_dir.join(export_config).join(name).join("0000.parquet");
            fs::create_dir_all(file.parent().expect("parent"))?;
            fs::write(&file, b"PAR1")?;
            splits.push(SplitData {
                name: name.to_string(),
                num_examples: Some(rows),
                files: vec![file],
            });
        }

        Ok(StructuredDataset {
            config: config.map(str::to_string),
            splits,
            features: Some(serde_json::json!({
                "text": {"dtype": "string", "_type": "Value"},
                "label": {"names": ["neg", "pos"], "_type": "ClassLabel"}
            })),
            local_dir: dest_dir.to_path_buf(),
        })
    }
}

pub fn summary(id: &str, downloads: u64) -> DatasetSummary {
    DatasetSummary {
        id: id.to_string(),
        downloads,
        ..DatasetSummary::default()
    }
}

/// Prompter fed from a fixed script; an empty script behaves like a closed stdin.
pub fn scripted(input: &str) -> LinePrompter<&[u8], Vec<u8>> {
    LinePrompter::new(input.as_bytes(), Vec::new())
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read json")).expect("parse json")
}

pub fn output_root() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let root = dir.path().join("datasets");
    (dir, root)
}
