use std::path::{Path, PathBuf};
use std::time::Duration;

use hf_hub::api::sync::{Api, ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};
use serde::de::DeserializeOwned;

use crate::error::HubsetsError;

use super::parquet_export::{parse_shard_path, select_config, shards_for_config, ParquetShard};
use super::viewer::{extract_config_names, extract_info, fetch_viewer_json, ViewerInfo};
use super::{DatasetDetail, DatasetSummary, Registry, SplitData, StructuredDataset};

pub const DEFAULT_ENDPOINT: &str = "https://huggingface.co";
pub const DEFAULT_VIEWER_ENDPOINT: &str = "https://datasets-server.huggingface.co";

/// Largest JSON body accepted from the Hub API.
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Connection settings for [`HubClient`].
#[derive(Clone, Debug)]
pub struct HubConfig {
    /// Base URL of the Hub (REST API and file resolution).
    pub endpoint: String,
    /// Base URL of the dataset viewer API.
    pub viewer_endpoint: String,
    /// Access token for gated or private datasets.
    pub token: Option<String>,
    /// Global per-request timeout.
    pub timeout: Duration,
    /// Results requested per search page.
    pub search_page_size: usize,
    /// Stop following search pages after this many results.
    pub max_search_results: usize,
    /// hf-hub cache directory; `None` uses `HF_HOME` or the default cache.
    pub cache_dir: Option<PathBuf>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            viewer_endpoint: DEFAULT_VIEWER_ENDPOINT.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            search_page_size: 1000,
            max_search_results: 10_000,
            cache_dir: None,
        }
    }
}

/// [`Registry`] backed by the Hugging Face Hub.
///
/// REST and viewer calls go through a shared `ureq` agent; repository
/// listings and file downloads go through the `hf-hub` sync API so they share
/// its on-disk cache.
pub struct HubClient {
    config: HubConfig,
    agent: ureq::Agent,
    api: Api,
}

impl HubClient {
    pub fn new(config: HubConfig) -> Result<Self, HubsetsError> {
        for endpoint in [&config.endpoint, &config.viewer_endpoint] {
            url::Url::parse(endpoint).map_err(|source| {
                HubsetsError::ConfigError(format!("invalid endpoint '{endpoint}': {source}"))
            })?;
        }

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();

        let mut builder = ApiBuilder::new()
            .with_progress(false)
            .with_endpoint(config.endpoint.trim_end_matches('/').to_string());
        if config.token.is_some() {
            builder = builder.with_token(config.token.clone());
        }
        if let Some(cache_dir) = config.cache_dir.as_ref() {
            builder = builder.with_cache_dir(cache_dir.clone());
        }
        let api = builder
            .build()
            .map_err(|source| HubsetsError::ConfigError(source.to_string()))?;

        Ok(Self { config, agent, api })
    }

    fn dataset_repo(&self, dataset_id: &str) -> ApiRepo {
        self.api.dataset(dataset_id.to_string())
    }

    fn api_url(&self, path: &str) -> Result<url::Url, HubsetsError> {
        let raw = format!("{}/api/{}", self.config.endpoint.trim_end_matches('/'), path);
        url::Url::parse(&raw).map_err(|source| HubsetsError::ConfigError(format!("{raw}: {source}")))
    }

    /// GET a JSON document; also returns the `Link` header for pagination.
    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        target: &str,
    ) -> Result<(T, Option<String>), HubsetsError> {
        let api_error = |message: String| HubsetsError::HubApiError {
            target: target.to_string(),
            message,
        };

        log::debug!("GET {url}");
        let mut request = self.agent.get(url);
        if let Some(token) = self.config.token.as_deref() {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }

        let mut response = request.call().map_err(|source| api_error(source.to_string()))?;
        let link = response
            .headers()
            .get("link")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let text = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()
            .map_err(|source| api_error(source.to_string()))?;
        let body = serde_json::from_str::<T>(&text)
            .map_err(|source| api_error(format!("unexpected response: {source}")))?;

        Ok((body, link))
    }

    fn viewer_json(
        &self,
        endpoint: &str,
        dataset_id: &str,
        config: Option<&str>,
    ) -> Result<serde_json::Value, HubsetsError> {
        fetch_viewer_json(
            &self.agent,
            &self.config.viewer_endpoint,
            endpoint,
            dataset_id,
            config,
            self.config.token.as_deref(),
        )
        .map_err(|message| HubsetsError::ViewerError {
            dataset_id: dataset_id.to_string(),
            message,
        })
    }
}

impl Registry for HubClient {
    fn search(&self, keyword: &str) -> Result<Vec<DatasetSummary>, HubsetsError> {
        let mut url = self.api_url("datasets")?;
        url.query_pairs_mut()
            .append_pair("search", keyword)
            .append_pair("limit", &self.config.search_page_size.to_string());

        let mut results: Vec<DatasetSummary> = Vec::new();
        let mut next = Some(url.to_string());
        while let Some(page_url) = next.take() {
            let (page, link) = self.get_json::<Vec<DatasetSummary>>(&page_url, keyword)?;
            log::debug!("search page returned {} datasets", page.len());
            if page.is_empty() {
                break;
            }
            results.extend(page);
            if results.len() >= self.config.max_search_results {
                log::info!(
                    "stopping search after {} results",
                    self.config.max_search_results
                );
                results.truncate(self.config.max_search_results);
                break;
            }
            next = link.as_deref().and_then(next_page_url);
        }

        Ok(results)
    }

    fn dataset_info(&self, dataset_id: &str) -> Result<DatasetDetail, HubsetsError> {
        let url = self.api_url(&format!("datasets/{dataset_id}"))?;
        let (detail, _) = self.get_json::<DatasetDetail>(url.as_str(), dataset_id)?;
        Ok(detail)
    }

    fn config_names(&self, dataset_id: &str) -> Result<Vec<String>, HubsetsError> {
        let splits_json = self.viewer_json("splits", dataset_id, None)?;
        Ok(extract_config_names(&splits_json))
    }

    fn list_files(&self, dataset_id: &str) -> Result<Vec<String>, HubsetsError> {
        let repo_info =
            self.dataset_repo(dataset_id)
                .info()
                .map_err(|source| HubsetsError::HubApiError {
                    target: dataset_id.to_string(),
                    message: source.to_string(),
                })?;

        Ok(repo_info
            .siblings
            .into_iter()
            .map(|sibling| sibling.rfilename)
            .collect())
    }

    fn fetch_file(
        &self,
        dataset_id: &str,
        remote_path: &str,
        target: &Path,
    ) -> Result<(), HubsetsError> {
        let cached = self
            .dataset_repo(dataset_id)
            .download(remote_path)
            .map_err(|source| HubsetsError::DownloadError {
                dataset_id: dataset_id.to_string(),
                path: remote_path.to_string(),
                message: source.to_string(),
            })?;
        place_cached(&cached, target)
    }

    fn load_structured(
        &self,
        dataset_id: &str,
        config: Option<&str>,
        dest_dir: &Path,
    ) -> Result<StructuredDataset, HubsetsError> {
        let load_error = |message: String| HubsetsError::LoadError {
            dataset_id: dataset_id.to_string(),
            message,
        };

        let export_repo = self.api.repo(Repo::with_revision(
            dataset_id.to_string(),
            RepoType::Dataset,
            super::parquet_export::PARQUET_REVISION.to_string(),
        ));
        let export_info = export_repo
            .info()
            .map_err(|source| load_error(format!("no parquet export available: {source}")))?;

        let shards: Vec<ParquetShard> = export_info
            .siblings
            .iter()
            .filter_map(|sibling| parse_shard_path(&sibling.rfilename))
            .collect();

        let export_config = select_config(&shards, config).ok_or_else(|| {
            load_error(match config {
                Some(name) => format!("config '{name}' is not part of the parquet export"),
                None => "parquet export contains no shards".to_string(),
            })
        })?;
        log::info!("loading parquet export config '{export_config}'");

        let viewer_info = match self.viewer_json("info", dataset_id, Some(&export_config)) {
            Ok(info_json) => extract_info(&info_json, Some(&export_config)),
            Err(err) => {
                log::warn!("continuing without schema: {err}");
                ViewerInfo::default()
            }
        };

        let mut splits = Vec::new();
        for group in shards_for_config(&shards, &export_config) {
            let mut files = Vec::with_capacity(group.paths.len());
            for remote_path in &group.paths {
                let cached = export_repo.download(remote_path).map_err(|source| {
                    load_error(format!("failed downloading '{remote_path}': {source}"))
                })?;
                let target = dest_dir.join(remote_path);
                place_cached(&cached, &target)?;
                files.push(target);
            }

            let num_examples = viewer_info.num_examples(&group.split);
            #[cfg(feature = "parquet-rows")]
            let num_examples = num_examples.or_else(|| {
                files
                    .iter()
                    .map(|file| super::parquet_export::count_rows(file).ok())
                    .sum::<Option<u64>>()
            });

            splits.push(SplitData {
                name: group.split,
                num_examples,
                files,
            });
        }

        Ok(StructuredDataset {
            config: config.map(str::to_string),
            splits,
            features: viewer_info.features,
            local_dir: dest_dir.to_path_buf(),
        })
    }
}

/// Place a cached blob at its mirrored location, creating parent
/// directories. The blob is hard-linked so it is stored once; a copy is made
/// when linking fails (for example across filesystems).
fn place_cached(cached: &Path, target: &Path) -> Result<(), HubsetsError> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // hf-hub snapshots are symlinks into the blob store; link the blob itself.
    let blob = std::fs::canonicalize(cached)?;
    if target.symlink_metadata().is_ok() {
        std::fs::remove_file(target)?;
    }

    if let Err(err) = std::fs::hard_link(&blob, target) {
        log::debug!("hard link to {} failed, copying: {err}", target.display());
        std::fs::copy(&blob, target)?;
    }
    Ok(())
}

/// Extract the `rel="next"` target from an HTTP `Link` header.
pub fn next_page_url(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_link_is_found() {
        let header = "<https://huggingface.co/api/datasets?search=nlp&cursor=abc>; rel=\"next\"";
        assert_eq!(
            next_page_url(header).as_deref(),
            Some("https://huggingface.co/api/datasets?search=nlp&cursor=abc")
        );
    }

    #[test]
    fn next_link_among_other_relations() {
        let header = "<https://a.test/prev>; rel=\"prev\", <https://a.test/next>; rel=\"next\"";
        assert_eq!(next_page_url(header).as_deref(), Some("https://a.test/next"));
    }

    #[test]
    fn missing_next_link() {
        assert_eq!(next_page_url("<https://a.test/prev>; rel=\"prev\""), None);
        assert_eq!(next_page_url(""), None);
    }

    #[test]
    fn invalid_endpoint_is_config_error() {
        let config = HubConfig {
            endpoint: "not a url".to_string(),
            ..HubConfig::default()
        };
        match HubClient::new(config) {
            Err(HubsetsError::ConfigError(message)) => assert!(message.contains("not a url")),
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected config error"),
        }
    }

    #[test]
    fn placement_creates_parents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("blob");
        std::fs::write(&source, b"abc").expect("write");

        let target = dir.path().join("mirror/data/train.csv");
        place_cached(&source, &target).expect("copy");
        assert_eq!(std::fs::read(&target).expect("read"), b"abc");
    }

    #[cfg(unix)]
    #[test]
    fn placement_links_the_cached_blob() {
        use std::os::unix::fs::MetadataExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let blob = dir.path().join("blobs/abc123");
        std::fs::create_dir_all(blob.parent().expect("parent")).expect("mkdir");
        std::fs::write(&blob, b"payload").expect("write");
        let snapshot = dir.path().join("snapshot.csv");
        std::os::unix::fs::symlink(&blob, &snapshot).expect("symlink");

        let target = dir.path().join("out/data.csv");
        place_cached(&snapshot, &target).expect("first placement");
        place_cached(&snapshot, &target).expect("replaces existing file");

        let blob_meta = std::fs::metadata(&blob).expect("blob metadata");
        let target_meta = std::fs::symlink_metadata(&target).expect("target metadata");
        assert!(target_meta.file_type().is_file());
        assert_eq!(target_meta.ino(), blob_meta.ino());
        assert_eq!(blob_meta.nlink(), 2);
        assert_eq!(std::fs::read(&target).expect("read"), b"payload");
    }
}
