//! Dataset viewer (datasets-server) helpers.

use serde_json::Value;

/// Schema and split sizes reported by the viewer `/info` endpoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewerInfo {
    pub features: Option<Value>,
    pub split_sizes: Vec<(String, Option<u64>)>,
}

impl ViewerInfo {
    pub fn num_examples(&self, split: &str) -> Option<u64> {
        self.split_sizes
            .iter()
            .find(|(name, _)| name == split)
            .and_then(|(_, count)| *count)
    }
}

/// GET `<base>/<endpoint>?dataset=..[&config=..]` and decode the JSON body.
pub fn fetch_viewer_json(
    agent: &ureq::Agent,
    base: &str,
    endpoint: &str,
    dataset_id: &str,
    config: Option<&str>,
    token: Option<&str>,
) -> Result<Value, String> {
    let mut url = url::Url::parse(&format!("{}/{}", base.trim_end_matches('/'), endpoint))
        .map_err(|source| source.to_string())?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("dataset", dataset_id);
        if let Some(config) = config {
            query.append_pair("config", config);
        }
    }

    log::debug!("GET {url}");
    let mut request = agent.get(url.as_str());
    if let Some(token) = token {
        request = request.header("Authorization", &format!("Bearer {token}"));
    }

    let mut response = request.call().map_err(|source| source.to_string())?;
    response
        .body_mut()
        .read_json::<Value>()
        .map_err(|source| source.to_string())
}

/// Configuration names from a `/splits` response, in response order with
/// duplicates removed.
pub fn extract_config_names(splits_json: &Value) -> Vec<String> {
    let mut configs: Vec<String> = Vec::new();
    if let Some(items) = splits_json.get("splits").and_then(Value::as_array) {
        for item in items {
            if let Some(config) = item.get("config").and_then(Value::as_str) {
                if !configs.iter().any(|seen| seen == config) {
                    configs.push(config.to_string());
                }
            }
        }
    }
    configs
}

/// Pull features and split sizes out of an `/info` response.
///
/// With a `config` query the viewer answers with a single `dataset_info`
/// record; without one it answers with a map keyed by configuration name, in
/// which case `config` (or the first entry in response order) is picked.
pub fn extract_info(info_json: &Value, config: Option<&str>) -> ViewerInfo {
    let Some(dataset_info) = info_json.get("dataset_info") else {
        return ViewerInfo::default();
    };

    let record = if is_info_record(dataset_info) {
        dataset_info
    } else {
        let Some(by_config) = dataset_info.as_object() else {
            return ViewerInfo::default();
        };
        let picked = match config {
            Some(name) => by_config.get(name),
            None => by_config.values().next(),
        };
        match picked {
            Some(record) => record,
            None => return ViewerInfo::default(),
        }
    };

    let split_sizes = record
        .get("splits")
        .and_then(Value::as_object)
        .map(|splits| {
            splits
                .iter()
                .map(|(name, split)| {
                    (
                        name.clone(),
                        split.get("num_examples").and_then(Value::as_u64),
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    ViewerInfo {
        features: record.get("features").cloned(),
        split_sizes,
    }
}

fn is_info_record(value: &Value) -> bool {
    value.get("features").is_some() || value.get("splits").is_some()
}
