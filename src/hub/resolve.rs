use crate::error::HubsetsError;

/// Parse a user-supplied dataset reference (repo ID or dataset URL) into a
/// canonical `<namespace>/<dataset>` repo id.
///
/// Legacy canonical datasets without a namespace (e.g. `squad`) are accepted
/// as-is.
pub fn parse_dataset_input(input: &str) -> Result<String, HubsetsError> {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        parse_repo_id_from_url(trimmed)
    } else {
        validate_repo_id(trimmed)
    }
}

/// Local directory name for a dataset: `/` is not allowed in a single path
/// component, so `org/name` becomes `org_name`.
pub fn local_dir_name(dataset_id: &str) -> String {
    dataset_id.replace('/', "_")
}

fn parse_repo_id_from_url(input: &str) -> Result<String, HubsetsError> {
    let url = url::Url::parse(input).map_err(|source| HubsetsError::ResolveError {
        input: input.to_string(),
        message: format!("invalid URL: {source}"),
    })?;

    let host = url
        .host_str()
        .ok_or_else(|| HubsetsError::ResolveError {
            input: input.to_string(),
            message: "URL is missing a host".to_string(),
        })?
        .to_ascii_lowercase();

    if host != "huggingface.co" && host != "hf.co" {
        return Err(HubsetsError::ResolveError {
            input: input.to_string(),
            message: format!("expected host 'huggingface.co', found '{}'", host),
        });
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|iter| iter.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if segments.len() < 2 || segments[0] != "datasets" {
        return Err(HubsetsError::ResolveError {
            input: input.to_string(),
            message:
                "expected dataset URL like https://huggingface.co/datasets/<namespace>/<dataset>"
                    .to_string(),
        });
    }

    match segments.get(2) {
        Some(dataset) => validate_repo_id(&format!("{}/{}", segments[1], dataset)),
        // Canonical datasets live at /datasets/<name>.
        None => validate_repo_id(segments[1]),
    }
}

fn validate_repo_id(repo_id: &str) -> Result<String, HubsetsError> {
    let trimmed = repo_id.trim();
    let parts: Vec<&str> = trimmed.split('/').collect();

    let well_formed = match parts.as_slice() {
        [name] => !name.is_empty(),
        [namespace, dataset] => !namespace.is_empty() && !dataset.is_empty(),
        _ => false,
    };

    if !well_formed || trimmed.chars().any(char::is_whitespace) {
        return Err(HubsetsError::ResolveError {
            input: repo_id.to_string(),
            message: "expected repo id in '<namespace>/<dataset>' form".to_string(),
        });
    }

    Ok(trimmed.to_string())
}
