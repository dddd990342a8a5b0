use std::fmt;

use crate::display::{extension_label, format_number, truncate_chars};
use crate::files::group_by_extension;
use crate::hub::DatasetDetail;

const CITATION_CHARS: usize = 200;
const FILES_PER_GROUP: usize = 10;

/// Everything `info` shows about one dataset.
#[derive(Clone, Debug)]
pub struct InfoReport {
    pub dataset_id: String,
    pub detail: Result<DatasetDetail, String>,
    pub configs: Result<Vec<String>, String>,
    pub files: Result<Vec<String>, String>,
    /// Hub base URL used for the browser links.
    pub endpoint: String,
}

impl InfoReport {
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// True when the metadata record could be fetched.
    pub fn found(&self) -> bool {
        self.detail.is_ok()
    }

    fn repo_url(&self) -> String {
        format!("{}/datasets/{}", self.endpoint, self.dataset_id)
    }
}

impl fmt::Display for InfoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_detail(f)?;
        self.fmt_configs(f)?;
        self.fmt_files(f)?;

        writeln!(f)?;
        writeln!(f, "Download this dataset with:")?;
        writeln!(f, "  hubsets download {}", self.dataset_id)?;
        writeln!(f, "  hubsets download {} --force-direct", self.dataset_id)?;
        writeln!(f)?;
        writeln!(f, "View in browser: {}", self.repo_url())?;
        Ok(())
    }
}

impl InfoReport {
    fn fmt_detail(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = match &self.detail {
            Ok(detail) => detail,
            Err(message) => {
                writeln!(f, "Dataset: {}", self.dataset_id)?;
                return writeln!(f, "Could not fetch metadata: {}", message);
            }
        };

        writeln!(f, "Dataset: {}", d.id)?;
        if let Some(author) = d.author.as_deref().filter(|a| !a.is_empty()) {
            writeln!(f, "Author: {}", author)?;
        }
        writeln!(f, "Downloads: {}", format_number(d.downloads))?;

        if let Some(citation) = d.citation.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            writeln!(f, "Citation: {}", truncate_chars(citation, CITATION_CHARS))?;
        }
        if !d.tags.is_empty() {
            writeln!(f, "Tags: {}", d.tags.join(", "))?;
        }
        if let Some(description) = d
            .description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
        {
            writeln!(f)?;
            writeln!(f, "Description:")?;
            writeln!(f, "{}", description)?;
        }
        Ok(())
    }

    fn fmt_configs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.configs {
            Ok(configs) if configs.is_empty() => Ok(()),
            Ok(configs) => {
                writeln!(f)?;
                writeln!(f, "Configurations:")?;
                for (i, config) in configs.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, config)?;
                }
                Ok(())
            }
            Err(message) => {
                writeln!(f)?;
                writeln!(f, "Could not list configurations: {}", message)
            }
        }
    }

    fn fmt_files(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files = match &self.files {
            Ok(files) => files,
            Err(message) => {
                writeln!(f)?;
                return writeln!(f, "Could not list files: {}", message);
            }
        };

        writeln!(f)?;
        if files.is_empty() {
            return writeln!(f, "No files found in the repository.");
        }

        writeln!(f, "Files ({}):", format_number(files.len() as u64))?;
        for group in group_by_extension(files) {
            writeln!(f)?;
            writeln!(
                f,
                "  {} ({} files):",
                extension_label(&group.extension, "other files"),
                group.files.len()
            )?;
            for (i, file) in group.files.iter().take(FILES_PER_GROUP).enumerate() {
                writeln!(f, "    {}. {}", i + 1, file)?;
            }
            if group.files.len() > FILES_PER_GROUP {
                writeln!(f, "    ... {} files in total", group.files.len())?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Full file list: {}/tree/main", self.repo_url())
    }
}
