use std::fmt;
use std::path::{Path, PathBuf};

use crate::display::format_number;
use crate::hub::StructuredDataset;

/// How many failed paths the summary lists before collapsing to a count.
const MAX_LISTED_FAILURES: usize = 10;

/// Outcome of one `download` invocation.
#[derive(Clone, Debug)]
pub struct DownloadReport {
    pub dataset_id: String,
    pub local_dir: PathBuf,
    /// `None` when the structured path was skipped.
    pub structured: Option<StructuredAttempt>,
    /// `None` when the raw file path was never taken.
    pub direct: Option<DirectAttempt>,
    /// The user refused the raw-file fallback.
    pub fallback_declined: bool,
    /// Set when the download could not start at all.
    pub error: Option<String>,
}

#[derive(Clone, Debug)]
pub enum StructuredAttempt {
    Loaded(StructuredLoad),
    Failed(String),
}

/// A successful structured load.
#[derive(Clone, Debug)]
pub struct StructuredLoad {
    pub dataset: StructuredDataset,
    /// Configurations discovered when none was requested.
    pub available_configs: Vec<String>,
    pub record_path: PathBuf,
}

#[derive(Clone, Debug)]
pub enum DirectAttempt {
    Completed(DirectDownloadReport),
    ListingFailed(String),
    NoFiles,
    Cancelled { file_count: usize },
}

/// Tally of a raw file download.
#[derive(Clone, Debug)]
pub struct DirectDownloadReport {
    pub local_dir: PathBuf,
    pub total: usize,
    pub success_count: usize,
    pub failures: Vec<FileFailure>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileFailure {
    pub path: String,
    pub message: String,
}

impl DownloadReport {
    pub(crate) fn new(dataset_id: &str, local_dir: &Path) -> Self {
        Self {
            dataset_id: dataset_id.to_string(),
            local_dir: local_dir.to_path_buf(),
            structured: None,
            direct: None,
            fallback_declined: false,
            error: None,
        }
    }

    /// True when the dataset (or at least one raw file) ended up on disk.
    pub fn succeeded(&self) -> bool {
        matches!(self.structured, Some(StructuredAttempt::Loaded(_)))
            || matches!(&self.direct, Some(DirectAttempt::Completed(direct)) if direct.succeeded())
    }

    pub fn direct_report(&self) -> Option<&DirectDownloadReport> {
        match &self.direct {
            Some(DirectAttempt::Completed(direct)) => Some(direct),
            _ => None,
        }
    }
}

impl DirectDownloadReport {
    pub fn error_files(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.path.as_str()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.success_count == self.total
    }

    pub fn succeeded(&self) -> bool {
        self.success_count > 0
    }
}

impl fmt::Display for DownloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            return writeln!(f, "Download of '{}' failed: {}", self.dataset_id, error);
        }

        match &self.structured {
            Some(StructuredAttempt::Loaded(loaded)) => write!(f, "{}", loaded)?,
            Some(StructuredAttempt::Failed(message)) => {
                writeln!(f, "Structured loading failed: {}", message)?;
                writeln!(f, "The dataset may not use a standard layout.")?;
            }
            None => {}
        }

        if self.fallback_declined {
            writeln!(f, "Download cancelled.")?;
            writeln!(f)?;
            writeln!(f, "Tip: fetch the raw repository files with:")?;
            writeln!(f, "  hubsets download {} --force-direct", self.dataset_id)?;
            writeln!(f, "or look at the dataset first:")?;
            writeln!(f, "  hubsets info {}", self.dataset_id)?;
        }

        match &self.direct {
            Some(DirectAttempt::Completed(direct)) => write!(f, "{}", direct)?,
            Some(DirectAttempt::ListingFailed(message)) => {
                writeln!(f, "Could not list repository files: {}", message)?
            }
            Some(DirectAttempt::NoFiles) => writeln!(f, "No files found in the repository.")?,
            Some(DirectAttempt::Cancelled { file_count }) => writeln!(
                f,
                "Download of {} files cancelled.",
                format_number(*file_count as u64)
            )?,
            None => {}
        }

        Ok(())
    }
}

impl fmt::Display for StructuredLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.dataset;

        if !self.available_configs.is_empty() {
            writeln!(f, "Available configurations:")?;
            for (i, config) in self.available_configs.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, config)?;
            }
            if let Some(config) = d.config.as_deref() {
                writeln!(f, "Selected the first configuration: {}", config)?;
            }
            writeln!(f)?;
        } else if let Some(config) = d.config.as_deref() {
            writeln!(f, "Configuration: {}", config)?;
        }

        writeln!(f, "Splits:")?;
        if d.splits.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for split in &d.splits {
            match split.num_examples {
                Some(n) => writeln!(f, "  {}: {} examples", split.name, format_number(n))?,
                None => writeln!(
                    f,
                    "  {}: {} file(s), size unknown",
                    split.name,
                    split.files.len()
                )?,
            }
        }

        writeln!(f, "Metadata written to: {}", self.record_path.display())?;
        writeln!(f, "Dataset saved to: {}", d.local_dir.display())
    }
}

impl fmt::Display for DirectDownloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_complete() {
            return writeln!(
                f,
                "Downloaded all {} files to: {}",
                format_number(self.total as u64),
                self.local_dir.display()
            );
        }

        writeln!(
            f,
            "Downloaded {}/{} files, {} failed",
            self.success_count,
            self.total,
            self.failures.len()
        )?;

        if !self.failures.is_empty() {
            writeln!(f, "Failed files:")?;
            for (i, failure) in self.failures.iter().take(MAX_LISTED_FAILURES).enumerate() {
                writeln!(f, "  {}. {}", i + 1, failure.path)?;
            }
            if self.failures.len() > MAX_LISTED_FAILURES {
                writeln!(f, "  ... {} failed files in total", self.failures.len())?;
            }
        }

        if self.succeeded() {
            writeln!(f, "Partial download saved to: {}", self.local_dir.display())?;
        }
        Ok(())
    }
}
