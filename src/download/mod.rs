//! Dataset downloads.
//!
//! A download first tries the structured path (parquet export split into
//! named splits plus a JSON sidecar). If that fails, or `force_direct` is
//! set, every repository file is fetched verbatim into a mirrored tree.

mod record;
mod report;

pub use record::LocalDownloadRecord;
pub use report::{
    DirectAttempt, DirectDownloadReport, DownloadReport, FileFailure, StructuredAttempt,
    StructuredLoad,
};

use std::path::{Component, Path, PathBuf};

use indicatif::{style::ProgressStyle, ProgressBar};

use crate::error::HubsetsError;
use crate::hub::resolve::local_dir_name;
use crate::hub::Registry;
use crate::prompt::Prompter;

/// Options for a download.
#[derive(Clone, Debug)]
pub struct DownloadOptions {
    pub dataset_id: String,
    /// Configuration to load; the first available one when `None`.
    pub config: Option<String>,
    /// Skip the structured path.
    pub force_direct: bool,
    /// Root under which `<namespace>_<name>/` is created.
    pub output_dir: PathBuf,
    /// Ask before fetching more raw files than this.
    pub confirm_above: usize,
    /// Draw a progress bar over the raw file loop.
    pub progress: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            dataset_id: String::new(),
            config: None,
            force_direct: false,
            output_dir: PathBuf::from("datasets"),
            confirm_above: 100,
            progress: true,
        }
    }
}

/// Local directory a dataset is downloaded into.
pub fn dataset_dir(output_dir: &Path, dataset_id: &str) -> PathBuf {
    output_dir.join(local_dir_name(dataset_id))
}

/// Run a download to completion and describe what happened.
pub fn download_dataset<R, P>(registry: &R, prompter: &mut P, opts: &DownloadOptions) -> DownloadReport
where
    R: Registry + ?Sized,
    P: Prompter + ?Sized,
{
    let local_dir = dataset_dir(&opts.output_dir, &opts.dataset_id);
    let mut report = DownloadReport::new(&opts.dataset_id, &local_dir);

    if let Err(err) = std::fs::create_dir_all(&local_dir) {
        report.error = Some(format!("could not create {}: {err}", local_dir.display()));
        return report;
    }
    if let Ok(absolute) = std::fs::canonicalize(&local_dir) {
        report.local_dir = absolute;
    }
    let local_dir = report.local_dir.clone();

    if opts.force_direct {
        log::info!("direct download forced for '{}'", opts.dataset_id);
        report.direct = Some(direct_download(registry, prompter, opts, &local_dir));
        return report;
    }

    match structured_download(registry, &opts.dataset_id, opts.config.as_deref(), &local_dir) {
        Ok(loaded) => report.structured = Some(StructuredAttempt::Loaded(loaded)),
        Err(err) => {
            log::warn!("structured load failed: {err}");
            report.structured = Some(StructuredAttempt::Failed(err.to_string()));

            let proceed = prompter
                .confirm("Structured loading failed. Download the raw repository files instead?")
                .unwrap_or_else(|| {
                    log::info!("no interactive input, falling back to direct download");
                    true
                });
            if proceed {
                report.direct = Some(direct_download(registry, prompter, opts, &local_dir));
            } else {
                report.fallback_declined = true;
            }
        }
    }

    report
}

/// Structured load of one configuration, followed by the sidecar record.
///
/// Without an explicit `config` the registry's first configuration is used;
/// a dataset without configurations is loaded with none.
pub fn structured_download<R: Registry + ?Sized>(
    registry: &R,
    dataset_id: &str,
    config: Option<&str>,
    local_dir: &Path,
) -> Result<StructuredLoad, HubsetsError> {
    let (selected, available) = match config {
        Some(config) => (Some(config.to_string()), Vec::new()),
        None => {
            let available = registry.config_names(dataset_id)?;
            let first = available.first().cloned();
            match first.as_deref() {
                Some(name) => log::info!("selected first configuration '{name}'"),
                None => log::info!("dataset has no configurations"),
            }
            (first, available)
        }
    };

    let dataset = registry.load_structured(dataset_id, selected.as_deref(), local_dir)?;
    let record = LocalDownloadRecord::from_dataset(dataset_id, &dataset);
    let record_path = record.write(local_dir)?;
    log::debug!("wrote {}", record_path.display());

    Ok(StructuredLoad {
        dataset,
        available_configs: available,
        record_path,
    })
}

/// List the repository and fetch every file, asking first when there are
/// more than `opts.confirm_above` of them.
pub fn direct_download<R, P>(
    registry: &R,
    prompter: &mut P,
    opts: &DownloadOptions,
    local_dir: &Path,
) -> DirectAttempt
where
    R: Registry + ?Sized,
    P: Prompter + ?Sized,
{
    let files = match registry.list_files(&opts.dataset_id) {
        Ok(files) => files,
        Err(err) => return DirectAttempt::ListingFailed(err.to_string()),
    };
    if files.is_empty() {
        return DirectAttempt::NoFiles;
    }

    if files.len() > opts.confirm_above {
        let question = format!(
            "The dataset has {} files and may take a long time to download. Continue?",
            files.len()
        );
        match prompter.confirm(&question) {
            Some(false) => {
                return DirectAttempt::Cancelled {
                    file_count: files.len(),
                }
            }
            Some(true) => {}
            None => log::info!("no interactive input, continuing with {} files", files.len()),
        }
    }

    DirectAttempt::Completed(fetch_files(
        registry,
        &opts.dataset_id,
        &files,
        local_dir,
        opts.progress,
    ))
}

/// Fetch `files` one at a time into `local_dir`, recording failures instead
/// of stopping.
pub fn fetch_files<R: Registry + ?Sized>(
    registry: &R,
    dataset_id: &str,
    files: &[String],
    local_dir: &Path,
    progress: bool,
) -> DirectDownloadReport {
    let progress_bar = if progress {
        let bar = ProgressBar::new(files.len() as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{bar:40} {pos}/{len} files | {elapsed_precise} | {msg}")
        {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut report = DirectDownloadReport {
        local_dir: local_dir.to_path_buf(),
        total: files.len(),
        success_count: 0,
        failures: Vec::new(),
    };

    for remote_path in files {
        progress_bar.set_message(remote_path.clone());
        let result = match mirror_path(local_dir, remote_path) {
            Some(target) => registry.fetch_file(dataset_id, remote_path, &target),
            None => Err(HubsetsError::DownloadError {
                dataset_id: dataset_id.to_string(),
                path: remote_path.clone(),
                message: "path escapes the download directory".to_string(),
            }),
        };

        match result {
            Ok(()) => report.success_count += 1,
            Err(err) => {
                progress_bar.suspend(|| log::warn!("{err}"));
                report.failures.push(FileFailure {
                    path: remote_path.clone(),
                    message: err.to_string(),
                });
            }
        }
        progress_bar.inc(1);
    }

    progress_bar.finish_and_clear();
    report
}

/// Local path mirroring `remote_path` under `local_dir`, or `None` when the
/// remote path is absolute or climbs out with `..`.
pub fn mirror_path(local_dir: &Path, remote_path: &str) -> Option<PathBuf> {
    let relative = Path::new(remote_path);
    let safe = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
    (safe && !remote_path.is_empty()).then(|| local_dir.join(relative))
}
