//! Prompt-driven flow used when no subcommand is given.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::download::{download_dataset, DownloadOptions};
use crate::hub::Registry;
use crate::info::show_info;
use crate::prompt::Prompter;
use crate::search::{search_datasets, SearchOptions};

/// Settings carried over from the top-level flags.
#[derive(Clone, Debug)]
pub struct InteractiveOptions {
    pub limit: usize,
    pub config: Option<String>,
    pub force_direct: bool,
    pub output_dir: PathBuf,
    /// Hub base URL for the links in `info` output.
    pub endpoint: String,
}

impl Default for InteractiveOptions {
    fn default() -> Self {
        Self {
            limit: 30,
            config: None,
            force_direct: false,
            output_dir: PathBuf::from("datasets"),
            endpoint: crate::hub::client::DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Ask for a keyword, search, then offer details or a download for one hit.
///
/// Bad input ends the session with a message; only output errors are
/// returned.
pub fn run_interactive<R, P, W>(
    registry: &R,
    prompter: &mut P,
    out: &mut W,
    opts: &InteractiveOptions,
) -> io::Result<()>
where
    R: Registry + ?Sized,
    P: Prompter + ?Sized,
    W: Write,
{
    let keyword = prompter
        .ask_line("Enter a search keyword (e.g. 'time series', 'chinese', 'nlp'): ")
        .unwrap_or_default();
    if keyword.is_empty() {
        writeln!(out, "The search keyword must not be empty.")?;
        return Ok(());
    }

    let show_files = prompter
        .confirm("Show file statistics for each dataset? (default n)")
        .unwrap_or(false);

    let report = search_datasets(
        registry,
        &SearchOptions {
            keyword,
            limit: opts.limit,
            show_files,
        },
    );
    write!(out, "{report}")?;
    out.flush()?;
    if report.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    let Some(action) = prompter.ask_line("Choose an action: [1] show details [2] download [0] exit: ")
    else {
        writeln!(out, "No input available, exiting.")?;
        return Ok(());
    };

    let action = match action.parse::<u32>() {
        Ok(action) => action,
        Err(_) => {
            writeln!(out, "Please enter a valid number.")?;
            return Ok(());
        }
    };

    match action {
        0 => writeln!(out, "Exiting.")?,
        1 | 2 => {
            let Some(answer) = prompter.ask_line("Enter the dataset number: ") else {
                writeln!(out, "No input available, exiting.")?;
                return Ok(());
            };
            let Ok(number) = answer.parse::<usize>() else {
                writeln!(out, "Please enter a valid number.")?;
                return Ok(());
            };
            let Some(entry) = report.entry(number) else {
                writeln!(out, "Invalid dataset number.")?;
                return Ok(());
            };
            let dataset_id = entry.summary.id.clone();

            if action == 1 {
                let info = show_info(registry, &dataset_id).with_endpoint(&opts.endpoint);
                write!(out, "{info}")?;
            } else {
                let download = download_dataset(
                    registry,
                    prompter,
                    &DownloadOptions {
                        dataset_id,
                        config: opts.config.clone(),
                        force_direct: opts.force_direct,
                        output_dir: opts.output_dir.clone(),
                        ..DownloadOptions::default()
                    },
                );
                write!(out, "{download}")?;
            }
        }
        _ => writeln!(out, "Invalid choice.")?,
    }

    Ok(())
}
