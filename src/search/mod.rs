//! Keyword search over the registry.
//!
//! Results are ranked by download count, capped to a limit, and optionally
//! enriched with a per-dataset file listing summary.

mod report;

pub use report::{SearchEntry, SearchReport};

use crate::files::file_stats;
use crate::hub::{DatasetSummary, Registry};

/// How many extensions the file summary of a search hit shows.
pub const TOP_EXTENSIONS: usize = 3;

/// Options for a search.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    pub keyword: String,
    /// Maximum number of results to show; 0 shows all.
    pub limit: usize,
    /// Fetch each shown dataset's file listing.
    pub show_files: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            limit: 30,
            show_files: false,
        }
    }
}

/// Sort by download count descending. The sort is stable, so equal counts
/// keep registry order.
pub fn rank_summaries(mut summaries: Vec<DatasetSummary>) -> Vec<DatasetSummary> {
    summaries.sort_by(|a, b| b.downloads.cmp(&a.downloads));
    summaries
}

/// Run a search and collect the report.
///
/// Never fails: a failed search comes back as an empty report carrying the
/// error, and a failed file listing is recorded on its entry only.
pub fn search_datasets<R: Registry + ?Sized>(registry: &R, opts: &SearchOptions) -> SearchReport {
    let keyword = opts.keyword.trim();
    let mut report = SearchReport::empty(keyword, opts.limit);

    if keyword.is_empty() {
        report.error = Some("search keyword must not be empty".to_string());
        return report;
    }

    log::info!("searching datasets matching '{keyword}'");
    let summaries = match registry.search(keyword) {
        Ok(summaries) => summaries,
        Err(err) => {
            log::warn!("search for '{keyword}' failed: {err}");
            report.error = Some(err.to_string());
            return report;
        }
    };

    report.total = summaries.len();
    let mut ranked = rank_summaries(summaries);
    if opts.limit > 0 {
        ranked.truncate(opts.limit);
    }

    report.entries = ranked
        .into_iter()
        .enumerate()
        .map(|(i, summary)| {
            let files = opts.show_files.then(|| {
                registry
                    .list_files(&summary.id)
                    .map(|paths| file_stats(&paths, TOP_EXTENSIONS))
                    .map_err(|err| {
                        log::debug!("file listing for '{}' failed: {err}", summary.id);
                        err.to_string()
                    })
            });
            SearchEntry {
                rank: i + 1,
                summary,
                files,
            }
        })
        .collect();

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, downloads: u64) -> DatasetSummary {
        DatasetSummary {
            id: id.to_string(),
            downloads,
            ..DatasetSummary::default()
        }
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let ranked = rank_summaries(vec![
            summary("a", 5),
            summary("b", 9),
            summary("c", 5),
            summary("d", 9),
        ]);
        let ids: Vec<&str> = ranked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }
}
