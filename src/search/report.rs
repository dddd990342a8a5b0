use std::fmt;

use crate::display::{extension_label, format_number, truncate_chars};
use crate::files::FileStats;
use crate::hub::DatasetSummary;

const DESCRIPTION_CHARS: usize = 150;
const MAX_TAGS: usize = 8;

/// The result of a keyword search.
#[derive(Clone, Debug)]
pub struct SearchReport {
    pub keyword: String,
    pub limit: usize,
    /// Number of datasets the registry matched, before the limit.
    pub total: usize,
    /// Shown results, most downloaded first.
    pub entries: Vec<SearchEntry>,
    /// Set when the search itself failed.
    pub error: Option<String>,
}

/// One shown search result.
#[derive(Clone, Debug)]
pub struct SearchEntry {
    /// 1-based position in the shown list.
    pub rank: usize,
    pub summary: DatasetSummary,
    /// File summary, when requested. `Err` holds the listing failure.
    pub files: Option<Result<FileStats, String>>,
}

impl SearchReport {
    pub(crate) fn empty(keyword: &str, limit: usize) -> Self {
        Self {
            keyword: keyword.to_string(),
            limit,
            total: 0,
            entries: Vec::new(),
            error: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dataset ids in display order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.summary.id.as_str())
            .collect()
    }

    /// Entry for a 1-based menu choice.
    pub fn entry(&self, rank: usize) -> Option<&SearchEntry> {
        rank.checked_sub(1).and_then(|i| self.entries.get(i))
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            return writeln!(f, "Search for '{}' failed: {}", self.keyword, error);
        }
        if self.entries.is_empty() {
            return writeln!(f, "No datasets found matching '{}'.", self.keyword);
        }

        writeln!(
            f,
            "Found {} datasets matching '{}', showing the {} most downloaded:",
            format_number(self.total as u64),
            self.keyword,
            self.entries.len()
        )?;

        for entry in &self.entries {
            write!(f, "{}", entry)?;
        }

        if self.total > self.entries.len() {
            writeln!(f)?;
            writeln!(
                f,
                "Note: showing {} of {} matching datasets. Use --limit to show more, e.g.",
                self.entries.len(),
                format_number(self.total as u64)
            )?;
            writeln!(f, "  hubsets search \"{}\" --limit 50", self.keyword)?;
        }

        Ok(())
    }
}

impl fmt::Display for SearchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;

        writeln!(f)?;
        writeln!(f, "{}. {}", self.rank, s.id)?;
        writeln!(f, "   Downloads: {}", format_number(s.downloads))?;

        match &self.files {
            Some(Ok(stats)) => writeln!(f, "   Files: {}", fmt_file_stats(stats))?,
            Some(Err(message)) => writeln!(f, "   Files: unavailable ({})", message)?,
            None => {}
        }

        if let Some(description) = s.description.as_deref() {
            if let Some(first_line) = description
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
            {
                writeln!(f, "   Description: {}", fmt_description(description, first_line))?;
            }
        }

        if !s.tags.is_empty() {
            let shown: Vec<&str> = s.tags.iter().take(MAX_TAGS).map(String::as_str).collect();
            let more = if s.tags.len() > MAX_TAGS { "..." } else { "" };
            writeln!(f, "   Tags: {}{}", shown.join(", "), more)?;
        }

        Ok(())
    }
}

/// First line capped at [`DESCRIPTION_CHARS`]; `...` marks any hidden text,
/// whether cut from that line or from the lines after it.
fn fmt_description(description: &str, first_line: &str) -> String {
    let shown = truncate_chars(first_line, DESCRIPTION_CHARS);
    if shown != first_line {
        return shown;
    }
    if description.trim().chars().count() > DESCRIPTION_CHARS {
        format!("{shown}...")
    } else {
        shown
    }
}

fn fmt_file_stats(stats: &FileStats) -> String {
    let mut types: Vec<String> = stats
        .top
        .iter()
        .map(|entry| {
            format!(
                "{} {}",
                entry.count,
                extension_label(&entry.extension, "(no extension)")
            )
        })
        .collect();
    if stats.distinct > stats.top.len() {
        types.push(format!("{} types in total", stats.distinct));
    }

    if types.is_empty() {
        format_number(stats.total as u64)
    } else {
        format!("{} ({})", format_number(stats.total as u64), types.join(", "))
    }
}
