//! Grouping of repository file listings by extension.

use std::path::Path;

/// Number of files sharing one extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionCount {
    /// Lowercased extension including the dot, or empty for none.
    pub extension: String,
    pub count: usize,
}

/// Summary of a file listing used by search enrichment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStats {
    pub total: usize,
    /// Most common extensions, count descending.
    pub top: Vec<ExtensionCount>,
    /// Number of distinct extensions in the listing.
    pub distinct: usize,
}

/// Files sharing one extension, as shown by `info`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileGroup {
    pub extension: String,
    /// Paths in sorted order.
    pub files: Vec<String>,
}

/// Lowercased extension with its leading dot (`data/a.JSON` -> `.json`).
///
/// Dotfiles such as `.gitattributes` have no extension.
pub fn extension_of(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// Count files per extension, most common first. Equal counts keep the order
/// in which the extension was first seen.
pub fn count_by_extension<S: AsRef<str>>(paths: &[S]) -> Vec<ExtensionCount> {
    let mut counts: Vec<ExtensionCount> = Vec::new();
    for path in paths {
        let extension = extension_of(path.as_ref());
        match counts.iter_mut().find(|entry| entry.extension == extension) {
            Some(entry) => entry.count += 1,
            None => counts.push(ExtensionCount {
                extension,
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn file_stats<S: AsRef<str>>(paths: &[S], top_n: usize) -> FileStats {
    let mut counts = count_by_extension(paths);
    let distinct = counts.len();
    counts.truncate(top_n);
    FileStats {
        total: paths.len(),
        top: counts,
        distinct,
    }
}

/// Group files by extension. Groups appear in first-seen order.
pub fn group_by_extension<S: AsRef<str>>(paths: &[S]) -> Vec<FileGroup> {
    let mut groups: Vec<FileGroup> = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let extension = extension_of(path);
        match groups.iter_mut().find(|group| group.extension == extension) {
            Some(group) => group.files.push(path.to_string()),
            None => groups.push(FileGroup {
                extension,
                files: vec![path.to_string()],
            }),
        }
    }
    for group in &mut groups {
        group.files.sort();
    }
    groups
}
