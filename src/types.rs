//! Shared types passed between the aggregator, the orchestrator and the CLI.

use std::path::PathBuf;

/// One row of the index page's link list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub title: String,
    pub url: String,
}

impl IndexEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// What resolving one configured link produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkReport {
    /// Directory written into, relative to the output root.
    pub output_dir: Option<String>,
    /// Files written, in write order.
    pub files: Vec<PathBuf>,
    /// Index entries, in the order they appear on the index.
    pub entries: Vec<IndexEntry>,
}

/// Everything a build wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// The fingerprinted main stylesheet.
    pub stylesheet: PathBuf,
    pub avatar: Option<PathBuf>,
    /// Top-level copies, in configured order.
    pub copies: Vec<PathBuf>,
    /// One report per configured link, in configured order.
    pub links: Vec<LinkReport>,
    pub index: PathBuf,
}

impl BuildReport {
    /// Index entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.links.iter().flat_map(|link| link.entries.iter())
    }

    /// Number of files written, the stylesheet and `index.html` included.
    pub fn file_count(&self) -> usize {
        2 + usize::from(self.avatar.is_some())
            + self.copies.len()
            + self.links.iter().map(|l| l.files.len()).sum::<usize>()
    }
}
