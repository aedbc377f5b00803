//! Content-format classification.
//!
//! Every file that passes through the build is sorted into one of three
//! categories by its extension alone. The category decides which renderer
//! the [asset writer](crate::writer) dispatches to:
//!
//! | Extension | Format | Output |
//! |-----------|--------|--------|
//! | `.md` | [`Format::Markdown`] | sanitized, minified HTML document |
//! | `.scss`, `.css` | [`Format::Stylesheet`] | compressed CSS |
//! | anything else | [`Format::Passthrough`] | byte-for-byte copy |
//!
//! Matching is case-sensitive and looks only at the last dot-delimited
//! segment, so `notes.MD` and `archive.md.gz` are passthrough files.

use std::fmt;

/// The closed set of content categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Markdown,
    Stylesheet,
    Passthrough,
}

impl Format {
    /// Classify a file name (or path string) by its extension.
    ///
    /// Never fails: a missing or unrecognized extension is passthrough.
    pub fn classify(filename: &str) -> Self {
        match filename.rsplit_once('.').map(|(_, ext)| ext) {
            Some("md") => Format::Markdown,
            // Bare .css is accepted for configs written before the scss switch.
            Some("scss") | Some("css") => Format::Stylesheet,
            _ => Format::Passthrough,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Markdown => "markdown",
            Format::Stylesheet => "stylesheet",
            Format::Passthrough => "passthrough",
        };
        f.write_str(name)
    }
}
