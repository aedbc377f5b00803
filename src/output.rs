//! CLI output formatting.
//!
//! Output is **entry-centric**: the index is listed in display order, each
//! entry with its title and target, and the files a link produced are shown
//! as indented lines beneath it, relative to the output directory.
//!
//! ```text
//! Stylesheet → style.3f2a9c01b4e87d55.css
//! Avatar → avatar.9b1c0e4d2a7f6b35.png
//! Copies
//!     favicon.ico
//! Links
//! 001 Notes → notes/
//!     notes/index.html
//!     notes/notes.css
//! 002 Blog → https://blog.example.com
//! Home → index.html
//!
//! Built 2 links, 6 files into dist
//! ```
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::types::BuildReport;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Format the result of a build.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let root = report.output_dir.as_path();
    let mut lines = Vec::new();

    lines.push(format!("Stylesheet \u{2192} {}", relative(&report.stylesheet, root)));
    if let Some(avatar) = &report.avatar {
        lines.push(format!("Avatar \u{2192} {}", relative(avatar, root)));
    }

    if !report.copies.is_empty() {
        lines.push("Copies".to_string());
        for copy in &report.copies {
            lines.push(format!("    {}", relative(copy, root)));
        }
    }

    if !report.links.is_empty() {
        lines.push("Links".to_string());
    }
    let mut position = 0;
    for link in &report.links {
        for entry in &link.entries {
            position += 1;
            let target = match &link.output_dir {
                Some(dir) if *dir == entry.url => format!("{dir}/"),
                _ => entry.url.clone(),
            };
            lines.push(format!(
                "{} {} \u{2192} {}",
                format_index(position),
                entry.title,
                target
            ));
        }
        for file in &link.files {
            lines.push(format!("    {}", relative(file, root)));
        }
    }

    lines.push(format!("Home \u{2192} {}", relative(&report.index, root)));
    lines.push(String::new());
    lines.push(format!(
        "Built {} links, {} files into {}",
        position,
        report.file_count(),
        root.display()
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

/// Format the result of `check`: one line per local source, flagged if missing.
pub fn format_check_output(sources: &[(&Path, bool)]) -> Vec<String> {
    let mut lines = vec!["Sources".to_string()];
    for (path, exists) in sources {
        let status = if *exists { "ok" } else { "MISSING" };
        lines.push(format!("    {} ({})", path.display(), status));
    }
    lines
}

pub fn print_check_output(sources: &[(&Path, bool)]) {
    for line in format_check_output(sources) {
        println!("{}", line);
    }
}
