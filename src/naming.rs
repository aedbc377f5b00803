//! Output filename transforms.
//!
//! The name a file is written under is derived from the requested name by a
//! short, ordered pipeline of pure string transforms:
//!
//! ```text
//! notes.md     →  notes.html                 (extension rewrite, markdown)
//! theme.scss   →  theme.css                  (extension rewrite, stylesheet)
//! theme.css    →  theme.3f2a9c01b4e87d55.css (fingerprint insertion)
//! ```
//!
//! Extension rewriting always runs before fingerprinting, so the hash lands
//! in front of the *final* extension. Each step is exposed on its own so it
//! can be tested without touching the filesystem; [`output_name`] chains
//! them.

use crate::format::Format;

/// File name of the generated landing page at the output root.
pub const INDEX_PAGE: &str = "index.html";

/// Rewrite a file name's extension to the one its format produces.
///
/// - markdown: trailing `.md` → `.html`
/// - stylesheet: trailing `.scss` or `.css` → `.css`
/// - passthrough: unchanged
pub fn rewrite_extension(name: &str, format: Format) -> String {
    match format {
        Format::Markdown => match name.strip_suffix(".md") {
            Some(stem) => format!("{stem}.html"),
            None => name.to_string(),
        },
        Format::Stylesheet => match name
            .strip_suffix(".scss")
            .or_else(|| name.strip_suffix(".css"))
        {
            Some(stem) => format!("{stem}.css"),
            None => name.to_string(),
        },
        Format::Passthrough => name.to_string(),
    }
}

/// Insert a fingerprint token before the last extension.
///
/// - `"style.css"` + `"abc"` → `"style.abc.css"`
/// - `"theme.min.css"` + `"abc"` → `"theme.min.abc.css"`
/// - `"LICENSE"` + `"abc"` → `"LICENSE.abc"`
/// - `".nojekyll"` + `"abc"` → `".nojekyll.abc"` (a leading dot is not an extension)
pub fn insert_fingerprint(name: &str, token: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}.{token}.{ext}"),
        _ => format!("{name}.{token}"),
    }
}

/// Full pipeline: extension rewrite, then optional fingerprint insertion.
pub fn output_name(name: &str, format: Format, fingerprint: Option<&str>) -> String {
    let rewritten = rewrite_extension(name, format);
    match fingerprint {
        Some(token) => insert_fingerprint(&rewritten, token),
        None => rewritten,
    }
}
