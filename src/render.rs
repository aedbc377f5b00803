//! Content transformers: Markdown, stylesheets, sanitizing and minifying.
//!
//! Each function here wraps one third-party crate behind a narrow contract so
//! the rest of the pipeline never depends on a specific renderer:
//!
//! | Function | Crate | Contract |
//! |----------|-------|----------|
//! | [`markdown_to_html`] | `pulldown-cmark` | Markdown text → HTML fragment, pure |
//! | [`compile_stylesheet`] | `grass` | SCSS/CSS file or inline source → compressed CSS |
//! | [`sanitize`] | `ammonia` | HTML fragment → fragment with script-executing constructs removed |
//! | [`minify_document`] | `minify-html` | full HTML document → minified document |
//!
//! ## Sanitizer policy
//!
//! Gist content is written by whoever owns the gist, so every fragment is
//! cleaned before it is embedded in a page. The policy is ammonia's default
//! allowlist widened just enough for the generated layout: the sectioning
//! tags the shell uses, `class` on any element, `target` on links, and
//! `data:` URLs on images (the built-in avatar is an inline PNG). `data:`
//! URLs on `href` are still dropped. Links get `rel="noopener noreferrer"`.

use pulldown_cmark::{Options, Parser, html as md_html};
use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("stylesheet compilation failed: {0}")]
    Stylesheet(String),
    #[error("HTML minification failed: {0}")]
    Minify(String),
}

/// Where stylesheet source comes from.
#[derive(Debug, Clone, Copy)]
pub enum StyleInput<'a> {
    /// Compile from a file; `@use`/`@import` resolve relative to it.
    File(&'a Path),
    /// Compile from source text held in memory.
    Inline(&'a str),
}

/// Render Markdown to an HTML fragment.
///
/// GitHub-flavored extensions (tables, strikethrough, task lists, footnotes)
/// are enabled since most input comes from gists. Raw HTML passes through
/// here untouched; it is the shell's job to [`sanitize`] it.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);
    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    md_html::push_html(&mut html, parser);
    html
}

/// Compile SCSS (or plain CSS) into compressed CSS.
pub fn compile_stylesheet(input: StyleInput<'_>) -> Result<String, RenderError> {
    let options = grass::Options::default().style(grass::OutputStyle::Compressed);
    let result = match input {
        StyleInput::File(path) => grass::from_path(path, &options),
        StyleInput::Inline(source) => grass::from_string(source.to_owned(), &options),
    };
    result.map_err(|e| RenderError::Stylesheet(e.to_string()))
}

static SANITIZER: LazyLock<ammonia::Builder<'static>> = LazyLock::new(|| {
    let mut builder = ammonia::Builder::default();
    builder
        .add_tags(&["header", "section", "main"])
        .add_generic_attributes(&["class"])
        .add_tag_attributes("a", &["target"])
        .add_url_schemes(&["data"])
        .attribute_filter(|_element, attribute, value| {
            let is_data_url = value
                .trim_start()
                .get(..5)
                .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"));
            if attribute != "src" && is_data_url {
                None
            } else {
                Some(Cow::Borrowed(value))
            }
        });
    builder
});

/// Strip scripts, event handlers, and unsafe URLs from an HTML fragment.
///
/// Script and style elements are removed together with their content;
/// surrounding text and allowed markup are preserved.
pub fn sanitize(fragment: &str) -> String {
    SANITIZER.clean(fragment).to_string()
}

/// Minify a complete HTML document.
///
/// Collapses whitespace, removes comments and redundant attributes, and
/// shortens the doctype. `<pre>` and `<textarea>` content is left as is.
pub fn minify_document(document: &str) -> Result<String, RenderError> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_comments = false;
    cfg.keep_html_and_head_opening_tags = true;

    let minified = minify_html::minify(document.as_bytes(), &cfg);
    String::from_utf8(minified).map_err(|e| RenderError::Minify(e.to_string()))
}
