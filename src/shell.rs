//! The shared HTML document shell.
//!
//! Every generated page, Markdown pages inside link directories and the
//! index alike, is the same scaffold around a body fragment:
//!
//! ```text
//! <!DOCTYPE html>
//! <html lang="en">
//!   <head>
//!     <title>{title} | {main_title}</title>
//!     web font, main stylesheet (/style.<hash>.css)
//!     [Font Awesome script + stylesheet]
//!     [page stylesheets (./name.css) ...]
//!     [favicon (./favicon.ico)]
//!   </head>
//!   <body><main class="wrapper">{sanitized fragment}</main></body>
//! </html>
//! ```
//!
//! The fragment is always sanitized before it is embedded and the assembled
//! document is always minified, in that order.

use crate::render::{self, RenderError};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const WEB_FONT_URL: &str = "https://fonts.googleapis.com/css?family=Roboto:300,300italic,700,700italic";
const FONT_AWESOME_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/5.15.4/js/all.min.js";
const FONT_AWESOME_JS_SRI: &str = "sha512-Tn2m0TIpgVyTzzvmxLNuqbSJH3JP8jm+Cy3hvHrW7ndTDcJ1w5mBiksqDBb8GpE2ksktFvDB/ykZ0mDpsZj20w==";
const FONT_AWESOME_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/5.15.4/css/all.min.css";
const FONT_AWESOME_CSS_SRI: &str = "sha512-1ycn6IcaQQ40/MKBW2W4Rhis/DbILU74C1vSrLJxCq57o941Ym01SwNsOMqvEBFlcgUa6xLiPY/NS5R+E6ztJQ==";

/// Title used when neither a page title nor a main title is configured.
pub const DEFAULT_TITLE: &str = "Home";

/// Per-document shell options.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellOptions {
    /// Page-specific title (e.g. a gist description).
    pub title: Option<String>,
    /// Site-wide title, appended after the page title.
    pub main_title: Option<String>,
    /// The site stylesheet every page links to, relative to the output root.
    pub main_stylesheet: String,
    /// Additional stylesheets, relative to the page's own directory.
    pub stylesheets: Vec<String>,
    /// Link `./favicon.ico`.
    pub favicon: bool,
    /// Load the Font Awesome icon font.
    pub font_awesome: bool,
}

impl ShellOptions {
    pub fn new(main_stylesheet: impl Into<String>) -> Self {
        Self {
            title: None,
            main_title: None,
            main_stylesheet: main_stylesheet.into(),
            stylesheets: Vec::new(),
            favicon: false,
            font_awesome: false,
        }
    }

    /// The `<title>` text for these options.
    pub fn document_title(&self) -> String {
        negotiate_title(self.title.as_deref(), self.main_title.as_deref())
    }

    fn main_stylesheet_href(&self) -> String {
        let sheet = self.main_stylesheet.as_str();
        if sheet.starts_with('/') || sheet.contains("://") {
            sheet.to_string()
        } else {
            format!("/{sheet}")
        }
    }
}

/// Compose a document title.
///
/// - both: `"{title} | {main_title}"`
/// - one: that one
/// - neither: [`DEFAULT_TITLE`]
pub fn negotiate_title(title: Option<&str>, main_title: Option<&str>) -> String {
    match (title, main_title) {
        (Some(title), Some(main)) => format!("{title} | {main}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => DEFAULT_TITLE.to_string(),
    }
}

/// Wrap a fragment in the document shell, sanitize it, and minify the result.
pub fn render(fragment: &str, options: &ShellOptions) -> Result<String, RenderError> {
    let body = render::sanitize(fragment);
    let document = scaffold(&body, options).into_string();
    render::minify_document(&document)
}

fn scaffold(sanitized_body: &str, options: &ShellOptions) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (options.document_title()) }
                link rel="stylesheet" href=(WEB_FONT_URL);
                link rel="stylesheet" href=(options.main_stylesheet_href());
                @if options.font_awesome {
                    script src=(FONT_AWESOME_JS) integrity=(FONT_AWESOME_JS_SRI)
                        crossorigin="anonymous" referrerpolicy="no-referrer" {}
                    link rel="stylesheet" href=(FONT_AWESOME_CSS) integrity=(FONT_AWESOME_CSS_SRI)
                        crossorigin="anonymous" referrerpolicy="no-referrer";
                }
                @for sheet in &options.stylesheets {
                    link rel="stylesheet" href={ "./" (sheet) };
                }
                @if options.favicon {
                    link rel="icon" type="image/x-icon" href="./favicon.ico";
                }
            }
            body {
                main.wrapper {
                    (PreEscaped(sanitized_body))
                }
            }
        }
    }
}
