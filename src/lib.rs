//! # gist-site
//!
//! A static landing-page builder. One TOML file lists links, some of them
//! backed by GitHub gists or local files; a build turns it into a directory
//! of plain HTML and CSS that can be dropped on any file server.
//!
//! # Architecture: One Pass, Fixed Order
//!
//! ```text
//! site.toml ──▶ config ──▶ generate::build
//!                              │
//!                              ├─ theme       ──▶ writer ──▶ style.<hash>.css
//!                              ├─ avatar      ──▶ writer ──▶ avatar.<hash>.<ext>
//!                              ├─ index copies ─▶ writer
//!                              ├─ links ──▶ index::collect_links
//!                              │              ├─ gist::GistClient::fetch
//!                              │              └─ writer (per copy / gist file)
//!                              └─ index::write_index ──▶ index.html
//! ```
//!
//! Every generated document links to the main stylesheet by its fingerprinted
//! name, so the theme is written first and `index.html` last.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`generate`] | Build orchestration: output layout, themes, step order |
//! | [`index`] | Link resolution in declared order, landing page rendering |
//! | [`gist`] | Gist REST client: fetch, validate, complete truncated files |
//! | [`writer`] | One request in, one file out; returns the final path |
//! | [`shell`] | Shared HTML document scaffold, title negotiation |
//! | [`render`] | Markdown, SCSS, sanitizer and minifier wrappers |
//! | [`format`] | Extension-based content classification |
//! | [`naming`] | Output filename pipeline: extension rewrite, fingerprint insertion |
//! | [`fingerprint`] | Content hashes for cache-busting names |
//! | [`icons`] | Social type → Font Awesome class |
//! | [`config`] | `site.toml` loading, link shapes, validation |
//! | [`types`] | Index entries and build reports |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Content Fingerprints, From Sources
//!
//! Stylesheets and the avatar get a hash of their *source* bytes in the
//! filename. A rebuild from unchanged sources reproduces the same names, and
//! a compiler upgrade that only changes output whitespace does not churn the
//! URLs browsers have cached.
//!
//! ## Sanitize Everything Embedded
//!
//! Gist content is authored by whoever owns the gist. Every fragment is run
//! through an allowlist sanitizer after Markdown rendering and before the
//! document is minified; only the shell's own head may carry scripts.
//!
//! ## Declared Order, Whatever the Scheduling
//!
//! Gists can be fetched one at a time or all at once. Either way the per-link
//! results are joined by position, so the index always lists links in the
//! order the config declares them.
//!
//! ## Tagged Requests Instead of Option Bags
//!
//! [`writer::AssetRequest`] has one variant per format with exactly the
//! fields that format needs, and [`config::LinkEntry`] names the combined
//! gist-plus-link shape explicitly instead of inferring it from optional keys.

pub mod config;
pub mod fingerprint;
pub mod format;
pub mod generate;
pub mod gist;
pub mod icons;
pub mod index;
pub mod naming;
pub mod output;
pub mod render;
pub mod shell;
pub mod types;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_helpers;
