//! Site configuration module.
//!
//! Handles loading and validating `site.toml`. The file describes the whole
//! site: the landing page (title, avatar, social icons), files copied next to
//! it, and the ordered list of links, some of which are backed by gists.
//!
//! ## Configuration Options
//!
//! ```toml
//! title = "Jane Doe"            # Main title, shown on the index and in every <title>
//! theme = "default"             # Built-in theme name, or a path to a .scss/.css file
//! avatar = "assets/me.png"      # Takes priority over gravatar
//! gravatar = "205e460b479e2e5b48aec07710c08d50"
//! social_position = "bottom"    # "top" or "bottom" (relative to the links)
//! fetch = "sequential"          # "sequential" or "concurrent"
//! api_base = "https://api.github.com"
//!
//! [[index_copies]]              # Files placed next to index.html
//! input = "assets/favicon.ico"
//!
//! [[links]]                     # Gist-backed pages in dist/notes/
//! output_dir = "notes"
//! gist_id = "aa5a315d61ae9438b18d"
//! [[links.copy]]
//! input = "assets/notes.scss"
//!
//! [[links]]                     # Locally authored pages in dist/about/
//! output_dir = "about"
//! title = "About me"
//! [[links.copy]]
//! input = "pages/about.md"
//! output = "index.md"
//!
//! [[links]]                     # A plain external link
//! title = "Blog"
//! url = "https://blog.example.com"
//!
//! [[social_links]]
//! type = "github"
//! url = "https://github.com/jane"
//! ```
//!
//! ## Link shapes
//!
//! Each `[[links]]` table is deserialized from a permissive raw shape and
//! converted into a [`LinkEntry`]:
//!
//! | Keys | Variant |
//! |------|---------|
//! | `output_dir` + `gist_id` | [`LinkEntry::Remote`] |
//! | `output_dir` + `title` | [`LinkEntry::Local`] |
//! | `title` + `url` | [`LinkEntry::Static`] |
//! | `output_dir` + `gist_id` + `title` + `url` | [`LinkEntry::Combined`], two index entries |
//!
//! Any other combination is rejected when the file is loaded.
//!
//! Relative paths are resolved against the directory containing the config
//! file. Unknown keys are rejected to catch typos early.

use crate::format::Format;
use crate::gist;
use crate::naming::{self, INDEX_PAGE};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Main title, appended to every page title and shown on the index.
    pub title: Option<String>,
    /// Built-in theme name or stylesheet path. `None` is the default theme.
    pub theme: Option<String>,
    /// Local avatar image, copied fingerprinted next to `index.html`.
    pub avatar: Option<PathBuf>,
    /// Gravatar hash, used when no avatar file is configured.
    pub gravatar: Option<String>,
    /// Files placed at the output root.
    pub index_copies: Vec<CopyEntry>,
    /// Index entries, in display order.
    pub links: Vec<LinkEntry>,
    /// Social icons on the index page, in display order.
    pub social_links: Vec<SocialLink>,
    pub social_position: SocialPosition,
    /// How gist fetches are scheduled.
    pub fetch: FetchStrategy,
    /// Gist REST endpoint.
    pub api_base: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            title: None,
            theme: None,
            avatar: None,
            gravatar: None,
            index_copies: Vec::new(),
            links: Vec::new(),
            social_links: Vec::new(),
            social_position: SocialPosition::default(),
            fetch: FetchStrategy::default(),
            api_base: gist::DEFAULT_API_BASE.to_string(),
        }
    }
}

/// One file to place in an output directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyEntry {
    pub input: PathBuf,
    /// Output file name. Defaults to the file name of `input`.
    #[serde(default)]
    pub output: Option<String>,
}

impl CopyEntry {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// The requested output name, before any extension rewrite.
    pub fn output_name(&self) -> Option<&str> {
        match &self.output {
            Some(output) => Some(output),
            None => self.input.file_name().and_then(|n| n.to_str()),
        }
    }
}

/// A page set generated from one gist.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteLink {
    pub output_dir: String,
    pub gist_id: String,
    /// Written before the gist's own files.
    pub copy: Vec<CopyEntry>,
}

/// A page set authored locally, listed on the index under `title`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalLink {
    pub output_dir: String,
    pub title: String,
    pub copy: Vec<CopyEntry>,
}

/// A plain hyperlink on the index.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawLinkEntry")]
pub enum LinkEntry {
    Remote(RemoteLink),
    Local(LocalLink),
    Static(StaticLink),
    /// A gist page set and a plain link from one table. Yields the remote
    /// entry first, then the static one.
    Combined { remote: RemoteLink, link: StaticLink },
}

impl LinkEntry {
    /// Directory this entry writes into, relative to the output root.
    pub fn output_dir(&self) -> Option<&str> {
        match self {
            LinkEntry::Remote(remote) | LinkEntry::Combined { remote, .. } => Some(&remote.output_dir),
            LinkEntry::Local(local) => Some(&local.output_dir),
            LinkEntry::Static(_) => None,
        }
    }

    pub fn copies(&self) -> &[CopyEntry] {
        match self {
            LinkEntry::Remote(remote) | LinkEntry::Combined { remote, .. } => &remote.copy,
            LinkEntry::Local(local) => &local.copy,
            LinkEntry::Static(_) => &[],
        }
    }

    fn copies_mut(&mut self) -> &mut [CopyEntry] {
        match self {
            LinkEntry::Remote(remote) | LinkEntry::Combined { remote, .. } => &mut remote.copy,
            LinkEntry::Local(local) => &mut local.copy,
            LinkEntry::Static(_) => &mut [],
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLinkEntry {
    output_dir: Option<String>,
    gist_id: Option<String>,
    title: Option<String>,
    url: Option<String>,
    #[serde(default)]
    copy: Vec<CopyEntry>,
}

impl TryFrom<RawLinkEntry> for LinkEntry {
    type Error = String;

    fn try_from(raw: RawLinkEntry) -> Result<Self, Self::Error> {
        let RawLinkEntry {
            output_dir,
            gist_id,
            title,
            url,
            copy,
        } = raw;

        match (output_dir, gist_id, title, url) {
            (Some(output_dir), Some(gist_id), None, None) => Ok(LinkEntry::Remote(RemoteLink {
                output_dir,
                gist_id,
                copy,
            })),
            (Some(output_dir), Some(gist_id), Some(title), Some(url)) => Ok(LinkEntry::Combined {
                remote: RemoteLink {
                    output_dir,
                    gist_id,
                    copy,
                },
                link: StaticLink { title, url },
            }),
            (Some(output_dir), None, Some(title), None) => Ok(LinkEntry::Local(LocalLink {
                output_dir,
                title,
                copy,
            })),
            (None, None, Some(title), Some(url)) if copy.is_empty() => {
                Ok(LinkEntry::Static(StaticLink { title, url }))
            }
            (None, None, Some(_), Some(_)) => Err("link with copy entries needs an output_dir".into()),
            (None, Some(gist_id), _, _) => Err(format!("link with gist_id {gist_id:?} needs an output_dir")),
            (Some(_), Some(_), _, _) => Err("title and url must be given together".into()),
            (Some(_), None, Some(_), Some(_)) => {
                Err("a local link cannot also carry a url; use a separate [[links]] entry".into())
            }
            (Some(_), None, None, _) => Err("link with output_dir needs a gist_id or a title".into()),
            (None, None, Some(_), None) => Err("link with title needs a url or an output_dir".into()),
            (None, None, None, Some(_)) => Err("link with url needs a title".into()),
            (None, None, None, None) => Err("empty link entry".into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    /// Icon name, e.g. `github`.
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// Where the social icons sit relative to the link list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPosition {
    Top,
    #[default]
    Bottom,
}

/// Scheduling of gist fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStrategy {
    /// One link at a time, in declared order.
    #[default]
    Sequential,
    /// All links at once; results are still collected in declared order.
    Concurrent,
}

/// Whether a `theme` value names a stylesheet file rather than a built-in.
pub fn is_theme_path(theme: &str) -> bool {
    Format::classify(theme) == Format::Stylesheet
}

impl BuildConfig {
    /// Validate values the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base.starts_with("https://") || self.api_base.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "api_base must be an http(s) URL, got {:?}",
                self.api_base
            )));
        }

        for copy in &self.index_copies {
            validate_copy(copy, "index_copies")?;
            if let Some(name) = copy.output_name() {
                if naming::rewrite_extension(name, Format::classify(name)) == INDEX_PAGE {
                    return Err(ConfigError::Validation(format!(
                        "index_copies: {name:?} would overwrite the generated {INDEX_PAGE}"
                    )));
                }
            }
        }

        let mut seen = HashSet::new();
        for link in &self.links {
            if let Some(dir) = link.output_dir() {
                validate_output_dir(dir)?;
                let normalized: PathBuf = Path::new(dir).components().collect();
                if !seen.insert(normalized) {
                    return Err(ConfigError::Validation(format!(
                        "output_dir {dir:?} is used by more than one link"
                    )));
                }
                for copy in link.copies() {
                    validate_copy(copy, dir)?;
                }
            }
        }

        for social in &self.social_links {
            if social.url.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "social link {:?} has an empty url",
                    social.kind
                )));
            }
        }
        Ok(())
    }

    /// Make every relative local path absolute against `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        if let Some(avatar) = self.avatar.as_mut() {
            resolve(avatar);
        }
        if let Some(theme) = self.theme.as_mut() {
            if is_theme_path(theme) && Path::new(theme.as_str()).is_relative() {
                *theme = base.join(theme.as_str()).to_string_lossy().into_owned();
            }
        }
        for copy in &mut self.index_copies {
            resolve(&mut copy.input);
        }
        for link in &mut self.links {
            for copy in link.copies_mut() {
                resolve(&mut copy.input);
            }
        }
    }

    /// Every local file the build will read.
    pub fn local_sources(&self) -> Vec<&Path> {
        let mut sources = Vec::new();
        if let Some(theme) = self.theme.as_deref().filter(|t| is_theme_path(t)) {
            sources.push(Path::new(theme));
        }
        if let Some(avatar) = &self.avatar {
            sources.push(avatar.as_path());
        }
        sources.extend(self.index_copies.iter().map(|c| c.input.as_path()));
        for link in &self.links {
            sources.extend(link.copies().iter().map(|c| c.input.as_path()));
        }
        sources
    }
}

fn validate_copy(copy: &CopyEntry, context: &str) -> Result<(), ConfigError> {
    match copy.output_name() {
        Some(name) if gist::is_safe_filename(name) => Ok(()),
        Some(name) => Err(ConfigError::Validation(format!(
            "{context}: copy output {name:?} must be a plain file name"
        ))),
        None => Err(ConfigError::Validation(format!(
            "{context}: cannot derive an output name from {}",
            copy.input.display()
        ))),
    }
}

fn validate_output_dir(dir: &str) -> Result<(), ConfigError> {
    let path = Path::new(dir);
    let plain = !dir.trim().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if plain {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "output_dir {dir:?} must be a relative path inside the output directory"
        )))
    }
}

/// Parse a config from TOML text and validate it. Paths are left as written.
pub fn parse_config(content: &str) -> Result<BuildConfig, ConfigError> {
    let config: BuildConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `path`, validate it, and resolve relative paths against its directory.
pub fn load_config(path: &Path) -> Result<BuildConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.resolve_relative_to(base);
    Ok(config)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# gist-site configuration
# =======================
# Everything is optional except what your links need.
# Relative paths are resolved against the directory of this file.
# Unknown keys will cause an error.

# Main title. Shown under the avatar and appended to every page title
# ("Page | Title").
title = "Jane Doe"

# Built-in theme ("default" or "dark"), or a path to a .scss/.css file.
theme = "default"

# Avatar image, copied next to index.html. Takes priority over gravatar.
# avatar = "assets/avatar.png"

# Gravatar hash, used when no avatar file is set.
# gravatar = "205e460b479e2e5b48aec07710c08d50"

# Social icons above ("top") or below ("bottom") the links.
social_position = "bottom"

# Gist fetch scheduling: "sequential" or "concurrent".
# The index keeps the order below either way.
fetch = "sequential"

# Gist REST endpoint.
api_base = "https://api.github.com"

# ---------------------------------------------------------------------------
# Files placed next to index.html. Stylesheets are compiled, fingerprinted
# and linked from the index; a favicon.ico is linked automatically.
# ---------------------------------------------------------------------------
# [[index_copies]]
# input = "assets/favicon.ico"

# ---------------------------------------------------------------------------
# Links, in display order.
# ---------------------------------------------------------------------------

# Pages generated from a gist, written to dist/notes/. Copy entries are
# written first; stylesheets among them are linked from every page.
# [[links]]
# output_dir = "notes"
# gist_id = "aa5a315d61ae9438b18d"
# [[links.copy]]
# input = "assets/notes.scss"

# Pages authored locally, listed under a title.
# [[links]]
# output_dir = "about"
# title = "About me"
# [[links.copy]]
# input = "pages/about.md"
# output = "index.md"

# A plain external link.
[[links]]
title = "Blog"
url = "https://blog.example.com"

# ---------------------------------------------------------------------------
# Social icons. `type` is a Font Awesome icon name (github, twitter, envelope,
# ...). Unknown names get a generic link icon.
# ---------------------------------------------------------------------------
[[social_links]]
type = "github"
url = "https://github.com/jane"
"##
}
