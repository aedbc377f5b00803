//! Index aggregation: resolve every configured link, then render the landing
//! page.
//!
//! ## Resolving links
//!
//! Each [`LinkEntry`] resolves to a [`LinkReport`]: the files written into its
//! output directory and the index entries it contributes.
//!
//! | Variant | I/O | Entries |
//! |---------|-----|---------|
//! | `Remote` | fetch gist, write copies, then gist files | gist title → `output_dir` |
//! | `Local` | write copies | link title → `output_dir` |
//! | `Static` | none | title → url |
//! | `Combined` | as `Remote` | remote entry, then static entry |
//!
//! Every Markdown page in a link directory shares one set of shell options:
//! the page title, the main stylesheet, every stylesheet produced in that
//! directory, and the favicon when one is present.
//!
//! ## Ordering
//!
//! [`collect_links`] returns reports in declared order under both strategies.
//! Concurrent fetching runs the per-link futures together on the current
//! task and joins them by position, so completion order never leaks into the
//! index. The first failure aborts the whole collection.

use crate::config::{CopyEntry, FetchStrategy, LinkEntry, SocialLink, SocialPosition, StaticLink};
use crate::format::Format;
use crate::gist::{FetchError, GistClient, GistFile};
use crate::icons::resolve_icon;
use crate::naming;
use crate::render::RenderError;
use crate::shell::{self, ShellOptions};
use crate::types::{IndexEntry, LinkReport};
use crate::writer::{self, AssetRequest, Source, WriteError};
use futures::future::try_join_all;
use log::{debug, info};
use maud::{Markup, html};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Built-in avatar, shown when neither an avatar file nor a gravatar hash is set.
pub const DEFAULT_AVATAR: &str = concat!(
    "data:image/png;base64,",
    include_str!("../static/default-avatar.b64")
);

const FAVICON: &str = "favicon.ico";

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error(transparent)]
    Remote(#[from] FetchError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("IO error writing {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("link {output_dir}: copy of {input} has no output name")]
    CopyName { output_dir: String, input: PathBuf },
}

/// What every link needs to know about the build it is part of.
#[derive(Debug, Clone, Copy)]
pub struct LinkContext<'a> {
    pub client: &'a GistClient,
    /// Output root; link directories are created beneath it beforehand.
    pub output_root: &'a Path,
    /// Final name of the main stylesheet, relative to the output root.
    pub main_stylesheet: &'a str,
    pub main_title: Option<&'a str>,
}

/// Resolve every link, returning reports in declared order.
pub async fn collect_links(
    links: &[LinkEntry],
    ctx: LinkContext<'_>,
    strategy: FetchStrategy,
) -> Result<Vec<LinkReport>, AggregateError> {
    match strategy {
        FetchStrategy::Sequential => {
            let mut reports = Vec::with_capacity(links.len());
            for link in links {
                reports.push(resolve_link(link, ctx).await?);
            }
            Ok(reports)
        }
        FetchStrategy::Concurrent => try_join_all(links.iter().map(|link| resolve_link(link, ctx))).await,
    }
}

/// Resolve a single link entry.
pub async fn resolve_link(link: &LinkEntry, ctx: LinkContext<'_>) -> Result<LinkReport, AggregateError> {
    match link {
        LinkEntry::Static(link) => Ok(static_report(link)),
        LinkEntry::Local(local) => {
            let files = write_page_set(&local.output_dir, &local.copy, &[], &local.title, ctx).await?;
            Ok(LinkReport {
                output_dir: Some(local.output_dir.clone()),
                files,
                entries: vec![IndexEntry::new(&local.title, &local.output_dir)],
            })
        }
        LinkEntry::Remote(remote) | LinkEntry::Combined { remote, .. } => {
            let gist = ctx.client.fetch(&remote.gist_id).await?;
            let title = gist.title().to_string();
            let files = write_page_set(&remote.output_dir, &remote.copy, &gist.files, &title, ctx).await?;

            let mut entries = vec![IndexEntry::new(title, &remote.output_dir)];
            if let LinkEntry::Combined { link, .. } = link {
                entries.push(IndexEntry::new(&link.title, &link.url));
            }
            Ok(LinkReport {
                output_dir: Some(remote.output_dir.clone()),
                files,
                entries,
            })
        }
    }
}

fn static_report(link: &StaticLink) -> LinkReport {
    LinkReport {
        output_dir: None,
        files: Vec::new(),
        entries: vec![IndexEntry::new(&link.title, &link.url)],
    }
}

/// Write a link's copies, then its gist files, into `output_dir`.
async fn write_page_set(
    output_dir: &str,
    copies: &[CopyEntry],
    gist_files: &[GistFile],
    title: &str,
    ctx: LinkContext<'_>,
) -> Result<Vec<PathBuf>, AggregateError> {
    let dir = ctx.output_root.join(output_dir);

    let mut planned: Vec<(String, Source)> = Vec::with_capacity(copies.len() + gist_files.len());
    for copy in copies {
        let name = copy.output_name().ok_or_else(|| AggregateError::CopyName {
            output_dir: output_dir.to_string(),
            input: copy.input.clone(),
        })?;
        planned.push((name.to_string(), Source::File(copy.input.clone())));
    }
    for file in gist_files {
        planned.push((file.filename.clone(), Source::Inline(file.content.clone())));
    }

    let shell = ShellOptions {
        title: Some(title.to_string()),
        main_title: ctx.main_title.map(str::to_string),
        stylesheets: link_stylesheets(planned.iter().map(|(name, _)| name.as_str())),
        favicon: planned.iter().any(|(name, _)| name == FAVICON),
        ..ShellOptions::new(ctx.main_stylesheet)
    };
    debug!(
        "{output_dir}: {} files, stylesheets {:?}, favicon {}",
        planned.len(),
        shell.stylesheets,
        shell.favicon
    );

    let mut written = Vec::with_capacity(planned.len());
    for (name, source) in planned {
        let request = AssetRequest::for_format(Format::classify(&name), source, shell.clone());
        written.push(writer::write_asset(&dir.join(&name), &request).await?);
    }
    Ok(written)
}

/// Output names of the stylesheets among `names`, in order.
fn link_stylesheets<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names
        .filter(|name| Format::classify(name) == Format::Stylesheet)
        .map(|name| naming::rewrite_extension(name, Format::Stylesheet))
        .collect()
}

// ============================================================================
// Index page
// ============================================================================

/// Landing page decoration.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexPage {
    /// Image URL for the header, see [`resolve_avatar`].
    pub avatar: String,
    pub main_title: Option<String>,
    pub social_position: SocialPosition,
    pub main_stylesheet: String,
    /// Top-level stylesheet copies.
    pub stylesheets: Vec<String>,
    pub favicon: bool,
}

/// Pick the header image: avatar file > gravatar > built-in default.
pub fn resolve_avatar(asset: Option<&str>, gravatar: Option<&str>) -> String {
    match (asset, gravatar.map(str::trim).filter(|g| !g.is_empty())) {
        (Some(asset), _) => asset.to_string(),
        (None, Some(hash)) => format!("https://gravatar.com/avatar/{hash}?s=200"),
        (None, None) => DEFAULT_AVATAR.to_string(),
    }
}

/// Render the complete index document.
pub fn render_index(
    entries: &[IndexEntry],
    socials: &[SocialLink],
    page: &IndexPage,
) -> Result<String, RenderError> {
    let fragment = index_fragment(entries, socials, page).into_string();
    let options = ShellOptions {
        title: Some(shell::DEFAULT_TITLE.to_string()),
        main_title: page.main_title.clone(),
        stylesheets: page.stylesheets.clone(),
        favicon: page.favicon,
        font_awesome: true,
        ..ShellOptions::new(page.main_stylesheet.as_str())
    };
    shell::render(&fragment, &options)
}

/// Render and write `index.html` at the output root.
pub async fn write_index(
    output_root: &Path,
    entries: &[IndexEntry],
    socials: &[SocialLink],
    page: &IndexPage,
) -> Result<PathBuf, AggregateError> {
    let document = render_index(entries, socials, page)?;
    let path = output_root.join(naming::INDEX_PAGE);
    tokio::fs::write(&path, document)
        .await
        .map_err(|source| AggregateError::Io {
            path: path.clone(),
            source,
        })?;
    info!("wrote {} ({} links)", path.display(), entries.len());
    Ok(path)
}

fn index_fragment(entries: &[IndexEntry], socials: &[SocialLink], page: &IndexPage) -> Markup {
    let top = page.social_position == SocialPosition::Top;
    html! {
        header class="container center header" {
            img class="img avatar" src=(page.avatar) alt="Avatar";
            @if let Some(title) = &page.main_title {
                h1 class="title" { (title) }
            }
        }
        @if top {
            (social_row(socials))
        }
        section class="container center links" {
            @for entry in entries {
                a class="button button--link" href=(entry.url) target="_blank" rel="noopener noreferrer" {
                    p class="button__text" { (entry.title) }
                }
            }
        }
        @if !top {
            (social_row(socials))
        }
    }
}

fn social_row(socials: &[SocialLink]) -> Markup {
    html! {
        section class="container center socials" {
            @for social in socials {
                a href=(social.url) target="_blank" rel="noopener noreferrer" {
                    i class={ (resolve_icon(&social.kind)) " fa-2x" } {}
                }
            }
        }
    }
}
