//! The asset writer: one request in, one file out.
//!
//! Callers describe *what* to produce with an [`AssetRequest`], a tagged
//! record with one variant per [`Format`], each carrying exactly the fields
//! that format needs. [`write_asset`] validates the request once, derives the
//! final filename through the [`naming`](crate::naming) pipeline, renders the
//! content and writes it, and returns the path actually written. That path can
//! differ from the requested one (`.md` → `.html`, `.scss` → `.css`, inserted
//! fingerprint), so callers use the return value when linking to the file from
//! other pages.
//!
//! ## Fingerprinting
//!
//! A fingerprinted request must read its content from a file: the token is
//! the hash of that declared source, so inline content has nothing stable to
//! hash and is rejected with [`WriteError::Config`].
//!
//! ## Directories
//!
//! The writer never creates directories. The orchestrator lays out the output
//! tree up front; a missing parent is an I/O error here.

use crate::fingerprint;
use crate::format::Format;
use crate::naming;
use crate::render::{self, RenderError, StyleInput};
use crate::shell::{self, ShellOptions};
use log::info;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error writing {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("cannot read source {path}: {source}")]
    Source { path: PathBuf, source: io::Error },
    #[error("failed to render {path}: {source}")]
    Render { path: PathBuf, source: RenderError },
    #[error("invalid asset request for {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

/// Where an asset's content comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A file on disk. Passthrough copies it byte for byte.
    File(PathBuf),
    /// Content already in memory, e.g. a file from a gist.
    Inline(String),
}

/// Format-specific part of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetKind {
    /// Render Markdown into a full document wrapped by the shell.
    Markdown { source: Source, shell: ShellOptions },
    /// Compile SCSS/CSS to compressed CSS.
    Stylesheet { source: Source },
    /// Write the content unchanged.
    Passthrough { source: Source },
}

/// A validated description of one file to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRequest {
    pub kind: AssetKind,
    pub fingerprint: bool,
}

impl AssetRequest {
    pub fn markdown(source: Source, shell: ShellOptions) -> Self {
        Self::new(AssetKind::Markdown { source, shell })
    }

    pub fn stylesheet(source: Source) -> Self {
        Self::new(AssetKind::Stylesheet { source })
    }

    pub fn passthrough(source: Source) -> Self {
        Self::new(AssetKind::Passthrough { source })
    }

    /// Build the request matching a classified format.
    ///
    /// `shell` is used only by [`Format::Markdown`].
    pub fn for_format(format: Format, source: Source, shell: ShellOptions) -> Self {
        match format {
            Format::Markdown => Self::markdown(source, shell),
            Format::Stylesheet => Self::stylesheet(source),
            Format::Passthrough => Self::passthrough(source),
        }
    }

    fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            fingerprint: false,
        }
    }

    /// Request a content fingerprint in the output filename.
    pub fn fingerprinted(mut self) -> Self {
        self.fingerprint = true;
        self
    }

    pub fn format(&self) -> Format {
        match self.kind {
            AssetKind::Markdown { .. } => Format::Markdown,
            AssetKind::Stylesheet { .. } => Format::Stylesheet,
            AssetKind::Passthrough { .. } => Format::Passthrough,
        }
    }

    pub fn source(&self) -> &Source {
        match &self.kind {
            AssetKind::Markdown { source, .. }
            | AssetKind::Stylesheet { source }
            | AssetKind::Passthrough { source } => source,
        }
    }

    /// The file a fingerprint is computed from, if the request has one.
    fn fingerprint_source(&self) -> Option<&Path> {
        match self.source() {
            Source::File(path) => Some(path),
            Source::Inline(_) => None,
        }
    }
}

/// Produce the asset described by `request` at (or next to) `destination`.
///
/// Returns the path written, after extension rewriting and fingerprinting.
pub async fn write_asset(destination: &Path, request: &AssetRequest) -> Result<PathBuf, WriteError> {
    let requested_name = destination
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| WriteError::Config {
            path: destination.to_path_buf(),
            reason: "destination has no usable file name".into(),
        })?;

    let token = if request.fingerprint {
        let source = request.fingerprint_source().ok_or_else(|| WriteError::Config {
            path: destination.to_path_buf(),
            reason: "fingerprinting requires a file source, not inline data".into(),
        })?;
        let token = fingerprint::fingerprint(source)
            .await
            .map_err(|e| source_error(source, e))?;
        Some(token)
    } else {
        None
    };

    let final_name = naming::output_name(requested_name, request.format(), token.as_deref());
    let final_path = destination.with_file_name(final_name);

    match &request.kind {
        AssetKind::Markdown { source, shell } => {
            let markdown = read_text(source).await?;
            let fragment = format!(
                r#"<section class="container">{}</section>"#,
                render::markdown_to_html(&markdown)
            );
            let document = shell::render(&fragment, shell).map_err(|e| WriteError::Render {
                path: final_path.clone(),
                source: e,
            })?;
            write_bytes(&final_path, document.as_bytes()).await?;
        }
        AssetKind::Stylesheet { source } => {
            let input = match source {
                Source::File(path) => StyleInput::File(path),
                Source::Inline(text) => StyleInput::Inline(text),
            };
            let css = render::compile_stylesheet(input).map_err(|e| WriteError::Render {
                path: final_path.clone(),
                source: e,
            })?;
            write_bytes(&final_path, css.as_bytes()).await?;
        }
        AssetKind::Passthrough { source } => match source {
            Source::File(path) => {
                if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                    return Err(source_error(path, io::ErrorKind::NotFound.into()));
                }
                tokio::fs::copy(path, &final_path)
                    .await
                    .map_err(|e| io_error(&final_path, e))?;
            }
            Source::Inline(text) => write_bytes(&final_path, text.as_bytes()).await?,
        },
    }

    info!("wrote {} ({})", final_path.display(), request.format());
    Ok(final_path)
}

async fn read_text(source: &Source) -> Result<String, WriteError> {
    match source {
        Source::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| source_error(path, e)),
        Source::Inline(text) => Ok(text.clone()),
    }
}

async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| io_error(path, e))
}

fn source_error(path: &Path, source: io::Error) -> WriteError {
    WriteError::Source {
        path: path.to_path_buf(),
        source,
    }
}

fn io_error(path: &Path, source: io::Error) -> WriteError {
    WriteError::Io {
        path: path.to_path_buf(),
        source,
    }
}
