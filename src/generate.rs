//! Site build orchestration.
//!
//! Drives one full build from a validated [`BuildConfig`] into an output
//! directory. The steps run in a fixed order because every document links to
//! the main stylesheet by its *fingerprinted* name, which is only known once
//! the theme has been written:
//!
//! 1. create the output root
//! 2. write the theme as `style.<hash>.css`
//! 3. write the avatar as `avatar.<hash>.<ext>`, if configured
//! 4. write the index copies (stylesheets among them fingerprinted)
//! 5. create one directory per link
//! 6. resolve all links ([`index::collect_links`])
//! 7. write `index.html`
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── style.3f2a9c01b4e87d55.css     # theme
//! ├── avatar.9b1c0e4d2a7f6b35.png    # optional
//! ├── favicon.ico                    # index copies
//! └── notes/                         # one directory per link with output_dir
//!     ├── notes.css
//!     └── index.html
//! ```
//!
//! Directory creation is idempotent and nothing is deleted first: building
//! into an existing tree overwrites the files this build produces.
//!
//! ## Themes
//!
//! Built-in themes are SCSS compiled into the binary. They are staged into a
//! temporary file so the fingerprint, like every other one, is taken from a
//! real source file.

use crate::config::{self, BuildConfig, ConfigError, CopyEntry};
use crate::format::Format;
use crate::gist::{FetchError, GistClient};
use crate::index::{self, AggregateError, IndexPage, LinkContext};
use crate::shell::ShellOptions;
use crate::types::BuildReport;
use crate::writer::{self, AssetRequest, Source, WriteError};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error on {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Remote(#[from] FetchError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

/// Theme used when none is configured or the name is unknown.
pub const DEFAULT_THEME: &str = "default";

const BASE_SCSS: &str = include_str!("../static/themes/_base.scss");

const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("default", include_str!("../static/themes/default.scss")),
    ("dark", include_str!("../static/themes/dark.scss")),
];

const FAVICON: &str = "favicon.ico";

/// A resolved `theme` setting.
#[derive(Debug, Clone, PartialEq)]
pub enum Theme {
    /// Compiled-in theme: its variables followed by the shared layout.
    Builtin { name: &'static str, source: String },
    /// A stylesheet on disk.
    File(PathBuf),
}

/// Resolve a `theme` value to a built-in or a file.
///
/// Unknown names fall back to [`DEFAULT_THEME`] with a warning.
pub fn resolve_theme(theme: Option<&str>) -> Theme {
    let requested = match theme {
        Some(value) if config::is_theme_path(value) => {
            debug!("theme: stylesheet {value}");
            return Theme::File(PathBuf::from(value));
        }
        Some(name) => name,
        None => DEFAULT_THEME,
    };

    let found = BUILTIN_THEMES.iter().find(|(name, _)| *name == requested);
    let (name, variables) = match found {
        Some(theme) => *theme,
        None => {
            warn!("unknown theme {requested:?}, using {DEFAULT_THEME:?}");
            BUILTIN_THEMES[0]
        }
    };
    debug!("theme: built-in {name}");
    Theme::Builtin {
        name,
        source: format!("{variables}\n{BASE_SCSS}"),
    }
}

/// Run a full build of `config` into `output_dir`.
pub async fn build(config: &BuildConfig, output_dir: &Path) -> Result<BuildReport, BuildError> {
    config.validate()?;
    create_dir(output_dir).await?;

    let stylesheet = write_theme(config.theme.as_deref(), output_dir).await?;
    let main_stylesheet = file_name(&stylesheet);
    info!("main stylesheet: {main_stylesheet}");

    let avatar = match &config.avatar {
        Some(path) => Some(write_avatar(path, output_dir).await?),
        None => None,
    };

    let copies = write_index_copies(config, output_dir, &main_stylesheet).await?;

    for dir in config.links.iter().filter_map(|link| link.output_dir()) {
        create_dir(&output_dir.join(dir)).await?;
    }

    let client = GistClient::new(&config.api_base)?;
    let ctx = LinkContext {
        client: &client,
        output_root: output_dir,
        main_stylesheet: &main_stylesheet,
        main_title: config.title.as_deref(),
    };
    let links = index::collect_links(&config.links, ctx, config.fetch).await?;

    let avatar_name = avatar.as_deref().map(file_name);
    let page = IndexPage {
        avatar: index::resolve_avatar(avatar_name.as_deref(), config.gravatar.as_deref()),
        main_title: config.title.clone(),
        social_position: config.social_position,
        main_stylesheet: main_stylesheet.clone(),
        stylesheets: copies
            .iter()
            .map(|path| file_name(path))
            .filter(|name| Format::classify(name) == Format::Stylesheet)
            .collect(),
        favicon: config
            .index_copies
            .iter()
            .any(|copy| copy.output_name() == Some(FAVICON)),
    };
    let entries: Vec<_> = links.iter().flat_map(|link| link.entries.clone()).collect();
    let index = index::write_index(output_dir, &entries, &config.social_links, &page).await?;

    Ok(BuildReport {
        output_dir: output_dir.to_path_buf(),
        stylesheet,
        avatar,
        copies,
        links,
        index,
    })
}

async fn write_theme(theme: Option<&str>, output_dir: &Path) -> Result<PathBuf, BuildError> {
    let destination = output_dir.join("style.css");
    match resolve_theme(theme) {
        Theme::File(path) => {
            let request = AssetRequest::stylesheet(Source::File(path)).fingerprinted();
            Ok(writer::write_asset(&destination, &request).await?)
        }
        Theme::Builtin { name, source } => {
            let staging = tempfile::TempDir::new().map_err(|source| BuildError::Io {
                path: std::env::temp_dir(),
                source,
            })?;
            let staged = staging.path().join(format!("{name}.scss"));
            tokio::fs::write(&staged, source)
                .await
                .map_err(|source| BuildError::Io {
                    path: staged.clone(),
                    source,
                })?;
            let request = AssetRequest::stylesheet(Source::File(staged)).fingerprinted();
            Ok(writer::write_asset(&destination, &request).await?)
        }
    }
}

async fn write_avatar(path: &Path, output_dir: &Path) -> Result<PathBuf, BuildError> {
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("avatar.{ext}"),
        None => "avatar".to_string(),
    };
    let request = AssetRequest::passthrough(Source::File(path.to_path_buf())).fingerprinted();
    Ok(writer::write_asset(&output_dir.join(name), &request).await?)
}

async fn write_index_copies(
    config: &BuildConfig,
    output_dir: &Path,
    main_stylesheet: &str,
) -> Result<Vec<PathBuf>, BuildError> {
    let shell = ShellOptions {
        main_title: config.title.clone(),
        ..ShellOptions::new(main_stylesheet)
    };

    let mut written = Vec::with_capacity(config.index_copies.len());
    for copy in &config.index_copies {
        let name = copy_name(copy)?;
        let format = Format::classify(name);
        let mut request = AssetRequest::for_format(format, Source::File(copy.input.clone()), shell.clone());
        if format == Format::Stylesheet {
            request = request.fingerprinted();
        }
        written.push(writer::write_asset(&output_dir.join(name), &request).await?);
    }
    Ok(written)
}

fn copy_name(copy: &CopyEntry) -> Result<&str, BuildError> {
    copy.output_name().ok_or_else(|| {
        BuildError::Config(ConfigError::Validation(format!(
            "cannot derive an output name from {}",
            copy.input.display()
        )))
    })
}

async fn create_dir(path: &Path) -> Result<(), BuildError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LinkEntry, RemoteLink, SocialLink, StaticLink};
    use crate::fingerprint::TOKEN_LEN;
    use crate::test_helpers::{gist_json, list_dir, mount_gist, write_file};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> BuildConfig {
        BuildConfig {
            api_base: server.uri(),
            ..BuildConfig::default()
        }
    }

    fn is_fingerprinted(name: &str, stem: &str, ext: &str) -> bool {
        name.len() == stem.len() + TOKEN_LEN + ext.len() + 2
            && name.starts_with(&format!("{stem}."))
            && name.ends_with(&format!(".{ext}"))
    }

    // =========================================================================
    // Themes
    // =========================================================================

    #[test]
    fn default_theme_when_unset() {
        assert!(matches!(resolve_theme(None), Theme::Builtin { name: "default", .. }));
    }

    #[test]
    fn dark_theme_by_name() {
        match resolve_theme(Some("dark")) {
            Theme::Builtin { name, source } => {
                assert_eq!(name, "dark");
                assert!(source.contains("$background: #16181d"));
                assert!(source.contains(".button"));
            }
            other => panic!("expected built-in, got {other:?}"),
        }
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(resolve_theme(Some("neon")), resolve_theme(None));
    }

    #[test]
    fn theme_path_is_file() {
        assert_eq!(
            resolve_theme(Some("/site/theme.scss")),
            Theme::File(PathBuf::from("/site/theme.scss"))
        );
    }

    #[test]
    fn builtin_themes_compile() {
        for (name, _) in BUILTIN_THEMES {
            let Theme::Builtin { source, .. } = resolve_theme(Some(*name)) else {
                panic!("{name} is not built in");
            };
            let css = crate::render::compile_stylesheet(crate::render::StyleInput::Inline(&source))
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert!(css.contains(".wrapper"), "{name}");
        }
    }

    // =========================================================================
    // Full builds
    // =========================================================================

    #[tokio::test]
    async fn minimal_build_writes_theme_and_index() {
        let server = MockServer::start().await;
        let out = TempDir::new().unwrap();
        let dist = out.path().join("dist");

        let report = build(&config_for(&server), &dist).await.unwrap();

        let names = list_dir(&dist);
        assert_eq!(names.len(), 2);
        assert_eq!(names[0], "index.html");
        assert!(is_fingerprinted(&names[1], "style", "css"), "{names:?}");
        assert_eq!(report.index, dist.join("index.html"));
        assert_eq!(report.file_count(), 2);

        let html = fs::read_to_string(dist.join("index.html")).unwrap();
        assert!(html.contains(&format!("/{}", names[1])));
        assert!(html.contains("<title>Home</title>"));
        assert!(html.contains(index::DEFAULT_AVATAR));
    }

    #[tokio::test]
    async fn full_build() {
        let server = MockServer::start().await;
        mount_gist(
            &server,
            "g1",
            gist_json(Some("Notes"), &[("index.md", "# Notes\n\nFirst."), ("notes.scss", "h1 { margin: 0 }")]),
        )
        .await;

        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let avatar = write_file(src.path(), "me.png", b"\x89PNG fake avatar");
        let favicon = write_file(src.path(), "favicon.ico", b"ICO");
        let extra = write_file(src.path(), "extra.scss", ".x { .y { color: red; } }");
        let link_css = write_file(src.path(), "link.css", "body { padding: 0 }");

        let config = BuildConfig {
            title: Some("Jane".into()),
            avatar: Some(avatar),
            index_copies: vec![CopyEntry::new(favicon), CopyEntry::new(extra)],
            links: vec![
                LinkEntry::Remote(RemoteLink {
                    output_dir: "notes".into(),
                    gist_id: "g1".into(),
                    copy: vec![CopyEntry::new(link_css)],
                }),
                LinkEntry::Static(StaticLink {
                    title: "Blog".into(),
                    url: "https://blog.example".into(),
                }),
            ],
            social_links: vec![SocialLink {
                kind: "github".into(),
                url: "https://github.com/jane".into(),
            }],
            ..config_for(&server)
        };

        let report = build(&config, out.path()).await.unwrap();

        // Root
        let root = list_dir(out.path());
        assert_eq!(root.len(), 6, "{root:?}");
        assert!(root.contains(&"favicon.ico".to_string()));
        assert!(root.contains(&"index.html".to_string()));
        assert!(root.contains(&"notes".to_string()));
        let avatar_name = file_name(report.avatar.as_ref().unwrap());
        assert!(is_fingerprinted(&avatar_name, "avatar", "png"));
        let extra_name = file_name(&report.copies[1]);
        assert!(is_fingerprinted(&extra_name, "extra", "css"));
        assert_eq!(file_name(&report.copies[0]), "favicon.ico");

        // Link directory
        assert_eq!(
            list_dir(&out.path().join("notes")),
            ["index.html", "link.css", "notes.css"]
        );
        let main = file_name(&report.stylesheet);
        let page = fs::read_to_string(out.path().join("notes/index.html")).unwrap();
        assert!(page.contains("Notes | Jane"));
        assert!(page.contains(&format!("/{main}")));
        assert!(page.contains("./link.css"));
        assert!(page.contains("./notes.css"));
        assert!(!page.contains("favicon"));

        // Index
        let html = fs::read_to_string(&report.index).unwrap();
        assert!(html.contains("Home | Jane"));
        assert!(html.contains(&avatar_name));
        assert!(html.contains(&format!("./{extra_name}")));
        assert!(html.contains("./favicon.ico"));
        assert!(html.contains("fab fa-github"));
        let notes = html.find(">Notes<").unwrap();
        let blog = html.find(">Blog<").unwrap();
        assert!(notes < blog);

        let entries: Vec<_> = report.entries().map(|e| e.url.as_str()).collect();
        assert_eq!(entries, ["notes", "https://blog.example"]);
    }

    #[tokio::test]
    async fn rebuild_reproduces_fingerprinted_names() {
        let server = MockServer::start().await;
        let src = TempDir::new().unwrap();
        let avatar = write_file(src.path(), "me.jpg", b"jpeg bytes");
        let config = BuildConfig {
            avatar: Some(avatar),
            theme: Some("dark".into()),
            ..config_for(&server)
        };

        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let a = build(&config, first.path()).await.unwrap();
        let b = build(&config, second.path()).await.unwrap();

        assert_eq!(file_name(&a.stylesheet), file_name(&b.stylesheet));
        assert_eq!(
            file_name(a.avatar.as_ref().unwrap()),
            file_name(b.avatar.as_ref().unwrap())
        );
        assert_eq!(list_dir(first.path()), list_dir(second.path()));
    }

    #[tokio::test]
    async fn themes_produce_different_stylesheets() {
        let server = MockServer::start().await;
        let light = TempDir::new().unwrap();
        let dark = TempDir::new().unwrap();
        let a = build(&config_for(&server), light.path()).await.unwrap();
        let b = build(
            &BuildConfig {
                theme: Some("dark".into()),
                ..config_for(&server)
            },
            dark.path(),
        )
        .await
        .unwrap();
        assert_ne!(file_name(&a.stylesheet), file_name(&b.stylesheet));
    }

    #[tokio::test]
    async fn custom_theme_file() {
        let server = MockServer::start().await;
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let theme = write_file(src.path(), "mine.scss", "$c: #123456;\nbody { color: $c; }");

        let report = build(
            &BuildConfig {
                theme: Some(theme.to_string_lossy().into_owned()),
                ..config_for(&server)
            },
            out.path(),
        )
        .await
        .unwrap();

        let css = fs::read_to_string(&report.stylesheet).unwrap();
        assert_eq!(css.trim(), "body{color:#123456}");
    }

    #[tokio::test]
    async fn gravatar_used_without_avatar() {
        let server = MockServer::start().await;
        let out = TempDir::new().unwrap();
        let report = build(
            &BuildConfig {
                gravatar: Some("abc123".into()),
                ..config_for(&server)
            },
            out.path(),
        )
        .await
        .unwrap();
        let html = fs::read_to_string(report.index).unwrap();
        assert!(html.contains("https://gravatar.com/avatar/abc123?s=200"));
    }

    #[tokio::test]
    async fn failed_fetch_aborts_before_index() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gists/limited"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "rate limited"})))
            .mount(&server)
            .await;
        let out = TempDir::new().unwrap();
        let config = BuildConfig {
            links: vec![LinkEntry::Remote(RemoteLink {
                output_dir: "notes".into(),
                gist_id: "limited".into(),
                copy: vec![],
            })],
            ..config_for(&server)
        };

        let result = build(&config, out.path()).await;
        assert!(matches!(
            result,
            Err(BuildError::Aggregate(AggregateError::Remote(FetchError::NotSuccessful { .. })))
        ));
        assert!(!out.path().join("index.html").exists());
        assert!(list_dir(&out.path().join("notes")).is_empty());
    }

    #[tokio::test]
    async fn server_error_aborts_build() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let out = TempDir::new().unwrap();
        let config = BuildConfig {
            links: vec![LinkEntry::Remote(RemoteLink {
                output_dir: "notes".into(),
                gist_id: "boom".into(),
                copy: vec![],
            })],
            ..config_for(&server)
        };

        let err = build(&config, out.path()).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn missing_avatar_aborts_build() {
        let server = MockServer::start().await;
        let out = TempDir::new().unwrap();
        let config = BuildConfig {
            avatar: Some(out.path().join("nope.png")),
            ..config_for(&server)
        };
        let result = build(&config, out.path()).await;
        assert!(matches!(result, Err(BuildError::Write(WriteError::Source { .. }))));
    }

    #[tokio::test]
    async fn building_into_existing_directory_is_fine() {
        let server = MockServer::start().await;
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("keep.txt"), "old").unwrap();
        build(&config_for(&server), out.path()).await.unwrap();
        build(&config_for(&server), out.path()).await.unwrap();
        assert!(out.path().join("keep.txt").exists());
        assert_eq!(list_dir(out.path()).len(), 3);
    }

    #[tokio::test]
    async fn invalid_config_rejected_before_writing() {
        let out = TempDir::new().unwrap();
        let dist = out.path().join("dist");
        let config = BuildConfig {
            api_base: "not a url".into(),
            ..BuildConfig::default()
        };
        let result = build(&config, &dist).await;
        assert!(matches!(result, Err(BuildError::Config(_))));
        assert!(!dist.exists());
    }
}
