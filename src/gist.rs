//! Remote bundle fetcher for GitHub gists.
//!
//! One `GET {api_base}/gists/{id}` per bundle, with a fixed header set. The
//! body is buffered in full and parsed as JSON before anything is trusted:
//!
//! - a non-200 status is an error (no retry)
//! - a 200 without a `files` key is an error too. GitHub answers some
//!   failures, rate limiting among them, with a 200 and a `message` payload.
//! - truncated files are completed from their `raw_url`
//! - every filename must be a single plain path component
//!
//! Bundles are fetched fresh on every build and never cached.

use log::{debug, error, info};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// GitHub's public REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Identifies this tool to the gist API.
pub const DEFAULT_USER_AGENT: &str = concat!("gist-site/", env!("CARGO_PKG_VERSION"));

const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request for gist {id} failed: {source}")]
    Http { id: String, source: reqwest::Error },
    #[error("gist {id}: server returned {status}")]
    Status { id: String, status: StatusCode },
    #[error("gist {id}: not a successful response: {message}")]
    NotSuccessful { id: String, message: String },
    #[error("gist {id}: invalid JSON: {source}")]
    Json { id: String, source: serde_json::Error },
    #[error("gist {id}: refusing unsafe file name {filename:?}")]
    UnsafeFilename { id: String, filename: String },
    #[error("gist {id}: file {filename} has no content")]
    MissingContent { id: String, filename: String },
}

/// A fetched gist, reduced to what the build needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Gist {
    pub id: String,
    pub description: Option<String>,
    /// Files in filename order.
    pub files: Vec<GistFile>,
}

impl Gist {
    /// Index title: the description, or the id when it is missing or blank.
    pub fn title(&self) -> &str {
        match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => description,
            _ => &self.id,
        }
    }

    pub fn has_file(&self, filename: &str) -> bool {
        self.files.iter().any(|f| f.filename == filename)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GistFile {
    pub filename: String,
    pub content: String,
}

#[derive(Deserialize)]
struct RawGist {
    #[serde(default)]
    description: Option<String>,
    files: BTreeMap<String, RawGistFile>,
}

#[derive(Deserialize)]
struct RawGistFile {
    filename: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    truncated: bool,
    #[serde(default)]
    raw_url: Option<String>,
}

/// HTTP client bound to one gist API endpoint.
#[derive(Debug, Clone)]
pub struct GistClient {
    http: reqwest::Client,
    api_base: String,
}

impl GistClient {
    pub fn new(api_base: &str) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_V3));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetch gist `id` and return its files.
    pub async fn fetch(&self, id: &str) -> Result<Gist, FetchError> {
        let url = format!("{}/gists/{}", self.api_base, id);
        debug!("GET {url}");
        let body = self.get_text(id, &url).await?;

        let json_error = |source: serde_json::Error| {
            error!("gist {id}: invalid JSON response: {source}");
            FetchError::Json {
                id: id.to_string(),
                source,
            }
        };
        let value: serde_json::Value = serde_json::from_str(&body).map_err(json_error)?;
        if value.get("files").is_none_or(|files| files.is_null()) {
            let message = value
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("response has no files")
                .to_string();
            error!("gist {id}: not a successful response: {message}");
            return Err(FetchError::NotSuccessful {
                id: id.to_string(),
                message,
            });
        }
        let raw: RawGist = serde_json::from_value(value).map_err(json_error)?;

        let mut files = Vec::with_capacity(raw.files.len());
        for file in raw.files.into_values() {
            if !is_safe_filename(&file.filename) {
                error!("gist {id}: unsafe file name {:?}", file.filename);
                return Err(FetchError::UnsafeFilename {
                    id: id.to_string(),
                    filename: file.filename,
                });
            }
            let content = match (file.content, file.truncated, file.raw_url) {
                (_, true, Some(raw_url)) => {
                    debug!("gist {id}: {} is truncated, fetching {raw_url}", file.filename);
                    self.get_text(id, &raw_url).await?
                }
                (Some(content), _, _) => content,
                (None, _, _) => {
                    error!("gist {id}: {} has no content", file.filename);
                    return Err(FetchError::MissingContent {
                        id: id.to_string(),
                        filename: file.filename,
                    });
                }
            };
            files.push(GistFile {
                filename: file.filename,
                content,
            });
        }
        files.sort_by(|a, b| a.filename.cmp(&b.filename));

        info!("fetched gist {id} ({} files)", files.len());
        Ok(Gist {
            id: id.to_string(),
            description: raw.description,
            files,
        })
    }

    async fn get_text(&self, id: &str, url: &str) -> Result<String, FetchError> {
        let http_error = |source: reqwest::Error| {
            error!("gist {id}: GET {url} failed: {source}");
            FetchError::Http {
                id: id.to_string(),
                source,
            }
        };
        let response = self.http.get(url).send().await.map_err(http_error)?;
        let status = response.status();
        if status != StatusCode::OK {
            error!("gist {id}: GET {url} returned {status}");
            return Err(FetchError::Status {
                id: id.to_string(),
                status,
            });
        }
        response.text().await.map_err(http_error)
    }
}

/// A filename that names exactly one entry inside the output directory.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !name.starts_with('~')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gist_json, mount_gist};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetches_files_in_name_order() {
        let server = MockServer::start().await;
        mount_gist(
            &server,
            "abc123",
            gist_json(Some("My notes"), &[("z.md", "# Z"), ("a.scss", "p{}")]),
        )
        .await;

        let client = GistClient::new(&server.uri()).unwrap();
        let gist = client.fetch("abc123").await.unwrap();

        assert_eq!(gist.id, "abc123");
        assert_eq!(gist.title(), "My notes");
        let names: Vec<&str> = gist.files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, ["a.scss", "z.md"]);
        assert_eq!(gist.files[1].content, "# Z");
    }

    #[tokio::test]
    async fn sends_fixed_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gists/hdr"))
            .and(header("accept", ACCEPT_GITHUB_V3))
            .and(header("content-type", "application/json"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(gist_json(None, &[])))
            .expect(1)
            .mount(&server)
            .await;

        let client = GistClient::new(&server.uri()).unwrap();
        client.fetch("hdr").await.unwrap();
    }

    #[tokio::test]
    async fn non_200_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gists/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;

        let client = GistClient::new(&server.uri()).unwrap();
        let err = client.fetch("missing").await.unwrap_err();
        match err {
            FetchError::Status { id, status } => {
                assert_eq!(id, "missing");
                assert_eq!(status, StatusCode::NOT_FOUND);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ok_without_files_is_not_successful() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gists/limited"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "rate limited"})))
            .mount(&server)
            .await;

        let client = GistClient::new(&server.uri()).unwrap();
        let err = client.fetch("limited").await.unwrap_err();
        assert!(
            matches!(&err, FetchError::NotSuccessful { message, .. } if message == "rate limited"),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn invalid_json_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gists/html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = GistClient::new(&server.uri()).unwrap();
        assert!(matches!(
            client.fetch("html").await,
            Err(FetchError::Json { .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_api_is_http_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = GistClient::new(&format!("http://127.0.0.1:{port}")).unwrap();
        let err = client.fetch("gone").await.unwrap_err();
        assert!(matches!(&err, FetchError::Http { id, .. } if id == "gone"), "{err:?}");
    }

    #[tokio::test]
    async fn file_without_content_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gists/empty"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "description": "d",
                "files": { "a.md": { "filename": "a.md" } },
            })))
            .mount(&server)
            .await;

        let client = GistClient::new(&server.uri()).unwrap();
        assert!(matches!(
            client.fetch("empty").await,
            Err(FetchError::MissingContent { filename, .. }) if filename == "a.md"
        ));
    }

    #[tokio::test]
    async fn truncated_file_fetched_from_raw_url() {
        let server = MockServer::start().await;
        let raw_url = format!("{}/raw/big.md", server.uri());
        Mock::given(method("GET"))
            .and(path("/gists/big"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "description": "Big",
                "files": {
                    "big.md": {
                        "filename": "big.md",
                        "content": "# partial",
                        "truncated": true,
                        "raw_url": raw_url,
                    }
                }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/raw/big.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# full content"))
            .mount(&server)
            .await;

        let client = GistClient::new(&server.uri()).unwrap();
        let gist = client.fetch("big").await.unwrap();
        assert_eq!(gist.files[0].content, "# full content");
    }

    #[tokio::test]
    async fn unsafe_filename_rejected() {
        let server = MockServer::start().await;
        mount_gist(
            &server,
            "evil",
            gist_json(Some("x"), &[("../../etc/passwd", "root")]),
        )
        .await;

        let client = GistClient::new(&server.uri()).unwrap();
        assert!(matches!(
            client.fetch("evil").await,
            Err(FetchError::UnsafeFilename { .. })
        ));
    }

    #[test]
    fn title_falls_back_to_id() {
        let mut gist = Gist {
            id: "deadbeef".into(),
            description: None,
            files: vec![],
        };
        assert_eq!(gist.title(), "deadbeef");
        gist.description = Some("   ".into());
        assert_eq!(gist.title(), "deadbeef");
        gist.description = Some("Notes".into());
        assert_eq!(gist.title(), "Notes");
    }

    #[test]
    fn safe_filenames() {
        assert!(is_safe_filename("index.md"));
        assert!(is_safe_filename(".nojekyll"));
        assert!(!is_safe_filename(""));
        assert!(!is_safe_filename(".."));
        assert!(!is_safe_filename("a/b.md"));
        assert!(!is_safe_filename("a\\b.md"));
    }

    #[test]
    fn trailing_slash_trimmed_from_api_base() {
        let client = GistClient::new("https://api.example.com/").unwrap();
        assert_eq!(client.api_base(), "https://api.example.com");
    }
}
