//! Shared test utilities for the gist-site test suite.
//!
//! Gist payloads are built as `serde_json::Value` in the shape the GitHub API
//! returns, and served from a `wiremock::MockServer`:
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let server = MockServer::start().await;
//! mount_gist(&server, "abc", gist_json(Some("Notes"), &[("index.md", "# Hi")])).await;
//! let client = GistClient::new(&server.uri()).unwrap();
//! ```

use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =========================================================================
// Gist payloads
// =========================================================================

/// A successful gist response body with the given description and files.
pub fn gist_json(description: Option<&str>, files: &[(&str, &str)]) -> Value {
    let mut map = Map::new();
    for (name, content) in files {
        map.insert(
            name.to_string(),
            json!({
                "filename": name,
                "type": "text/plain",
                "content": content,
                "truncated": false,
            }),
        );
    }
    json!({
        "id": "test",
        "description": description,
        "files": Value::Object(map),
    })
}

// =========================================================================
// Mock server
// =========================================================================

/// Serve `body` for `GET /gists/{id}`.
pub async fn mount_gist(server: &MockServer, id: &str, body: Value) {
    mount_gist_delayed(server, id, body, Duration::ZERO).await;
}

/// Serve `body` for `GET /gists/{id}` after `delay`.
pub async fn mount_gist_delayed(server: &MockServer, id: &str, body: Value, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/gists/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
        .mount(server)
        .await;
}

// =========================================================================
// Files
// =========================================================================

/// Write `contents` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// Sorted file names in `dir`.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
