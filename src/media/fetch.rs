// SPDX-License-Identifier: MPL-2.0
//! Retrieval of image bytes from local paths or `http(s)` URLs.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const USER_AGENT: &str = concat!("ila_ui/", env!("CARGO_PKG_VERSION"));

/// Returns true for URLs that must be fetched over the network.
#[must_use]
pub fn is_remote(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Strips a `file://` scheme so the remainder can be read from disk.
fn local_path(url: &str) -> &str {
    url.strip_prefix("file://").unwrap_or(url)
}

/// HTTP client shared by every fetch so connections are pooled.
fn client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!("HTTP client setup failed, using defaults: {err}");
                reqwest::Client::new()
            })
    })
}

/// Reads the full content behind `url`.
pub async fn fetch(url: &str) -> Result<Vec<u8>> {
    if !is_remote(url) {
        return Ok(tokio::fs::read(local_path(url)).await?);
    }

    let response = client().get(url).send().await?;
    if !response.status().is_success() {
        return Err(Error::Network(format!("HTTP status: {}", response.status())));
    }

    Ok(response.bytes().await?.to_vec())
}

/// Downloads `url` into `destination`, returning the written path.
pub async fn save_to(url: String, destination: PathBuf) -> Result<PathBuf> {
    let bytes = fetch(&url).await?;
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&destination, bytes).await?;
    tracing::info!(url = %url, path = %destination.display(), "image saved");
    Ok(destination)
}

/// Suggested file name for a download of `url`.
#[must_use]
pub fn file_name(url: &str) -> String {
    let trimmed = url.split(['?', '#']).next().unwrap_or(url);
    Path::new(trimmed)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "image".to_string())
}
