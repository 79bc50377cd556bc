// SPDX-License-Identifier: MPL-2.0
//! Image fetching and decoding for the viewer.
//!
//! Viewer loads happen in two awaited steps: [`fetch`] retrieves the raw
//! bytes (local file or HTTP), then [`decode_bytes`] turns them into display
//! handles off the UI thread. Both steps echo the requested URL back so the
//! caller can discard results that arrive after a newer navigation.

pub mod fetch;
pub mod image;

pub use fetch::{fetch, save_to};
pub use image::{decode, ImageData};

use crate::error::{Error, Result};
use std::sync::Arc;

/// Raw image bytes shared between messages without copying.
pub type Bytes = Arc<[u8]>;

/// Fetches `url`, returning the URL alongside the outcome.
pub async fn probe(url: String) -> (String, Result<Bytes>) {
    let result = fetch(&url).await.map(Bytes::from);
    (url, result)
}

/// Decodes previously fetched bytes on the blocking pool.
///
/// A blurred variant is produced as well when `blur` is set.
pub async fn decode_bytes(url: String, bytes: Bytes, blur: bool) -> (String, Result<ImageData>) {
    let result = tokio::task::spawn_blocking(move || decode(&bytes, blur))
        .await
        .unwrap_or_else(|e| Err(Error::Decode(format!("Decode task failed: {e}"))));

    (url, result)
}

/// Fetches and decodes `url` in one go, as used for page thumbnails.
pub async fn load(url: String, blur: bool) -> (String, Result<ImageData>) {
    match probe(url).await {
        (url, Ok(bytes)) => decode_bytes(url, bytes, blur).await,
        (url, Err(err)) => (url, Err(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[tokio::test]
    async fn probe_then_decode_local_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("red.png");
        RgbaImage::from_pixel(3, 2, Rgba([255, 0, 0, 255]))
            .save(&path)
            .expect("saved");
        let url = path.to_string_lossy().into_owned();

        let (probed_url, bytes) = probe(url.clone()).await;
        assert_eq!(probed_url, url);

        let (decoded_url, image) = decode_bytes(url.clone(), bytes.expect("bytes"), true).await;
        assert_eq!(decoded_url, url);
        let image = image.expect("decoded");
        assert_eq!((image.width, image.height), (3, 2));
        assert!(image.blurred.is_some());
    }

    #[tokio::test]
    async fn probe_reports_missing_file() {
        let dir = tempdir().expect("temp dir");
        let url = dir.path().join("absent.png").to_string_lossy().into_owned();

        let (_, result) = probe(url).await;

        assert!(matches!(result, Err(Error::Io(_))));
    }
}
