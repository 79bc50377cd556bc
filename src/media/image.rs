// SPDX-License-Identifier: MPL-2.0
//! Decoding of fetched bytes into iced image handles.

use crate::config::REVEAL_BLUR_SIGMA;
use crate::error::Result;
use iced::widget::image;
use image_rs::{DynamicImage, GenericImageView};

/// Longest side of the downscaled copy that gets blurred.
const BLUR_PREVIEW_SIZE: u32 = 256;

/// A decoded image ready for display.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    /// Obscured variant shown until the image is revealed.
    pub blurred: Option<image::Handle>,
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
}

impl ImageData {
    /// Whether the natural size already fits inside `viewport` (width, height).
    #[must_use]
    pub fn fits_within(&self, viewport: (f32, f32)) -> bool {
        self.width as f32 <= viewport.0 && self.height as f32 <= viewport.1
    }
}

fn to_handle(img: &DynamicImage) -> image::Handle {
    let (width, height) = img.dimensions();
    image::Handle::from_rgba(width, height, img.to_rgba8().into_vec())
}

/// Decodes encoded bytes (PNG, JPEG, ...), optionally with a blurred copy.
///
/// # Errors
///
/// Returns [`crate::error::Error::Decode`] if the format is unknown or the
/// data is corrupt.
pub fn decode(bytes: &[u8], blur: bool) -> Result<ImageData> {
    let img = image_rs::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();

    let blurred = blur.then(|| {
        let preview = img.thumbnail(BLUR_PREVIEW_SIZE, BLUR_PREVIEW_SIZE);
        let scale = preview.width().max(1) as f32 / width.max(1) as f32;
        to_handle(&preview.blur((REVEAL_BLUR_SIGMA * scale).max(1.0)))
    });

    Ok(ImageData {
        handle: to_handle(&img),
        blurred,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encoded");
        bytes
    }

    #[test]
    fn decode_reports_natural_size() {
        let image = decode(&png(40, 30), false).expect("decoded");
        assert_eq!((image.width, image.height), (40, 30));
        assert!(image.blurred.is_none());
    }

    #[test]
    fn blurred_variant_is_built_on_request() {
        let image = decode(&png(600, 300), true).expect("decoded");
        assert!(image.blurred.is_some());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode(b"not an image", false).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn fits_within_compares_natural_size() {
        let image = decode(&png(40, 30), false).expect("decoded");
        assert!(image.fits_within((40.0, 30.0)));
        assert!(!image.fits_within((39.0, 100.0)));
    }
}
