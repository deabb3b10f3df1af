// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raster handles that can be stored in slots.
//!
//! The layout tree is generic over its image type. The compositor only needs one
//! thing from it: an RGBA buffer, produced by [`SlotImage::rasterize`].

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use image::{DynamicImage, RgbaImage};

use crate::error::CompositeError;

/// An image that can be drawn into a slot.
pub trait SlotImage {
    /// Produce RGBA pixels, borrowing when the image is already decoded.
    fn rasterize(&self) -> Result<Cow<'_, RgbaImage>, CompositeError>;
}

impl SlotImage for RgbaImage {
    fn rasterize(&self) -> Result<Cow<'_, RgbaImage>, CompositeError> {
        Ok(Cow::Borrowed(self))
    }
}

impl SlotImage for DynamicImage {
    fn rasterize(&self) -> Result<Cow<'_, RgbaImage>, CompositeError> {
        Ok(match self {
            Self::ImageRgba8(rgba) => Cow::Borrowed(rgba),
            other => Cow::Owned(other.to_rgba8()),
        })
    }
}

/// A decoded, cheaply clonable RGBA buffer.
///
/// Clones share pixels, so a tree snapshot for background export does not copy images.
/// Equality is identity: two handles are equal when they share the same buffer.
#[derive(Clone)]
pub struct RasterImage(Arc<RgbaImage>);

impl RasterImage {
    /// Wrap an RGBA buffer.
    pub fn new(image: RgbaImage) -> Self {
        Self(Arc::new(image))
    }

    /// Convert any decoded image to RGBA.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self::new(image.into_rgba8())
    }

    /// Decode compressed bytes (PNG or JPEG) right away.
    pub fn decode(bytes: &[u8]) -> Result<Self, CompositeError> {
        image::load_from_memory(bytes)
            .map(Self::from_dynamic)
            .map_err(CompositeError::Decode)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// The pixels.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.0
    }
}

impl From<RgbaImage> for RasterImage {
    fn from(image: RgbaImage) -> Self {
        Self::new(image)
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl PartialEq for RasterImage {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl SlotImage for RasterImage {
    fn rasterize(&self) -> Result<Cow<'_, RgbaImage>, CompositeError> {
        Ok(Cow::Borrowed(&self.0))
    }
}

/// Compressed image bytes, decoded each time they are drawn.
///
/// Keeps memory low for large photos that are rarely rendered; decode failures show
/// up at render time as a placeholder fallback.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage(Arc<[u8]>);

impl EncodedImage {
    /// Wrap compressed bytes.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// The compressed bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl SlotImage for EncodedImage {
    fn rasterize(&self) -> Result<Cow<'_, RgbaImage>, CompositeError> {
        if self.0.is_empty() {
            return Err(CompositeError::EmptyImage);
        }
        let decoded = image::load_from_memory(&self.0).map_err(CompositeError::Decode)?;
        Ok(Cow::Owned(decoded.into_rgba8()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::encode_png;
    use image::Rgba;

    #[test]
    fn raster_handles_share_pixels() {
        let a = RasterImage::new(RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255])));
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, RasterImage::new(a.as_rgba().clone()));
        assert!(matches!(b.rasterize().unwrap(), Cow::Borrowed(_)));
        assert_eq!((a.width(), a.height()), (3, 2));
    }

    #[test]
    fn encoded_images_decode_lazily() {
        let src = RgbaImage::from_pixel(4, 4, Rgba([9, 8, 7, 255]));
        let png = encode_png(&src).unwrap();
        let enc = EncodedImage::new(png.clone());
        assert_eq!(enc.rasterize().unwrap().get_pixel(1, 1), &Rgba([9, 8, 7, 255]));
        assert_eq!(RasterImage::decode(&png).unwrap().as_rgba(), &src);

        assert!(matches!(
            EncodedImage::new(Vec::new()).rasterize(),
            Err(CompositeError::EmptyImage)
        ));
        assert!(matches!(
            EncodedImage::new(b"not an image".to_vec()).rasterize(),
            Err(CompositeError::Decode(_))
        ));
    }
}
