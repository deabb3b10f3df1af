// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io;

use image::ImageError;
use understory_collage::{InvalidTree, LayoutError};

/// Errors from rasterizing, encoding, or exporting a collage.
///
/// `Decode` and `EmptyImage` are per-leaf failures. [`render`](crate::render::render)
/// recovers from them by drawing the slot's placeholder; they only surface directly
/// from [`SlotImage::rasterize`](crate::raster::SlotImage::rasterize).
#[derive(Debug, thiserror::Error)]
pub enum CompositeError {
    /// The requested output has no pixels.
    #[error("canvas must be non-empty, got {width}x{height}")]
    EmptyCanvas {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The requested output needs more memory than a canvas may take.
    #[error("canvas {width}x{height} exceeds the maximum canvas size")]
    CanvasTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The tree could not be laid out.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// Encoded slot image could not be decoded.
    #[error("failed to decode slot image")]
    Decode(#[source] ImageError),
    /// Slot image has zero width or height.
    #[error("slot image has no pixels")]
    EmptyImage,
    /// Output could not be encoded.
    #[error("failed to encode output image")]
    Encode(#[source] ImageError),
    /// The export was cancelled before it finished.
    #[error("export cancelled")]
    Cancelled,
    /// The background export thread could not be started.
    #[error("failed to spawn export thread")]
    Spawn(#[source] io::Error),
    /// The background export thread panicked.
    #[error("export thread panicked")]
    WorkerPanicked,
}

impl From<InvalidTree> for CompositeError {
    fn from(e: InvalidTree) -> Self {
        Self::Layout(e.into())
    }
}
