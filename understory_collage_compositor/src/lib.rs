// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collage_compositor --heading-base-level=0

//! Understory Collage Compositor: rasterize a collage tree into one image.
//!
//! The compositor lays out an Understory Collage tree in a canvas rect and draws every
//! leaf into it: a solid placeholder fill for empty slots, and a cover fit for image slots
//! (scaled to fill, centered, clipped; never letterboxed).
//!
//! - [`render::render`] draws into a new canvas and returns a [`render::Composite`] with
//!   the pixels, the layout used, and any slots that fell back to their placeholder.
//! - [`render::render_into`] and [`render::render_layout`] draw into part of an existing
//!   canvas, optionally from a precomputed drag-preview layout.
//! - [`export::export`] validates the tree and renders it at the output size;
//!   [`export::encode_png`] produces bytes for the host.
//! - [`export::ExportJob`] runs an export on a background thread over an owned snapshot,
//!   with cooperative cancellation through [`export::CancelToken`].
//!
//! Slot images are any type implementing [`raster::SlotImage`]. [`raster::RasterImage`]
//! shares decoded pixels between tree snapshots; [`raster::EncodedImage`] keeps
//! compressed bytes and decodes on demand.
//!
//! ## Minimal usage
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use understory_collage::{Color, Node, Slot};
//! use understory_collage_compositor::{RasterImage, RenderOptions, render};
//!
//! let mut tree: Node<RasterImage> = Node::column(1.0, [
//!     Node::empty(1.0, Color::RED),
//!     Node::empty(1.0, Color::BLUE),
//! ]);
//! let right = tree.slots().nth(1).map(Slot::id).unwrap();
//! tree.assign(right, RasterImage::new(RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]))));
//!
//! let out = render(&tree, 100, 50, &RenderOptions::default()).unwrap();
//! assert_eq!(out.image.get_pixel(10, 10), &Rgba(Color::RED.to_array()));
//! assert_eq!(out.image.get_pixel(90, 10), &Rgba([0, 0, 0, 255]));
//! ```
//!
//! ## Failure isolation
//!
//! A slot image that cannot be decoded does not fail the render. The slot shows its
//! placeholder color, the failure is logged with `tracing` at `warn`, and the slot id is
//! listed in [`render::Composite::fallbacks`].

mod error;
pub mod export;
pub mod raster;
pub mod render;

pub use error::CompositeError;
pub use export::{CancelToken, ExportJob, JobWatch, encode_png, export, export_with_cancel};
pub use raster::{EncodedImage, RasterImage, SlotImage};
pub use render::{
    Composite, DividerStyle, MAX_CANVAS_PIXELS, RenderOptions, divider_band, new_canvas, render,
    render_into, render_layout,
};
