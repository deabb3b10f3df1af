// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rasterizing a tree into an RGBA canvas.
//!
//! Rendering is a single pass over a [`Layout`]:
//!
//! 1) The layout bounds are filled with the background color.
//! 2) Each leaf rect is rounded to whole pixels. Adjacent leaves round shared edges the same
//!    way, so the canvas is tiled without gaps or double coverage.
//! 3) Empty slots are filled with their placeholder. Image slots are scaled to cover the
//!    leaf (`scale = max(w / iw, h / ih)`), centered, and clipped to it.
//! 4) Dividers, if enabled, are blended over the boundaries.
//!
//! Interactive previews, thumbnails, and exports all go through this same pass; only
//! the rect and [`RenderOptions`] differ.

use image::imageops::{self, FilterType};
use image::{Pixel, Rgba, RgbaImage};
use kurbo::Rect;
use tracing::{debug, warn};
use understory_collage::{Color, Layout, Node, SlotContent, SlotId, SplitAxis};

use crate::error::CompositeError;
use crate::export::CancelToken;
use crate::raster::SlotImage;

/// How dividers are drawn over boundaries.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DividerStyle {
    /// Divider color; its alpha blends over the slots.
    pub color: Color,
    /// Thickness in pixels, centered on the boundary.
    pub thickness: f64,
}

/// Options for one render pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Fill behind the slots.
    pub background: Color,
    /// Divider style, or `None` to draw no dividers.
    pub dividers: Option<DividerStyle>,
    /// Resampling filter for image slots.
    pub filter: FilterType,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            dividers: None,
            filter: FilterType::Triangle,
        }
    }
}

/// Output of [`render`].
#[derive(Clone, Debug)]
pub struct Composite {
    /// The rendered pixels.
    pub image: RgbaImage,
    /// The layout that was drawn.
    pub layout: Layout,
    /// Image slots that could not be rasterized and show their placeholder instead.
    pub fallbacks: Vec<SlotId>,
}

/// Largest canvas, in pixels, that rendering will allocate (1 GiB of RGBA).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Allocate a transparent `width` x `height` canvas.
///
/// Fails with [`CompositeError::EmptyCanvas`] for a zero dimension and with
/// [`CompositeError::CanvasTooLarge`] when the buffer would exceed
/// [`MAX_CANVAS_PIXELS`] or not fit in memory.
pub fn new_canvas(width: u32, height: u32) -> Result<RgbaImage, CompositeError> {
    if width == 0 || height == 0 {
        return Err(CompositeError::EmptyCanvas { width, height });
    }
    let pixels = u64::from(width) * u64::from(height);
    let fits = pixels <= MAX_CANVAS_PIXELS
        && pixels
            .checked_mul(4)
            .is_some_and(|bytes| usize::try_from(bytes).is_ok());
    if !fits {
        return Err(CompositeError::CanvasTooLarge { width, height });
    }
    Ok(RgbaImage::new(width, height))
}

/// Render `root` into a new `width` x `height` canvas.
pub fn render<I: SlotImage>(
    root: &Node<I>,
    width: u32,
    height: u32,
    options: &RenderOptions,
) -> Result<Composite, CompositeError> {
    render_cancellable(root, width, height, options, None)
}

pub(crate) fn render_cancellable<I: SlotImage>(
    root: &Node<I>,
    width: u32,
    height: u32,
    options: &RenderOptions,
    cancel: Option<&CancelToken>,
) -> Result<Composite, CompositeError> {
    let mut image = new_canvas(width, height)?;
    let bounds = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
    let layout = Layout::compute(root, bounds)?;
    let fallbacks = render_layout(root, &layout, &mut image, options, cancel)?;
    Ok(Composite {
        image,
        layout,
        fallbacks,
    })
}

/// Render `root` into the `rect` region of an existing canvas.
///
/// Pixels outside `rect` are left alone. Returns the layout that was drawn and the
/// fallback slots.
pub fn render_into<I: SlotImage>(
    root: &Node<I>,
    rect: Rect,
    canvas: &mut RgbaImage,
    options: &RenderOptions,
) -> Result<(Layout, Vec<SlotId>), CompositeError> {
    let layout = Layout::compute(root, rect)?;
    let fallbacks = render_layout(root, &layout, canvas, options, None)?;
    Ok((layout, fallbacks))
}

/// Render a precomputed layout of `root`, such as a drag preview.
///
/// `cancel` is checked before each leaf. Leaves whose slot is missing from `root` are
/// skipped.
pub fn render_layout<I: SlotImage>(
    root: &Node<I>,
    layout: &Layout,
    canvas: &mut RgbaImage,
    options: &RenderOptions,
    cancel: Option<&CancelToken>,
) -> Result<Vec<SlotId>, CompositeError> {
    let size = (canvas.width(), canvas.height());
    fill(canvas, pixel_span(layout.bounds(), size), options.background);

    let mut fallbacks = Vec::new();
    for leaf in layout.leaves() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(CompositeError::Cancelled);
        }
        let span = pixel_span(leaf.rect, size);
        if span.is_empty() {
            continue;
        }
        let Some(slot) = root.find_slot(leaf.slot) else {
            warn!(slot = %leaf.slot, "layout leaf not found in tree; skipped");
            continue;
        };
        match slot.content() {
            SlotContent::Empty(color) => fill(canvas, span, color),
            SlotContent::Image(img) => {
                if let Err(error) = draw_cover(canvas, span, img, options.filter) {
                    warn!(slot = %slot.id(), %error, "slot image fell back to placeholder");
                    fill(canvas, span, slot.placeholder());
                    fallbacks.push(slot.id());
                }
            }
        }
    }

    if let Some(style) = options.dividers {
        for d in layout.dividers() {
            let band = divider_band(d.axis, d.line, d.offset, style.thickness);
            fill(canvas, pixel_span(band, size), style.color);
        }
    }
    debug!(
        leaves = layout.leaves().len(),
        fallbacks = fallbacks.len(),
        "rendered layout"
    );
    Ok(fallbacks)
}

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PixelSpan {
    pub(crate) x0: u32,
    pub(crate) y0: u32,
    pub(crate) x1: u32,
    pub(crate) y1: u32,
}

impl PixelSpan {
    fn is_empty(self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    fn width(self) -> u32 {
        self.x1 - self.x0
    }

    fn height(self) -> u32 {
        self.y1 - self.y0
    }
}

/// Round `rect` to whole pixels and clip it to a canvas of `size`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "values are rounded and clamped to the canvas size, which fits in u32"
)]
pub(crate) fn pixel_span(rect: Rect, size: (u32, u32)) -> PixelSpan {
    let r = rect.round();
    let clamp = |v: f64, max: u32| v.clamp(0.0, f64::from(max)) as u32;
    PixelSpan {
        x0: clamp(r.x0, size.0),
        y0: clamp(r.y0, size.1),
        x1: clamp(r.x1, size.0),
        y1: clamp(r.y1, size.1),
    }
}

fn fill(canvas: &mut RgbaImage, span: PixelSpan, color: Color) {
    if span.is_empty() {
        return;
    }
    let px = Rgba(color.to_array());
    let opaque = color.a == u8::MAX;
    for y in span.y0..span.y1 {
        for x in span.x0..span.x1 {
            let dst = canvas.get_pixel_mut(x, y);
            if opaque {
                *dst = px;
            } else {
                dst.blend(&px);
            }
        }
    }
}

/// Scale `img` to cover `span`, center it, and draw the overlapping part.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source crop sizes are rounded and clamped to the source dimensions"
)]
fn draw_cover<I: SlotImage>(
    canvas: &mut RgbaImage,
    span: PixelSpan,
    img: &I,
    filter: FilterType,
) -> Result<(), CompositeError> {
    let src = img.rasterize()?;
    let (iw, ih) = src.dimensions();
    if iw == 0 || ih == 0 {
        return Err(CompositeError::EmptyImage);
    }
    let (w, h) = (span.width(), span.height());
    let scale = (f64::from(w) / f64::from(iw)).max(f64::from(h) / f64::from(ih));

    // Region of the source that lands inside the leaf after scaling.
    let crop_w = (f64::from(w) / scale).round().clamp(1.0, f64::from(iw)) as u32;
    let crop_h = (f64::from(h) / scale).round().clamp(1.0, f64::from(ih)) as u32;
    let cx = (iw - crop_w) / 2;
    let cy = (ih - crop_h) / 2;

    let cropped = imageops::crop_imm(&*src, cx, cy, crop_w, crop_h).to_image();
    let fitted = if (crop_w, crop_h) == (w, h) {
        cropped
    } else {
        imageops::resize(&cropped, w, h, filter)
    };
    imageops::overlay(canvas, &fitted, i64::from(span.x0), i64::from(span.y0));
    Ok(())
}

/// Axis-aligned thickness band for a divider; exposed for decorations drawn by hosts.
pub fn divider_band(axis: SplitAxis, line: Rect, offset: f64, thickness: f64) -> Rect {
    let half = thickness / 2.0;
    axis.with_span(line, offset - half, offset + half)
}
