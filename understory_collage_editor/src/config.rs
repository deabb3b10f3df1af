// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor configuration.

use understory_collage::Color;
use understory_collage_compositor::{DividerStyle, RenderOptions};
use understory_collage_interact::ClampPolicy;

use crate::ratio::AspectRatio;

/// Settings for an editing session.
///
/// Plain data; construct with `Default` and override fields as needed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EditorConfig {
    /// Bounding box of the exported image, in pixels. The selected ratio is fitted inside it.
    pub export_size: (u32, u32),
    /// Edge length of preset thumbnails, in pixels.
    pub thumbnail_size: u32,
    /// How close, in canvas units, a pointer must be to grab a divider.
    pub hit_slop: f64,
    /// How far a dragged divider may travel before release.
    pub clamp: ClampPolicy,
    /// Options for interactive frames.
    pub preview: RenderOptions,
    /// Options for the exported image.
    pub export: RenderOptions,
    /// Options for preset thumbnails.
    pub thumbnail: RenderOptions,
    /// Initial aspect ratio.
    pub ratio: AspectRatio,
}

/// Dividers use the secondary label color at a quarter opacity.
const DIVIDER_COLOR: Color = Color::GRAY.with_alpha(64);

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            export_size: (1000, 1000),
            thumbnail_size: 90,
            hit_slop: 6.0,
            clamp: ClampPolicy::Tight,
            preview: RenderOptions {
                dividers: Some(DividerStyle {
                    color: DIVIDER_COLOR,
                    thickness: 4.0,
                }),
                ..RenderOptions::default()
            },
            export: RenderOptions::default(),
            thumbnail: RenderOptions {
                dividers: Some(DividerStyle {
                    color: DIVIDER_COLOR,
                    thickness: 1.0,
                }),
                ..RenderOptions::default()
            },
            ratio: AspectRatio::OneOne,
        }
    }
}
