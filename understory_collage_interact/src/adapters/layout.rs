// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Understory Collage layouts.
//!
//! ## Feature
//!
//! Enable with `layout_adapter` (on by default).
//!
//! ## Notes
//!
//! These helpers turn a pointer position into something the resize controller or the
//! selection state can act on. A divider within `slop` of the pointer wins over the
//! slot beneath it, since dividers are drawn over their neighbors.

use kurbo::Point;
use understory_collage::{Layout, SlotId};

use crate::resize::ResizeTarget;

/// What a pointer-down landed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// A divider; start a resize.
    Boundary(ResizeTarget),
    /// A slot; select it.
    Slot(SlotId),
}

/// The divider under `pt`, as a resize target.
pub fn resize_target_at(layout: &Layout, pt: Point, slop: f64) -> Option<ResizeTarget> {
    layout.divider_at(pt, slop).map(|d| ResizeTarget {
        split: d.split,
        boundary: d.boundary,
    })
}

/// The slot under `pt`.
pub fn slot_at(layout: &Layout, pt: Point) -> Option<SlotId> {
    layout.leaf_at(pt).map(|l| l.slot)
}

/// Resolve a pointer-down. Returns `None` outside the layout.
pub fn resolve_pointer(layout: &Layout, pt: Point, slop: f64) -> Option<PointerTarget> {
    resize_target_at(layout, pt, slop)
        .map(PointerTarget::Boundary)
        .or_else(|| slot_at(layout, pt).map(PointerTarget::Slot))
}
