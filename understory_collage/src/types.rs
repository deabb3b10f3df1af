// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the collage tree: identifiers, colors, axes, paths, and flags.

use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use kurbo::Rect;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Stable identifier of a leaf slot.
///
/// ## Semantics
///
/// - A fresh id is drawn from a process-wide counter whenever a slot is created.
/// - Mutating the slot's content (assigning or clearing an image) keeps the id.
/// - Ids are never reused within a process, so a stale id can only miss, never alias.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SlotId(u64);

impl SlotId {
    /// Allocate a new, globally unique slot id.
    pub fn fresh() -> Self {
        Self(next_id())
    }

    /// Raw value, mainly for logging.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// Stable identifier of a row or column container.
///
/// This is the parent identity used to address resizes.
/// Drawn from the same counter as [`SlotId`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SplitId(u64);

impl SplitId {
    /// Allocate a new, globally unique split id.
    pub fn fresh() -> Self {
        Self(next_id())
    }

    /// Raw value, mainly for logging.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SplitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "split#{}", self.0)
    }
}

/// Straight (non-premultiplied) 8-bit RGBA color used for slot placeholders.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Build an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build a color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Components as `[r, g, b, a]`.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Red placeholder.
    pub const RED: Self = Self::rgb(255, 59, 48);
    /// Orange placeholder.
    pub const ORANGE: Self = Self::rgb(255, 149, 0);
    /// Yellow placeholder.
    pub const YELLOW: Self = Self::rgb(255, 204, 0);
    /// Green placeholder.
    pub const GREEN: Self = Self::rgb(52, 199, 89);
    /// Pure green placeholder.
    pub const LIME: Self = Self::rgb(0, 255, 0);
    /// Mint placeholder.
    pub const MINT: Self = Self::rgb(0, 199, 190);
    /// Teal placeholder.
    pub const TEAL: Self = Self::rgb(48, 176, 199);
    /// Cyan placeholder.
    pub const CYAN: Self = Self::rgb(50, 173, 230);
    /// Blue placeholder.
    pub const BLUE: Self = Self::rgb(0, 122, 255);
    /// Indigo placeholder.
    pub const INDIGO: Self = Self::rgb(88, 86, 214);
    /// Purple placeholder.
    pub const PURPLE: Self = Self::rgb(175, 82, 222);
    /// Pink placeholder.
    pub const PINK: Self = Self::rgb(255, 45, 85);
    /// Magenta placeholder.
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    /// Brown placeholder.
    pub const BROWN: Self = Self::rgb(162, 132, 94);
    /// Earth brown placeholder.
    pub const EARTH: Self = Self::rgb(153, 102, 51);
    /// Gray placeholder.
    pub const GRAY: Self = Self::rgb(142, 142, 147);
    /// Light gray placeholder.
    pub const GRAY2: Self = Self::rgb(174, 174, 178);
}

/// Axis along which a split divides its children.
///
/// A `Row` stacks children vertically; a `Column` places them side by side.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SplitAxis {
    /// Children stacked top to bottom; each spans full width.
    Vertical,
    /// Children placed left to right; each spans full height.
    Horizontal,
}

impl SplitAxis {
    /// Start coordinate and length of `rect` along this axis.
    pub fn extent(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Vertical => (rect.y0, rect.height()),
            Self::Horizontal => (rect.x0, rect.width()),
        }
    }

    /// Near and far edges of `rect` along this axis.
    pub fn span(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Vertical => (rect.y0, rect.y1),
            Self::Horizontal => (rect.x0, rect.x1),
        }
    }

    /// Replace the `[start, end]` span of `rect` along this axis, keeping the cross axis.
    pub fn with_span(self, rect: Rect, start: f64, end: f64) -> Rect {
        match self {
            Self::Vertical => Rect::new(rect.x0, start, rect.x1, end),
            Self::Horizontal => Rect::new(start, rect.y0, end, rect.y1),
        }
    }

    /// Coordinate of a point projected onto this axis.
    pub fn coordinate(self, pt: kurbo::Point) -> f64 {
        match self {
            Self::Vertical => pt.y,
            Self::Horizontal => pt.x,
        }
    }
}

/// Address of a node as child indices from the root.
///
/// The empty path is the root itself.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The root path.
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut v = self.0.clone();
        v.push(index);
        Self(v)
    }

    /// Path of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// Depth of the addressed node (root is `0`).
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Indices as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(v: Vec<usize>) -> Self {
        Self(v)
    }
}

impl From<&[usize]> for NodePath {
    fn from(v: &[usize]) -> Self {
        Self(v.to_vec())
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for i in &self.0 {
            write!(f, "/{i}")?;
        }
        Ok(())
    }
}

bitflags::bitflags! {
    /// Per-leaf state exposed on the rect stream for external decorations.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SlotFlags: u8 {
        /// The slot currently holds an image.
        const HAS_IMAGE      = 0b0000_0001;
        /// The slot is selected and waiting for an image to be assigned.
        const AWAITING_IMAGE = 0b0000_0010;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;
    use kurbo::Point;

    #[test]
    fn fresh_ids_are_unique_and_increasing() {
        let a = SlotId::fresh();
        let b = SlotId::fresh();
        let s = SplitId::fresh();
        assert!(b > a);
        assert_ne!(a.get(), s.get());
        assert_ne!(b.get(), s.get());
    }

    #[test]
    fn axis_extent_and_span() {
        let r = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(SplitAxis::Vertical.extent(r), (20.0, 50.0));
        assert_eq!(SplitAxis::Horizontal.extent(r), (10.0, 100.0));
        assert_eq!(SplitAxis::Vertical.span(r), (20.0, 70.0));
        assert_eq!(
            SplitAxis::Vertical.with_span(r, 30.0, 40.0),
            Rect::new(10.0, 30.0, 110.0, 40.0)
        );
        assert_eq!(
            SplitAxis::Horizontal.with_span(r, 30.0, 40.0),
            Rect::new(30.0, 20.0, 40.0, 70.0)
        );
        assert_eq!(SplitAxis::Vertical.coordinate(Point::new(1.0, 2.0)), 2.0);
    }

    #[test]
    fn node_path_navigation_and_display() {
        let root = NodePath::root();
        assert_eq!(format!("{root}"), "/");
        let p = root.child(1).child(0);
        assert_eq!(p.as_slice(), &[1, 0]);
        assert_eq!(format!("{p}"), "/1/0");
        assert_eq!(p.parent(), Some(NodePath::from(vec![1])));
        assert_eq!(root.parent(), None);
        assert_eq!(p.depth(), 2);
    }

    #[test]
    fn color_helpers() {
        let c = Color::RED.with_alpha(128);
        assert_eq!(c.to_array(), [255, 59, 48, 128]);
        assert_eq!(Color::rgba(1, 2, 3, 4), Color { r: 1, g: 2, b: 3, a: 4 });
    }
}
