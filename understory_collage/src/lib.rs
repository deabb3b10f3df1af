// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collage --heading-base-level=0

//! Understory Collage: a weighted split tree for photo collages.
//!
//! Understory Collage describes a collage as a recursive tree of rows, columns, and leaf
//! slots, and deterministically turns that tree plus a canvas rect into nested rectangles.
//!
//! - A [`Node::Row`] stacks its children vertically; a [`Node::Column`] places them side by side.
//! - Each node carries a weight; siblings share their parent's length in proportion to their weights.
//! - Leaves own a [`Slot`]: a placeholder color and an optional image of a caller-chosen type.
//!
//! ## Not a renderer
//!
//! This crate never touches pixels. The raster type is a generic parameter that the tree
//! stores and hands back, and the output of a layout pass is a plain rect stream.
//! Rasterization lives in `understory_collage_compositor`; dragging dividers lives in
//! `understory_collage_interact`.
//!
//! ## API overview
//!
//! - [`Node`]: the tree. Lookups and edits are addressed by [`SlotId`] or by [`NodePath`].
//! - [`partition`]: factor sequences and [`partition::compute_child_rects`].
//! - [`Layout`]: the rect stream of leaves, splits, and dividers, with hit testing.
//! - [`PresetLibrary`]: the built-in catalog; [`Preset::instantiate`] makes an editable copy.
//! - [`InvalidTree`] / [`LayoutError`]: invariant violations and addressing errors.
//!
//! Missing ids are an ordinary outcome and surface as `None`, never as an error.
//!
//! ### Minimal usage
//!
//! ```
//! use kurbo::Rect;
//! use understory_collage::{Color, Layout, Node, Slot};
//!
//! // Row[Column[a, b], c]
//! let mut tree: Node<&str> = Node::row(1.0, [
//!     Node::column(1.0, [Node::empty(1.0, Color::RED), Node::empty(1.0, Color::BLUE)]),
//!     Node::empty(1.0, Color::GREEN),
//! ]);
//!
//! let ids: Vec<_> = tree.slots().map(Slot::id).collect();
//! assert!(tree.assign(ids[2], "beach.jpg").is_some());
//!
//! let layout = Layout::compute(&tree, Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();
//! assert_eq!(layout.leaf(ids[0]).unwrap().rect, Rect::new(0.0, 0.0, 100.0, 50.0));
//! assert_eq!(layout.leaf(ids[2]).unwrap().rect, Rect::new(0.0, 50.0, 200.0, 100.0));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds.

#![no_std]

extern crate alloc;

pub mod error;
pub mod layout;
pub mod partition;
pub mod presets;
pub mod tree;
pub mod types;

pub use error::{InvalidTree, LayoutError};
pub use layout::{DividerPlacement, Layout, LeafPlacement, Preview, SplitPlacement};
pub use presets::{Preset, PresetLibrary};
pub use tree::{Leaf, Node, Slot, SlotContent, Slots, Split};
pub use types::{Color, NodePath, SlotFlags, SlotId, SplitAxis, SplitId};
