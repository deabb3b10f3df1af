// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collage_interact --heading-base-level=0

//! Understory Collage Interact: divider dragging and slot selection.
//!
//! ## Overview
//!
//! This crate turns pointer input into edits of an Understory Collage tree.
//! It does not recognize gestures. Feed it begin/update/end events (or raw points
//! resolved with the layout adapter) and it maintains a live preview and commits
//! the result as new child weights.
//!
//! ## Resizing
//!
//! [`ResizeController`](crate::resize::ResizeController) is a two-state machine, `Idle` and `Dragging`.
//! While dragging, only an in-memory factor vector for the dragged split changes; the tree is
//! written once, on release, and only if every resulting weight is positive. Otherwise the
//! drag reverts and reports a [`DegenerateResize`](crate::resize::DegenerateResize).
//!
//! Boundary travel is bounded by a [`ClampPolicy`](crate::resize::ClampPolicy). `Tight`
//! (the default) keeps a boundary between its neighbors' starting positions; `Loose` lets it
//! roam the whole split and relies on the commit check.
//!
//! ## Selection
//!
//! [`SelectionState`](crate::selection::SelectionState) tracks the one slot waiting for an image.
//!
//! ## Pointer resolution
//!
//! With the `layout_adapter` feature (default), [`adapters::layout::resolve_pointer`] maps a
//! point to either a divider or a slot of a computed `Layout`.
//!
//! ## Logging
//!
//! Drag begin and selection changes are logged at `debug`, drag updates at `trace`,
//! commits at `info`, and reverted commits at `warn`, all through `tracing`.

pub mod adapters;
pub mod resize;
pub mod selection;

pub use resize::{
    ClampPolicy, DegenerateResize, DragSession, ResizeController, ResizeError, ResizeOutcome,
    ResizeState, ResizeTarget, RevertReason,
};
pub use selection::{SelectionEvent, SelectionState};
