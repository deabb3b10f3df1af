// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_collage::{InvalidTree, LayoutError};
use understory_collage_compositor::CompositeError;
use understory_collage_interact::ResizeError;

/// Errors surfaced by [`Session`](crate::Session).
///
/// A layout error means the session tree is invalid; rendering and export are refused
/// until [`Session::reset_to_last_valid`](crate::Session::reset_to_last_valid) is called.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The tree is invalid or could not be addressed.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// The resize protocol was misused.
    #[error(transparent)]
    Resize(#[from] ResizeError),
    /// Rendering or export failed.
    #[error(transparent)]
    Composite(#[from] CompositeError),
}

impl From<InvalidTree> for EditorError {
    fn from(e: InvalidTree) -> Self {
        Self::Layout(e.into())
    }
}
