// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot selection: which slot, if any, is waiting for an image.
//!
//! At most one slot awaits assignment. Selecting another slot releases the previous
//! one first, so callers receive `Released(old)` before `Awaiting(new)`.
//!
//! ```
//! use understory_collage::SlotId;
//! use understory_collage_interact::selection::{SelectionEvent, SelectionState};
//!
//! let (a, b) = (SlotId::fresh(), SlotId::fresh());
//! let mut sel = SelectionState::new();
//! assert_eq!(sel.select(a), vec![SelectionEvent::Awaiting(a)]);
//! assert_eq!(sel.select(b), vec![SelectionEvent::Released(a), SelectionEvent::Awaiting(b)]);
//! assert_eq!(sel.take(), Some(b));
//! assert_eq!(sel.awaiting(), None);
//! ```

use tracing::debug;
use understory_collage::SlotId;

/// A selection transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The slot now awaits an image.
    Awaiting(SlotId),
    /// The slot no longer awaits an image.
    Released(SlotId),
}

/// Tracks the single slot awaiting image assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    awaiting: Option<SlotId>,
}

impl SelectionState {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot awaiting an image, if any.
    pub fn awaiting(&self) -> Option<SlotId> {
        self.awaiting
    }

    /// Whether `id` is the awaiting slot.
    pub fn is_awaiting(&self, id: SlotId) -> bool {
        self.awaiting == Some(id)
    }

    /// Make `id` the awaiting slot and return the transitions.
    ///
    /// Selecting the already awaiting slot is a no-op.
    pub fn select(&mut self, id: SlotId) -> Vec<SelectionEvent> {
        if self.awaiting == Some(id) {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(2);
        if let Some(old) = self.awaiting.replace(id) {
            out.push(SelectionEvent::Released(old));
        }
        out.push(SelectionEvent::Awaiting(id));
        debug!(slot = %id, "slot awaiting image");
        out
    }

    /// Clear the selection without assigning anything.
    pub fn cancel(&mut self) -> Vec<SelectionEvent> {
        match self.awaiting.take() {
            Some(old) => {
                debug!(slot = %old, "selection cancelled");
                vec![SelectionEvent::Released(old)]
            }
            None => Vec::new(),
        }
    }

    /// Consume the selection for an assignment.
    pub fn take(&mut self) -> Option<SlotId> {
        self.awaiting.take()
    }
}
