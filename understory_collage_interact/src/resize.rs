// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Divider drag state machine.
//!
//! ## Usage
//!
//! 1) Lay out the tree and pick a [`ResizeTarget`] (for example with
//!    [`resize_target_at`](crate::adapters::layout::resize_target_at)).
//! 2) Call [`ResizeController::begin`] with the tree, its layout, and the target.
//! 3) On each pointer move, call [`ResizeController::update`] (or
//!    [`ResizeController::update_point`]) and redraw with [`ResizeController::preview`].
//! 4) On release, call [`ResizeController::end`] to commit the new weights, or
//!    [`ResizeController::cancel`] if the drag was abandoned.
//!
//! The tree is only written by a successful `end`. Until then the live factors
//! are an overlay that [`Layout::compute_with_preview`] draws on top of the
//! committed weights.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Rect;
//! use understory_collage::{Color, Layout, Node};
//! use understory_collage_interact::resize::{ResizeController, ResizeOutcome, ResizeTarget};
//!
//! let mut tree: Node<()> = Node::row(1.0, [Node::empty(1.0, Color::RED), Node::empty(1.0, Color::BLUE)]);
//! let split = tree.split_id().unwrap();
//! let layout = Layout::compute(&tree, Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();
//!
//! let mut ctl = ResizeController::default();
//! ctl.begin(&tree, &layout, ResizeTarget { split, boundary: 0 }).unwrap();
//! ctl.update(75.0).unwrap();
//! let outcome = ctl.end(&mut tree).unwrap();
//! assert_eq!(outcome, ResizeOutcome::Committed { split, weights: vec![1.5, 0.5] });
//! ```

use std::mem;

use kurbo::Point;
use tracing::{debug, info, trace, warn};
use understory_collage::partition::{self, weights_from_factors};
use understory_collage::{Layout, LayoutError, Node, NodePath, Preview, SplitAxis, SplitId};

/// A boundary of a specific split: the divider after child `boundary`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResizeTarget {
    /// The split whose children are being resized.
    pub split: SplitId,
    /// Boundary index, in `0..children - 1`.
    pub boundary: usize,
}

/// How far a dragged boundary may travel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ClampPolicy {
    /// Between the neighboring boundaries as they were when the drag began.
    #[default]
    Tight,
    /// Anywhere within the split; the boundary may pass its neighbors before commit.
    Loose,
}

/// State of one in-progress drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    target: ResizeTarget,
    path: NodePath,
    axis: SplitAxis,
    origin: f64,
    available: f64,
    original_weights: Vec<f64>,
    original_factors: Vec<f64>,
    live_factors: Vec<f64>,
    display_factors: Vec<f64>,
}

impl DragSession {
    /// The boundary being dragged.
    pub fn target(&self) -> ResizeTarget {
        self.target
    }

    /// Path of the split when the drag began.
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Axis of the split.
    pub fn axis(&self) -> SplitAxis {
        self.axis
    }

    /// Near edge of the split along its axis.
    pub fn origin(&self) -> f64 {
        self.origin
    }

    /// Length of the split along its axis.
    pub fn available(&self) -> f64 {
        self.available
    }

    /// Factors at the start of the drag.
    pub fn original_factors(&self) -> &[f64] {
        &self.original_factors
    }

    /// Factors including the dragged boundary's live position.
    pub fn live_factors(&self) -> &[f64] {
        &self.live_factors
    }

    /// Monotone copy of the live factors, safe to lay out.
    pub fn display_factors(&self) -> &[f64] {
        &self.display_factors
    }

    fn denom(&self) -> f64 {
        self.original_factors.last().copied().unwrap_or(0.0)
    }

    fn bounds(&self, policy: ClampPolicy) -> (f64, f64) {
        let i = self.target.boundary;
        match policy {
            ClampPolicy::Tight => {
                let lo = if i == 0 {
                    0.0
                } else {
                    self.original_factors[i - 1]
                };
                (lo, self.original_factors[i + 1])
            }
            ClampPolicy::Loose => (0.0, self.denom()),
        }
    }

    /// Weights implied by the live factors.
    ///
    /// Children whose two boundaries did not move keep their original weight exactly.
    fn live_weights(&self) -> Vec<f64> {
        let diffs = weights_from_factors(&self.live_factors);
        let unchanged = |k: Option<usize>| match k {
            None => true,
            Some(k) => self.live_factors[k] == self.original_factors[k],
        };
        diffs
            .into_iter()
            .enumerate()
            .map(|(j, d)| {
                if unchanged(j.checked_sub(1)) && unchanged(Some(j)) {
                    self.original_weights[j]
                } else {
                    d
                }
            })
            .collect()
    }
}

/// Controller state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResizeState {
    /// No drag in progress.
    #[default]
    Idle,
    /// One boundary is being dragged.
    Dragging(DragSession),
}

/// A commit that would leave a child with no space.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("resize of {split} would give child {child} weight {weight}")]
pub struct DegenerateResize {
    /// Split being resized.
    pub split: SplitId,
    /// First child whose weight came out non-positive.
    pub child: usize,
    /// The rejected weight, unclamped.
    pub weight: f64,
}

/// Why a drag ended without changing the tree.
#[derive(Clone, Debug, PartialEq)]
pub enum RevertReason {
    /// The live factors would produce a non-positive weight.
    Degenerate(DegenerateResize),
    /// The drag was cancelled before release.
    Abandoned,
}

/// Result of ending a drag.
#[derive(Clone, Debug, PartialEq)]
pub enum ResizeOutcome {
    /// New weights were written to the split's children.
    Committed {
        /// Resized split.
        split: SplitId,
        /// Weights written, one per child.
        weights: Vec<f64>,
    },
    /// The tree kept its original weights.
    Reverted {
        /// Split that was being dragged.
        split: SplitId,
        /// Why nothing was written.
        reason: RevertReason,
    },
}

/// Misuse of the resize protocol.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ResizeError {
    /// `begin` was called while another drag is active.
    #[error("a drag of {0} is already in progress")]
    AlreadyDragging(SplitId),
    /// `update` or `end` was called with no drag in progress.
    #[error("no drag in progress")]
    NotDragging,
    /// The split is not in the tree or not in the layout.
    #[error("unknown split {0}")]
    UnknownSplit(SplitId),
    /// The boundary index does not separate two children.
    #[error("boundary {boundary} out of range for split with {children} children")]
    BoundaryOutOfRange {
        /// Requested boundary.
        boundary: usize,
        /// Number of children of the split.
        children: usize,
    },
    /// The split's weights are invalid or the commit could not be written.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Drives one divider drag at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResizeController {
    state: ResizeState,
    policy: ClampPolicy,
}

impl ResizeController {
    /// Create an idle controller with the given clamp policy.
    pub fn new(policy: ClampPolicy) -> Self {
        Self {
            state: ResizeState::Idle,
            policy,
        }
    }

    /// Current clamp policy.
    pub fn policy(&self) -> ClampPolicy {
        self.policy
    }

    /// Current state.
    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    /// The active drag, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            ResizeState::Dragging(s) => Some(s),
            ResizeState::Idle => None,
        }
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    /// Start dragging `target`.
    ///
    /// The split must be present in both `tree` and `layout`, and `layout` must have
    /// been computed from `tree`.
    pub fn begin<I>(
        &mut self,
        tree: &Node<I>,
        layout: &Layout,
        target: ResizeTarget,
    ) -> Result<(), ResizeError> {
        if let ResizeState::Dragging(s) = &self.state {
            return Err(ResizeError::AlreadyDragging(s.target.split));
        }
        let path = tree
            .path_of_split(target.split)
            .ok_or(ResizeError::UnknownSplit(target.split))?;
        let placement = layout
            .split(target.split)
            .ok_or(ResizeError::UnknownSplit(target.split))?;
        let node = tree
            .get(&path)
            .ok_or(ResizeError::UnknownSplit(target.split))?;
        let children = node.children().len();
        if target.boundary + 1 >= children {
            return Err(ResizeError::BoundaryOutOfRange {
                boundary: target.boundary,
                children,
            });
        }
        let axis = placement.axis;
        let original_weights: Vec<f64> = node.children().iter().map(Node::weight).collect();
        let original_factors = node.factors();
        // Reject a split whose committed weights cannot be laid out.
        partition::partition(axis, &original_factors, placement.rect)?;
        let (origin, available) = axis.extent(placement.rect);

        debug!(
            split = %target.split,
            boundary = target.boundary,
            factors = ?original_factors,
            "resize begin"
        );
        self.state = ResizeState::Dragging(DragSession {
            target,
            path,
            axis,
            origin,
            available,
            original_weights,
            live_factors: original_factors.clone(),
            display_factors: original_factors.clone(),
            original_factors,
        });
        Ok(())
    }

    /// Move the dragged boundary to `p`, measured along the split axis from the
    /// split's near edge. Returns the clamped live factor.
    pub fn update(&mut self, p: f64) -> Result<f64, ResizeError> {
        let policy = self.policy;
        let ResizeState::Dragging(s) = &mut self.state else {
            return Err(ResizeError::NotDragging);
        };
        let i = s.target.boundary;
        let denom = s.denom();
        let ratio = p / (s.available / denom);
        if ratio.is_nan() {
            return Ok(s.live_factors[i]);
        }
        let (lo, hi) = s.bounds(policy);
        let live = ratio.max(lo).min(hi);
        s.live_factors[i] = live;

        let mut running = 0.0_f64;
        for (d, &l) in s.display_factors.iter_mut().zip(&s.live_factors) {
            running = running.max(l).min(denom);
            *d = running;
        }
        trace!(split = %s.target.split, boundary = i, p, live, "resize update");
        Ok(live)
    }

    /// [`update`](Self::update) from an absolute pointer position.
    pub fn update_point(&mut self, pt: Point) -> Result<f64, ResizeError> {
        let p = match self.session() {
            Some(s) => s.axis.coordinate(pt) - s.origin,
            None => return Err(ResizeError::NotDragging),
        };
        self.update(p)
    }

    /// Live factors to draw over the committed tree, while dragging.
    pub fn preview(&self) -> Option<Preview<'_>> {
        self.session().map(|s| Preview {
            split: s.target.split,
            factors: &s.display_factors,
        })
    }

    /// Finish the drag and write the new weights if every one is positive.
    ///
    /// The controller is idle afterwards, whatever the outcome.
    pub fn end<I>(&mut self, tree: &mut Node<I>) -> Result<ResizeOutcome, ResizeError> {
        let ResizeState::Dragging(s) = mem::take(&mut self.state) else {
            return Err(ResizeError::NotDragging);
        };
        let split = s.target.split;
        let weights = s.live_weights();
        if let Some((child, &weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(w.is_finite() && **w > 0.0))
        {
            warn!(%split, child, weight, "resize reverted: degenerate weight");
            return Ok(ResizeOutcome::Reverted {
                split,
                reason: RevertReason::Degenerate(DegenerateResize {
                    split,
                    child,
                    weight,
                }),
            });
        }
        let path = tree
            .path_of_split(split)
            .ok_or(ResizeError::UnknownSplit(split))?;
        tree.set_child_weights(&path, &weights)?;
        info!(%split, weights = ?weights, "resize committed");
        Ok(ResizeOutcome::Committed { split, weights })
    }

    /// Abandon the drag without touching the tree.
    ///
    /// Returns `None` if no drag was in progress.
    pub fn cancel(&mut self) -> Option<ResizeOutcome> {
        let ResizeState::Dragging(s) = mem::take(&mut self.state) else {
            return None;
        };
        debug!(split = %s.target.split, "resize abandoned");
        Some(ResizeOutcome::Reverted {
            split: s.target.split,
            reason: RevertReason::Abandoned,
        })
    }
}
