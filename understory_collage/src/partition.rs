// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partitioning a rect among weighted children.
//!
//! ## Factors
//!
//! For child weights `w0..wn-1`, `factor[i] = w0 + .. + wi` and the denominator is the
//! last factor. Boundary `i` sits at `factor[i] / denom` of the available length along
//! the split axis. Factors are derived from weights on every pass and never stored.
//!
//! ## Edges
//!
//! Children are contiguous and ordered. Child `i` spans from boundary `i - 1` (or the
//! near edge) to boundary `i`, and the last child's far edge is pinned to the parent's
//! far edge so accumulated rounding never leaves a sliver.
//!
//! ```
//! use kurbo::Rect;
//! use understory_collage::{partition, Color, Node};
//!
//! let row: Node<()> = Node::row(1.0, [Node::empty(1.0, Color::RED), Node::empty(3.0, Color::BLUE)]);
//! let rects = partition::compute_child_rects(&row, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
//! assert_eq!(rects, vec![Rect::new(0.0, 0.0, 100.0, 25.0), Rect::new(0.0, 25.0, 100.0, 100.0)]);
//! ```

use alloc::vec::Vec;

use kurbo::Rect;

use crate::error::{InvalidTree, LayoutError};
use crate::tree::{Node, Split, check_weight};
use crate::types::{NodePath, SplitAxis};

/// Running sums of `weights`.
pub fn factors(weights: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut sum = 0.0;
    weights
        .into_iter()
        .map(|w| {
            sum += w;
            sum
        })
        .collect()
}

/// Inverse of [`factors`]: `weight[i] = factor[i] - factor[i - 1]`.
pub fn weights_from_factors(factors: &[f64]) -> Vec<f64> {
    let mut prev = 0.0;
    factors
        .iter()
        .map(|&f| {
            let w = f - prev;
            prev = f;
            w
        })
        .collect()
}

/// Factors of a split's children after checking every child weight and the denominator.
pub(crate) fn checked_factors<I>(split: &Split<I>, path: &NodePath) -> Result<Vec<f64>, InvalidTree> {
    let children = split.children();
    if children.is_empty() {
        return Err(InvalidTree::EmptySplit { path: path.clone() });
    }
    for (i, child) in children.iter().enumerate() {
        check_weight(child.weight(), || path.child(i))?;
    }
    let f = factors(children.iter().map(Node::weight));
    match f.last() {
        Some(&denom) if denom > 0.0 && denom.is_finite() => Ok(f),
        _ => Err(InvalidTree::ZeroDenominator { path: path.clone() }),
    }
}

/// One rect per child of `node`, in child order.
///
/// A leaf has no children and yields an empty sequence.
pub fn compute_child_rects<I>(node: &Node<I>, rect: Rect) -> Result<Vec<Rect>, LayoutError> {
    child_rects_at(node, rect, &NodePath::root())
}

pub(crate) fn child_rects_at<I>(
    node: &Node<I>,
    rect: Rect,
    path: &NodePath,
) -> Result<Vec<Rect>, LayoutError> {
    match (node.split(), node.axis()) {
        (Some(split), Some(axis)) => {
            let f = checked_factors(split, path)?;
            partition_at(axis, &f, rect, path)
        }
        _ => Ok(Vec::new()),
    }
}

/// Divide `rect` along `axis` according to an explicit factor sequence.
///
/// Factors must be finite, non-negative, and non-decreasing, and the last one must be
/// positive. Equal neighbors produce a zero-length child.
pub fn partition(axis: SplitAxis, factors: &[f64], rect: Rect) -> Result<Vec<Rect>, LayoutError> {
    partition_at(axis, factors, rect, &NodePath::root())
}

pub(crate) fn partition_at(
    axis: SplitAxis,
    factors: &[f64],
    rect: Rect,
    path: &NodePath,
) -> Result<Vec<Rect>, LayoutError> {
    let Some(&denom) = factors.last() else {
        return Err(InvalidTree::EmptySplit { path: path.clone() }.into());
    };
    let mut prev = 0.0;
    for &f in factors {
        if !f.is_finite() || f < prev {
            return Err(InvalidTree::NonMonotonicFactors { path: path.clone() }.into());
        }
        prev = f;
    }
    if denom <= 0.0 {
        return Err(InvalidTree::ZeroDenominator { path: path.clone() }.into());
    }

    let (start, end) = axis.span(rect);
    let length = end - start;
    let last = factors.len() - 1;
    let mut near = start;
    Ok(factors
        .iter()
        .enumerate()
        .map(|(i, &f)| {
            let far = if i == last {
                end
            } else {
                start + length * (f / denom)
            };
            let r = axis.with_span(rect, near, far);
            near = far;
            r
        })
        .collect())
}
