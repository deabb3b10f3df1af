// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for tree validation and layout.
//!
//! Missing identifiers are not errors: lookups return `Option` instead.

use crate::types::NodePath;

/// A structural invariant of the tree does not hold.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvalidTree {
    /// A row or column has no children.
    #[error("split at {path} has no children")]
    EmptySplit {
        /// Path of the offending split.
        path: NodePath,
    },
    /// A weight is zero, negative, or not finite.
    #[error("node at {path} has non-positive weight {weight}")]
    NonPositiveWeight {
        /// Path of the offending node.
        path: NodePath,
        /// The rejected weight.
        weight: f64,
    },
    /// The sum of child weights is zero.
    #[error("split at {path} has a zero denominator")]
    ZeroDenominator {
        /// Path of the offending split.
        path: NodePath,
    },
    /// An explicit factor sequence decreases or is not finite.
    #[error("factors for split at {path} are not monotonic")]
    NonMonotonicFactors {
        /// Path of the offending split.
        path: NodePath,
    },
}

impl InvalidTree {
    /// Path of the node that violated the invariant.
    pub fn path(&self) -> &NodePath {
        match self {
            Self::EmptySplit { path }
            | Self::NonPositiveWeight { path, .. }
            | Self::ZeroDenominator { path }
            | Self::NonMonotonicFactors { path } => path,
        }
    }
}

/// Errors from partitioning, path addressing, and weight updates.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// The tree (or an explicit factor sequence) violates an invariant.
    #[error(transparent)]
    InvalidTree(#[from] InvalidTree),
    /// No node exists at the given path.
    #[error("no node at {0}")]
    NoSuchNode(NodePath),
    /// The node at the given path is a leaf where a split was required.
    #[error("node at {0} is not a row or column")]
    NotASplit(NodePath),
    /// A child index is past the end of the split's children.
    #[error("child index {index} out of range for split with {len} children")]
    ChildOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of children.
        len: usize,
    },
    /// A bulk weight update supplied the wrong number of weights.
    #[error("expected {expected} weights, found {found}")]
    WeightCountMismatch {
        /// Number of children.
        expected: usize,
        /// Number of weights supplied.
        found: usize,
    },
}
