// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rect stream: every leaf, split, and divider of a tree placed in a canvas rect.
//!
//! [`Layout::compute`] walks the tree once, recursively partitioning the canvas with
//! [`compute_child_rects`](crate::partition::compute_child_rects) semantics. The result is
//! plain data that decorations, hit testing, and the compositor all consume.
//!
//! A [`Preview`] substitutes live factors for one split without touching the tree;
//! this is how an in-progress drag is drawn.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::error::LayoutError;
use crate::partition::{checked_factors, partition_at};
use crate::tree::{Node, check_weight};
use crate::types::{NodePath, SlotFlags, SlotId, SplitAxis, SplitId};

/// Placement of one leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafPlacement {
    /// Slot held by the leaf.
    pub slot: SlotId,
    /// Path of the leaf from the root.
    pub path: NodePath,
    /// Rect assigned to the leaf.
    pub rect: Rect,
    /// Decoration state.
    pub flags: SlotFlags,
}

/// Placement of one row or column.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitPlacement {
    /// Split identity.
    pub id: SplitId,
    /// Path of the split from the root.
    pub path: NodePath,
    /// Axis the split divides along.
    pub axis: SplitAxis,
    /// Rect assigned to the split.
    pub rect: Rect,
    /// Factors used for this pass (live factors when previewed).
    pub factors: Vec<f64>,
}

/// A boundary between two adjacent children of a split.
#[derive(Clone, Debug, PartialEq)]
pub struct DividerPlacement {
    /// Owning split.
    pub split: SplitId,
    /// Path of the owning split.
    pub path: NodePath,
    /// Boundary index: the divider sits after child `boundary`.
    pub boundary: usize,
    /// Axis of the owning split.
    pub axis: SplitAxis,
    /// Absolute coordinate of the divider along `axis`.
    pub offset: f64,
    /// Zero-thickness line spanning the split's cross axis.
    pub line: Rect,
}

impl DividerPlacement {
    fn distance(&self, pt: Point) -> Option<f64> {
        let (lo, hi) = match self.axis {
            SplitAxis::Vertical => (self.line.x0, self.line.x1),
            SplitAxis::Horizontal => (self.line.y0, self.line.y1),
        };
        let cross = match self.axis {
            SplitAxis::Vertical => pt.x,
            SplitAxis::Horizontal => pt.y,
        };
        if cross < lo || cross > hi {
            return None;
        }
        let along = self.axis.coordinate(pt);
        Some(if along > self.offset {
            along - self.offset
        } else {
            self.offset - along
        })
    }
}

/// Live factors substituted for one split during a layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preview<'a> {
    /// Split whose factors are overridden.
    pub split: SplitId,
    /// Replacement factors, one per child.
    pub factors: &'a [f64],
}

/// Result of laying out a tree in a rect.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    bounds: Rect,
    leaves: Vec<LeafPlacement>,
    splits: Vec<SplitPlacement>,
    dividers: Vec<DividerPlacement>,
}

impl Layout {
    /// Lay out `root` in `rect` using its committed weights.
    pub fn compute<I>(root: &Node<I>, rect: Rect) -> Result<Self, LayoutError> {
        Self::compute_with_preview(root, rect, None)
    }

    /// Lay out `root` in `rect`, substituting `preview` factors for one split.
    ///
    /// A preview naming a split that is not in the tree is ignored.
    pub fn compute_with_preview<I>(
        root: &Node<I>,
        rect: Rect,
        preview: Option<Preview<'_>>,
    ) -> Result<Self, LayoutError> {
        check_weight(root.weight(), NodePath::root)?;
        let mut layout = Self {
            bounds: rect,
            ..Self::default()
        };
        layout.visit(root, rect, NodePath::root(), preview.as_ref())?;
        Ok(layout)
    }

    fn visit<I>(
        &mut self,
        node: &Node<I>,
        rect: Rect,
        path: NodePath,
        preview: Option<&Preview<'_>>,
    ) -> Result<(), LayoutError> {
        let (split, axis) = match (node, node.split(), node.axis()) {
            (Node::Leaf(leaf), _, _) => {
                let slot = leaf.slot();
                let mut flags = SlotFlags::empty();
                flags.set(SlotFlags::HAS_IMAGE, slot.has_image());
                self.leaves.push(LeafPlacement {
                    slot: slot.id(),
                    path,
                    rect,
                    flags,
                });
                return Ok(());
            }
            (_, Some(split), Some(axis)) => (split, axis),
            _ => return Ok(()),
        };

        let factors = match preview.filter(|p| p.split == split.id()) {
            Some(p) => {
                if p.factors.len() != split.children().len() {
                    return Err(LayoutError::WeightCountMismatch {
                        expected: split.children().len(),
                        found: p.factors.len(),
                    });
                }
                p.factors.to_vec()
            }
            None => checked_factors(split, &path)?,
        };
        let rects = partition_at(axis, &factors, rect, &path)?;

        for (boundary, r) in rects.iter().take(rects.len() - 1).enumerate() {
            let (_, offset) = axis.span(*r);
            self.dividers.push(DividerPlacement {
                split: split.id(),
                path: path.clone(),
                boundary,
                axis,
                offset,
                line: axis.with_span(rect, offset, offset),
            });
        }
        self.splits.push(SplitPlacement {
            id: split.id(),
            path: path.clone(),
            axis,
            rect,
            factors,
        });
        for (i, (child, r)) in split.children().iter().zip(rects).enumerate() {
            self.visit(child, r, path.child(i), preview)?;
        }
        Ok(())
    }

    /// Canvas rect the layout was computed for.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Leaves in depth-first order.
    pub fn leaves(&self) -> &[LeafPlacement] {
        &self.leaves
    }

    /// Splits in pre-order.
    pub fn splits(&self) -> &[SplitPlacement] {
        &self.splits
    }

    /// Dividers, parents before children.
    pub fn dividers(&self) -> &[DividerPlacement] {
        &self.dividers
    }

    /// Placement of the leaf holding `slot`.
    pub fn leaf(&self, slot: SlotId) -> Option<&LeafPlacement> {
        self.leaves.iter().find(|l| l.slot == slot)
    }

    /// Placement of the split `id`.
    pub fn split(&self, id: SplitId) -> Option<&SplitPlacement> {
        self.splits.iter().find(|s| s.id == id)
    }

    /// The leaf whose rect contains `pt`.
    pub fn leaf_at(&self, pt: Point) -> Option<&LeafPlacement> {
        self.leaves.iter().find(|l| l.rect.contains(pt))
    }

    /// The divider nearest to `pt` within `slop` along its axis.
    ///
    /// Ties go to the deeper divider, which is drawn on top.
    pub fn divider_at(&self, pt: Point, slop: f64) -> Option<&DividerPlacement> {
        let mut best: Option<(&DividerPlacement, f64)> = None;
        for d in &self.dividers {
            let Some(dist) = d.distance(pt) else {
                continue;
            };
            if dist > slop {
                continue;
            }
            let better = match best {
                None => true,
                Some((b, bd)) => dist < bd || (dist == bd && d.path.depth() > b.path.depth()),
            };
            if better {
                best = Some((d, dist));
            }
        }
        best.map(|(d, _)| d)
    }

    /// Add `flags` to the leaf holding `slot`. Returns `false` if the slot is not laid out.
    pub fn mark(&mut self, slot: SlotId, flags: SlotFlags) -> bool {
        match self.leaves.iter_mut().find(|l| l.slot == slot) {
            Some(l) => {
                l.flags |= flags;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidTree;
    use crate::tree::Slot;
    use crate::types::Color;
    use alloc::vec;

    fn nested() -> Node<u8> {
        // Row[Column[a, b], c]
        Node::row(
            1.0,
            [
                Node::column(1.0, [Node::empty(1.0, Color::RED), Node::empty(1.0, Color::BLUE)]),
                Node::empty(1.0, Color::GREEN),
            ],
        )
    }

    #[test]
    fn nested_tree_places_every_leaf() {
        let tree = nested();
        let layout = Layout::compute(&tree, Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();
        let rects: Vec<_> = layout.leaves().iter().map(|l| l.rect).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(0.0, 0.0, 100.0, 50.0),
                Rect::new(100.0, 0.0, 200.0, 50.0),
                Rect::new(0.0, 50.0, 200.0, 100.0),
            ]
        );
        for slot in tree.slots() {
            assert!(layout.leaf(slot.id()).is_some(), "{} not laid out", slot.id());
        }
        assert_eq!(layout.splits().len(), 2);
        assert_eq!(layout.dividers().len(), 2);
        assert_eq!(layout.dividers()[0].offset, 50.0);
        assert_eq!(layout.dividers()[0].line, Rect::new(0.0, 50.0, 200.0, 50.0));
        assert_eq!(layout.dividers()[1].offset, 100.0);
        assert_eq!(layout.dividers()[1].line, Rect::new(100.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn preview_overrides_one_split() {
        let tree = Node::<u8>::row(1.0, [Node::empty(1.0, Color::RED), Node::empty(1.0, Color::BLUE)]);
        let id = tree.split_id().unwrap();
        let r = Rect::new(0.0, 0.0, 200.0, 100.0);
        let layout = Layout::compute_with_preview(
            &tree,
            r,
            Some(Preview {
                split: id,
                factors: &[1.5, 2.0],
            }),
        )
        .unwrap();
        assert_eq!(layout.leaves()[0].rect, Rect::new(0.0, 0.0, 200.0, 75.0));
        assert_eq!(layout.split(id).unwrap().factors, vec![1.5, 2.0]);
        // The tree itself is untouched.
        assert_eq!(tree.factors(), vec![1.0, 2.0]);

        let wrong = Layout::compute_with_preview(
            &tree,
            r,
            Some(Preview {
                split: id,
                factors: &[1.0],
            }),
        );
        assert_eq!(
            wrong,
            Err(LayoutError::WeightCountMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn hit_testing_prefers_closest_then_deepest_divider() {
        let tree = nested();
        let layout = Layout::compute(&tree, Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();

        let d = layout.divider_at(Point::new(20.0, 52.0), 4.0).unwrap();
        assert_eq!(d.path, NodePath::root());
        let d = layout.divider_at(Point::new(98.0, 20.0), 4.0).unwrap();
        assert_eq!(d.path, NodePath::from(vec![0]));
        // The column divider ends at the row divider; at the junction both are 0 away.
        let d = layout.divider_at(Point::new(100.0, 50.0), 4.0).unwrap();
        assert_eq!(d.path, NodePath::from(vec![0]));
        assert!(layout.divider_at(Point::new(20.0, 20.0), 4.0).is_none());
        // The column divider does not extend into the bottom leaf.
        assert!(layout.divider_at(Point::new(100.0, 80.0), 4.0).is_none());

        let ids: Vec<_> = tree.slots().map(Slot::id).collect();
        assert_eq!(layout.leaf_at(Point::new(150.0, 10.0)).map(|l| l.slot), Some(ids[1]));
        assert_eq!(layout.leaf_at(Point::new(150.0, 60.0)).map(|l| l.slot), Some(ids[2]));
        assert!(layout.leaf_at(Point::new(-1.0, 10.0)).is_none());
    }

    #[test]
    fn flags_reflect_content_and_marks() {
        let mut tree = nested();
        let ids: Vec<_> = tree.slots().map(Slot::id).collect();
        tree.assign(ids[0], 1);
        let mut layout = Layout::compute(&tree, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(layout.leaves()[0].flags, SlotFlags::HAS_IMAGE);
        assert!(layout.mark(ids[2], SlotFlags::AWAITING_IMAGE));
        assert_eq!(layout.leaf(ids[2]).unwrap().flags, SlotFlags::AWAITING_IMAGE);
        assert!(!layout.mark(SlotId::fresh(), SlotFlags::AWAITING_IMAGE));
    }

    #[test]
    fn root_weight_is_checked() {
        let tree = Node::<u8>::row(0.0, [Node::empty(1.0, Color::RED)]);
        assert_eq!(
            Layout::compute(&tree, Rect::new(0.0, 0.0, 10.0, 10.0)),
            Err(LayoutError::InvalidTree(InvalidTree::NonPositiveWeight {
                path: NodePath::root(),
                weight: 0.0,
            }))
        );
        let leaf = Node::<u8>::empty(f64::NAN, Color::RED);
        assert!(Layout::compute(&leaf, Rect::new(0.0, 0.0, 10.0, 10.0)).is_err());
    }
}
