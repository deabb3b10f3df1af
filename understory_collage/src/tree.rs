// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout tree: rows, columns, and leaf slots with relative weights.
//!
//! A [`Node::Row`] stacks its children top to bottom; a [`Node::Column`] places them
//! left to right. Every node carries a weight that only has meaning relative to its
//! siblings.

use alloc::vec::Vec;

use crate::error::{InvalidTree, LayoutError};
use crate::partition;
use crate::types::{Color, NodePath, SlotId, SplitAxis, SplitId};

/// Content of a leaf: a placeholder color plus an optional image.
///
/// The id is assigned at creation and survives every content change.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot<I> {
    id: SlotId,
    placeholder: Color,
    image: Option<I>,
}

/// Borrowed view of what a slot currently displays.
#[derive(Debug, PartialEq)]
pub enum SlotContent<'a, I> {
    /// No image; draw the placeholder color.
    Empty(Color),
    /// An assigned image.
    Image(&'a I),
}

impl<I> Clone for SlotContent<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for SlotContent<'_, I> {}

impl<I> Slot<I> {
    /// Create an empty slot with a fresh id.
    pub fn new(placeholder: Color) -> Self {
        Self {
            id: SlotId::fresh(),
            placeholder,
            image: None,
        }
    }

    /// Create a slot that already holds an image.
    pub fn with_image(placeholder: Color, image: I) -> Self {
        Self {
            id: SlotId::fresh(),
            placeholder,
            image: Some(image),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Color drawn when no image is present.
    pub fn placeholder(&self) -> Color {
        self.placeholder
    }

    /// The assigned image, if any.
    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    /// Whether an image is assigned.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// What the slot currently displays.
    pub fn content(&self) -> SlotContent<'_, I> {
        match &self.image {
            Some(image) => SlotContent::Image(image),
            None => SlotContent::Empty(self.placeholder),
        }
    }
}

/// A row or column: an ordered, non-empty list of weighted children.
#[derive(Clone, Debug, PartialEq)]
pub struct Split<I> {
    id: SplitId,
    children: Vec<Node<I>>,
    weight: f64,
}

impl<I> Split<I> {
    /// Stable identifier used to address resizes.
    pub fn id(&self) -> SplitId {
        self.id
    }

    /// Children in layout order.
    pub fn children(&self) -> &[Node<I>] {
        &self.children
    }

    /// Weight relative to siblings.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// A leaf holding exactly one [`Slot`].
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf<I> {
    slot: Slot<I>,
    weight: f64,
}

impl<I> Leaf<I> {
    /// The owned slot.
    pub fn slot(&self) -> &Slot<I> {
        &self.slot
    }

    /// Weight relative to siblings.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// A node of the layout tree.
///
/// `I` is the raster handle stored in image slots. The tree never looks inside it.
#[derive(Clone, Debug, PartialEq)]
pub enum Node<I> {
    /// Children stacked along the vertical axis, each spanning the full width.
    Row(Split<I>),
    /// Children placed along the horizontal axis, each spanning the full height.
    Column(Split<I>),
    /// A single slot.
    Leaf(Leaf<I>),
}

impl<I> Node<I> {
    /// Build a row with a fresh split id.
    pub fn row(weight: f64, children: impl IntoIterator<Item = Self>) -> Self {
        Self::Row(Split {
            id: SplitId::fresh(),
            children: children.into_iter().collect(),
            weight,
        })
    }

    /// Build a column with a fresh split id.
    pub fn column(weight: f64, children: impl IntoIterator<Item = Self>) -> Self {
        Self::Column(Split {
            id: SplitId::fresh(),
            children: children.into_iter().collect(),
            weight,
        })
    }

    /// Build a leaf around an existing slot.
    pub fn leaf(weight: f64, slot: Slot<I>) -> Self {
        Self::Leaf(Leaf { slot, weight })
    }

    /// Build a leaf with a new empty slot.
    pub fn empty(weight: f64, placeholder: Color) -> Self {
        Self::leaf(weight, Slot::new(placeholder))
    }

    /// Weight of this node relative to its siblings.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Row(s) | Self::Column(s) => s.weight,
            Self::Leaf(l) => l.weight,
        }
    }

    fn set_weight(&mut self, weight: f64) {
        match self {
            Self::Row(s) | Self::Column(s) => s.weight = weight,
            Self::Leaf(l) => l.weight = weight,
        }
    }

    /// Children of a split; empty for a leaf.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Row(s) | Self::Column(s) => &s.children,
            Self::Leaf(_) => &[],
        }
    }

    /// The split payload, if this is a row or column.
    pub fn split(&self) -> Option<&Split<I>> {
        match self {
            Self::Row(s) | Self::Column(s) => Some(s),
            Self::Leaf(_) => None,
        }
    }

    /// Axis along which this node divides its rect, if it is a split.
    pub fn axis(&self) -> Option<SplitAxis> {
        match self {
            Self::Row(_) => Some(SplitAxis::Vertical),
            Self::Column(_) => Some(SplitAxis::Horizontal),
            Self::Leaf(_) => None,
        }
    }

    /// Split id, if this is a row or column.
    pub fn split_id(&self) -> Option<SplitId> {
        self.split().map(Split::id)
    }

    /// Short variant name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Row(_) => "Row",
            Self::Column(_) => "Column",
            Self::Leaf(_) => "Leaf",
        }
    }

    /// Prefix sums of the children's weights. Empty for a leaf.
    pub fn factors(&self) -> Vec<f64> {
        partition::factors(self.children().iter().map(Self::weight))
    }

    /// Depth-first iterator over every slot below (and including) this node.
    pub fn slots(&self) -> Slots<'_, I> {
        let mut stack = Vec::new();
        stack.push(self);
        Slots { stack }
    }

    /// Find a slot by id.
    pub fn find_slot(&self, id: SlotId) -> Option<&Slot<I>> {
        self.slots().find(|s| s.id == id)
    }

    /// Find a slot by id, mutably.
    pub fn find_slot_mut(&mut self, id: SlotId) -> Option<&mut Slot<I>> {
        match self {
            Self::Leaf(leaf) => (leaf.slot.id == id).then_some(&mut leaf.slot),
            Self::Row(s) | Self::Column(s) => {
                s.children.iter_mut().find_map(|c| c.find_slot_mut(id))
            }
        }
    }

    /// Placeholder color of an empty slot.
    ///
    /// Returns `None` when the id is absent or the slot holds an image.
    pub fn color_of(&self, id: SlotId) -> Option<Color> {
        match self.find_slot(id)?.content() {
            SlotContent::Empty(color) => Some(color),
            SlotContent::Image(_) => None,
        }
    }

    /// Image of a slot, if the id exists and an image is assigned.
    pub fn image_of(&self, id: SlotId) -> Option<&I> {
        self.find_slot(id)?.image()
    }

    /// Put `image` into the slot with `id`, keeping the id.
    ///
    /// Returns `None` (and drops `image`) when no slot has that id.
    pub fn assign(&mut self, id: SlotId, image: I) -> Option<&Slot<I>> {
        let slot = self.find_slot_mut(id)?;
        slot.image = Some(image);
        Some(slot)
    }

    /// Return a slot to its placeholder color.
    pub fn clear(&mut self, id: SlotId) -> Option<&Slot<I>> {
        let slot = self.find_slot_mut(id)?;
        slot.image = None;
        Some(slot)
    }

    /// Node at `path`, if any.
    pub fn get(&self, path: &NodePath) -> Option<&Self> {
        let mut node = self;
        for &i in path.as_slice() {
            node = node.children().get(i)?;
        }
        Some(node)
    }

    /// Node at `path`, mutably.
    pub fn get_mut(&mut self, path: &NodePath) -> Option<&mut Self> {
        let mut node = self;
        for &i in path.as_slice() {
            node = match node {
                Self::Row(s) | Self::Column(s) => s.children.get_mut(i)?,
                Self::Leaf(_) => return None,
            };
        }
        Some(node)
    }

    /// Path of the split with `id`.
    pub fn path_of_split(&self, id: SplitId) -> Option<NodePath> {
        self.find_path(&NodePath::root(), &|n: &Self| n.split_id() == Some(id))
    }

    /// Path of the leaf holding slot `id`.
    pub fn path_of_slot(&self, id: SlotId) -> Option<NodePath> {
        self.find_path(&NodePath::root(), &|n: &Self| match n {
            Self::Leaf(l) => l.slot.id == id,
            _ => false,
        })
    }

    fn find_path(&self, here: &NodePath, hit: &dyn Fn(&Self) -> bool) -> Option<NodePath> {
        if hit(self) {
            return Some(here.clone());
        }
        self.children()
            .iter()
            .enumerate()
            .find_map(|(i, c)| c.find_path(&here.child(i), hit))
    }

    fn split_at_mut(&mut self, path: &NodePath) -> Result<&mut Split<I>, LayoutError> {
        match self.get_mut(path) {
            None => Err(LayoutError::NoSuchNode(path.clone())),
            Some(Self::Leaf(_)) => Err(LayoutError::NotASplit(path.clone())),
            Some(Self::Row(s) | Self::Column(s)) => Ok(s),
        }
    }

    /// Set the weight of one child of the split at `parent`.
    pub fn set_child_weight(
        &mut self,
        parent: &NodePath,
        index: usize,
        weight: f64,
    ) -> Result<(), LayoutError> {
        let split = self.split_at_mut(parent)?;
        let len = split.children.len();
        let child = split
            .children
            .get_mut(index)
            .ok_or(LayoutError::ChildOutOfRange { index, len })?;
        check_weight(weight, || parent.child(index))?;
        child.set_weight(weight);
        Ok(())
    }

    /// Replace all child weights of the split at `parent`.
    ///
    /// Every weight is checked before any is written, so a rejected update leaves
    /// the tree untouched.
    pub fn set_child_weights(
        &mut self,
        parent: &NodePath,
        weights: &[f64],
    ) -> Result<(), LayoutError> {
        let split = self.split_at_mut(parent)?;
        if weights.len() != split.children.len() {
            return Err(LayoutError::WeightCountMismatch {
                expected: split.children.len(),
                found: weights.len(),
            });
        }
        for (i, &w) in weights.iter().enumerate() {
            check_weight(w, || parent.child(i))?;
        }
        for (child, &w) in split.children.iter_mut().zip(weights) {
            child.set_weight(w);
        }
        Ok(())
    }

    /// Check every structural invariant, reporting the first violation found.
    pub fn validate(&self) -> Result<(), InvalidTree> {
        self.validate_at(&NodePath::root())
    }

    fn validate_at(&self, path: &NodePath) -> Result<(), InvalidTree> {
        check_weight(self.weight(), || path.clone())?;
        if let Some(split) = self.split() {
            partition::checked_factors(split, path)?;
            for (i, child) in split.children.iter().enumerate() {
                child.validate_at(&path.child(i))?;
            }
        }
        Ok(())
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.slots().count()
    }

    /// Number of levels; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Convert every image with `f`, keeping structure, weights, and ids.
    pub fn map_images<J>(self, mut f: impl FnMut(I) -> J) -> Node<J> {
        self.map_with(&mut f)
    }

    fn map_with<J, F: FnMut(I) -> J>(self, f: &mut F) -> Node<J> {
        let map_split = |s: Split<I>, f: &mut F| Split {
            id: s.id,
            weight: s.weight,
            children: s.children.into_iter().map(|c| c.map_with(f)).collect(),
        };
        match self {
            Self::Row(s) => Node::Row(map_split(s, f)),
            Self::Column(s) => Node::Column(map_split(s, f)),
            Self::Leaf(l) => Node::Leaf(Leaf {
                weight: l.weight,
                slot: Slot {
                    id: l.slot.id,
                    placeholder: l.slot.placeholder,
                    image: l.slot.image.map(&mut *f),
                },
            }),
        }
    }

    /// Re-issue every slot and split id.
    #[must_use]
    pub fn with_fresh_ids(mut self) -> Self {
        self.refresh_ids();
        self
    }

    fn refresh_ids(&mut self) {
        match self {
            Self::Row(s) | Self::Column(s) => {
                s.id = SplitId::fresh();
                for c in &mut s.children {
                    c.refresh_ids();
                }
            }
            Self::Leaf(l) => l.slot.id = SlotId::fresh(),
        }
    }
}

pub(crate) fn check_weight(
    weight: f64,
    path: impl FnOnce() -> NodePath,
) -> Result<(), InvalidTree> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(InvalidTree::NonPositiveWeight {
            path: path(),
            weight,
        })
    }
}

/// Depth-first iterator over slots, returned by [`Node::slots`].
#[derive(Debug)]
pub struct Slots<'a, I> {
    stack: Vec<&'a Node<I>>,
}

impl<'a, I> Iterator for Slots<'a, I> {
    type Item = &'a Slot<I>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Leaf(l) => return Some(&l.slot),
                Node::Row(s) | Node::Column(s) => self.stack.extend(s.children.iter().rev()),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> Node<u32> {
        Node::row(
            1.0,
            [
                Node::column(1.0, [Node::empty(1.0, Color::RED), Node::empty(1.0, Color::BLUE)]),
                Node::empty(1.0, Color::GREEN),
            ],
        )
    }

    fn ids(tree: &Node<u32>) -> Vec<SlotId> {
        tree.slots().map(Slot::id).collect()
    }

    #[test]
    fn slots_are_depth_first_in_order() {
        let tree = sample();
        let colors: Vec<_> = tree.slots().map(Slot::placeholder).collect();
        assert_eq!(colors, vec![Color::RED, Color::BLUE, Color::GREEN]);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn assign_keeps_id_and_swaps_content() {
        let mut tree = sample();
        let id = ids(&tree)[1];
        assert_eq!(tree.color_of(id), Some(Color::BLUE));
        let slot = tree.assign(id, 7).expect("slot exists");
        assert_eq!(slot.id(), id);
        assert_eq!(slot.content(), SlotContent::Image(&7));
        assert_eq!(tree.image_of(id), Some(&7));
        assert_eq!(tree.color_of(id), None);
        assert_eq!(ids(&tree)[1], id);

        let cleared = tree.clear(id).expect("slot exists");
        assert_eq!(cleared.content(), SlotContent::Empty(Color::BLUE));
    }

    #[test]
    fn missing_ids_are_not_found() {
        let mut tree = Node::<u32>::column(
            1.0,
            (0..5).map(|_| Node::empty(1.0, Color::GRAY)),
        );
        assert_eq!(tree.leaf_count(), 5);
        let stranger = SlotId::fresh();
        assert!(tree.find_slot(stranger).is_none());
        assert!(tree.color_of(stranger).is_none());
        assert!(tree.image_of(stranger).is_none());
        assert!(tree.assign(stranger, 1).is_none());
        assert!(tree.slots().all(|s| !s.has_image()));
    }

    #[test]
    fn paths_resolve_splits_and_slots() {
        let tree = sample();
        let inner = tree.children()[0].split_id().expect("column");
        assert_eq!(tree.path_of_split(inner), Some(NodePath::from(vec![0])));
        assert_eq!(
            tree.path_of_split(tree.split_id().expect("row")),
            Some(NodePath::root())
        );
        let green = ids(&tree)[2];
        assert_eq!(tree.path_of_slot(green), Some(NodePath::from(vec![1])));
        assert_eq!(
            tree.get(&NodePath::from(vec![0, 1])).map(Node::kind_name),
            Some("Leaf")
        );
        assert!(tree.get(&NodePath::from(vec![1, 0])).is_none());
        assert!(tree.path_of_split(SplitId::fresh()).is_none());
    }

    #[test]
    fn set_child_weights_is_atomic() {
        let mut tree = sample();
        let root = NodePath::root();
        let before = tree.clone();
        let err = tree.set_child_weights(&root, &[2.0, -1.0]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidTree(InvalidTree::NonPositiveWeight {
                path: NodePath::from(vec![1]),
                weight: -1.0,
            })
        );
        assert_eq!(tree, before);

        assert_eq!(
            tree.set_child_weights(&root, &[1.0]),
            Err(LayoutError::WeightCountMismatch {
                expected: 2,
                found: 1
            })
        );

        tree.set_child_weights(&root, &[1.5, 0.5]).unwrap();
        assert_eq!(tree.factors(), vec![1.5, 2.0]);
    }

    #[test]
    fn set_child_weight_errors() {
        let mut tree = sample();
        assert_eq!(
            tree.set_child_weight(&NodePath::from(vec![1]), 0, 1.0),
            Err(LayoutError::NotASplit(NodePath::from(vec![1])))
        );
        assert_eq!(
            tree.set_child_weight(&NodePath::from(vec![5]), 0, 1.0),
            Err(LayoutError::NoSuchNode(NodePath::from(vec![5])))
        );
        assert_eq!(
            tree.set_child_weight(&NodePath::root(), 2, 1.0),
            Err(LayoutError::ChildOutOfRange { index: 2, len: 2 })
        );
        assert!(tree.set_child_weight(&NodePath::root(), 0, f64::NAN).is_err());
        tree.set_child_weight(&NodePath::from(vec![0]), 1, 3.0).unwrap();
        assert_eq!(tree.children()[0].factors(), vec![1.0, 4.0]);
    }

    #[test]
    fn validate_reports_offending_path() {
        assert_eq!(sample().validate(), Ok(()));
        let empty = Node::<u32>::row(1.0, [Node::column(1.0, [])]);
        assert_eq!(
            empty.validate(),
            Err(InvalidTree::EmptySplit {
                path: NodePath::from(vec![0])
            })
        );
        let zero = Node::<u32>::column(1.0, [Node::empty(0.0, Color::RED)]);
        assert!(matches!(
            zero.validate(),
            Err(InvalidTree::NonPositiveWeight { weight, .. }) if weight == 0.0
        ));
    }

    #[test]
    fn map_images_keeps_ids_and_fresh_ids_replace_them() {
        let mut tree = sample();
        let id = ids(&tree)[0];
        tree.assign(id, 21);
        let doubled = tree.clone().map_images(|v| u64::from(v) * 2);
        assert_eq!(doubled.image_of(id), Some(&42));
        assert_eq!(doubled.split_id(), tree.split_id());

        let fresh = tree.clone().with_fresh_ids();
        assert!(fresh.find_slot(id).is_none());
        assert_ne!(fresh.split_id(), tree.split_id());
        assert_eq!(fresh.factors(), tree.factors());
        assert_eq!(fresh.image_of(ids(&fresh)[0]), Some(&21));
    }
}
