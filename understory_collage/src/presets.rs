// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in collage presets.
//!
//! A preset is an immutable tree of empty slots plus a label and a target aspect
//! ratio. Presets hold no images, so their trees use [`Infallible`] as the raster type
//! and can be instantiated into a tree of any raster type.

use alloc::vec::Vec;
use core::convert::Infallible;

use crate::tree::Node;
use crate::types::Color;

/// One catalog entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    label: &'static str,
    aspect_ratio: f64,
    tree: Node<Infallible>,
}

impl Preset {
    /// Create a preset from a tree of empty slots.
    pub fn new(label: &'static str, aspect_ratio: f64, tree: Node<Infallible>) -> Self {
        Self {
            label,
            aspect_ratio,
            tree,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Target width / height.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// The catalog tree. Read only.
    pub fn tree(&self) -> &Node<Infallible> {
        &self.tree
    }

    /// A fresh, editable copy of this preset with new slot and split ids.
    pub fn instantiate<I>(&self) -> Node<I> {
        self.tree
            .clone()
            .map_images(|never| match never {})
            .with_fresh_ids()
    }
}

/// Ordered, read-only collection of presets.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetLibrary {
    presets: Vec<Preset>,
}

type N = Node<Infallible>;

fn leaf(weight: f64, color: Color) -> N {
    N::empty(weight, color)
}

fn row<const K: usize>(children: [N; K]) -> N {
    N::row(1.0, children)
}

fn column<const K: usize>(children: [N; K]) -> N {
    N::column(1.0, children)
}

impl PresetLibrary {
    /// Build a library from custom presets.
    pub fn new(presets: impl IntoIterator<Item = Preset>) -> Self {
        Self {
            presets: presets.into_iter().collect(),
        }
    }

    /// The twelve built-in square collages.
    pub fn builtin() -> Self {
        let p = |label, tree| Preset::new(label, 1.0, tree);
        Self::new([
            p(
                "Two columns",
                column([leaf(1.0, Color::RED), leaf(1.0, Color::INDIGO)]),
            ),
            p(
                "Two rows",
                row([leaf(1.0, Color::PINK), leaf(1.0, Color::TEAL)]),
            ),
            p(
                "Three rows",
                row([
                    leaf(1.0, Color::RED),
                    leaf(1.0, Color::BLUE),
                    leaf(1.0, Color::GRAY),
                ]),
            ),
            p(
                "Split top",
                row([
                    column([leaf(1.0, Color::ORANGE), leaf(1.0, Color::GRAY2)]),
                    leaf(1.0, Color::BROWN),
                ]),
            ),
            p(
                "Split bottom",
                row([
                    leaf(1.0, Color::YELLOW),
                    column([leaf(1.0, Color::RED), leaf(1.0, Color::BROWN)]),
                ]),
            ),
            p(
                "Split left",
                column([
                    row([leaf(1.0, Color::ORANGE), leaf(1.0, Color::GRAY2)]),
                    leaf(1.0, Color::BROWN),
                ]),
            ),
            p(
                "Split right",
                column([
                    leaf(1.0, Color::PINK),
                    row([leaf(1.0, Color::RED), leaf(1.0, Color::INDIGO)]),
                ]),
            ),
            p(
                "Offset columns",
                column([
                    row([leaf(2.0, Color::PINK), leaf(1.0, Color::PURPLE)]),
                    row([leaf(1.0, Color::RED), leaf(2.0, Color::INDIGO)]),
                ]),
            ),
            p(
                "Three columns",
                column([
                    leaf(1.0, Color::INDIGO),
                    leaf(1.0, Color::PINK),
                    leaf(1.0, Color::TEAL),
                ]),
            ),
            p(
                "Offset rows",
                row([
                    column([leaf(1.0, Color::PINK), leaf(2.0, Color::PURPLE)]),
                    column([leaf(2.0, Color::RED), leaf(1.0, Color::INDIGO)]),
                ]),
            ),
            p(
                "Nested mosaic",
                row([
                    column([
                        row([
                            column([leaf(1.0, Color::RED), leaf(1.0, Color::CYAN)]),
                            leaf(1.0, Color::LIME),
                        ]),
                        leaf(1.0, Color::MAGENTA),
                        row([
                            column([leaf(1.0, Color::ORANGE), leaf(1.0, Color::TEAL)]),
                            leaf(1.0, Color::BLUE),
                        ]),
                    ]),
                    leaf(1.0, Color::MINT),
                ]),
            ),
            p(
                "Mosaic",
                row([
                    column([
                        leaf(1.0, Color::RED),
                        row([leaf(1.0, Color::BLUE), leaf(1.0, Color::INDIGO)]),
                        leaf(1.0, Color::MINT),
                    ]),
                    column([leaf(1.0, Color::PINK), leaf(1.0, Color::GRAY)]),
                    column([
                        leaf(1.0, Color::YELLOW),
                        row([leaf(1.0, Color::GREEN), leaf(1.0, Color::EARTH)]),
                        leaf(1.0, Color::TEAL),
                    ]),
                ]),
            ),
        ])
    }

    /// Presets in catalog order.
    pub fn iter(&self) -> core::slice::Iter<'_, Preset> {
        self.presets.iter()
    }

    /// Preset at `index`.
    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    /// Preset with the given label.
    pub fn find(&self, label: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.label == label)
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl<'a> IntoIterator for &'a PresetLibrary {
    type Item = &'a Preset;
    type IntoIter = core::slice::Iter<'a, Preset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
