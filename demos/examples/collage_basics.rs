// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collage basics.
//!
//! Lists the built-in presets, instantiates one, and prints its rect stream and
//! dividers for a 600x400 canvas.
//!
//! Run:
//! - `cargo run -p understory_examples --example collage_basics`

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_collage::{Layout, Node, PresetLibrary};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let presets = PresetLibrary::builtin();
    println!("== Presets ==");
    for (i, p) in presets.iter().enumerate() {
        println!(
            "  {i:2}: {:<15} leaves={:<2} depth={}",
            p.label(),
            p.tree().leaf_count(),
            p.tree().depth()
        );
    }

    let Some(preset) = presets.find("Nested mosaic") else {
        return;
    };
    let tree: Node<()> = preset.instantiate();
    let layout = match Layout::compute(&tree, Rect::new(0.0, 0.0, 600.0, 400.0)) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("layout failed: {e}");
            return;
        }
    };

    println!("\n== {} leaves ==", preset.label());
    for leaf in layout.leaves() {
        let color = tree.color_of(leaf.slot).map(|c| c.to_array());
        println!(
            "  {:<9} {:<10} {:?} color={color:?}",
            leaf.slot.to_string(),
            leaf.path.to_string(),
            leaf.rect
        );
    }

    println!("\n== Dividers ==");
    for d in layout.dividers() {
        println!(
            "  {} boundary {} {:?} offset={:.1}",
            d.split, d.boundary, d.axis, d.offset
        );
    }
}
