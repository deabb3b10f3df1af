// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Divider dragging.
//!
//! Drags the boundary of a two-row split through a few pointer positions, printing the
//! live factors, then shows a release that commits and one that would collapse a child
//! under the loose clamp policy and is reverted.
//!
//! Run:
//! - `RUST_LOG=understory_collage_interact=trace cargo run -p understory_examples --example collage_resize`

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_collage::{Color, Layout, Node};
use understory_collage_interact::{ClampPolicy, ResizeController, ResizeTarget};

fn two_rows() -> Node<()> {
    Node::row(
        1.0,
        [Node::empty(1.0, Color::PINK), Node::empty(1.0, Color::TEAL)],
    )
}

fn drag(policy: ClampPolicy, positions: &[f64]) {
    let mut tree = two_rows();
    let Some(split) = tree.split_id() else {
        return;
    };
    let layout = match Layout::compute(&tree, Rect::new(0.0, 0.0, 100.0, 100.0)) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("layout failed: {e}");
            return;
        }
    };

    let mut ctl = ResizeController::new(policy);
    let target = ResizeTarget { split, boundary: 0 };
    if let Err(e) = ctl.begin(&tree, &layout, target) {
        eprintln!("begin failed: {e}");
        return;
    }
    for &p in positions {
        match ctl.update(p) {
            Ok(live) => {
                let shown = ctl.preview().map(|v| v.factors.to_vec());
                println!("  p={p:>6.1} live={live:.3} shown={shown:?}");
            }
            Err(e) => eprintln!("update failed: {e}"),
        }
    }
    match ctl.end(&mut tree) {
        Ok(outcome) => println!("  => {outcome:?}"),
        Err(e) => eprintln!("end failed: {e}"),
    }
    let weights: Vec<f64> = tree.children().iter().map(Node::weight).collect();
    println!("  committed weights {weights:?}");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("== Tight ==");
    drag(ClampPolicy::Tight, &[60.0, 90.0, 140.0, 75.0]);

    println!("\n== Loose, dragged past the edge ==");
    drag(ClampPolicy::Loose, &[60.0, 120.0]);
}
