// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_collage::{Color, Layout, Node, PresetLibrary};
use understory_collage_interact::{ClampPolicy, ResizeController, ResizeTarget};

/// Balanced tree alternating rows and columns, `fanout^depth` leaves.
fn balanced(depth: usize, fanout: usize) -> Node<()> {
    fn build(level: usize, depth: usize, fanout: usize) -> Node<()> {
        if level == depth {
            return Node::empty(1.0, Color::GRAY);
        }
        let children = (0..fanout).map(|_| build(level + 1, depth, fanout));
        let w = 1.0 + level as f64;
        if level % 2 == 0 {
            Node::row(w, children)
        } else {
            Node::column(w, children)
        }
    }
    build(0, depth, fanout)
}

fn bench_presets(c: &mut Criterion) {
    let presets = PresetLibrary::builtin();
    let trees: Vec<(&str, Node<()>)> = presets
        .iter()
        .map(|p| (p.label(), p.instantiate()))
        .collect();
    let canvas = Rect::new(0.0, 0.0, 1000.0, 1000.0);

    let mut group = c.benchmark_group("layout_presets");
    group.bench_function("all_builtin", |b| {
        b.iter(|| {
            for (_, tree) in &trees {
                black_box(Layout::compute(black_box(tree), canvas).ok());
            }
        });
    });
    for (label, tree) in &trees {
        group.bench_function(label.replace(' ', "_"), |b| {
            b.iter(|| black_box(Layout::compute(black_box(tree), canvas).ok()));
        });
    }
    group.finish();
}

fn bench_balanced(c: &mut Criterion) {
    let canvas = Rect::new(0.0, 0.0, 4096.0, 4096.0);
    let mut group = c.benchmark_group("layout_balanced");
    for (depth, fanout) in [(4, 3), (6, 3), (4, 6)] {
        let tree = balanced(depth, fanout);
        group.throughput(Throughput::Elements(tree.leaf_count() as u64));
        group.bench_function(format!("d{depth}_f{fanout}"), |b| {
            b.iter(|| black_box(Layout::compute(black_box(&tree), canvas).ok()));
        });
        let layout = Layout::compute(&tree, canvas).ok();
        group.bench_function(format!("hit_test_d{depth}_f{fanout}"), |b| {
            b.iter(|| {
                let Some(layout) = &layout else { return };
                for i in 0..64 {
                    let pt = Point::new(f64::from(i) * 61.0, f64::from(i) * 37.0);
                    black_box(layout.leaf_at(pt));
                    black_box(layout.divider_at(pt, 6.0));
                }
            });
        });
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let canvas = Rect::new(0.0, 0.0, 1000.0, 1000.0);
    let children = (0..8).map(|_| Node::empty(1.0, Color::GRAY));
    let tree: Node<()> = Node::column(1.0, children);
    let layout = Layout::compute(&tree, canvas).ok();
    let split = tree.split_id();

    let mut group = c.benchmark_group("resize_drag");
    for policy in [ClampPolicy::Tight, ClampPolicy::Loose] {
        group.throughput(Throughput::Elements(100));
        group.bench_function(format!("{policy:?}_100_updates"), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut t| {
                    let (Some(layout), Some(split)) = (&layout, split) else {
                        return;
                    };
                    let mut ctl = ResizeController::new(policy);
                    let target = ResizeTarget { split, boundary: 3 };
                    if ctl.begin(&t, layout, target).is_err() {
                        return;
                    }
                    for i in 0..100 {
                        let _ = black_box(ctl.update(300.0 + f64::from(i) * 2.5));
                        black_box(Layout::compute_with_preview(&t, canvas, ctl.preview()).ok());
                    }
                    black_box(ctl.end(&mut t).ok());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_presets, bench_balanced, bench_drag);
criterion_main!(benches);
