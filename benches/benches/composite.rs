// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_collage::{Color, Node, PresetLibrary, Slot};
use understory_collage_compositor::{DividerStyle, RasterImage, RenderOptions, render};

fn photo(width: u32, height: u32) -> RasterImage {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        #[allow(clippy::cast_possible_truncation, reason = "masked to u8 range")]
        let v = ((x ^ y) & 0xff) as u8;
        image::Rgba([v, v.wrapping_mul(3), v.wrapping_mul(7), 255])
    });
    RasterImage::new(img)
}

fn filled(label: &str, image: &RasterImage) -> Option<Node<RasterImage>> {
    let presets = PresetLibrary::builtin();
    let mut tree: Node<RasterImage> = presets.find(label)?.instantiate();
    let ids: Vec<_> = tree.slots().map(Slot::id).collect();
    for id in ids {
        tree.assign(id, image.clone());
    }
    Some(tree)
}

fn bench_render(c: &mut Criterion) {
    let image = photo(1200, 900);
    let presets = PresetLibrary::builtin();
    let empty: Vec<Node<RasterImage>> = presets.iter().map(|p| p.instantiate()).collect();
    let with_dividers = RenderOptions {
        dividers: Some(DividerStyle {
            color: Color::GRAY.with_alpha(64),
            thickness: 4.0,
        }),
        ..RenderOptions::default()
    };

    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(500 * 500));
    group.bench_function("placeholders_all_presets_500", |b| {
        b.iter(|| {
            for tree in &empty {
                black_box(render(tree, 500, 500, &with_dividers).ok());
            }
        });
    });
    group.sample_size(10);
    for label in ["Two columns", "Mosaic"] {
        let Some(tree) = filled(label, &image) else {
            continue;
        };
        group.bench_function(format!("cover_{}_1000", label.replace(' ', "_")), |b| {
            b.iter(|| black_box(render(&tree, 1000, 1000, &RenderOptions::default()).ok()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
