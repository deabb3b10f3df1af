// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editing session and export.
//!
//! Starts a session on the "Split left" preset, fills two slots with generated
//! gradients, drags a divider, and writes the export as a PNG in the system temp
//! directory. The export runs on a background thread.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p understory_examples --example collage_export`

use std::env;
use std::fs;

use image::{Rgba, RgbaImage};
use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;
use understory_collage::{PresetLibrary, Slot};
use understory_collage_compositor::{RasterImage, encode_png};
use understory_collage_editor::{AspectRatio, EditorConfig, PointerResponse, Session};

fn gradient(width: u32, height: u32, tint: [u8; 3]) -> RasterImage {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        #[allow(clippy::cast_possible_truncation, reason = "scaled into 0..=255")]
        let t = ((x + y) * 255 / (width + height - 2).max(1)) as u8;
        Rgba([
            tint[0].saturating_add(t / 2),
            tint[1].saturating_add(t / 3),
            tint[2].saturating_add(t / 4),
            255,
        ])
    });
    RasterImage::new(img)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let presets = PresetLibrary::builtin();
    let Some(preset) = presets.find("Split left") else {
        return;
    };
    let config = EditorConfig {
        ratio: AspectRatio::ThreeFive,
        ..EditorConfig::default()
    };
    let mut session: Session<RasterImage> = Session::start(preset, config);
    session.set_canvas(Size::new(360.0, 600.0));
    println!("canvas {:?} ratio {}", session.canvas(), session.ratio());

    let ids: Vec<_> = session.tree().slots().map(Slot::id).collect();
    if let Some(&first) = ids.first() {
        session.assign(first, gradient(640, 480, [40, 60, 120]));
    }
    if let Some(&last) = ids.last() {
        session.assign(last, gradient(300, 900, [120, 40, 20]));
    }

    // Grab the first divider the layout reports and pull it a little.
    let divider = session
        .layout()
        .ok()
        .and_then(|l| l.dividers().first().map(|d| d.line.center()));
    if let Some(at) = divider {
        match session.pointer_down(at) {
            Ok(PointerResponse::ResizeStarted(target)) => {
                let to = Point::new(at.x + 30.0, at.y + 30.0);
                let _ = session.pointer_move(to);
                match session.pointer_up(to) {
                    Ok(outcome) => println!("drag {target:?}: {outcome:?}"),
                    Err(e) => eprintln!("drag failed: {e}"),
                }
            }
            Ok(other) => println!("pointer landed on {other:?}"),
            Err(e) => eprintln!("pointer failed: {e}"),
        }
    }

    let (w, h) = session.export_dimensions();
    println!("exporting {w}x{h}");
    let image = match session.export_in_background().and_then(|job| Ok(job.wait()?)) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("export failed: {e}");
            return;
        }
    };
    let path = env::temp_dir().join("understory_collage_export.png");
    match encode_png(&image).map(|png| fs::write(&path, png)) {
        Ok(Ok(())) => println!("wrote {}", path.display()),
        Ok(Err(e)) => eprintln!("write failed: {e}"),
        Err(e) => eprintln!("encode failed: {e}"),
    }
}
