// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collage_editor --heading-base-level=0

//! Understory Collage Editor: one editing session over a collage.
//!
//! This crate ties the Understory Collage pieces together the way an app needs them:
//!
//! - pick a [`Preset`](understory_collage::Preset) and start a [`Session`] on a fresh copy,
//! - choose an [`AspectRatio`] and fit the canvas into the space the host offers,
//! - route pointer events to divider drags or slot selection,
//! - swap images into slots,
//! - render interactive frames and export the final image, in the foreground or on a
//!   background thread.
//!
//! Settings live in a plain [`EditorConfig`] value.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Size};
//! use understory_collage::PresetLibrary;
//! use understory_collage_compositor::RasterImage;
//! use understory_collage_editor::{EditorConfig, PointerResponse, Session};
//!
//! let presets = PresetLibrary::builtin();
//! let preset = presets.find("Two columns").unwrap();
//! let mut session: Session<RasterImage> = Session::start(preset, EditorConfig::default());
//! session.set_canvas(Size::new(300.0, 300.0));
//!
//! // Grab the divider in the middle and drag it right.
//! let down = session.pointer_down(Point::new(150.0, 100.0)).unwrap();
//! assert!(matches!(down, PointerResponse::ResizeStarted(_)));
//! session.pointer_move(Point::new(200.0, 100.0)).unwrap();
//! session.pointer_up(Point::new(200.0, 100.0)).unwrap();
//!
//! let weights: Vec<f64> = session.tree().children().iter().map(|c| c.weight()).collect();
//! assert!((weights[0] - 4.0 / 3.0).abs() < 1e-9);
//! assert!((weights[1] - 2.0 / 3.0).abs() < 1e-9);
//!
//! let image = session.export().unwrap();
//! assert_eq!(image.dimensions(), (1000, 1000));
//! ```
//!
//! ## Recovery
//!
//! The session keeps the last tree that passed validation. If the tree is edited into an
//! invalid state, rendering and export return an error until
//! [`Session::reset_to_last_valid`] is called.

pub mod config;
mod error;
pub mod ratio;
pub mod session;

pub use config::EditorConfig;
pub use error::EditorError;
pub use ratio::AspectRatio;
pub use session::{PointerResponse, Session, render_thumbnail};
