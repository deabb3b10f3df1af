// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One editing session over a collage tree.
//!
//! A [`Session`] is the single owner of the tree being edited. It routes pointer input to
//! the resize controller or to slot selection, swaps images into slots, and renders the
//! preview and the final export with the same compositor.
//!
//! The session remembers the last tree that passed validation. It is recorded when the
//! session starts and after every committed resize or image assignment, and
//! [`Session::reset_to_last_valid`] restores it.

use image::RgbaImage;
use kurbo::{Point, Rect, Size};
use tracing::{debug, info, warn};
use understory_collage::{Layout, Node, Preset, SlotFlags, SlotId};
use understory_collage_compositor::{
    Composite, ExportJob, JobWatch, RasterImage, SlotImage, export, new_canvas, render,
    render_layout,
};
use understory_collage_interact::adapters::layout::{PointerTarget, resolve_pointer};
use understory_collage_interact::{
    ResizeController, ResizeOutcome, ResizeTarget, SelectionEvent, SelectionState,
};

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::ratio::AspectRatio;

/// What a pointer-down did.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerResponse {
    /// A divider was grabbed and a resize began.
    ResizeStarted(ResizeTarget),
    /// A slot was selected and now awaits an image.
    SlotSelected {
        /// The selected slot.
        slot: SlotId,
        /// Selection transitions, possibly empty if it was already selected.
        events: Vec<SelectionEvent>,
    },
    /// The pointer landed outside the canvas.
    Ignored,
}

/// An editing session.
#[derive(Debug)]
pub struct Session<I> {
    tree: Node<I>,
    last_valid: Node<I>,
    config: EditorConfig,
    ratio: AspectRatio,
    available: Size,
    canvas: Rect,
    resize: ResizeController,
    selection: SelectionState,
    jobs: Vec<JobWatch>,
}

impl<I: Clone> Session<I> {
    /// Start editing a fresh copy of `preset`. The preset itself is never modified.
    pub fn start(preset: &Preset, config: EditorConfig) -> Self {
        info!(preset = preset.label(), "session started");
        Self::with_tree(preset.instantiate(), config)
    }

    /// Start editing an existing tree after checking it.
    pub fn from_tree(tree: Node<I>, config: EditorConfig) -> Result<Self, EditorError> {
        tree.validate()?;
        Ok(Self::with_tree(tree, config))
    }

    fn with_tree(tree: Node<I>, config: EditorConfig) -> Self {
        let (w, h) = config.export_size;
        let available = Size::new(f64::from(w), f64::from(h));
        Self {
            last_valid: tree.clone(),
            tree,
            ratio: config.ratio,
            canvas: config.ratio.fit(available),
            available,
            resize: ResizeController::new(config.clamp),
            selection: SelectionState::new(),
            jobs: Vec::new(),
            config,
        }
    }

    /// The tree being edited, with committed weights.
    pub fn tree(&self) -> &Node<I> {
        &self.tree
    }

    /// The session configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The current aspect ratio.
    pub fn ratio(&self) -> AspectRatio {
        self.ratio
    }

    /// The canvas rect in host coordinates.
    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    /// The slot awaiting an image, if any.
    pub fn awaiting(&self) -> Option<SlotId> {
        self.selection.awaiting()
    }

    /// Whether a divider drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.resize.is_dragging()
    }

    /// Set the space available to the preview; the canvas is the ratio fitted inside it.
    pub fn set_canvas(&mut self, available: Size) {
        self.available = available;
        self.canvas = self.ratio.fit(available);
        debug!(?available, canvas = ?self.canvas, "canvas resized");
    }

    /// Change the aspect ratio and refit the canvas.
    pub fn set_ratio(&mut self, ratio: AspectRatio) {
        self.ratio = ratio;
        self.set_canvas(self.available);
    }

    /// The rect stream for the current frame, including any live drag preview and the
    /// awaiting-image flag.
    pub fn layout(&self) -> Result<Layout, EditorError> {
        self.layout_in(self.canvas)
    }

    fn layout_in(&self, rect: Rect) -> Result<Layout, EditorError> {
        let mut layout = Layout::compute_with_preview(&self.tree, rect, self.resize.preview())?;
        if let Some(id) = self.selection.awaiting() {
            layout.mark(id, SlotFlags::AWAITING_IMAGE);
        }
        Ok(layout)
    }

    /// Route a pointer-down: grab a divider if one is within the hit slop, otherwise
    /// select the slot beneath.
    pub fn pointer_down(&mut self, pt: Point) -> Result<PointerResponse, EditorError> {
        let layout = self.layout()?;
        match resolve_pointer(&layout, pt, self.config.hit_slop) {
            Some(PointerTarget::Boundary(target)) => {
                self.resize.begin(&self.tree, &layout, target)?;
                Ok(PointerResponse::ResizeStarted(target))
            }
            Some(PointerTarget::Slot(slot)) => {
                let events = self.selection.select(slot);
                Ok(PointerResponse::SlotSelected { slot, events })
            }
            None => Ok(PointerResponse::Ignored),
        }
    }

    /// Move the dragged divider. Returns the live factor, or `None` when not dragging.
    pub fn pointer_move(&mut self, pt: Point) -> Result<Option<f64>, EditorError> {
        if !self.resize.is_dragging() {
            return Ok(None);
        }
        Ok(Some(self.resize.update_point(pt)?))
    }

    /// Release the dragged divider at `pt` and commit. Returns `None` when not dragging.
    pub fn pointer_up(&mut self, pt: Point) -> Result<Option<ResizeOutcome>, EditorError> {
        if !self.resize.is_dragging() {
            return Ok(None);
        }
        self.resize.update_point(pt)?;
        let outcome = self.resize.end(&mut self.tree)?;
        if matches!(outcome, ResizeOutcome::Committed { .. }) {
            self.record_valid();
        }
        Ok(Some(outcome))
    }

    /// Abandon an in-progress drag.
    pub fn pointer_cancel(&mut self) -> Option<ResizeOutcome> {
        self.resize.cancel()
    }

    /// Select a slot for image assignment. Returns `None` if the slot is not in the tree.
    pub fn select(&mut self, id: SlotId) -> Option<Vec<SelectionEvent>> {
        self.tree.find_slot(id)?;
        Some(self.selection.select(id))
    }

    /// Clear the selection.
    pub fn cancel_selection(&mut self) -> Vec<SelectionEvent> {
        self.selection.cancel()
    }

    /// Put `image` into slot `id`. Returns `false` if no slot has that id.
    pub fn assign(&mut self, id: SlotId, image: I) -> bool {
        if self.tree.assign(id, image).is_none() {
            debug!(slot = %id, "assign to unknown slot ignored");
            return false;
        }
        if self.selection.is_awaiting(id) {
            self.selection.take();
        }
        info!(slot = %id, "image assigned");
        self.record_valid();
        true
    }

    /// Put `image` into the awaiting slot, consuming the selection.
    ///
    /// Returns the slot that received the image, or `None` if nothing was selected.
    pub fn assign_selected(&mut self, image: I) -> Option<SlotId> {
        let id = self.selection.take()?;
        self.assign(id, image).then_some(id)
    }

    /// Return slot `id` to its placeholder color.
    pub fn clear(&mut self, id: SlotId) -> bool {
        if self.tree.clear(id).is_none() {
            return false;
        }
        self.record_valid();
        true
    }

    /// Check the tree's invariants.
    pub fn validate(&self) -> Result<(), EditorError> {
        self.tree.validate().map_err(|e| {
            warn!(error = %e, "session tree is invalid");
            e.into()
        })
    }

    /// Replace the tree with the last valid one, abandoning any drag.
    pub fn reset_to_last_valid(&mut self) {
        self.resize.cancel();
        self.tree = self.last_valid.clone();
        if let Some(id) = self.selection.awaiting() {
            if self.tree.find_slot(id).is_none() {
                self.selection.cancel();
            }
        }
        info!("session reset to last valid tree");
    }

    /// Mutable access to the tree for edits beyond weights and images.
    ///
    /// Changes are not validated until the next render or [`validate`](Self::validate).
    pub fn tree_mut(&mut self) -> &mut Node<I> {
        &mut self.tree
    }

    fn record_valid(&mut self) {
        if self.tree.validate().is_ok() {
            self.last_valid = self.tree.clone();
        }
    }
}

impl<I: Clone + SlotImage> Session<I> {
    /// Render the current interactive frame at the canvas size, with the preview dividers
    /// and any live drag applied.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "canvas sizes are rounded and clamped to u32"
    )]
    pub fn render_preview(&self) -> Result<Composite, EditorError> {
        self.validate()?;
        let to_px = |v: f64| v.round().clamp(0.0, f64::from(u32::MAX)) as u32;
        let (width, height) = (to_px(self.canvas.width()), to_px(self.canvas.height()));
        let mut image = new_canvas(width, height)?;
        let layout = self.layout_in(Rect::new(0.0, 0.0, f64::from(width), f64::from(height)))?;
        let fallbacks = render_layout(&self.tree, &layout, &mut image, &self.config.preview, None)?;
        Ok(Composite {
            image,
            layout,
            fallbacks,
        })
    }

    /// Pixel size of the export: the current ratio fitted into the configured export size.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "fitted sizes never exceed the configured u32 export size"
    )]
    pub fn export_dimensions(&self) -> (u32, u32) {
        let (w, h) = self.config.export_size;
        let fitted = self.ratio.fit(Size::new(f64::from(w), f64::from(h)));
        (
            (fitted.width().round() as u32).max(1),
            (fitted.height().round() as u32).max(1),
        )
    }

    /// Rasterize the committed tree at the export size.
    pub fn export(&self) -> Result<RgbaImage, EditorError> {
        self.validate()?;
        let (width, height) = self.export_dimensions();
        Ok(export(&self.tree, width, height, &self.config.export)?)
    }
}

impl<I: Clone + SlotImage + Send + 'static> Session<I> {
    /// Export a snapshot of the committed tree on a background thread.
    ///
    /// The job is cancelled if the session is dropped before it finishes.
    pub fn export_in_background(&mut self) -> Result<ExportJob, EditorError> {
        self.validate()?;
        let (width, height) = self.export_dimensions();
        let job = ExportJob::spawn(self.tree.clone(), width, height, self.config.export)?;
        self.jobs.retain(|w| !w.is_done());
        self.jobs.push(job.watch());
        Ok(job)
    }
}

impl<I> Drop for Session<I> {
    fn drop(&mut self) {
        for watch in &self.jobs {
            watch.cancel();
        }
    }
}

/// Render `preset` as a thumbnail with thin dividers.
pub fn render_thumbnail(preset: &Preset, config: &EditorConfig) -> Result<RgbaImage, EditorError> {
    let tree: Node<RasterImage> = preset.instantiate();
    let size = config.thumbnail_size;
    Ok(render(&tree, size, size, &config.thumbnail)?.image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_collage::{Color, PresetLibrary, Slot};
    use understory_collage_compositor::CompositeError;
    use understory_collage_interact::RevertReason;

    fn two_rows() -> Session<RasterImage> {
        let tree = Node::row(1.0, [Node::empty(1.0, Color::RED), Node::empty(1.0, Color::BLUE)]);
        let mut s = Session::from_tree(tree, EditorConfig::default()).unwrap();
        s.set_canvas(Size::new(200.0, 100.0));
        s.set_ratio(AspectRatio::TwoOne);
        s
    }

    #[test]
    fn start_instantiates_preset_without_touching_it() {
        let lib = PresetLibrary::builtin();
        let preset = lib.get(0).unwrap();
        let s: Session<RasterImage> = Session::start(preset, EditorConfig::default());
        assert_eq!(s.tree().leaf_count(), 2);
        assert!(s.tree().slots().all(|slot| preset.tree().find_slot(slot.id()).is_none()));
        assert_eq!(s.canvas(), Rect::new(0.0, 0.0, 1000.0, 1000.0));
    }

    #[test]
    fn drag_divider_through_pointer_events() {
        let mut s = two_rows();
        assert_eq!(s.canvas(), Rect::new(0.0, 0.0, 200.0, 100.0));
        let split = s.tree().split_id().unwrap();
        assert_eq!(
            s.pointer_down(Point::new(100.0, 52.0)).unwrap(),
            PointerResponse::ResizeStarted(ResizeTarget { split, boundary: 0 })
        );
        assert_eq!(s.pointer_move(Point::new(100.0, 60.0)).unwrap(), Some(1.2));
        // Live preview shows in the layout but not in the tree.
        assert_eq!(s.layout().unwrap().leaves()[0].rect.height(), 60.0);
        assert_eq!(s.tree().factors(), vec![1.0, 2.0]);

        let outcome = s.pointer_up(Point::new(100.0, 75.0)).unwrap();
        assert_eq!(
            outcome,
            Some(ResizeOutcome::Committed {
                split,
                weights: vec![1.5, 0.5]
            })
        );
        assert!(!s.is_dragging());
        assert_eq!(s.pointer_up(Point::new(0.0, 0.0)).unwrap(), None);
    }

    #[test]
    fn cancelled_drag_restores_preview() {
        let mut s = two_rows();
        s.pointer_down(Point::new(10.0, 50.0)).unwrap();
        s.pointer_move(Point::new(10.0, 10.0)).unwrap();
        assert!(matches!(
            s.pointer_cancel(),
            Some(ResizeOutcome::Reverted {
                reason: RevertReason::Abandoned,
                ..
            })
        ));
        assert_eq!(s.layout().unwrap().leaves()[0].rect.height(), 50.0);
    }

    #[test]
    fn tapping_a_slot_selects_then_assigns() {
        let mut s = two_rows();
        let ids: Vec<_> = s.tree().slots().map(Slot::id).collect();
        let resp = s.pointer_down(Point::new(20.0, 80.0)).unwrap();
        assert_eq!(
            resp,
            PointerResponse::SlotSelected {
                slot: ids[1],
                events: vec![SelectionEvent::Awaiting(ids[1])]
            }
        );
        let layout = s.layout().unwrap();
        assert!(layout.leaf(ids[1]).unwrap().flags.contains(SlotFlags::AWAITING_IMAGE));

        let img = RasterImage::new(RgbaImage::new(4, 4));
        assert_eq!(s.assign_selected(img.clone()), Some(ids[1]));
        assert_eq!(s.awaiting(), None);
        assert_eq!(s.tree().image_of(ids[1]), Some(&img));
        assert_eq!(s.assign_selected(img), None);
        assert_eq!(s.pointer_down(Point::new(500.0, 500.0)).unwrap(), PointerResponse::Ignored);
    }

    #[test]
    fn unknown_slots_are_not_found() {
        let mut s = two_rows();
        let stranger = SlotId::fresh();
        assert!(s.select(stranger).is_none());
        assert!(!s.assign(stranger, RasterImage::new(RgbaImage::new(1, 1))));
        assert!(!s.clear(stranger));
    }

    #[test]
    fn invalid_tree_is_refused_until_reset() {
        let mut s = two_rows();
        s.tree_mut()
            .set_child_weight(&understory_collage::NodePath::root(), 0, 2.0)
            .unwrap();
        // Break the tree behind the session's back.
        *s.tree_mut() = Node::row(1.0, []);
        assert!(matches!(s.validate(), Err(EditorError::Layout(_))));
        assert!(s.render_preview().is_err());
        assert!(s.export().is_err());

        s.reset_to_last_valid();
        s.validate().unwrap();
        assert_eq!(s.tree().leaf_count(), 2);
        assert_eq!(s.tree().factors(), vec![1.0, 2.0]);
    }

    #[test]
    fn preview_and_export_sizes_follow_ratio() {
        let mut s = two_rows();
        let preview = s.render_preview().unwrap();
        assert_eq!(preview.image.dimensions(), (200, 100));
        assert_eq!(s.export_dimensions(), (1000, 500));
        s.set_ratio(AspectRatio::OneOne);
        assert_eq!(s.export().unwrap().dimensions(), (1000, 1000));
    }

    #[test]
    fn thumbnails_render_every_preset() {
        let config = EditorConfig::default();
        for preset in &PresetLibrary::builtin() {
            let thumb = render_thumbnail(preset, &config).unwrap();
            assert_eq!(thumb.dimensions(), (90, 90), "{}", preset.label());
        }
    }

    #[test]
    fn finished_background_exports_are_forgotten() {
        let mut s = two_rows();
        s.config.export_size = (32, 32);
        for _ in 0..20 {
            s.export_in_background().unwrap().wait().unwrap();
        }
        assert_eq!(s.jobs.len(), 1);
        let running = s.export_in_background().unwrap();
        assert_eq!(s.jobs.len(), 1);
        drop(s);
        assert!(running.cancel_token().is_cancelled());
    }

    #[test]
    fn oversized_frames_are_errors() {
        let mut s = two_rows();
        s.set_canvas(Size::new(1e12, 5e11));
        assert!(matches!(
            s.render_preview(),
            Err(EditorError::Composite(CompositeError::CanvasTooLarge { .. }))
        ));

        let config = EditorConfig {
            thumbnail_size: u32::MAX,
            ..EditorConfig::default()
        };
        let lib = PresetLibrary::builtin();
        assert!(matches!(
            render_thumbnail(lib.get(0).unwrap(), &config),
            Err(EditorError::Composite(CompositeError::CanvasTooLarge { .. }))
        ));
    }
}
