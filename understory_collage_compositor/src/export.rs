// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Final output: synchronous export, PNG encoding, and background export jobs.
//!
//! Export renders the tree exactly as the interactive preview does, only at the
//! requested output size. The tree is validated first so an invalid tree is reported
//! as an error rather than drawn partially.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use image::{ImageFormat, RgbaImage};
use tracing::{debug, info};
use understory_collage::Node;

use crate::error::CompositeError;
use crate::raster::SlotImage;
use crate::render::{RenderOptions, render_cancellable};

/// Shared cancellation flag, checked between leaves.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Validate `root` and render it at `width` x `height`.
pub fn export<I: SlotImage>(
    root: &Node<I>,
    width: u32,
    height: u32,
    options: &RenderOptions,
) -> Result<RgbaImage, CompositeError> {
    export_inner(root, width, height, options, None)
}

/// [`export`], stopping early with [`CompositeError::Cancelled`] once `cancel` fires.
pub fn export_with_cancel<I: SlotImage>(
    root: &Node<I>,
    width: u32,
    height: u32,
    options: &RenderOptions,
    cancel: &CancelToken,
) -> Result<RgbaImage, CompositeError> {
    export_inner(root, width, height, options, Some(cancel))
}

fn export_inner<I: SlotImage>(
    root: &Node<I>,
    width: u32,
    height: u32,
    options: &RenderOptions,
    cancel: Option<&CancelToken>,
) -> Result<RgbaImage, CompositeError> {
    root.validate()?;
    let composite = render_cancellable(root, width, height, options, cancel)?;
    info!(
        width,
        height,
        leaves = composite.layout.leaves().len(),
        fallbacks = composite.fallbacks.len(),
        "export complete"
    );
    Ok(composite.image)
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CompositeError> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(CompositeError::Encode)?;
    Ok(out.into_inner())
}

/// An export running on a background thread.
///
/// The job owns its tree snapshot, so the editing session can keep mutating its own
/// tree. Dropping the job cancels it without waiting.
#[derive(Debug)]
pub struct ExportJob {
    handle: Option<JoinHandle<Result<RgbaImage, CompositeError>>>,
    watch: JobWatch,
}

/// A detached view of an [`ExportJob`]: cancel it, or see whether its worker is done,
/// without owning the job.
#[derive(Clone, Debug, Default)]
pub struct JobWatch {
    cancel: CancelToken,
    done: Arc<AtomicBool>,
}

impl JobWatch {
    /// Ask the job to stop at the next leaf.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the worker thread has exited, successfully or not.
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}

/// Marks the job done when the worker exits, including by panic.
struct DoneOnDrop(Arc<AtomicBool>);

impl Drop for DoneOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

impl ExportJob {
    /// Start exporting `snapshot` on a thread named `collage-export`.
    pub fn spawn<I>(
        snapshot: Node<I>,
        width: u32,
        height: u32,
        options: RenderOptions,
    ) -> Result<Self, CompositeError>
    where
        I: SlotImage + Send + 'static,
    {
        let watch = JobWatch::default();
        let token = watch.cancel.clone();
        let done = DoneOnDrop(Arc::clone(&watch.done));
        let handle = thread::Builder::new()
            .name("collage-export".into())
            .spawn(move || {
                let _done = done;
                export_with_cancel(&snapshot, width, height, &options, &token)
            })
            .map_err(CompositeError::Spawn)?;
        debug!(width, height, "export job spawned");
        Ok(Self {
            handle: Some(handle),
            watch,
        })
    }

    /// Ask the job to stop at the next leaf.
    pub fn cancel(&self) {
        self.watch.cancel();
    }

    /// A handle to this job's cancellation flag.
    pub fn cancel_token(&self) -> CancelToken {
        self.watch.cancel.clone()
    }

    /// A detached handle that can cancel the job and observe when it is done.
    pub fn watch(&self) -> JobWatch {
        self.watch.clone()
    }

    /// Whether the worker has finished, successfully or not.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Block until the worker finishes and return its raster.
    pub fn wait(mut self) -> Result<RgbaImage, CompositeError> {
        let handle = self.handle.take().ok_or(CompositeError::Cancelled)?;
        handle.join().map_err(|_| CompositeError::WorkerPanicked)?
    }
}

impl Drop for ExportJob {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.watch.cancel();
        }
    }
}
