//! In-memory export host
//!
//! Runs the whole export sequence without a browser: the "stage" counts
//! attached off-screen surfaces, images come from a resource map or data
//! URLs, pixels come from the software rasterizer and downloads are
//! collected instead of saved.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use super::error::ExportError;
use super::pipeline::ExportHost;
use super::tree::{EncodedImage, ExportFile, ExportTree, RasterOptions};
use crate::renderers::{decode_data_url, encode_jpeg, GlyphSource, ImageSet, SoftwareRasterizer};

/// Pending once, then ready: stands in for an animation frame
struct NextFrame {
    yielded: bool,
}

impl Future for NextFrame {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

fn next_frame() -> NextFrame {
    NextFrame { yielded: false }
}

/// An export tree attached to the in-memory stage
pub struct MemorySurface {
    tree: ExportTree,
    images: ImageSet,
    settled: bool,
}

impl MemorySurface {
    pub fn tree(&self) -> &ExportTree {
        &self.tree
    }
}

/// Native `ExportHost`
#[derive(Default)]
pub struct MemoryHost {
    rasterizer: SoftwareRasterizer,
    resources: RefCell<HashMap<String, Vec<u8>>>,
    fonts_missing: Cell<bool>,
    attached: Cell<usize>,
    frames: Cell<usize>,
    downloads: RefCell<Vec<ExportFile>>,
    notices: RefCell<Vec<String>>,
}

impl MemoryHost {
    /// Host without a glyph source; exporting a chart with text fails
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_glyphs(glyphs: Rc<dyn GlyphSource>) -> Self {
        Self {
            rasterizer: SoftwareRasterizer::with_glyphs(glyphs),
            ..Self::default()
        }
    }

    /// Serve `bytes` for image `src`
    pub fn add_resource(&self, src: impl Into<String>, bytes: Vec<u8>) {
        self.resources.borrow_mut().insert(src.into(), bytes);
    }

    /// Make `fonts_ready` fail
    pub fn set_fonts_missing(&self, missing: bool) {
        self.fonts_missing.set(missing);
    }

    /// Off-screen surfaces currently attached
    pub fn attached_surfaces(&self) -> usize {
        self.attached.get()
    }

    pub fn frames_waited(&self) -> usize {
        self.frames.get()
    }

    pub fn downloads(&self) -> Vec<ExportFile> {
        self.downloads.borrow().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }

    fn load_image(&self, src: &str, images: &mut ImageSet) -> Result<(), ExportError> {
        if images.contains(src) {
            return Ok(());
        }
        let bytes = match decode_data_url(src) {
            Some(decoded) => decoded?,
            None => self
                .resources
                .borrow()
                .get(src)
                .cloned()
                .ok_or_else(|| ExportError::ImageLoad {
                    src: src.to_string(),
                    reason: "not found".to_string(),
                })?,
        };
        images.decode(src, &bytes)
    }
}

impl ExportHost for MemoryHost {
    type Surface = MemorySurface;

    async fn fonts_ready(&self) -> Result<(), ExportError> {
        next_frame().await;
        if self.fonts_missing.get() {
            Err(ExportError::FontsUnavailable("font set never loaded".to_string()))
        } else {
            Ok(())
        }
    }

    fn mount_offscreen(&self, tree: &ExportTree) -> Result<MemorySurface, ExportError> {
        if self.attached.get() > 0 {
            return Err(ExportError::Platform("an export surface is already mounted".to_string()));
        }
        self.attached.set(self.attached.get() + 1);
        log::debug!("Mounted export surface {}", tree.size);
        Ok(MemorySurface {
            tree: tree.clone(),
            images: ImageSet::new(),
            settled: false,
        })
    }

    async fn settle(&self, surface: &mut MemorySurface) -> Result<(), ExportError> {
        next_frame().await;
        self.frames.set(self.frames.get() + 1);

        let sources: Vec<String> = surface
            .tree
            .list
            .image_sources()
            .into_iter()
            .map(str::to_string)
            .collect();
        for src in &sources {
            self.load_image(src, &mut surface.images)?;
        }
        surface.settled = true;
        Ok(())
    }

    async fn rasterize(
        &self,
        surface: &mut MemorySurface,
        options: &RasterOptions,
    ) -> Result<EncodedImage, ExportError> {
        if !surface.settled {
            return Err(ExportError::Rasterize("surface captured before it settled".to_string()));
        }
        let canvas = self.rasterizer.render(&surface.tree.list, &surface.images, options)?;
        let bytes = encode_jpeg(&canvas, options.jpeg_quality())?;
        Ok(EncodedImage::jpeg(canvas.width(), canvas.height(), bytes))
    }

    fn unmount(&self, surface: MemorySurface) {
        self.attached.set(self.attached.get().saturating_sub(1));
        log::debug!("Unmounted export surface {}", surface.tree.size);
    }

    fn save(&self, file: &ExportFile) -> Result<(), ExportError> {
        self.downloads.borrow_mut().push(file.clone());
        Ok(())
    }

    fn notify_failure(&self, _error: &ExportError, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }
}
