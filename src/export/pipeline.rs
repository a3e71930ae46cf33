//! The export sequence
//!
//! One async sequence per export: wait for fonts, mount a scale-free copy of
//! the canvas off-screen at the exact target size, let it settle, rasterize
//! it 1:1, tear it down and hand the file to the host. Platform work goes
//! through `ExportHost`, so the same sequence drives the browser and the
//! native software rasterizer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::error::ExportError;
use super::state::{BusyGuard, ExportPhase};
use super::tree::{EncodedImage, ExportFile, ExportJob, ExportTree, RasterOptions};

/// Platform operations used by the export sequence
#[allow(async_fn_in_trait)]
pub trait ExportHost {
    /// A mounted off-screen copy of the canvas
    type Surface;

    async fn fonts_ready(&self) -> Result<(), ExportError>;

    /// Attach the export tree outside the viewport at its exact size
    fn mount_offscreen(&self, tree: &ExportTree) -> Result<Self::Surface, ExportError>;

    /// Yield at least one frame and wait for the surface's images
    async fn settle(&self, surface: &mut Self::Surface) -> Result<(), ExportError>;

    async fn rasterize(
        &self,
        surface: &mut Self::Surface,
        options: &RasterOptions,
    ) -> Result<EncodedImage, ExportError>;

    /// Detach and discard the surface
    fn unmount(&self, surface: Self::Surface);

    /// Start the download
    fn save(&self, file: &ExportFile) -> Result<(), ExportError>;

    /// Show a failure notice to the user
    fn notify_failure(&self, error: &ExportError, message: &str);
}

/// Result of one export trigger
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Saved(ExportFile),
    /// Another export was running; nothing happened
    Busy,
    /// Nothing to export; nothing happened
    NoTarget,
    Failed(ExportError),
}

impl ExportOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, ExportOutcome::Saved(_))
    }

    pub fn file(&self) -> Option<&ExportFile> {
        match self {
            ExportOutcome::Saved(file) => Some(file),
            _ => None,
        }
    }
}

type PhaseListener = Box<dyn Fn(ExportPhase)>;

/// Runs exports one at a time
pub struct Exporter {
    busy: Rc<Cell<bool>>,
    phase: Cell<ExportPhase>,
    failure_notice: String,
    listener: RefCell<Option<PhaseListener>>,
}

impl Exporter {
    pub fn new(failure_notice: impl Into<String>) -> Self {
        Self {
            busy: Rc::new(Cell::new(false)),
            phase: Cell::new(ExportPhase::Idle),
            failure_notice: failure_notice.into(),
            listener: RefCell::new(None),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn phase(&self) -> ExportPhase {
        self.phase.get()
    }

    /// Called on every phase change
    pub fn on_phase_change(&self, listener: impl Fn(ExportPhase) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    fn set_phase(&self, next: ExportPhase) {
        let current = self.phase.replace(next);
        if current != next {
            debug_assert!(
                current.can_advance_to(next),
                "illegal export phase change {} -> {}",
                current,
                next
            );
            log::debug!("Export phase {} -> {}", current, next);
            if let Some(listener) = self.listener.borrow().as_ref() {
                listener(next);
            }
        }
    }

    /// Take the busy flag now, ahead of an export that runs later
    ///
    /// `None` while another export holds it. Hand the guard to
    /// `export_reserved`; dropping it unused releases the flag.
    pub fn reserve(&self) -> Option<BusyGuard> {
        let guard = BusyGuard::acquire(&self.busy);
        if guard.is_none() {
            log::debug!("Export already in progress, ignoring trigger");
        }
        guard
    }

    /// Run one export
    ///
    /// Returns `Busy` without side effects if an export is already running,
    /// and `NoTarget` if there is no canvas. The busy flag is taken on the
    /// first poll, before any suspension point; callers that must report
    /// busy before polling use `reserve` + `export_reserved`.
    pub async fn export<H: ExportHost>(&self, host: &H, job: Option<ExportJob>) -> ExportOutcome {
        match self.reserve() {
            Some(guard) => self.export_reserved(guard, host, job).await,
            None => ExportOutcome::Busy,
        }
    }

    /// Run one export under a guard from `reserve`
    pub async fn export_reserved<H: ExportHost>(
        &self,
        busy: BusyGuard,
        host: &H,
        job: Option<ExportJob>,
    ) -> ExportOutcome {
        debug_assert!(busy.guards(&self.busy), "guard belongs to another exporter");
        let _busy = busy;
        let Some(job) = job else {
            log::debug!("Export triggered without a render target");
            return ExportOutcome::NoTarget;
        };

        self.set_phase(ExportPhase::Preparing);
        match self.run(host, job).await {
            Ok(file) => {
                log::info!(
                    "Exported {} ({}, {} bytes)",
                    file.filename,
                    file.size,
                    file.bytes.len()
                );
                self.set_phase(ExportPhase::Idle);
                ExportOutcome::Saved(file)
            }
            Err(ExportError::MissingRenderTarget) => {
                self.set_phase(ExportPhase::Idle);
                ExportOutcome::NoTarget
            }
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.set_phase(ExportPhase::Failed);
                host.notify_failure(&err, &self.failure_notice);
                ExportOutcome::Failed(err)
            }
        }
    }

    async fn run<H: ExportHost>(&self, host: &H, job: ExportJob) -> Result<ExportFile, ExportError> {
        host.fonts_ready().await?;

        let tree = ExportTree::from_list(job.list);
        let options = RasterOptions::for_tree(&tree);
        let mut surface = host.mount_offscreen(&tree)?;

        self.set_phase(ExportPhase::Capturing);
        let captured = async {
            host.settle(&mut surface).await?;
            host.rasterize(&mut surface, &options).await
        }
        .await;
        host.unmount(surface);
        let image = captured?;

        self.set_phase(ExportPhase::Finalizing);
        if image.size() != tree.size {
            return Err(ExportError::Rasterize(format!(
                "encoded {} but target is {}",
                image.size(),
                tree.size
            )));
        }

        let file = ExportFile {
            filename: job.filename,
            mime: image.mime,
            size: image.size(),
            bytes: image.bytes,
        };
        host.save(&file)?;
        Ok(file)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(crate::config::ChartLabels::default().export_failed)
    }
}
