//! Export sequence against the in-memory host

mod common;

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use futures::executor::block_on;
use futures::join;
use sizechart_wasm::export::{
    EncodedImage, ErrorKind, ExportFile, ExportPhase, ExportTree, MemorySurface, RasterOptions,
};
use sizechart_wasm::html_layout::class;
use sizechart_wasm::{
    CanvasFormat, ChartSession, ExportError, ExportHost, ExportOutcome, Exporter, MemoryHost, RegionSize,
};

/// Delegates to `MemoryHost` but can never rasterize
struct FailingHost {
    inner: MemoryHost,
}

impl ExportHost for FailingHost {
    type Surface = MemorySurface;

    async fn fonts_ready(&self) -> Result<(), ExportError> {
        self.inner.fonts_ready().await
    }

    fn mount_offscreen(&self, tree: &ExportTree) -> Result<MemorySurface, ExportError> {
        self.inner.mount_offscreen(tree)
    }

    async fn settle(&self, surface: &mut MemorySurface) -> Result<(), ExportError> {
        self.inner.settle(surface).await
    }

    async fn rasterize(
        &self,
        _surface: &mut MemorySurface,
        _options: &RasterOptions,
    ) -> Result<EncodedImage, ExportError> {
        common::yield_once().await;
        Err(ExportError::Rasterize("canvas is tainted".to_string()))
    }

    fn unmount(&self, surface: MemorySurface) {
        self.inner.unmount(surface)
    }

    fn save(&self, file: &ExportFile) -> Result<(), ExportError> {
        self.inner.save(file)
    }

    fn notify_failure(&self, error: &ExportError, message: &str) {
        self.inner.notify_failure(error, message)
    }
}

fn session(format: CanvasFormat) -> ChartSession {
    let config = common::config();
    let mut form = common::filled_form(&config, &["S", "M", "L"]);
    form.model_code = "ABC123".to_string();
    form.canvas_format = format;
    ChartSession::with_form(config, form)
}

fn decode(file: &ExportFile) -> image::RgbImage {
    image::load_from_memory_with_format(&file.bytes, image::ImageFormat::Jpeg)
        .expect("export is a JPEG")
        .to_rgb8()
}

#[test]
fn test_export_size_ignores_preview_scale() {
    for (format, region) in [
        (CanvasFormat::Portrait, RegionSize::new(300.0, 420.0)),
        (CanvasFormat::Landscape, RegionSize::new(2600.0, 2000.0)),
    ] {
        let mut session = session(format);
        let scale = session.on_region_resize(region);
        assert!(scale != 1.0);

        let host = common::memory_host(session.config());
        let exporter = Exporter::default();
        let outcome = block_on(exporter.export(&host, Some(session.export_job())));

        let file = outcome.file().expect("export saved");
        assert_eq!(file.size, format.size());
        let image = decode(file);
        assert_eq!((image.width(), image.height()), (format.size().width, format.size().height));
        // The preview keeps its scale
        assert_eq!(session.scale(), scale);
    }
}

#[test]
fn test_exported_pixels_follow_the_layout() {
    let session = session(CanvasFormat::Portrait);
    let host = common::memory_host(session.config());
    let outcome = block_on(Exporter::default().export(&host, Some(session.export_job())));
    let image = decode(outcome.file().unwrap());

    let header = image.get_pixel(5, 5);
    assert!(header.0.iter().all(|c| *c > 215), "header {:?}", header);
    let footer = image.get_pixel(600, 1795);
    assert!(footer.0.iter().all(|c| *c < 40), "footer {:?}", footer);
}

#[test]
fn test_long_model_code_stays_in_its_box() {
    let config = common::config();
    let mut form = common::form(&config);
    form.model_code = "SUMMER-COLLECTION-2024-LONG-MODEL-CODE-XYZ".to_string();
    let session = ChartSession::with_form(config, form);
    let code = *session
        .display_list()
        .items_with_class(class::MODEL_CODE)
        .next()
        .unwrap()
        .rect();

    let host = common::font_host(session.config());
    let outcome = block_on(Exporter::default().export(&host, Some(session.export_job())));
    let image = decode(outcome.file().expect("export saved"));

    let dark_in = |xs: std::ops::Range<u32>| {
        (code.y as u32..code.bottom() as u32)
            .flat_map(|y| xs.clone().map(move |x| (x, y)))
            .filter(|(x, y)| image.get_pixel(*x, *y).0.iter().all(|c| *c < 100))
            .count()
    };
    // Overflow starts at the box's left edge and is clipped at its right edge
    assert!(dark_in(code.x as u32..code.right() as u32) > 100);
    assert_eq!(dark_in((code.x as u32 - 36)..(code.x as u32 - 4)), 0);
    assert_eq!(dark_in((code.right() as u32 + 4)..image.width()), 0);
}

#[test]
fn test_text_without_fonts_fails() {
    let session = session(CanvasFormat::Portrait);
    let host = MemoryHost::new();
    for category in session.config().categories() {
        if let Some(src) = category.silhouette() {
            host.add_resource(src, common::png_bytes(4, 4, [0, 0, 0, 255]));
        }
    }

    let outcome = block_on(Exporter::default().export(&host, Some(session.export_job())));
    match outcome {
        ExportOutcome::Failed(err) => {
            assert!(matches!(err, ExportError::FontsUnavailable(_)));
            assert_eq!(err.kind(), ErrorKind::ResourceFailure);
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(host.downloads().is_empty());
    assert_eq!(host.attached_surfaces(), 0);
}

#[test]
fn test_overlapping_triggers_download_once() {
    let session = session(CanvasFormat::Portrait);
    let host = common::memory_host(session.config());
    let exporter = Exporter::default();

    let (first, second) = block_on(async {
        join!(
            exporter.export(&host, Some(session.export_job())),
            async {
                common::yield_once().await;
                exporter.export(&host, Some(session.export_job())).await
            }
        )
    });

    assert!(first.is_saved());
    assert_eq!(second, ExportOutcome::Busy);
    assert_eq!(host.downloads().len(), 1);
    assert!(!exporter.is_busy());
}

#[test]
fn test_reservation_reports_busy_before_first_poll() {
    let session = session(CanvasFormat::Portrait);
    let host = common::memory_host(session.config());
    let exporter = Exporter::default();

    let busy = exporter.reserve().expect("exporter idle");
    assert!(exporter.is_busy());
    assert!(exporter.reserve().is_none());
    assert_eq!(block_on(exporter.export(&host, Some(session.export_job()))), ExportOutcome::Busy);

    let pending = exporter.export_reserved(busy, &host, Some(session.export_job()));
    assert!(exporter.is_busy());
    assert!(block_on(pending).is_saved());
    assert!(!exporter.is_busy());
    assert_eq!(host.downloads().len(), 1);
}

#[test]
fn test_unused_reservation_releases_busy() {
    let exporter = Exporter::default();
    drop(exporter.reserve());
    assert!(!exporter.is_busy());
    assert!(exporter.reserve().is_some());
}

#[test]
fn test_trigger_after_completion_runs_again() {
    let session = session(CanvasFormat::Landscape);
    let host = common::memory_host(session.config());
    let exporter = Exporter::default();

    assert!(block_on(exporter.export(&host, Some(session.export_job()))).is_saved());
    assert!(block_on(exporter.export(&host, Some(session.export_job()))).is_saved());
    assert_eq!(host.downloads().len(), 2);
}

#[test]
fn test_rasterize_failure_cleans_up_and_recovers() {
    let session = session(CanvasFormat::Portrait);
    let failing = FailingHost {
        inner: common::memory_host(session.config()),
    };
    let exporter = Exporter::default();

    let outcome = block_on(exporter.export(&failing, Some(session.export_job())));
    match outcome {
        ExportOutcome::Failed(err) => assert_eq!(err.kind(), ErrorKind::RasterizationFailure),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(failing.inner.attached_surfaces(), 0);
    assert!(failing.inner.downloads().is_empty());
    assert_eq!(failing.inner.notices(), vec!["The image could not be generated. Please try again.".to_string()]);
    assert!(!exporter.is_busy());
    assert_eq!(exporter.phase(), ExportPhase::Failed);

    // Same exporter, working host
    let host = common::memory_host(session.config());
    assert!(block_on(exporter.export(&host, Some(session.export_job()))).is_saved());
    assert_eq!(exporter.phase(), ExportPhase::Idle);
}

#[test]
fn test_missing_image_is_a_resource_failure() {
    let session = session(CanvasFormat::Portrait);
    let host = MemoryHost::with_glyphs(Rc::new(common::BlockGlyphs));
    let exporter = Exporter::default();

    let outcome = block_on(exporter.export(&host, Some(session.export_job())));
    match outcome {
        ExportOutcome::Failed(err) => {
            assert!(matches!(err, ExportError::ImageLoad { .. }));
            assert_eq!(err.kind(), ErrorKind::ResourceFailure);
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(host.attached_surfaces(), 0);
    assert_eq!(host.notices().len(), 1);
}

#[test]
fn test_fonts_failure_never_mounts() {
    let session = session(CanvasFormat::Portrait);
    let host = common::memory_host(session.config());
    host.set_fonts_missing(true);

    let outcome = block_on(Exporter::default().export(&host, Some(session.export_job())));
    assert!(matches!(outcome, ExportOutcome::Failed(ExportError::FontsUnavailable(_))));
    assert_eq!(host.frames_waited(), 0);
    assert_eq!(host.attached_surfaces(), 0);
}

#[test]
fn test_no_target_is_silent() {
    let host = MemoryHost::new();
    let exporter = Exporter::default();
    let outcome = block_on(exporter.export(&host, None));

    assert_eq!(outcome, ExportOutcome::NoTarget);
    assert!(host.notices().is_empty());
    assert!(host.downloads().is_empty());
    assert!(!exporter.is_busy());
    assert_eq!(exporter.phase(), ExportPhase::Idle);
}

#[test]
fn test_phase_sequence() {
    let session = session(CanvasFormat::Portrait);
    let host = common::memory_host(session.config());
    let exporter = Exporter::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    exporter.on_phase_change(move |phase| sink.borrow_mut().push(phase));

    block_on(exporter.export(&host, Some(session.export_job())));
    assert_eq!(
        *seen.borrow(),
        vec![
            ExportPhase::Preparing,
            ExportPhase::Capturing,
            ExportPhase::Finalizing,
            ExportPhase::Idle
        ]
    );
}

#[test]
fn test_filenames() {
    let session = session(CanvasFormat::Portrait);
    assert_eq!(session.export_job().filename, "Size-Chart-ABC123-portrait.jpg");

    let config = common::config();
    let mut form = common::form(&config);
    form.canvas_format = CanvasFormat::Landscape;
    let session = ChartSession::with_form(config, form);
    assert_eq!(session.export_job().filename, "Size-Chart-tshirt-landscape.jpg");
}

#[test]
fn test_saved_file_opens_as_jpeg() {
    let session = session(CanvasFormat::Landscape);
    let host = common::memory_host(session.config());
    let outcome = block_on(Exporter::default().export(&host, Some(session.export_job())));
    let file = outcome.file().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(&file.filename);
    std::fs::File::create(&path).unwrap().write_all(&file.bytes).unwrap();

    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (1800, 1200));
}
