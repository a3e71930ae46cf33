//! Browser export host
//!
//! The export surface is a `<canvas>` of the exact target size, mounted in
//! an off-screen container (moved outside the viewport, never hidden). The
//! display list is painted onto it 1:1 once fonts and images are decoded,
//! and the JPEG is downloaded through a temporary anchor.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Document, HtmlAnchorElement, HtmlCanvasElement, HtmlElement, HtmlImageElement, Window};

use super::paint::paint_list;
use crate::export::{EncodedImage, ExportError, ExportFile, ExportHost, ExportTree, RasterOptions};
use crate::renderers::decode_data_url;

const OFFSCREEN_CLASS: &str = "sc-export-stage";

fn platform(err: JsValue) -> ExportError {
    ExportError::Platform(format!("{:?}", err))
}

/// Off-screen container holding the export canvas
pub struct BrowserSurface {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    tree: ExportTree,
    images: HashMap<String, HtmlImageElement>,
}

pub struct BrowserHost {
    window: Window,
    document: Document,
}

impl BrowserHost {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    async fn next_frame(&self) -> Result<(), ExportError> {
        let window = self.window.clone();
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let _ = window.request_animation_frame(&resolve);
        });
        JsFuture::from(promise).await.map(|_| ()).map_err(platform)
    }

    async fn load_image(&self, src: &str) -> Result<HtmlImageElement, ExportError> {
        let image = HtmlImageElement::new().map_err(platform)?;
        image.set_cross_origin(Some("anonymous"));
        image.set_src(src);
        JsFuture::from(image.decode()).await.map_err(|err| ExportError::ImageLoad {
            src: src.chars().take(64).collect(),
            reason: format!("{:?}", err),
        })?;
        Ok(image)
    }
}

impl ExportHost for BrowserHost {
    type Surface = BrowserSurface;

    async fn fonts_ready(&self) -> Result<(), ExportError> {
        let fonts = self.document.fonts();
        let ready = fonts
            .ready()
            .map_err(|e| ExportError::FontsUnavailable(format!("{:?}", e)))?;
        JsFuture::from(ready)
            .await
            .map(|_| ())
            .map_err(|e| ExportError::FontsUnavailable(format!("{:?}", e)))
    }

    fn mount_offscreen(&self, tree: &ExportTree) -> Result<BrowserSurface, ExportError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| ExportError::Platform("document has no body".to_string()))?;

        let container: HtmlElement = self
            .document
            .create_element("div")
            .and_then(|e| e.dyn_into::<HtmlElement>().map_err(JsValue::from))
            .map_err(platform)?;
        container.set_class_name(OFFSCREEN_CLASS);
        let style = container.style();
        for (name, value) in [
            ("position", "fixed".to_string()),
            ("left", "-100000px".to_string()),
            ("top", "0".to_string()),
            ("width", format!("{}px", tree.size.width)),
            ("height", format!("{}px", tree.size.height)),
            ("pointer-events", "none".to_string()),
        ] {
            style.set_property(name, &value).map_err(platform)?;
        }

        let canvas: HtmlCanvasElement = self
            .document
            .create_element("canvas")
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().map_err(JsValue::from))
            .map_err(platform)?;
        canvas.set_width(tree.size.width);
        canvas.set_height(tree.size.height);
        container.append_child(&canvas).map_err(platform)?;

        body.append_child(&container).map_err(platform)?;
        log::debug!("Mounted off-screen export surface {}", tree.size);

        Ok(BrowserSurface {
            container,
            canvas,
            tree: tree.clone(),
            images: HashMap::new(),
        })
    }

    async fn settle(&self, surface: &mut BrowserSurface) -> Result<(), ExportError> {
        self.next_frame().await?;
        let sources: Vec<String> = surface
            .tree
            .list
            .image_sources()
            .into_iter()
            .map(str::to_string)
            .collect();
        for src in sources {
            if !surface.images.contains_key(&src) {
                let image = self.load_image(&src).await?;
                surface.images.insert(src, image);
            }
        }
        Ok(())
    }

    async fn rasterize(
        &self,
        surface: &mut BrowserSurface,
        options: &RasterOptions,
    ) -> Result<EncodedImage, ExportError> {
        if options.scale != 1.0 {
            return Err(ExportError::Rasterize(format!("unsupported scale {}", options.scale)));
        }
        surface.canvas.set_width(options.width);
        surface.canvas.set_height(options.height);

        let ctx: CanvasRenderingContext2d = surface
            .canvas
            .get_context("2d")
            .map_err(platform)?
            .ok_or_else(|| ExportError::Rasterize("2d context unavailable".to_string()))?
            .dyn_into()
            .map_err(|_| ExportError::Rasterize("unexpected context type".to_string()))?;

        paint_list(&ctx, &surface.tree.list, &surface.images)
            .map_err(|e| ExportError::Rasterize(format!("{:?}", e)))?;

        // Tainted canvases throw here
        let data_url = surface
            .canvas
            .to_data_url_with_type_and_encoder_options(
                crate::export::JPEG_MIME,
                &JsValue::from_f64(options.quality as f64),
            )
            .map_err(|e| ExportError::Rasterize(format!("{:?}", e)))?;
        let bytes = decode_data_url(&data_url)
            .unwrap_or_else(|| Err(ExportError::Encode("canvas returned no data URL".to_string())))
            .map_err(|e| ExportError::Encode(e.to_string()))?;

        Ok(EncodedImage::jpeg(surface.canvas.width(), surface.canvas.height(), bytes))
    }

    fn unmount(&self, surface: BrowserSurface) {
        surface.container.remove();
        log::debug!("Removed off-screen export surface");
    }

    fn save(&self, file: &ExportFile) -> Result<(), ExportError> {
        let save_error = |e: JsValue| ExportError::Save {
            filename: file.filename.clone(),
            reason: format!("{:?}", e),
        };
        let body = self.document.body().ok_or_else(|| ExportError::Save {
            filename: file.filename.clone(),
            reason: "document has no body".to_string(),
        })?;
        let anchor: HtmlAnchorElement = self
            .document
            .create_element("a")
            .and_then(|e| e.dyn_into::<HtmlAnchorElement>().map_err(JsValue::from))
            .map_err(save_error)?;

        anchor.set_href(&format!("data:{};base64,{}", file.mime, STANDARD.encode(&file.bytes)));
        anchor.set_download(&file.filename);
        body.append_child(&anchor).map_err(save_error)?;
        anchor.click();
        anchor.remove();
        Ok(())
    }

    fn notify_failure(&self, error: &ExportError, message: &str) {
        crate::wasm_error!("Export failed: {}", error);
        if let Err(err) = self.window.alert_with_message(message) {
            log::warn!("Could not show export notice: {:?}", err);
        }
    }
}
