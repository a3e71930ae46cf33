//! `SizeChartApp`: the object the JavaScript application drives
//!
//! Owns the chart session, the on-screen preview, the region subscription
//! and the exporter. Form edits re-render synchronously; resizes only touch
//! the preview transform.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::HtmlElement;

use super::helpers::{deserialize, js_error, serialize};
use crate::config::AppConfig;
use crate::dom::{BrowserHost, BrowserRegion, DisplayView};
use crate::export::{ExportJob, ExportOutcome, Exporter};
use crate::models::{CanvasFormat, FormState};
use crate::renderers::encode_data_url;
use crate::session::ChartSession;
use crate::viewport::{RegionObserver, RegionSize, Subscription};
use crate::{wasm_info, wasm_warn};

struct AppInner {
    session: RefCell<ChartSession>,
    view: RefCell<DisplayView>,
    exporter: Exporter,
    host: BrowserHost,
    subscription: RefCell<Option<Subscription>>,
    disposed: Cell<bool>,
}

impl AppInner {
    fn render(&self) -> Result<(), JsValue> {
        if self.disposed.get() {
            return Ok(());
        }
        let tree = self.session.borrow().display_tree();
        self.view.borrow_mut().render(&tree)
    }

    fn on_resize(&self, region: RegionSize) {
        if self.disposed.get() {
            return;
        }
        let transform = {
            let mut session = self.session.borrow_mut();
            session.on_region_resize(region);
            session.display_tree().transform
        };
        if let Err(err) = self.view.borrow().set_transform(transform) {
            wasm_warn!("Failed to apply preview scale: {:?}", err);
        }
    }

    /// Snapshot for an export; `None` when nothing is on screen
    fn export_job(&self) -> Option<ExportJob> {
        if self.disposed.get() || !self.view.borrow().is_mounted() {
            return None;
        }
        Some(self.session.borrow().export_job())
    }
}

fn parse_config(config: JsValue) -> Result<AppConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return AppConfig::builtin().map_err(|e| js_error("Built-in config", e));
    }
    if let Some(text) = config.as_string() {
        return AppConfig::from_json(&text)
            .or_else(|_| AppConfig::from_yaml(&text))
            .map_err(|e| js_error("Config", e));
    }
    deserialize(config, "Config deserialization error")
}

#[wasm_bindgen]
pub struct SizeChartApp {
    inner: Rc<AppInner>,
}

#[wasm_bindgen]
impl SizeChartApp {
    /// Mount the preview inside the element with id `region_id`
    ///
    /// `config` may be omitted (built-in catalogue), a JSON/YAML string or a
    /// plain object.
    #[wasm_bindgen(constructor)]
    pub fn new(region_id: &str, config: JsValue) -> Result<SizeChartApp, JsValue> {
        let config = parse_config(config)?;
        let host = BrowserHost::new()?;
        let region: HtmlElement = host
            .document()
            .get_element_by_id(region_id)
            .ok_or_else(|| js_error("Preview region", format!("no element with id '{}'", region_id)))?
            .dyn_into()
            .map_err(|_| js_error("Preview region", "not an HTML element"))?;

        let exporter = Exporter::new(config.labels().export_failed.clone());
        exporter.on_phase_change(|phase| log::debug!("Export phase: {}", phase));

        let inner = Rc::new(AppInner {
            session: RefCell::new(ChartSession::new(config)),
            view: RefCell::new(DisplayView::new(host.document().clone(), region.clone())),
            exporter,
            host,
            subscription: RefCell::new(None),
            disposed: Cell::new(false),
        });
        inner.render()?;

        let weak: Weak<AppInner> = Rc::downgrade(&inner);
        let subscription = BrowserRegion::new(region.into()).observe(Rc::new(move |size: RegionSize| {
            if let Some(inner) = weak.upgrade() {
                inner.on_resize(size);
            }
        }));
        *inner.subscription.borrow_mut() = Some(subscription);

        wasm_info!("SizeChartApp mounted in #{}", region_id);
        Ok(SizeChartApp { inner })
    }

    /// Replace the form state; the preview re-renders before this returns
    #[wasm_bindgen(js_name = setFormState)]
    pub fn set_form_state(&self, form: JsValue) -> Result<(), JsValue> {
        let form: FormState = deserialize(form, "Form state deserialization error")?;
        self.inner.session.borrow_mut().set_form(form);
        self.inner.render()
    }

    #[wasm_bindgen(js_name = formState)]
    pub fn form_state(&self) -> Result<JsValue, JsValue> {
        serialize(self.inner.session.borrow().form(), "Form state serialization error")
    }

    /// Switch format ("portrait" or "landscape"); returns the new scale
    #[wasm_bindgen(js_name = setFormat)]
    pub fn set_format(&self, format: &str) -> Result<f64, JsValue> {
        let format: CanvasFormat = format.parse().map_err(|e: String| js_error("setFormat", e))?;
        let scale = self.inner.session.borrow_mut().set_format(format);
        self.inner.render()?;
        Ok(scale)
    }

    pub fn scale(&self) -> f64 {
        self.inner.session.borrow().scale()
    }

    #[wasm_bindgen(js_name = isDownloading)]
    pub fn is_downloading(&self) -> bool {
        self.inner.exporter.is_busy()
    }

    /// Export the current canvas as JPEG
    ///
    /// Resolves to the downloaded file name, or `null` when nothing was
    /// downloaded (busy, nothing to export, or failure already reported).
    /// `isDownloading()` is true as soon as this returns.
    pub fn download(&self) -> js_sys::Promise {
        let Some(busy) = self.inner.exporter.reserve() else {
            return js_sys::Promise::resolve(&JsValue::NULL);
        };
        let inner = Rc::clone(&self.inner);
        let job = inner.export_job();
        future_to_promise(async move {
            match inner.exporter.export_reserved(busy, &inner.host, job).await {
                ExportOutcome::Saved(file) => Ok(JsValue::from_str(&file.filename)),
                ExportOutcome::Busy | ExportOutcome::NoTarget | ExportOutcome::Failed(_) => Ok(JsValue::NULL),
            }
        })
    }

    /// Fetch a logo from `path` and use it unless the user already set one
    ///
    /// Resolves to whether the logo was applied. A missing file is not an
    /// error.
    #[wasm_bindgen(js_name = loadDefaultLogo)]
    pub fn load_default_logo(&self, path: String) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let data_url = match fetch_data_url(&path).await {
                Ok(Some(url)) => url,
                Ok(None) => {
                    log::info!("Default logo '{}' unavailable", path);
                    return Ok(JsValue::FALSE);
                }
                Err(err) => {
                    log::info!("Default logo '{}' not loaded: {:?}", path, err);
                    return Ok(JsValue::FALSE);
                }
            };
            let applied = inner.session.borrow_mut().offer_default_logo(data_url);
            if applied {
                inner.render()?;
            }
            Ok(JsValue::from_bool(applied))
        })
    }

    #[wasm_bindgen(js_name = displayList)]
    pub fn display_list(&self) -> Result<JsValue, JsValue> {
        serialize(self.inner.session.borrow().display_list(), "Display list serialization error")
    }

    #[wasm_bindgen(js_name = formatOptions)]
    pub fn format_options(&self) -> Result<JsValue, JsValue> {
        serialize(&CanvasFormat::options(), "Format options serialization error")
    }

    /// Stop observing the region and remove the preview
    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        self.inner.subscription.borrow_mut().take();
        self.inner.view.borrow_mut().clear();
        wasm_info!("SizeChartApp disposed");
    }
}

/// Fetch an image and return it as a data URL; `None` for HTTP errors or
/// bytes that are not PNG/JPEG
async fn fetch_data_url(path: &str) -> Result<Option<String>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(path)).await?.dyn_into()?;
    if !response.ok() {
        return Ok(None);
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(encode_data_url(&bytes))
}
