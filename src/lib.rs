//! Size Chart WASM Module
//!
//! Lays out a branded product size chart on a fixed canvas (portrait
//! 1200x1800 or landscape 1800x1200), shows it scaled to fit its region and
//! exports it pixel for pixel as a JPEG.

pub mod api;
pub mod config;
pub mod export;
pub mod html_layout;
pub mod models;
pub mod renderers;
pub mod session;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod dom;

// Re-export commonly used types
pub use config::{AppConfig, ChartLabels, ConfigError};
pub use export::{ExportError, ExportHost, ExportOutcome, Exporter, MemoryHost};
pub use html_layout::{DisplayList, LayoutEngine};
pub use models::{CanvasFormat, CategoryDefinition, FormState, PixelSize};
pub use session::ChartSession;
pub use viewport::{fit_scale, RegionSize, ScaleController};

#[cfg(target_arch = "wasm32")]
pub use api::SizeChartApp;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        wasm_warn!("Logger already initialized: {}", err);
    }

    log::info!("Size chart WASM module initialized");
}
