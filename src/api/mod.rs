//! Size chart WASM API
//!
//! - `helpers`: console logging macros, serde conversions, error mapping
//! - `app`: the `SizeChartApp` object (browser builds only)

pub mod helpers;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
pub use app::SizeChartApp;
