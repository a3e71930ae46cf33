//! Size chart layout engine
//!
//! Computes a DisplayList for one canvas format: every item positioned in
//! logical canvas pixels, with the classes and styles the DOM renderer and
//! the rasterizers need.

pub mod display_list;
pub mod document;
pub mod metrics;

mod body;
mod fabric;
mod footer;
mod header;
mod items;
mod panels;
mod table;

pub use body::{body_regions, BodyRegions};
pub use display_list::*;
pub use document::{LayoutContext, LayoutEngine};
pub use fabric::estimate_lines;
pub use metrics::LayoutMetrics;
