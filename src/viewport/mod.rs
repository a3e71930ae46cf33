//! Scale-to-fit preview support

pub mod observer;
pub mod scale;

pub use observer::{ManualRegion, RegionObserver, ResizeCallback, Subscription};
pub use scale::{fit_scale, DisplayTree, RegionSize, ScaleController, ViewTransform, REGION_MARGIN};
