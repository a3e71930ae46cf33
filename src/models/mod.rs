//! Models module for the size chart
//!
//! This module contains the data the layout and export pipeline read:
//! canvas formats, category definitions and the form state snapshot.

pub mod format;
pub mod category;
pub mod form_state;

// Re-export commonly used types
pub use format::{CanvasFormat, FormatOption, PixelSize};
pub use category::CategoryDefinition;
pub use form_state::{FormState, SizeSelection, DEFAULT_WEBSITE};
