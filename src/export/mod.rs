//! Fixed-resolution export
//!
//! Reproduces the logical canvas pixel for pixel as a JPEG, whatever the
//! preview scale or window size.

pub mod error;
pub mod filename;
pub mod memory;
pub mod pipeline;
pub mod state;
pub mod tree;

pub use error::{ErrorKind, ExportError};
pub use filename::{export_filename, sanitize_component};
pub use memory::{MemoryHost, MemorySurface};
pub use pipeline::{ExportHost, ExportOutcome, Exporter};
pub use state::{BusyGuard, ExportPhase};
pub use tree::{EncodedImage, ExportFile, ExportJob, ExportTree, RasterOptions, JPEG_MIME, JPEG_QUALITY};
