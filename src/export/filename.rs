//! Download file naming

use crate::models::CanvasFormat;

const PREFIX: &str = "Size-Chart";

/// Drop path separators; everything else is kept as typed
pub fn sanitize_component(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '/' | '\\')).collect()
}

/// `Size-Chart-<modelCode or categoryId>-<format>.jpg`
///
/// The model code is trimmed first; a blank model code falls back to the
/// category id.
pub fn export_filename(model_code: &str, category_id: &str, format: CanvasFormat) -> String {
    let code = model_code.trim();
    let stem = if code.is_empty() { category_id } else { code };
    format!("{}-{}-{}.jpg", PREFIX, sanitize_component(stem), format.as_str())
}
