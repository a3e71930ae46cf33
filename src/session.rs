//! Chart session: form state, its layout and the preview scale
//!
//! Every form change re-runs layout synchronously, so the display list is
//! never behind the form. Format switches also recompute the scale from the
//! last measured region before returning.

use crate::config::AppConfig;
use crate::export::ExportJob;
use crate::html_layout::{DisplayList, LayoutEngine};
use crate::models::{CanvasFormat, CategoryDefinition, FormState};
use crate::viewport::{DisplayTree, RegionSize, ScaleController};

pub struct ChartSession {
    config: AppConfig,
    engine: LayoutEngine,
    form: FormState,
    list: DisplayList,
    scale: ScaleController,
}

impl ChartSession {
    /// Session with the initial form for `config`
    pub fn new(config: AppConfig) -> Self {
        let form = FormState::for_config(&config);
        Self::with_form(config, form)
    }

    pub fn with_form(config: AppConfig, form: FormState) -> Self {
        let engine = LayoutEngine::from_config(&config);
        let list = engine.layout_for(&config, &form);
        let scale = ScaleController::new(form.canvas_format);
        Self {
            config,
            engine,
            form,
            list,
            scale,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    pub fn format(&self) -> CanvasFormat {
        self.form.canvas_format
    }

    /// Active category (first category if the form names an unknown one)
    pub fn category(&self) -> &CategoryDefinition {
        self.config.category(&self.form.selected_category_id)
    }

    pub fn scale(&self) -> f64 {
        self.scale.scale()
    }

    pub fn display_tree(&self) -> DisplayTree {
        DisplayTree::new(self.list.clone(), self.scale.scale())
    }

    /// Replace the whole form state
    pub fn set_form(&mut self, form: FormState) {
        self.form = form;
        self.refresh();
    }

    /// Edit the form in place
    pub fn update(&mut self, edit: impl FnOnce(&mut FormState)) {
        edit(&mut self.form);
        self.refresh();
    }

    /// Switch format; returns the new scale
    pub fn set_format(&mut self, format: CanvasFormat) -> f64 {
        self.update(|form| form.canvas_format = format);
        self.scale.scale()
    }

    /// New region measurement from the observer; returns the new scale
    pub fn on_region_resize(&mut self, region: RegionSize) -> f64 {
        self.scale.on_resize(region)
    }

    /// Apply a startup logo unless the user already has one
    pub fn offer_default_logo(&mut self, logo: String) -> bool {
        let applied = self.form.offer_default_logo(logo);
        if applied {
            self.refresh();
        }
        applied
    }

    /// Snapshot of the current canvas for an export
    pub fn export_job(&self) -> ExportJob {
        ExportJob::for_form(self.list.clone(), &self.form, &self.category().id)
    }

    fn refresh(&mut self) {
        self.list = self.engine.layout_for(&self.config, &self.form);
        if self.scale.format() != self.form.canvas_format {
            self.scale.set_format(self.form.canvas_format);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::fit_scale;

    #[test]
    fn test_update_relayouts_immediately() {
        let mut session = ChartSession::new(AppConfig::builtin().unwrap());
        session.update(|form| form.model_code = "XY-9".into());
        assert_eq!(
            session.display_list().texts_with_class(crate::html_layout::class::MODEL_CODE),
            vec!["XY-9"]
        );
    }

    #[test]
    fn test_format_switch_updates_scale_synchronously() {
        let mut session = ChartSession::new(AppConfig::builtin().unwrap());
        let region = RegionSize::new(1400.0, 900.0);
        session.on_region_resize(region);

        let scale = session.set_format(CanvasFormat::Landscape);
        assert_eq!(scale, fit_scale(region, CanvasFormat::Landscape.size()));
        assert_eq!(session.display_list().size(), CanvasFormat::Landscape.size());
    }

    #[test]
    fn test_export_job_uses_resolved_category() {
        let mut session = ChartSession::new(AppConfig::builtin().unwrap());
        session.update(|form| form.selected_category_id = "unknown".into());
        assert_eq!(session.export_job().filename, "Size-Chart-tshirt-portrait.jpg");
    }
}
