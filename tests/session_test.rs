//! Session behaviour across form edits and format switches

mod common;

use sizechart_wasm::html_layout::class;
use sizechart_wasm::{CanvasFormat, ChartSession, RegionSize};

#[test]
fn test_format_round_trip_gives_identical_layout() {
    let config = common::config();
    let form = common::filled_form(&config, &["M", "L"]);
    let mut session = ChartSession::with_form(config, form);
    session.on_region_resize(RegionSize::new(900.0, 700.0));

    let before = session.display_list().to_json().unwrap();
    let scale_before = session.scale();

    session.set_format(CanvasFormat::Landscape);
    assert_eq!(session.display_list().format, CanvasFormat::Landscape);
    assert_ne!(session.display_list().to_json().unwrap(), before);

    session.set_format(CanvasFormat::Portrait);
    assert_eq!(session.display_list().to_json().unwrap(), before);
    assert_eq!(session.scale(), scale_before);
}

#[test]
fn test_edits_show_up_in_the_next_display_list() {
    let mut session = ChartSession::new(common::config());
    session.update(|form| {
        form.selected_sizes.insert("XL");
        form.selected_sizes.insert("S");
        form.model_code = "TS-01".to_string();
    });

    let list = session.display_list();
    assert_eq!(list.texts_with_class(class::SIZE_HEADER), vec!["XL", "S"]);
    assert_eq!(list.texts_with_class(class::MODEL_CODE), vec!["TS-01"]);
    assert_eq!(session.export_job().filename, "Size-Chart-TS-01-portrait.jpg");
}

#[test]
fn test_category_switch_replaces_rows() {
    let mut session = ChartSession::new(common::config());
    session.update(|form| form.selected_category_id = "pants".into());

    let expected: Vec<String> = session.category().measurements.clone();
    assert_eq!(session.category().id, "pants");
    assert_eq!(session.display_list().texts_with_class(class::MEASURE_NAME), expected);
}

#[test]
fn test_default_logo_only_when_none_chosen() {
    let mut session = ChartSession::new(common::config());
    assert!(session.offer_default_logo("data:image/png;base64,AAAA".to_string()));
    assert_eq!(session.display_list().items_with_class(class::LOGO).count(), 1);

    session.update(|form| form.logo = Some("data:image/png;base64,BBBB".to_string()));
    assert!(!session.offer_default_logo("data:image/png;base64,CCCC".to_string()));
    assert_eq!(session.form().logo(), Some("data:image/png;base64,BBBB"));
}
