//! Layout properties across categories, formats and selections

mod common;

use sizechart_wasm::html_layout::{class, BandKind, DisplayItem};
use sizechart_wasm::{CanvasFormat, LayoutEngine};

#[test]
fn test_logical_size_is_fixed_for_every_input() {
    let config = common::config();
    let engine = LayoutEngine::from_config(&config);
    let selections: [&[&str]; 4] = [&[], &["M"], &["S", "M", "L"], &["XS", "S", "M", "L", "XL", "XXL"]];

    for category in config.categories() {
        for sizes in selections {
            for format in CanvasFormat::ALL {
                let mut form = common::filled_form(&config, sizes);
                form.selected_category_id = category.id.clone();
                form.canvas_format = format;
                let list = engine.layout_for(&config, &form);

                assert_eq!(list.size(), format.size(), "{} {:?} {}", category.id, sizes, format);
                let bands: Vec<BandKind> = list.bands.iter().map(|b| b.kind).collect();
                assert_eq!(bands, vec![BandKind::Header, BandKind::Body, BandKind::Footer]);
                for item in list.items() {
                    let r = item.rect();
                    assert!(r.x >= 0.0 && r.y >= 0.0);
                    assert!(r.right() <= format.size().width as f32 + 0.01);
                    assert!(r.bottom() <= format.size().height as f32 + 0.01);
                }
            }
        }
    }
}

#[test]
fn test_zero_sizes_gives_placeholder_column_and_full_rows() {
    let config = common::config();
    let form = common::form(&config);
    let list = LayoutEngine::from_config(&config).layout_for(&config, &form);
    let measurements = &config.default_category().measurements;

    assert_eq!(list.texts_with_class(class::SIZE_PLACEHOLDER), vec!["Select a size"]);
    assert_eq!(list.texts_with_class(class::MEASURE_NAME), measurements.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(list.items_with_class(class::MEASURE_CELL).count(), measurements.len());
}

#[test]
fn test_size_columns_follow_selection_order() {
    let config = common::config();
    let mut form = common::form(&config);
    form.selected_sizes.insert("S");
    form.selected_sizes.insert("M");
    form.selected_sizes.insert("L");
    form.selected_sizes.insert("M");

    let list = LayoutEngine::from_config(&config).layout_for(&config, &form);
    assert_eq!(list.texts_with_class(class::SIZE_HEADER), vec!["S", "M", "L"]);
}

#[test]
fn test_missing_silhouette_shows_placeholder() {
    let config = common::config();
    let mut form = common::form(&config);
    form.selected_category_id = "dress".into();
    for format in CanvasFormat::ALL {
        form.canvas_format = format;
        let list = LayoutEngine::from_config(&config).layout_for(&config, &form);
        assert!(list.image_sources().is_empty());
        assert_eq!(list.texts_with_class(class::SILHOUETTE_EMPTY), vec!["No image"]);
    }
}

#[test]
fn test_layout_is_deterministic() {
    let config = common::config();
    let form = common::filled_form(&config, &["S", "M"]);
    let engine = LayoutEngine::from_config(&config);
    let a = engine.layout_for(&config, &form).to_json().unwrap();
    let b = engine.layout_for(&config, &form).to_json().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_display_list_json_shape() {
    let config = common::config();
    let form = common::form(&config);
    let list = LayoutEngine::from_config(&config).layout_for(&config, &form);
    let value: serde_json::Value = serde_json::from_str(&list.to_json().unwrap()).unwrap();

    assert_eq!(value["width"], 1200);
    assert_eq!(value["format"], "portrait");
    assert_eq!(value["background"], "#ffffff");
    let first = &value["bands"][0]["items"][0];
    assert_eq!(first["kind"], "box");
    assert_eq!(first["classes"][0], class::HEADER);
}

#[test]
fn test_landscape_fabric_grid_has_three_columns() {
    let config = common::config();
    let mut form = common::filled_form(&config, &["M"]);
    form.canvas_format = CanvasFormat::Landscape;
    let list = LayoutEngine::from_config(&config).layout_for(&config, &form);

    let values: Vec<&DisplayItem> = list.items_with_class(class::FABRIC_VALUE).collect();
    assert!(values.len() >= 3);
    let first_row_y = values[0].rect().y;
    let in_first_row = values.iter().filter(|v| v.rect().y == first_row_y).count();
    assert_eq!(in_first_row, 3);
}
