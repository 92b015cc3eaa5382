#[test]
fn serialize_deserialize_export_settings() {
    let export_settings = mask_editor::ExportSettings::default();
    let serialized = serde_json::to_string(&export_settings).unwrap();
    let deserialized: mask_editor::ExportSettings = serde_json::from_str(&serialized).unwrap();
    assert_eq!(export_settings, deserialized);
}

#[test]
fn threshold_and_opacity_are_plain_numbers() {
    let settings: mask_editor::ExportSettings =
        serde_json::from_str(r#"{"mask_color": "red", "opacity": 0.5, "threshold": 127}"#).unwrap();
    assert_eq!(settings.overlay_color(), mask_editor::OverlayColor::rgb(255, 0, 0));
    assert_eq!(settings.opacity.get(), 0.5);
    assert_eq!(settings.threshold, mask_editor::Threshold::MID_RANGE);
}
