use super::*;

#[test]
fn defaults_are_valid_and_match_the_editor_controls() {
    let cfg = EditorConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.default_font_size, 48);
    assert_eq!(cfg.font_size_range, [12, 120]);
    assert_eq!(cfg.default_text_color, Rgba8::WHITE);
    assert_eq!(cfg.text_anchor, TextAnchor::Center);
    assert_eq!(cfg.export_file_name, "thumbnail.png");
}

#[test]
fn partial_json_fills_in_defaults() {
    let cfg =
        EditorConfig::from_json_slice(br##"{"text_anchor":"start","stroke_color":"#00FF00"}"##)
            .unwrap();
    assert_eq!(cfg.text_anchor, TextAnchor::Start);
    assert_eq!(cfg.stroke_color, Rgba8::rgb(0, 255, 0));
    assert_eq!(cfg.default_font_size, 48);
}

#[test]
fn unknown_fields_and_bad_ranges_are_rejected() {
    assert!(EditorConfig::from_json_slice(br#"{"fontsize":3}"#).is_err());
    assert!(EditorConfig::from_json_slice(br#"{"font_size_range":[50,10]}"#).is_err());
    assert!(EditorConfig::from_json_slice(br#"{"hit_padding":-1.0}"#).is_err());
    assert!(EditorConfig::from_json_slice(br#"{"stroke_width":0.0}"#).is_err());
}

#[test]
fn font_size_clamps_into_range_and_rejects_zero() {
    let cfg = EditorConfig::default();
    assert_eq!(cfg.clamp_font_size(4).unwrap(), 12);
    assert_eq!(cfg.clamp_font_size(64).unwrap(), 64);
    assert_eq!(cfg.clamp_font_size(500).unwrap(), 120);
    assert!(cfg.clamp_font_size(0).is_err());
}
