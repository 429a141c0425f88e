use std::io::Cursor;

use super::*;
use crate::assets::loader::ImageSource;
use crate::config::EditorConfig;
use crate::render::text::FixedAdvanceMeasure;

fn loaded_editor(w: u32, h: u32) -> Editor {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([20, 20, 20, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    let mut ed = Editor::with_measure(
        EditorConfig::default(),
        Box::new(FixedAdvanceMeasure::default()),
    )
    .unwrap();
    let ticket = ed
        .begin_load(ImageSource::File {
            name: "base.png".to_string(),
        })
        .unwrap();
    ed.complete_load(&ticket, &buf).unwrap();
    ed
}

#[test]
fn parses_every_op_kind() {
    let script = EditScript::from_json(
        br##"{
            "origin": [5, 5],
            "ops": [
                { "op": "set_container_width", "width": 400 },
                { "op": "add_text", "text": "Hi" },
                { "op": "add_text", "text": "Yo", "font_size": 30, "color": "#FFCC00" },
                { "op": "edit", "index": 0, "text": "Hey" },
                { "op": "mode", "mode": "draw" },
                { "op": "down", "x": 1, "y": 2 },
                { "op": "move", "x": 3, "y": 4 },
                { "op": "up" },
                { "op": "leave" },
                { "op": "select", "index": null },
                { "op": "remove", "index": 1 },
                { "op": "clear" }
            ]
        }"##,
    )
    .unwrap();
    assert_eq!(script.origin, [5.0, 5.0]);
    assert_eq!(script.ops.len(), 12);
    assert_eq!(
        script.ops[2],
        ScriptOp::AddText {
            text: "Yo".to_string(),
            font_size: Some(30),
            color: Some(Rgba8::rgb(0xFF, 0xCC, 0x00)),
        }
    );
    assert_eq!(script.ops[4], ScriptOp::Mode { mode: Mode::Draw });
    assert_eq!(script.ops[9], ScriptOp::Select { index: None });
}

#[test]
fn unknown_ops_and_fields_are_rejected() {
    assert!(EditScript::from_json(br#"{"ops":[{"op":"undo"}]}"#).is_err());
    assert!(EditScript::from_json(br#"{"ops":[], "speed": 2}"#).is_err());
    assert!(EditScript::from_json(br#"{"ops":[{"op":"down","x":1}]}"#).is_err());
    assert!(EditScript::from_json(br#"{"ops":[]} trailing"#).is_err());
}

#[test]
fn replays_a_drag_through_the_display_scale() {
    let mut ed = loaded_editor(800, 450);
    let script = EditScript::from_json(
        br#"{
            "origin": [10, 20],
            "ops": [
                { "op": "set_container_width", "width": 400 },
                { "op": "add_text", "text": "Hi" },
                { "op": "down", "x": 210, "y": 125 },
                { "op": "move", "x": 60, "y": 45 },
                { "op": "move", "x": 110, "y": 70 },
                { "op": "up" },
                { "op": "mode", "mode": "draw" },
                { "op": "down", "x": 10, "y": 20 },
                { "op": "move", "x": 20, "y": 30 },
                { "op": "leave" }
            ]
        }"#,
    )
    .unwrap();
    script.apply(&mut ed).unwrap();

    let overlay = &ed.model().overlays()[0];
    assert_eq!(overlay.anchor(), Point::new(200.0, 100.0));
    assert_eq!(ed.model().selected(), Some(0));
    assert_eq!(ed.model().strokes().len(), 1);
    assert_eq!(
        ed.model().strokes()[0].points(),
        &[Point::new(0.0, 0.0), Point::new(20.0, 20.0)]
    );
}

#[test]
fn out_of_range_index_is_invalid_input_with_step() {
    let mut ed = loaded_editor(100, 100);
    let script = EditScript::from_json(
        br#"{"ops":[{"op":"add_text","text":"a"},{"op":"select","index":3}]}"#,
    )
    .unwrap();
    let err = script.apply(&mut ed).unwrap_err();
    match err {
        ThumbError::InvalidInput(msg) => {
            assert!(msg.starts_with("script op 1:"), "{msg}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(ed.model().overlays().len(), 1);
    assert_eq!(ed.model().selected(), None);

    let remove = EditScript::from_json(br#"{"ops":[{"op":"remove","index":1}]}"#).unwrap();
    assert!(remove.apply(&mut ed).is_err());
}
