use super::*;

fn style() -> StrokeStyle {
    StrokeStyle {
        color: Rgba8::rgb(255, 0, 0),
        width: 4.0,
    }
}

#[test]
fn add_appends_in_order_and_returns_index() {
    let mut m = OverlayModel::new();
    let a = m
        .add_text_overlay("first", 48, Rgba8::WHITE, Point::new(400.0, 225.0))
        .unwrap();
    let b = m
        .add_text_overlay("second", 24, Rgba8::BLACK, Point::new(1.0, 2.0))
        .unwrap();
    assert_eq!((a, b), (0, 1));
    assert_eq!(m.overlays()[0].text, "first");
    assert_eq!(m.overlays()[1].anchor(), Point::new(1.0, 2.0));
    assert!(m.take_render_request());
    assert!(!m.take_render_request());
}

#[test]
fn blank_text_is_rejected_without_mutation() {
    let mut m = OverlayModel::new();
    for text in ["", "   ", "\t\n"] {
        let err = m
            .add_text_overlay(text, 48, Rgba8::WHITE, Point::ZERO)
            .unwrap_err();
        assert!(matches!(err, ThumbError::InvalidInput(_)));
    }
    assert!(m.overlays().is_empty());
    assert!(!m.take_render_request());
}

#[test]
fn clear_all_empties_everything_regardless_of_count() {
    for n in [0usize, 1, 7, 50] {
        let mut m = OverlayModel::new();
        for i in 0..n {
            m.add_text_overlay(&format!("t{i}"), 20, Rgba8::WHITE, Point::ZERO)
                .unwrap();
        }
        if n > 0 {
            m.select(Some(n - 1));
        }
        m.begin_stroke(Point::ZERO, style());
        m.extend_stroke(Point::new(3.0, 3.0));
        m.seal_stroke();
        m.begin_stroke(Point::ZERO, style());

        m.clear_all();
        assert!(m.overlays().is_empty());
        assert!(m.strokes().is_empty());
        assert!(m.pending_stroke().is_none());
        assert_eq!(m.selected(), None);
    }
}

#[test]
fn move_overlay_changes_only_position() {
    let mut m = OverlayModel::new();
    m.add_text_overlay("Hi", 48, Rgba8::WHITE, Point::new(10.0, 10.0))
        .unwrap();
    let before = m.overlays()[0].clone();
    m.move_overlay(0, Point::new(99.5, 12.25));
    let after = &m.overlays()[0];
    assert_eq!(after.anchor(), Point::new(99.5, 12.25));
    assert_eq!(after.text, before.text);
    assert_eq!(after.font_size, before.font_size);
    assert_eq!(after.color, before.color);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "out of range")]
fn move_out_of_range_fails_loudly_in_debug() {
    let mut m = OverlayModel::new();
    m.move_overlay(3, Point::ZERO);
}

#[test]
fn select_none_deselects() {
    let mut m = OverlayModel::new();
    m.add_text_overlay("a", 12, Rgba8::WHITE, Point::ZERO).unwrap();
    m.select(Some(0));
    assert!(m.is_selected(0));
    m.select(None);
    assert_eq!(m.selected(), None);
}

#[test]
fn remove_overlay_keeps_selection_consistent() {
    let mut m = OverlayModel::new();
    for t in ["a", "b", "c"] {
        m.add_text_overlay(t, 12, Rgba8::WHITE, Point::ZERO).unwrap();
    }
    m.select(Some(2));
    assert_eq!(m.remove_overlay(0).unwrap().text, "a");
    assert_eq!(m.selected(), Some(1));
    assert_eq!(m.overlays()[1].text, "c");

    assert!(m.remove_overlay(1).is_some());
    assert_eq!(m.selected(), None);
    assert!(m.remove_overlay(5).is_none());
}

#[test]
fn edit_overlay_applies_partial_updates() {
    let mut m = OverlayModel::new();
    m.add_text_overlay("old", 48, Rgba8::WHITE, Point::new(5.0, 6.0))
        .unwrap();
    m.edit_overlay(
        0,
        OverlayEdit {
            text: Some("new".to_string()),
            color: Some(Rgba8::BLACK),
            ..OverlayEdit::default()
        },
    )
    .unwrap();
    let o = &m.overlays()[0];
    assert_eq!(o.text, "new");
    assert_eq!(o.color, Rgba8::BLACK);
    assert_eq!(o.font_size, 48);
    assert_eq!(o.anchor(), Point::new(5.0, 6.0));

    assert!(
        m.edit_overlay(
            0,
            OverlayEdit {
                text: Some(" ".to_string()),
                ..OverlayEdit::default()
            }
        )
        .is_err()
    );
    assert!(m.edit_overlay(9, OverlayEdit::default()).is_err());
    assert_eq!(m.overlays()[0].text, "new");
}

#[test]
fn strokes_record_points_and_seal_in_order() {
    let mut m = OverlayModel::new();
    assert!(!m.extend_stroke(Point::ZERO));

    m.begin_stroke(Point::new(1.0, 1.0), style());
    assert!(m.extend_stroke(Point::new(2.0, 2.0)));
    assert_eq!(m.seal_stroke(), Some(0));
    assert_eq!(m.seal_stroke(), None);

    m.begin_stroke(Point::new(5.0, 5.0), style());
    assert!(m.discard_pending_stroke());
    assert!(!m.discard_pending_stroke());

    assert_eq!(m.strokes().len(), 1);
    assert_eq!(
        m.strokes()[0].points(),
        &[Point::new(1.0, 1.0), Point::new(2.0, 2.0)]
    );
    assert_eq!(m.strokes()[0].style(), style());
}
