use super::*;
use crate::foundation::core::Rgba8;
use crate::render::text::FixedAdvanceMeasure;

fn label(text: &str, x: f64, y: f64, font_size: u32) -> TextOverlay {
    TextOverlay {
        text: text.to_string(),
        x,
        y,
        font_size,
        color: Rgba8::WHITE,
    }
}

const CENTER: BoxGeometry = BoxGeometry {
    padding: 10.0,
    anchor: TextAnchor::Center,
};

#[test]
fn center_anchor_box_straddles_x_and_sits_on_baseline() {
    // "Hi" at 48px with 0.5em advance is 48px wide.
    let r = overlay_bounds(&label("Hi", 400.0, 225.0, 48), 48.0, CENTER);
    assert_eq!(r, Rect::new(366.0, 167.0, 434.0, 235.0));
}

#[test]
fn start_anchor_box_extends_right_of_x() {
    let geom = BoxGeometry {
        padding: 10.0,
        anchor: TextAnchor::Start,
    };
    let r = overlay_bounds(&label("Hi", 400.0, 225.0, 48), 48.0, geom);
    assert_eq!(r, Rect::new(390.0, 167.0, 458.0, 235.0));
}

#[test]
fn thumbnail_scenario_hits_and_misses() {
    let overlays = vec![label("Hi", 400.0, 225.0, 48)];
    let mut m = FixedAdvanceMeasure::default();
    assert_eq!(
        hit_test(Point::new(400.0, 210.0), &overlays, &mut m, CENTER),
        Some(0)
    );
    assert_eq!(
        hit_test(Point::new(10.0, 10.0), &overlays, &mut m, CENTER),
        None
    );
    assert_eq!(hit_test(Point::new(400.0, 210.0), &[], &mut m, CENTER), None);
}

#[test]
fn topmost_overlay_wins_where_boxes_overlap() {
    let overlays = vec![
        label("older label", 300.0, 200.0, 40),
        label("newer", 310.0, 205.0, 40),
        label("far away", 50.0, 50.0, 20),
    ];
    let mut m = FixedAdvanceMeasure::default();
    assert_eq!(
        hit_test(Point::new(305.0, 190.0), &overlays, &mut m, CENTER),
        Some(1)
    );
    // Only the older, wider label reaches this far left.
    assert_eq!(
        hit_test(Point::new(205.0, 190.0), &overlays, &mut m, CENTER),
        Some(0)
    );
}

#[test]
fn box_edges_are_inclusive() {
    let overlays = vec![label("Hi", 400.0, 225.0, 48)];
    let mut m = FixedAdvanceMeasure::default();
    assert_eq!(
        hit_test(Point::new(366.0, 167.0), &overlays, &mut m, CENTER),
        Some(0)
    );
    assert_eq!(
        hit_test(Point::new(434.0, 235.0), &overlays, &mut m, CENTER),
        Some(0)
    );
    assert_eq!(
        hit_test(Point::new(434.01, 235.0), &overlays, &mut m, CENTER),
        None
    );
}
