use super::*;

#[test]
fn reset_returns_to_clean_state() {
    let mut g = Graphics::with_label("node-bg");
    g.x = 10.0;
    g.y = -4.0;
    g.set_scale(2.0);
    g.rotation = 1.0;
    g.alpha = 0.5;
    g.z_index = 7;
    g.visible = false;
    g.fill_circle(0.0, 0.0, 5.0, Rgb(0xFF0000), 1.0);

    g.reset();
    assert!(g.label.is_empty());
    assert_eq!(g.x, 0.0);
    assert_eq!(g.y, 0.0);
    assert_eq!(g.scale_x, 1.0);
    assert_eq!(g.scale_y, 1.0);
    assert_eq!(g.rotation, 0.0);
    assert_eq!(g.alpha, 1.0);
    assert_eq!(g.z_index, 0);
    assert!(g.visible);
    assert!(g.commands().is_empty());
}

#[test]
fn clear_keeps_transform() {
    let mut g = Graphics::new();
    g.x = 3.0;
    g.fill_rect(0.0, 0.0, 1.0, 1.0, Rgb::WHITE, 1.0);
    g.clear();
    assert!(g.commands().is_empty());
    assert_eq!(g.x, 3.0);
}

#[test]
fn transform_translates_then_scales() {
    let mut g = Graphics::new();
    g.x = 10.0;
    g.y = 20.0;
    g.scale_x = -1.0;
    let p = g.transform() * kurbo::Point::new(2.0, 0.0);
    assert!((p.x - 8.0).abs() < 1e-9);
    assert!((p.y - 20.0).abs() < 1e-9);
}

#[test]
fn helpers_record_expected_paints() {
    let mut g = Graphics::new();
    g.fill_circle(1.0, 2.0, 3.0, Rgb(0x112233), 0.5);
    g.stroke_circle(0.0, 0.0, 3.0, StrokeStyle::solid(Rgb::WHITE, 2.0));
    assert_eq!(g.commands().len(), 2);

    match &g.commands()[0] {
        DrawCmd::Circle {
            paint: Paint::Fill(f),
            ..
        } => {
            assert_eq!(f.color, Rgb(0x112233));
            assert_eq!(f.alpha, 0.5);
        }
        other => panic!("unexpected command {other:?}"),
    }
    match &g.commands()[1] {
        DrawCmd::Circle {
            paint: Paint::Stroke(s),
            ..
        } => assert_eq!(s.width, 2.0),
        other => panic!("unexpected command {other:?}"),
    }
}
