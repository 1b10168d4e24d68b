use super::*;

#[test]
fn viewport_rejects_zero_axes() {
    assert!(Viewport::new(0, 100).is_err());
    assert!(Viewport::new(100, 0).is_err());
    assert!(Viewport::new(390, 844).is_ok());
}

#[test]
fn rgb_channel_accessors() {
    let c = Rgb(0x4A7C3F);
    assert_eq!(c.r(), 0x4A);
    assert_eq!(c.g(), 0x7C);
    assert_eq!(c.b(), 0x3F);
}

#[test]
fn tint_scales_and_clamps() {
    // +10% red on a mid value.
    let c = Rgb(0x640000).tint(0.1, 0.0, 0.0);
    assert_eq!(c.r(), 110);

    // A large positive tint clamps at 255.
    let c = Rgb(0xFF0000).tint(0.5, 0.0, 0.0);
    assert_eq!(c.r(), 255);

    // A -100% tint clamps at 0.
    let c = Rgb(0x0000FF).tint(0.0, 0.0, -1.0);
    assert_eq!(c.b(), 0);
}

#[test]
fn with_alpha_quantizes() {
    assert_eq!(Rgb::WHITE.with_alpha(1.0), [255, 255, 255, 255]);
    assert_eq!(Rgb::BLACK.with_alpha(0.0), [0, 0, 0, 0]);
    let half = Rgb(0x102030).with_alpha(0.5);
    assert_eq!(half, [0x10, 0x20, 0x30, 128]);
}
