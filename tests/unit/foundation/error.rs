use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WaymarkError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(WaymarkError::scene("x").to_string().contains("scene error:"));
    assert!(WaymarkError::asset("x").to_string().contains("asset error:"));
    assert!(
        WaymarkError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WaymarkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
