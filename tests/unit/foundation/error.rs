use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RayframeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(RayframeError::scene("x").to_string().contains("scene error:"));
    assert!(
        RayframeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        RayframeError::memory("x")
            .to_string()
            .contains("memory error:")
    );
    assert!(
        RayframeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RayframeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
