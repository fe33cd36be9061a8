use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PosterError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PosterError::layout("x").to_string().contains("layout error:"));
    assert!(PosterError::render("x").to_string().contains("render error:"));
    assert!(PosterError::shader("x").to_string().contains("shader error:"));
    assert!(
        PosterError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(PosterError::io("x").to_string().contains("io error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PosterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
