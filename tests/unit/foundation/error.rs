use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PathflowError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PathflowError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        PathflowError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        PathflowError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PathflowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
