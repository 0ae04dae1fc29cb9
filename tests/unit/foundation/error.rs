use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CrtError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CrtError::render("x").to_string().contains("render error:"));
    assert!(CrtError::encode("x").to_string().contains("encode error:"));
    assert!(
        CrtError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn io_errors_convert_with_prefix() {
    let err: CrtError = std::io::Error::other("disk full").into();
    assert!(matches!(err, CrtError::Io(_)));
    assert!(err.to_string().starts_with("io error:"));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CrtError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
