use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RelicError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RelicError::malformed_bundle("x")
            .to_string()
            .contains("malformed bundle:")
    );
    assert!(
        RelicError::missing_descriptor("x")
            .to_string()
            .contains("missing descriptor:")
    );
    assert!(
        RelicError::packing_overflow("x")
            .to_string()
            .contains("packing overflow:")
    );
    assert!(
        RelicError::decode_failure("x")
            .to_string()
            .contains("decode failure:")
    );
    assert!(
        RelicError::external_tool("x")
            .to_string()
            .contains("external tool error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RelicError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
