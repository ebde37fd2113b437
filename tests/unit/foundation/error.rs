use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SnapError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SnapError::decode("x").to_string().contains("decode error:"));
    assert!(SnapError::render("x").to_string().contains("render error:"));
    assert!(SnapError::camera("x").to_string().contains("camera error:"));
    assert!(SnapError::export("x").to_string().contains("export error:"));
    assert!(
        SnapError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(SnapError::Cancelled.to_string(), "cancelled");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SnapError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn permission_denial_is_not_retryable() {
    assert!(!SnapError::CameraPermissionDenied("nope".into()).is_retryable());
    assert!(SnapError::camera("stalled").is_retryable());
    assert!(!SnapError::validation("bad").is_retryable());
}

#[test]
fn serde_json_errors_convert() {
    let err: SnapError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, SnapError::Serde(_)));
}
