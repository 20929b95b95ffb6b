use siteconf_core::errors::{ExError, ExErrorKind, SiteConfigError};

#[test]
fn test_snapshot_not_found_verifiable_by_kind() {
    let ex_err: ExError = SiteConfigError::SnapshotNotFound { snapshot_id: 12 }.into();

    assert_eq!(ex_err.kind(), ExErrorKind::NotFound);
    assert_eq!(ex_err.code(), "ERR_NOT_FOUND");
    assert_eq!(ex_err.entity_id(), Some("12"));
    assert!(ex_err.is_not_found());
}

#[test]
fn test_kind_mismatch_is_malformed_id() {
    let ex_err: ExError = SiteConfigError::KindMismatch {
        id: "VXNlcjox".to_string(),
        expected: "SiteConfiguration".to_string(),
        found: "User".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::MalformedId);
    assert_eq!(ex_err.entity_id(), Some("VXNlcjox"));
    assert!(ex_err.message().contains("found User"));
}

#[test]
fn test_redaction_failure_names_location_only() {
    let ex_err: ExError = SiteConfigError::RedactionFailed {
        location: "auth.clientSecret".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::RedactionFailed);
    assert_eq!(ex_err.code(), "ERR_REDACTION_FAILED");
    assert!(ex_err.message().contains("auth.clientSecret"));
}

#[test]
fn test_invalid_pattern_is_config_error() {
    let ex_err: ExError = SiteConfigError::InvalidRedactionPattern {
        pattern: "(".to_string(),
        reason: "unclosed group".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidConfig);
}

#[test]
fn test_cancelled_carries_op() {
    let ex_err: ExError = SiteConfigError::Cancelled {
        op: "revision_history".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::Cancelled);
    assert_eq!(ex_err.op(), Some("revision_history"));
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        (ExErrorKind::MalformedId, "ERR_MALFORMED_ID"),
        (ExErrorKind::DiffDegraded, "ERR_DIFF_DEGRADED"),
        (ExErrorKind::RedactionFailed, "ERR_REDACTION_FAILED"),
        (ExErrorKind::Cancelled, "ERR_CANCELLED"),
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}
