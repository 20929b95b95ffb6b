use proptest::prelude::*;
use siteconf_core::identity::{decode, encode, SITE_CONFIGURATION_KIND, USER_KIND};
use siteconf_core::SnapshotId;

proptest! {
    #[test]
    fn prop_decode_inverts_encode(raw in any::<i64>(), user in any::<bool>()) {
        let kind = if user { USER_KIND } else { SITE_CONFIGURATION_KIND };
        let opaque = encode(kind, raw);
        let (decoded_kind, decoded_raw) = decode(opaque.as_str()).unwrap();
        prop_assert_eq!(decoded_kind, kind);
        prop_assert_eq!(decoded_raw, raw);
    }

    #[test]
    fn prop_encoding_is_url_safe(raw in any::<i64>()) {
        let opaque = SnapshotId::new(raw).to_opaque();
        prop_assert!(opaque
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '='));
    }

    #[test]
    fn prop_decode_never_panics(input in ".{0,64}") {
        let _ = decode(&input);
    }
}
