// Integration tests for history fixtures: parse, validate, import

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use siteconf_core::errors::ExErrorKind;
use siteconf_core::store::{PageDirection, SnapshotStore, UserDirectory};
use siteconf_core::{SnapshotId, UserId};
use siteconf_store::fixture::ImportedFixture;
use siteconf_store::{import_fixture, parse_fixture_file, parse_fixture_str};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_parse_small_history() {
    let fixture = parse_fixture_file(&fixtures_dir().join("history_small.yaml")).unwrap();

    assert_eq!(fixture.schema_version, 0);
    assert_eq!(fixture.users.len(), 2);
    assert_eq!(fixture.snapshots.len(), 4);
    assert_eq!(fixture.snapshots[0].author, None);
    assert_eq!(fixture.snapshots[1].author, Some(42));
}

#[test]
fn test_unknown_author_rejected() {
    let err = parse_fixture_file(&fixtures_dir().join("history_unknown_author.yaml")).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(err.message().contains("unknown author 99"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = parse_fixture_file(&fixtures_dir().join("does_not_exist.yaml")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
}

#[test]
fn test_duplicate_snapshot_ids_rejected() {
    let content = r#"
schema_version: 0
snapshots:
  - {id: 1, created_at: "2026-01-01T00:00:00Z", contents: "a: 1"}
  - {id: 1, created_at: "2026-01-02T00:00:00Z", contents: "a: 2"}
"#;
    let err = parse_fixture_str(content).unwrap_err();
    assert!(err.message().contains("Duplicate Snapshot id 1"));
}

#[test]
fn test_updated_before_created_rejected() {
    let content = r#"
schema_version: 0
snapshots:
  - id: 1
    created_at: "2026-01-02T00:00:00Z"
    updated_at: "2026-01-01T00:00:00Z"
    contents: "a: 1"
"#;
    let err = parse_fixture_str(content).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_unknown_fields_rejected() {
    let content = "schema_version: 0\nsnapshots: []\nrepositories: []\n";
    assert!(parse_fixture_str(content).is_err());
}

#[tokio::test]
async fn test_import_populates_collaborators() {
    let imported = ImportedFixture::load(&fixtures_dir().join("history_small.yaml"))
        .await
        .unwrap();

    assert_eq!(imported.snapshots.count().await.unwrap(), 4);

    let third = imported.snapshots.get_by_id(SnapshotId::new(3)).await.unwrap();
    assert_eq!(third.author(), UserId::new(7));
    assert!(third.updated_at() > third.created_at());

    let previous = imported
        .snapshots
        .get_previous(SnapshotId::new(3))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(previous.id(), SnapshotId::new(2));

    let ops = imported
        .users
        .get_user_by_id(UserId::new(42).unwrap())
        .await
        .unwrap();
    assert_eq!(ops.display_name.as_deref(), Some("Site Ops"));
}

#[tokio::test]
async fn test_import_preserves_out_of_order_ids() {
    let content = r#"
schema_version: 0
snapshots:
  - {id: 10, created_at: "2026-01-03T00:00:00Z", contents: "a: 3"}
  - {id: 2, created_at: "2026-01-01T00:00:00Z", contents: "a: 1"}
  - {id: 5, created_at: "2026-01-02T00:00:00Z", contents: "a: 2"}
"#;
    let imported = import_fixture(&parse_fixture_str(content).unwrap())
        .await
        .unwrap();

    let page = imported
        .snapshots
        .list_page(None, 10, PageDirection::Descending)
        .await
        .unwrap();
    let ids: Vec<i64> = page.snapshots.iter().map(|s| s.id().get()).collect();
    assert_eq!(ids, vec![10, 5, 2]);
}

#[tokio::test]
async fn test_load_from_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.yaml");
    std::fs::write(
        &path,
        "schema_version: 0\nsnapshots:\n  - {id: 1, created_at: \"2026-01-01T00:00:00Z\", contents: \"x: 1\"}\n",
    )
    .unwrap();

    let imported = ImportedFixture::load(&path).await.unwrap();
    assert_eq!(imported.snapshots.count().await.unwrap(), 1);
}
