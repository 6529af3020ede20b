//! Database layer tests
//!
//! Each test initializes a fresh SQLite database in a temp directory and
//! exercises the marker queries directly.

use mapmark_common::db::models::{ListOptions, MarkerRecord, SortKey, SortOrder};
use mapmark_common::db::{
    self, delete_marker, get_marker, insert_marker, list_markers, update_marker,
};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn setup_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = db::init_database(&dir.path().join("mapmark.db"))
        .await
        .expect("Should initialize database");
    (dir, pool)
}

fn record(name: &str, importance: Option<i64>, remark: Option<&str>) -> MarkerRecord {
    MarkerRecord {
        name: name.to_string(),
        address: "123 St".to_string(),
        longitude: 116.397,
        latitude: 39.908,
        importance,
        remark: remark.map(str::to_string),
    }
}

#[tokio::test]
async fn insert_assigns_unique_stable_ids() {
    let (_dir, pool) = setup_db().await;

    let a = insert_marker(&pool, &record("A", None, None)).await.unwrap();
    let b = insert_marker(&pool, &record("B", None, None)).await.unwrap();
    assert_ne!(a.id, b.id);

    // Stable across subsequent reads
    let read_a = get_marker(&pool, a.id).await.unwrap().unwrap();
    assert_eq!(read_a.id, a.id);
    assert_eq!(read_a.name, "A");
}

#[tokio::test]
async fn insert_applies_defaults() {
    let (_dir, pool) = setup_db().await;

    let marker = insert_marker(&pool, &record("A", None, None)).await.unwrap();
    assert_eq!(marker.importance, 0);
    assert_eq!(marker.remark, None);
    assert_eq!(marker.created_at, marker.updated_at);
}

#[tokio::test]
async fn update_preserves_omitted_fields_and_advances_updated_at() {
    let (_dir, pool) = setup_db().await;

    let created = insert_marker(&pool, &record("A", Some(3), Some("keep me")))
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let updated = update_marker(&pool, created.id, &record("A renamed", None, None))
        .await
        .unwrap()
        .expect("Marker should exist");

    assert_eq!(updated.name, "A renamed");
    assert_eq!(updated.importance, 3);
    assert_eq!(updated.remark.as_deref(), Some("keep me"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(
        updated.updated_at > created.updated_at,
        "updated_at must advance strictly: {} vs {}",
        updated.updated_at,
        created.updated_at
    );
}

#[tokio::test]
async fn update_unknown_id_returns_none() {
    let (_dir, pool) = setup_db().await;

    let result = update_marker(&pool, 9999, &record("A", None, None))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn delete_removes_row() {
    let (_dir, pool) = setup_db().await;

    let marker = insert_marker(&pool, &record("A", None, None)).await.unwrap();

    assert!(delete_marker(&pool, marker.id).await.unwrap());
    assert!(get_marker(&pool, marker.id).await.unwrap().is_none());

    // Second delete of the same id is a miss
    assert!(!delete_marker(&pool, marker.id).await.unwrap());
}

#[tokio::test]
async fn search_matches_remark_only_substring() {
    let (_dir, pool) = setup_db().await;

    insert_marker(&pool, &record("Office", None, Some("Visit on Friday")))
        .await
        .unwrap();
    insert_marker(&pool, &record("Warehouse", None, None))
        .await
        .unwrap();

    let options = ListOptions {
        search: Some("friday".to_string()),
        ..Default::default()
    };
    let found = list_markers(&pool, &options).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Office");
}

#[tokio::test]
async fn search_is_case_insensitive_over_name() {
    let (_dir, pool) = setup_db().await;

    insert_marker(&pool, &record("Central Station", None, None))
        .await
        .unwrap();

    let options = ListOptions {
        search: Some("STATION".to_string()),
        ..Default::default()
    };
    let found = list_markers(&pool, &options).await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn importance_sort_directions_are_reversed() {
    let (_dir, pool) = setup_db().await;

    insert_marker(&pool, &record("low", Some(1), None)).await.unwrap();
    insert_marker(&pool, &record("high", Some(5), None)).await.unwrap();
    insert_marker(&pool, &record("mid", Some(3), None)).await.unwrap();

    let mut options = ListOptions {
        sort: Some(SortKey::Importance),
        order: SortOrder::Ascending,
        ..Default::default()
    };
    let ascending: Vec<String> = list_markers(&pool, &options)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(ascending, ["low", "mid", "high"]);

    options.order = SortOrder::Descending;
    let descending: Vec<String> = list_markers(&pool, &options)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(descending, ["high", "mid", "low"]);
}

#[tokio::test]
async fn sort_ties_break_by_store_order() {
    let (_dir, pool) = setup_db().await;

    let first = insert_marker(&pool, &record("B", Some(2), None)).await.unwrap();
    let second = insert_marker(&pool, &record("A", Some(2), None)).await.unwrap();

    let options = ListOptions {
        sort: Some(SortKey::Importance),
        order: SortOrder::Descending,
        ..Default::default()
    };
    let markers = list_markers(&pool, &options).await.unwrap();
    assert_eq!(markers[0].id, first.id);
    assert_eq!(markers[1].id, second.id);
}

#[tokio::test]
async fn unfiltered_list_is_store_order() {
    let (_dir, pool) = setup_db().await;

    insert_marker(&pool, &record("z", Some(9), None)).await.unwrap();
    insert_marker(&pool, &record("a", Some(1), None)).await.unwrap();

    let markers = list_markers(&pool, &ListOptions::default()).await.unwrap();
    let names: Vec<&str> = markers.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["z", "a"]);
}

#[tokio::test]
async fn init_database_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mapmark.db");

    let pool = db::init_database(&path).await.unwrap();
    insert_marker(&pool, &record("survivor", None, None)).await.unwrap();
    pool.close().await;

    // Re-opening must not clobber existing rows
    let pool = db::init_database(&path).await.unwrap();
    let markers = list_markers(&pool, &ListOptions::default()).await.unwrap();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].name, "survivor");
}
